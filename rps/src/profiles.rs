//! Saved host groups: load/save a JSON mapping of profile name -> { hosts }.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/rps/profiles.json (fallback ~/.config/rps/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};
use tracing::debug;

pub const PROFILES_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileEntry {
    pub hosts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("rps")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rps")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

/// Missing or unreadable files count as "no profiles".
pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            debug!(path = %path.display(), error = %e, "ignoring unparsable profiles file");
            ProfilesFile::default()
        }),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no profiles file");
            ProfilesFile::default()
        }
    }
}

pub fn save_profiles(p: &ProfilesFile) -> anyhow::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p)?;
    fs::write(&path, data)?;
    debug!(path = %path.display(), "profiles saved");
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveHosts {
    /// Hosts given on the command line; `save` names the profile to record them under.
    Direct {
        hosts: Vec<String>,
        save: Option<SaveAction>,
    },
    /// Loaded from an existing profile
    Loaded(Vec<String>),
    /// Profile name given without hosts, and no such profile exists
    Unknown(String),
    /// Nothing to query
    None,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SaveAction {
    /// Profile does not exist yet
    Create(String),
    /// Profile exists with different hosts and --save was given
    Overwrite(String),
    /// Profile exists with different hosts; left untouched
    Conflict(String),
}

pub struct HostsRequest {
    pub profile_name: Option<String>,
    pub hosts: Vec<String>,
    pub save: bool,
}

impl HostsRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveHosts {
        match (self.profile_name, self.hosts.is_empty()) {
            (Some(name), true) => match pf.profiles.get(&name) {
                Some(entry) if !entry.hosts.is_empty() => ResolveHosts::Loaded(entry.hosts.clone()),
                _ => ResolveHosts::Unknown(name),
            },
            (Some(name), false) => {
                let save = match pf.profiles.get(&name) {
                    None => Some(SaveAction::Create(name)),
                    Some(entry) if entry.hosts == self.hosts => None,
                    Some(_) if self.save => Some(SaveAction::Overwrite(name)),
                    Some(_) => Some(SaveAction::Conflict(name)),
                };
                ResolveHosts::Direct {
                    hosts: self.hosts,
                    save,
                }
            }
            (None, false) => ResolveHosts::Direct {
                hosts: self.hosts,
                save: None,
            },
            (None, true) => ResolveHosts::None,
        }
    }
}
