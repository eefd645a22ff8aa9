//! Entry point for rps. Parses args, resolves the host list and prints the report.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::{CommandFactory, Parser};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use rps::agent::AgentClient;
use rps::profiles::{
    load_profiles, save_profiles, HostsRequest, ProfileEntry, ResolveHosts, SaveAction,
    PROFILES_VERSION,
};
use rps::report;

// Usage errors and --help exit with this, as do failed hosts.
const EXIT_ERR: u8 = 1;

/// Remote ps: list the processes of hosts running an rps agent.
#[derive(Parser, Debug)]
#[command(name = "rps", disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Connect remote hosts (comma-separated HOST[:PORT])
    #[arg(short = 'H', long)]
    hosts: Option<String>,

    /// Use a saved host group; with --hosts, record the hosts under this name
    #[arg(short = 'P', long, value_name = "NAME")]
    profile: Option<String>,

    /// Overwrite an existing profile that lists different hosts
    #[arg(long)]
    save: bool,

    /// Maximum number of agents queried at once
    #[arg(short, long, default_value_t = report::DEFAULT_JOBS)]
    jobs: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "RPS_TIMEOUT", default_value_t = 10, value_name = "SECS")]
    timeout: u64,

    /// show this help message and exit
    #[arg(short, long)]
    help: bool,

    /// prints the version number
    #[arg(short, long)]
    version: bool,
}

/// Logs go to stderr so stdout carries only the report. Filter via RPS_LOG.
fn init_logging() {
    let filter = EnvFilter::try_from_env("RPS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn print_help() {
    let mut cmd = Args::command();
    println!("{}", cmd.render_help());
}

fn resolve_hosts(args: &Args) -> anyhow::Result<Option<Vec<String>>> {
    let profiles = load_profiles();
    let req = HostsRequest {
        profile_name: args.profile.clone(),
        hosts: args
            .hosts
            .as_deref()
            .map(report::parse_hosts)
            .unwrap_or_default(),
        save: args.save,
    };

    match req.resolve(&profiles) {
        ResolveHosts::Direct { hosts, save } => {
            match save {
                Some(SaveAction::Create(name)) | Some(SaveAction::Overwrite(name)) => {
                    let mut profiles = profiles;
                    profiles.version = PROFILES_VERSION;
                    profiles.profiles.insert(
                        name,
                        ProfileEntry {
                            hosts: hosts.clone(),
                        },
                    );
                    save_profiles(&profiles).context("saving profiles")?;
                }
                Some(SaveAction::Conflict(name)) => {
                    warn!(profile = %name, "profile lists different hosts; pass --save to overwrite it");
                }
                None => {}
            }
            Ok(Some(hosts))
        }
        ResolveHosts::Loaded(hosts) => Ok(Some(hosts)),
        ResolveHosts::Unknown(name) => anyhow::bail!("unknown profile '{name}'"),
        ResolveHosts::None => Ok(None),
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let Some(hosts) = resolve_hosts(&args)? else {
        eprintln!("host required");
        print_help();
        return Ok(ExitCode::from(EXIT_ERR));
    };
    debug!(hosts = hosts.len(), jobs = args.jobs, "querying agents");

    let client = AgentClient::new(Duration::from_secs(args.timeout))
        .context("building HTTP client")?;
    let now = Local::now();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    report::run(&mut out, &hosts, args.jobs, &now, |host| {
        let client = client.clone();
        async move { client.fetch(&host).await }
    })
    .await?;
    out.flush().map_err(rps::Error::from)?;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args = match Args::try_parse() {
        Ok(v) => v,
        Err(e) => {
            eprint!("{e}");
            print_help();
            return ExitCode::from(EXIT_ERR);
        }
    };
    if args.help {
        print_help();
        return ExitCode::from(EXIT_ERR);
    }
    if args.version {
        eprintln!("rps version {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            // Host errors already name the host; anything else gets its cause chain.
            match e.downcast_ref::<rps::Error>() {
                Some(err) if err.is_broken_pipe() => {
                    debug!("stdout closed by reader");
                    return ExitCode::SUCCESS;
                }
                Some(err) => eprintln!("{err}"),
                None => eprintln!("{e:#}"),
            }
            ExitCode::from(EXIT_ERR)
        }
    }
}
