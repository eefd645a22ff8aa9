//! Controlling-terminal device numbers to the names `ps` prints in the TTY column.
//!
//! The device number is the kernel's packed `dev_t`: major in bits 8..20,
//! minor split across bits 0..8 and 20..32.

/// Printed when there is no terminal or the device is not one we can name.
pub const NO_TTY: &str = "?";

/// How a terminal major number turns its minor into a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Naming {
    /// `prefix` followed by `minor + shift` in decimal.
    Decimal { prefix: &'static str, shift: u64 },
    /// Legacy BSD pty slaves, `ttyp0` through `ttyef`.
    BsdPty,
    /// Virtual consoles below minor `split`, serial ports from there on.
    ConsoleOrSerial { split: u64 },
    /// Unix98 pty slaves; each major starting at `base` holds 256 of them.
    Pts { base: u64 },
    /// Sparse allocation of small serial drivers, one name per minor.
    LowDensity,
}

const fn dec(prefix: &'static str) -> Option<Naming> {
    Some(Naming::Decimal { prefix, shift: 0 })
}

fn naming(major: u64) -> Option<Naming> {
    match major {
        3 => Some(Naming::BsdPty),
        4 => Some(Naming::ConsoleOrSerial { split: 64 }),
        11 => dec("ttyB"),
        17 => dec("ttyH"),
        19 => dec("ttyC"),
        22 | 23 => dec("ttyD"),
        24 => dec("ttyE"),
        32 => dec("ttyX"),
        43 => dec("ttyI"),
        46 => dec("ttyR"),
        48 => dec("ttyL"),
        57 => dec("ttyP"),
        71 => dec("ttyF"),
        75 => dec("ttyW"),
        78 | 112 => dec("ttyM"),
        105 => dec("ttyV"),
        136..=143 => Some(Naming::Pts { base: 136 }),
        148 => dec("ttyT"),
        154 => dec("ttySR"),
        156 => Some(Naming::Decimal {
            prefix: "ttySR",
            shift: 256,
        }),
        164 => dec("ttyCH"),
        166 => dec("ttyACM"),
        172 => dec("ttyMX"),
        174 => dec("ttySI"),
        188 => dec("ttyUSB"),
        204 => Some(Naming::LowDensity),
        208 => dec("ttyU"),
        216 => dec("ttyUB"),
        224 => dec("ttyY"),
        227 => dec("3270/tty"),
        229 => dec("iseries/vtty"),
        256 => dec("ttyEQ"),
        _ => None,
    }
}

const BSD_PTY_MAJOR: &[u8; 16] = b"pqrstuvwxyzabcde";
const BSD_PTY_MINOR: &[u8; 16] = b"0123456789abcdef";

/// Names under major 204, indexed by minor. Every entry gets a `tty` prefix.
// "xvc0" (minor 191) lives at /dev/xvc0 without the prefix, and CPM4/CPM5
// are absent so IOC0 sits at minor 50. Both kept as published.
#[rustfmt::skip]
const LOW_DENSITY: [&str; 212] = [
    "LU0", "LU1", "LU2", "LU3",
    "FB0",
    "SA0", "SA1", "SA2",
    "SC0", "SC1", "SC2", "SC3",
    "FW0", "FW1", "FW2", "FW3",
    "AM0", "AM1", "AM2", "AM3", "AM4", "AM5", "AM6", "AM7",
    "AM8", "AM9", "AM10", "AM11", "AM12", "AM13", "AM14", "AM15",
    "DB0", "DB1", "DB2", "DB3", "DB4", "DB5", "DB6", "DB7",
    "SG0",
    "SMX0", "SMX1", "SMX2",
    "MM0", "MM1",
    "CPM0", "CPM1", "CPM2", "CPM3",
    "IOC0", "IOC1", "IOC2", "IOC3", "IOC4", "IOC5", "IOC6", "IOC7",
    "IOC8", "IOC9", "IOC10", "IOC11", "IOC12", "IOC13", "IOC14", "IOC15",
    "IOC16", "IOC17", "IOC18", "IOC19", "IOC20", "IOC21", "IOC22", "IOC23",
    "IOC24", "IOC25", "IOC26", "IOC27", "IOC28", "IOC29", "IOC30", "IOC31",
    "VR0", "VR1",
    "IOC84", "IOC85", "IOC86", "IOC87", "IOC88", "IOC89", "IOC90", "IOC91",
    "IOC92", "IOC93", "IOC94", "IOC95", "IOC96", "IOC97", "IOC98", "IOC99",
    "IOC100", "IOC101", "IOC102", "IOC103", "IOC104", "IOC105", "IOC106", "IOC107",
    "IOC108", "IOC109", "IOC110", "IOC111", "IOC112", "IOC113", "IOC114", "IOC115",
    "SIOC0", "SIOC1", "SIOC2", "SIOC3", "SIOC4", "SIOC5", "SIOC6", "SIOC7",
    "SIOC8", "SIOC9", "SIOC10", "SIOC11", "SIOC12", "SIOC13", "SIOC14", "SIOC15",
    "SIOC16", "SIOC17", "SIOC18", "SIOC19", "SIOC20", "SIOC21", "SIOC22", "SIOC23",
    "SIOC24", "SIOC25", "SIOC26", "SIOC27", "SIOC28", "SIOC29", "SIOC30", "SIOC31",
    "PSC0", "PSC1", "PSC2", "PSC3", "PSC4", "PSC5",
    "AT0", "AT1", "AT2", "AT3", "AT4", "AT5", "AT6", "AT7",
    "AT8", "AT9", "AT10", "AT11", "AT12", "AT13", "AT14", "AT15",
    "NX0", "NX1", "NX2", "NX3", "NX4", "NX5", "NX6", "NX7",
    "NX8", "NX9", "NX10", "NX11", "NX12", "NX13", "NX14", "NX15",
    "J0",
    "UL0", "UL1", "UL2", "UL3",
    "xvc0",
    "PZ0", "PZ1", "PZ2", "PZ3",
    "TX0", "TX1", "TX2", "TX3", "TX4", "TX5", "TX6", "TX7",
    "SC0", "SC1", "SC2", "SC3",
    "MAX0", "MAX1", "MAX2", "MAX3",
];

/// Split a packed device number into (major, minor).
pub fn split_dev(dev: u64) -> (u64, u64) {
    let major = (dev >> 8) & 0xfff;
    let minor = (dev & 0xff) | ((dev & 0xfff0_0000) >> 12);
    (major, minor)
}

impl Naming {
    fn render(self, major: u64, minor: u64) -> Option<String> {
        match self {
            Naming::Decimal { prefix, shift } => Some(format!("{prefix}{}", minor + shift)),
            Naming::BsdPty => {
                if minor > 0xff {
                    return None;
                }
                let hi = BSD_PTY_MAJOR[(minor >> 4) as usize] as char;
                let lo = BSD_PTY_MINOR[(minor & 0x0f) as usize] as char;
                Some(format!("tty{hi}{lo}"))
            }
            Naming::ConsoleOrSerial { split } => Some(if minor < split {
                format!("tty{minor}")
            } else {
                format!("ttyS{}", minor - split)
            }),
            Naming::Pts { base } => Some(format!("pts/{}", minor + (major - base) * 256)),
            Naming::LowDensity => usize::try_from(minor)
                .ok()
                .and_then(|i| LOW_DENSITY.get(i))
                .map(|name| format!("tty{name}")),
        }
    }
}

/// Resolve the TTY column for a raw `tty_nr` value.
///
/// Total: unknown majors and out-of-range minors come back as [`NO_TTY`].
pub fn resolve(tty_nr: i64) -> String {
    if tty_nr == 0 {
        return NO_TTY.to_string();
    }
    // Reinterpret the bits; negative values just land on unknown majors.
    let (major, minor) = split_dev(tty_nr as u64);
    naming(major)
        .and_then(|n| n.render(major, minor))
        .unwrap_or_else(|| NO_TTY.to_string())
}
