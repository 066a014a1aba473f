use clap::Parser;
use std::path::PathBuf;

/// Returns the version string, including the git hash for non-release builds.
/// Format for releases: "v0.1.0"
/// Format for dev builds: "v0.1.0 (dev abc1234)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev {})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "modparm",
    bin_name = "modparm",
    version = get_version(),
    after_help = "Keys: 0-f select, r toggle input radix, q back/quit.\nIn a bitmask editor: 0-7 toggle bit, v enter value."
)]
#[command(about = "Browse and edit kernel module parameters", long_about = None)]
pub struct Cli {
    /// Read parameters from DIR/module/<name>/parameters instead of the configured root
    #[arg(long, value_name = "DIR", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Use the home directory as root (test layout ~/module/<name>/parameters)
    #[arg(short, long, conflicts_with = "root", help_heading = "Options")]
    pub test: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, help_heading = "Options")]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
