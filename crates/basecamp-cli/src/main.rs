use anyhow::Result;
use basecamp_cli::{GlobalOptions, commands};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "waybar-basecamp")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Show unread Basecamp notifications in Waybar",
    long_about = "Reuses the session cookies of a local Chrome profile to poll Basecamp for \
                  unread notifications and writes a Waybar custom-module status file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    global: GlobalOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose the browser profile and Basecamp account to use
    Setup,

    /// Poll Basecamp once and publish the status file
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match cli.command {
        Commands::Setup => {
            commands::setup::execute(&cli.global.settings()?, &cli.global.locator())
        }
        Commands::Check => commands::check::execute(&cli.global),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(
            "waybar_basecamp=debug,basecamp_cli=debug,basecamp_core=debug,\
             basecamp_browser=debug,basecamp_poller=debug",
        )
    } else {
        EnvFilter::new("waybar_basecamp=info,basecamp_cli=info,basecamp_browser=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
