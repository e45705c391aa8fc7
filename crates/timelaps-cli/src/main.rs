use clap::{Parser, Subcommand};
use timelaps_core::{format, Config};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod terminal;

#[derive(Parser)]
#[command(name = "timelaps-cli", version, about = "Time Laps countdown timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one countdown and record it
    Run(commands::run::RunArgs),
    /// Interactive session with countdowns and the journal
    Session(commands::session::SessionArgs),
    /// List countdown presets
    Presets(commands::presets::PresetsArgs),
    /// Print a number of seconds as the MM:SS countdown display
    Format {
        /// Seconds
        secs: u64,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TIMELAPS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => {
            let config = Config::load_or_default();
            commands::run::run(args, &config).await
        }
        Commands::Session(args) => {
            let config = Config::load_or_default();
            commands::session::run(args, &config).await
        }
        Commands::Presets(args) => commands::presets::run(args, &Config::load_or_default()),
        Commands::Format { secs } => {
            println!("{}", format::countdown(secs));
            Ok(())
        }
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
