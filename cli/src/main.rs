mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::Level;

#[derive(Parser)]
#[command(name = "oracle")]
#[command(version)]
#[command(about = "Generate and check bit-exact PRNG / fixed-point reference values", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the reference document
    Generate {
        /// Scenario configuration (JSON); defaults to the standard reference set
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit compact JSON instead of indented
        #[arg(long)]
        compact: bool,
    },
    /// Compare a candidate document against freshly generated values
    Verify {
        candidate: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the SHA256 fingerprint of the reference document
    Fingerprint {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the default scenario configuration
    DefaultConfig,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            config,
            output,
            compact,
        } => commands::generate(config.as_deref(), output.as_deref(), compact),
        Commands::Verify { candidate, config } => {
            commands::verify(&candidate, config.as_deref()).map(|conforms| {
                if !conforms {
                    process::exit(2);
                }
            })
        }
        Commands::Fingerprint { config } => commands::fingerprint(config.as_deref()),
        Commands::DefaultConfig => commands::default_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
