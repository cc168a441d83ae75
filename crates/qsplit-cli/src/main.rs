//! CLI for qsplit: split the universe from your terminal.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qsplit")]
#[command(about = "qsplit — quantum randomness from many beacons, mixed into one value")]
#[command(version = qsplit_core::VERSION)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "QSPLIT_CONFIG")]
    config: Option<PathBuf>,

    /// Store file (overrides `[store] path`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the enabled randomness sources
    Sources,

    /// Run one source round and store the combined value
    Refresh,

    /// Print the stored combined value
    Latest,

    /// Print the status report of the last round
    Status,

    /// Pick one of 2-20 options
    Choose {
        /// Options to choose from
        #[arg(required = true, num_args = 2..=20)]
        options: Vec<String>,

        /// What the decision is about
        #[arg(long)]
        description: Option<String>,
    },

    /// Ask the Magic 8-Ball
    Eightball {
        /// Yes/no question
        question: Option<String>,
    },

    /// Random integer in [min, max]
    Number {
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        min: i64,

        #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
        max: i64,
    },

    /// Flip a coin
    Coin,

    /// Cast an I Ching hexagram
    Iching {
        question: Option<String>,
    },

    /// Draw a five-card tarot spread
    Tarot {
        question: Option<String>,
    },

    /// Start the HTTP server
    Server {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8042)]
        port: u16,

        /// Run a source round every N seconds in the background
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        refresh_every: Option<u64>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref(), cli.store.as_deref());
    let json = cli.json;

    match cli.command {
        Commands::Sources => commands::sources::run(&config, json),
        Commands::Refresh => commands::refresh::run(&config, json),
        Commands::Latest => commands::refresh::latest(&config, json),
        Commands::Status => commands::refresh::status(&config, json),
        Commands::Choose {
            options,
            description,
        } => commands::oracle::choose(&config, options, description, json),
        Commands::Eightball { question } => commands::oracle::eightball(&config, question, json),
        Commands::Number { min, max } => commands::oracle::number(&config, min, max, json),
        Commands::Coin => commands::oracle::coin(&config, json),
        Commands::Iching { question } => commands::oracle::iching(&config, question, json),
        Commands::Tarot { question } => commands::oracle::tarot(&config, question, json),
        Commands::Server {
            host,
            port,
            refresh_every,
        } => commands::server::run(&config, &host, port, refresh_every),
    }
}
