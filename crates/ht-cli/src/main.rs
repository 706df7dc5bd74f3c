//! CLI frontend for Hearthtale, a tabletop adventure narrated by a language model.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use ht_narrator::{ApiFlavor, ExampleStyle, NarratorConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "hearthtale",
    about = "Hearthtale: a tabletop adventure narrated by a language model",
    version,
    propagate_version = true
)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding save files
    #[arg(long, global = true, default_value = "saves")]
    saves: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a character and start a new adventure
    New {
        /// Dice seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        narrator: NarratorArgs,
    },

    /// Continue a saved adventure
    Resume {
        /// Session id, or a path to a save file
        id: String,

        /// Dice seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        narrator: NarratorArgs,
    },

    /// List saved sessions
    Sessions,

    /// Show the character sheet from a saved session
    Sheet {
        /// Session id, or a path to a save file
        id: String,
    },

    /// Roll dice, e.g. `2d6+3`
    Roll {
        /// Dice notation
        notation: String,

        /// Dice seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check that the narrator endpoint answers
    Ping {
        #[command(flatten)]
        narrator: NarratorArgs,
    },
}

/// Flags shared by every command that talks to the narrator.
#[derive(Args)]
struct NarratorArgs {
    /// Narrator endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// Speak the chat-completions protocol instead of generate
    #[arg(long)]
    chat: bool,

    /// Wait for the whole reply instead of streaming it
    #[arg(long)]
    no_stream: bool,

    /// Attempts per narrator request
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Tone example for the narrator (shop, food, merchant)
    #[arg(long)]
    example: Option<ExampleStyle>,
}

impl NarratorArgs {
    /// Environment defaults overlaid with flags.
    fn config(&self) -> NarratorConfig {
        let mut config = NarratorConfig::from_env().with_stream(!self.no_stream);
        if self.chat {
            config = config.with_flavor(ApiFlavor::ChatCompletions);
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        if let Some(attempts) = self.max_attempts {
            config = config.with_max_attempts(attempts);
        }
        if let Some(example) = self.example {
            config = config.with_example(example);
        }
        config
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let saves = cli.saves;
    let result = match cli.command {
        Commands::New { seed, narrator } => commands::new::run(&saves, seed, narrator.config()),
        Commands::Resume { id, seed, narrator } => {
            commands::resume::run(&saves, &id, seed, narrator.config())
        }
        Commands::Sessions => commands::sessions::run(&saves),
        Commands::Sheet { id } => commands::sheet::run(&saves, &id),
        Commands::Roll { notation, seed } => commands::roll::run(&notation, seed),
        Commands::Ping { narrator } => commands::ping::run(narrator.config()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
