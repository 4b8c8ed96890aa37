//! funcbridge CLI - decode function host invocation envelopes.

use clap::{Parser, Subcommand, ValueEnum};
use funcbridge_triggers::TriggerKind;

mod commands;
mod input;
mod logging;
mod output;

use commands::{decode, form, parse};

#[derive(Parser)]
#[command(name = "funcbridge")]
#[command(about = "Decode function host invocation envelopes into typed triggers")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    /// HTTP trigger (binding name "req")
    Http,
    /// Timer trigger (binding name "timer")
    Timer,
    /// Any other trigger, decoded generically
    Base,
}

impl From<Kind> for TriggerKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Http => TriggerKind::Http,
            Kind::Timer => TriggerKind::Timer,
            Kind::Base => TriggerKind::Base,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an envelope and print the typed trigger
    Decode {
        /// Trigger kind
        kind: Kind,
        /// Envelope file (or stdin if not provided)
        input: Option<String>,
        /// Binding name to decode from Data
        #[arg(long)]
        name: Option<String>,
        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the URL-encoded form data of an HTTP envelope
    Form {
        /// Envelope file (or stdin if not provided)
        input: Option<String>,
        /// Binding name to decode from Data
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the trigger payload parsed as JSON
    Parse {
        /// Trigger kind
        kind: Kind,
        /// Envelope file (or stdin if not provided)
        input: Option<String>,
        /// Binding name to decode from Data
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            kind,
            input,
            name,
            compact,
        } => decode::run(kind.into(), input, name, compact),
        Commands::Form { input, name } => form::run(input, name),
        Commands::Parse { kind, input, name } => parse::run(kind.into(), input, name),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
