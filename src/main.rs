//! dbforge - Main entry point.

use clap::Parser;
use dbforge::commands::{MakeOptions, make_files};
use dbforge::config::{Cli, Command};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> dbforge::DbResult<()> {
    match cli.command {
        Command::Make(args) => {
            let options = MakeOptions {
                create: args.create,
                object_name: args.object_name.clone(),
            };
            let files = make_files(&args.migration_dir, &args.name, args.file_type, &options)?;
            for filename in files {
                println!("Created {}", filename);
            }
            Ok(())
        }
    }
}
