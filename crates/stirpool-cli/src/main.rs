//! CLI for stirpool — generate pool-stirred random bytes.

mod commands;
mod seed;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stirpool")]
#[command(about = "stirpool — continuously-stirred entropy pool")]
#[command(version = stirpool_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random bytes from a freshly seeded pool
    Generate {
        /// Number of bytes to produce
        #[arg(long, default_value_t = 32)]
        bytes: usize,

        /// Emit raw bytes instead of lowercase hex
        #[arg(long)]
        raw: bool,

        /// Write output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Seed file carried across runs: restored before seeding,
        /// refreshed afterwards
        #[arg(long)]
        seed_file: Option<PathBuf>,
    },

    /// Show pool constants and the built-in noise sources
    Info,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            bytes,
            raw,
            output,
            seed_file,
        } => commands::generate::run(bytes, raw, output.as_deref(), seed_file.as_deref()),
        Commands::Info => {
            commands::info::run();
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
