//! Grid Builder CLI
//!
//! CSV → xT grid JSON export builder, plus export verification.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "grid_builder")]
#[command(about = "Build and verify expected-threat grid exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build a JSON export from an 8x12 CSV of threat values
    Csv {
        /// Input CSV file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output JSON file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version (e.g. "v1")
        #[arg(long, default_value = "v1")]
        schema_version: String,

        /// Verify the export after building
        #[arg(long, default_value = "false")]
        verify: bool,
    },

    /// Re-validate an existing JSON export
    Verify {
        /// Export JSON file path
        #[arg(long)]
        r#in: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Csv { r#in, out, schema_version, verify } => {
            let metadata = grid_builder::build_grid(&r#in, &out, &schema_version)?;
            println!("Built {} ({})", out.display(), metadata.schema_version);
            println!(
                "  cells: min {:.5}, max {:.5}, mean {:.5}",
                metadata.min_value, metadata.max_value, metadata.mean_value
            );
            if verify {
                grid_builder::verify_grid(&out)?;
                println!("  verify: OK");
            }
        }
        Commands::Verify { r#in } => {
            let metadata = grid_builder::verify_grid(&r#in)?;
            println!("Export {} is valid ({})", r#in.display(), metadata.schema_version);
            println!(
                "  cells: min {:.5}, max {:.5}, mean {:.5}",
                metadata.min_value, metadata.max_value, metadata.mean_value
            );
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("grid_builder was built without the `cli` feature");
}
