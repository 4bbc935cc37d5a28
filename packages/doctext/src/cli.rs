//! Command line arguments backing the `doctext` binary.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "doctext",
  about = "Extract text lines from an image with cloud OCR, caching the raw response locally",
  version
)]
pub struct Args {
  /// Response cache file (overrides DOCTEXT_CACHE_FILE)
  #[arg(long, short = 'c', global = true)]
  pub cache_file: Option<PathBuf>,

  /// AWS region for the OCR service (overrides DOCTEXT_AWS_REGION)
  #[arg(long, global = true)]
  pub region: Option<String>,

  /// Enable debug logging
  #[arg(long, short = 'v', global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Print the text lines of the cached response, analyzing an image first if there is no cache
  Lines {
    /// Image to analyze when no cache exists (default: the bundled sample image)
    #[arg(long, short = 'i')]
    image: Option<PathBuf>,
  },
  /// Analyze an image and overwrite the cache with the new response
  Analyze {
    /// Image file to send to the OCR service
    image: PathBuf,
  },
}
