mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands};
use doctext::{init_logging, Config, DocumentTextCache, TextractEngine};

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  init_logging(args.verbose);

  let mut config = Config::from_env();
  if let Some(cache_file) = args.cache_file {
    config.cache_file = cache_file;
  }
  if args.region.is_some() {
    config.region = args.region;
  }

  match args.command.unwrap_or(Commands::Lines { image: None }) {
    Commands::Version => {
      println!("doctext {}", env!("CARGO_PKG_VERSION"));
      Ok(())
    }
    Commands::Lines { image } => print_lines(&config, image).await,
    Commands::Analyze { image } => analyze(&config, &image).await,
  }
}

fn open_cache(config: &Config) -> DocumentTextCache<TextractEngine> {
  DocumentTextCache::new(TextractEngine::from_env(config.region.clone()), config)
}

async fn print_lines(config: &Config, image: Option<PathBuf>) -> Result<()> {
  let cache = open_cache(config);
  let lines = match image {
    Some(image) => cache.get_lines_for(&image).await?,
    None => cache.get_lines().await?,
  };

  if lines.is_empty() {
    println!("No text was extracted.");
  } else {
    println!("Lines extracted from the image:");
    for line in lines {
      println!("{}", line);
    }
  }
  Ok(())
}

async fn analyze(config: &Config, image: &Path) -> Result<()> {
  let cache = open_cache(config);
  cache
    .analyze(image)
    .await
    .with_context(|| format!("Failed to analyze {}", image.display()))?;
  println!("Response saved to {}", cache.cache_path().display());
  Ok(())
}
