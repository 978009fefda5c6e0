use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use litesearch::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Instant search over a static site's JSON index
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Options file (.toml or .json) merged over the defaults
  #[arg(long, short, global = true, env = "LITESEARCH_CONFIG")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Run one query against an index and print the result list
  Search {
    /// The text typed into the search box
    query: String,
    /// Index location (URL or file); overrides `data_path`
    #[arg(long, short)]
    data: Option<String>,
    /// Match strategy; overrides `match_strategy`
    #[arg(long, short)]
    strategy: Option<MatchStrategy>,
    /// Output format
    #[arg(long, short, value_enum, default_value_t = Format::Html)]
    format: Format,
  },
  /// Print the resolved configuration as JSON
  Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
  /// The result list markup
  Html,
  /// Display records as JSON
  Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let args = Args::parse();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .init();

  let mut config = match &args.config {
    Some(path) => SearchConfig::from_file(path)
      .with_context(|| format!("failed to load config from {}", path.display()))?,
    None => SearchConfig::default(),
  };

  match args.command {
    Commands::Config => {
      println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Commands::Search {
      query,
      data,
      strategy,
      format,
    } => {
      if let Some(data) = data {
        config.data_path = data;
      }
      if let Some(strategy) = strategy {
        config.match_strategy = strategy;
      }

      let documents = fetch_documents(&config.data_path)
        .await
        .with_context(|| format!("failed to load index from {}", config.data_path))?;
      let widget = SearchWidget::from_documents(config, documents)?;
      let outcome = widget
        .search(&query)
        .context("search widget is not ready")?;

      match format {
        Format::Html => println!("{}", render_bucket(&outcome)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
      }
    }
  }

  Ok(())
}
