//! Docent - a terminal document inspector.
//!
//! # Usage
//!
//! ```bash
//! docent README.md
//! docent --expanded README.md
//! docent --filter code,table README.md
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use docent::app::App;
use docent::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A terminal document inspector
#[derive(Parser, Debug)]
#[command(name = "docent", version, about, long_about = None)]
struct Cli {
    /// Markdown file to inspect
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Disable inline image rendering (show placeholders only)
    #[arg(long)]
    no_images: bool,

    /// Start with every section expanded
    #[arg(long)]
    expanded: bool,

    /// Open the guided tour on startup
    #[arg(long)]
    tour: bool,

    /// Pre-select content filters (comma-separated: text,code,table,image)
    #[arg(long, value_name = "KINDS")]
    filter: Option<String>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    let filters = effective
        .filter
        .as_deref()
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut app = App::new(cli.file)
        .with_images_enabled(!effective.no_images)
        .with_expanded(effective.expanded)
        .with_tour(effective.tour)
        .with_filters(filters);

    app.run().context("Application error")
}
