use std::{io, path::PathBuf};

use anyhow::Context;
use cafe_menu::{catalog::Catalog, i18n::Language};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod menu;
mod order;

#[derive(Debug, Parser)]
#[command(name = "cafe-menu", about = "Bilingual café menu and order composer", long_about = None)]
pub(crate) struct Cli {
    /// Log cart and catalog activity at debug level
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse or search the menu
    Menu(menu::MenuArgs),

    /// Build an order and print its message
    Order(order::OrderArgs),
}

impl Cli {
    pub(crate) fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Menu(args) => menu::run(args),
            Commands::Order(args) => order::run(args),
        }
    }
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// YAML catalog to use instead of the built-in menu
    #[arg(long, env = "CAFE_MENU_FILE")]
    menu: Option<PathBuf>,

    /// Display language, `en` or `ar`
    #[arg(long, env = "CAFE_MENU_LANG", default_value = "en")]
    lang: Language,
}

impl CatalogArgs {
    pub(crate) fn language(&self) -> Language {
        self.lang
    }

    pub(crate) fn load(&self) -> anyhow::Result<Catalog<'static>> {
        match &self.menu {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("failed to load catalog from {}", path.display())),
            None => Catalog::embedded().context("failed to load built-in catalog"),
        }
    }
}

/// Log to stderr. `RUST_LOG` wins unless `--verbose` is given; the default is `warn`.
pub(crate) fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!(error))
}
