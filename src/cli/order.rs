use std::{
    io::{self, Write},
    num::ParseIntError,
    str::FromStr,
};

use anyhow::Context;
use cafe_menu::{
    cart::Cart,
    customizations::{CustomizationError, Customizations},
    order::{self, checkout_link, write_cart_table},
};
use clap::Args;
use thiserror::Error;
use tracing::info;

use super::CatalogArgs;

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Item to add, as `ID[:QTY[:CUSTOMIZATIONS]]`, e.g. `coffee:2:size=Large;extras=sugar`.
    /// Write `%3B`, `%3D`, `%7C` or `%25` for a literal `;`, `=`, `|` or `%` in a value.
    #[arg(long = "item", value_name = "ITEM", required = true)]
    items: Vec<ItemSpec>,

    /// Also print the checkout link
    #[arg(long)]
    link: bool,
}

#[derive(Debug, Error)]
pub(crate) enum ItemSpecError {
    #[error("item id is empty")]
    MissingId,

    #[error("invalid quantity: {0}")]
    Quantity(#[from] ParseIntError),

    #[error(transparent)]
    Customizations(#[from] CustomizationError),
}

/// One `--item` argument.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ItemSpec {
    id: String,
    quantity: i64,
    customizations: Customizations,
}

impl FromStr for ItemSpec {
    type Err = ItemSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');

        let id = parts
            .next()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ItemSpecError::MissingId)?;

        let quantity = match parts.next().map(str::trim) {
            Some(quantity) if !quantity.is_empty() => quantity.parse::<i64>()?,
            _ => 1,
        };

        let customizations = match parts.next() {
            Some(customizations) => customizations.parse::<Customizations>()?,
            None => Customizations::none(),
        };

        Ok(Self {
            id: id.to_string(),
            quantity,
            customizations,
        })
    }
}

pub(crate) fn run(args: OrderArgs) -> anyhow::Result<()> {
    let catalog = args.catalog.load()?;
    let language = args.catalog.language();
    let mut cart = Cart::new(catalog.currency());

    for spec in args.items {
        let item = catalog
            .item(&spec.id)
            .with_context(|| format!("unknown item: {}", spec.id))?;

        item.customization_options()
            .check(&spec.customizations)
            .with_context(|| format!("invalid customizations for {}", spec.id))?;

        cart.add(item, spec.quantity, spec.customizations)
            .with_context(|| format!("failed to add {}", spec.id))?;
    }

    info!(lines = cart.len(), "built cart");

    let mut out = io::stdout().lock();

    write_cart_table(&mut out, &cart, catalog.venue(), language)?;

    writeln!(out, "{}", order::compose(&cart, catalog.venue(), language)?)?;

    if args.link {
        writeln!(out, "\n{}", checkout_link(&cart, catalog.venue(), language)?)?;
    }

    Ok(())
}
