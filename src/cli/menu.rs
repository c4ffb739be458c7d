use std::io::{self, Write};

use cafe_menu::{
    catalog::{MenuCategory, MenuItem},
    i18n::{Language, Message},
    order::format_amount,
    search::{self, MenuFilter},
};
use clap::Args;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use super::CatalogArgs;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Only show items whose name or description contains this text
    #[arg(long, default_value = "")]
    search: String,

    /// Only show items matching this filter; may be repeated
    #[arg(long = "filter", value_name = "FILTER")]
    filters: Vec<MenuFilter>,
}

pub(crate) fn run(args: MenuArgs) -> anyhow::Result<()> {
    let catalog = args.catalog.load()?;
    let language = args.catalog.language();
    let visible = search::filter_with(&catalog, &args.search, &args.filters);
    let currency_label = catalog.venue().currency_label.text(language);

    let mut out = io::stdout().lock();

    writeln!(out, "{}", catalog.venue().name.text(language))?;

    if visible.is_empty() {
        writeln!(out, "{}", language.text(Message::NoResults))?;

        return Ok(());
    }

    for category in visible.categories() {
        write_category(&mut out, category, language, currency_label)?;
    }

    Ok(())
}

fn write_category(
    out: &mut impl Write,
    category: &MenuCategory<'_>,
    language: Language,
    currency_label: &str,
) -> io::Result<()> {
    writeln!(out, "\n\x1b[1m{}\x1b[0m", category.title().text(language))?;

    if let Some(description) = category.description().text(language) {
        writeln!(out, "{description}")?;
    }

    let mut builder = Builder::default();

    builder.push_record([
        "#",
        language.text(Message::ColumnItem),
        language.text(Message::ColumnPrice),
    ]);

    for item in category.items() {
        builder.push_record([
            item.id().to_string(),
            item_label(item, language),
            format!(
                "{} {currency_label}",
                format_amount(item.price().to_minor_units())
            ),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")
}

fn item_label(item: &MenuItem<'_>, language: Language) -> String {
    let badges: Vec<&str> = MenuFilter::ALL
        .into_iter()
        .filter(|filter| filter.matches(item))
        .map(|filter| filter.label(language))
        .collect();

    let name = item.name().text(language);

    let label = match item.description().text(language) {
        Some(description) => format!("{name}\n\x1b[90m{description}\x1b[0m"),
        None => name.to_string(),
    };

    if badges.is_empty() {
        label
    } else {
        format!("{label}\n[{}]", badges.join(", "))
    }
}
