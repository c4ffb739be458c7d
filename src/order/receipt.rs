//! Cart Table

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    cart::Cart,
    catalog::Venue,
    i18n::{Language, Message},
    order::{OrderError, format_amount},
};

/// Writes the cart as a terminal table followed by the order total.
///
/// An empty cart is written as the localized "cart is empty" line.
///
/// # Errors
///
/// Returns [`OrderError::Cart`] if an amount overflows, or [`OrderError::Io`]
/// if writing fails.
pub fn write_cart_table(
    mut out: impl io::Write,
    cart: &Cart<'_>,
    venue: &Venue,
    language: Language,
) -> Result<(), OrderError> {
    if cart.is_empty() {
        writeln!(out, "{}", language.text(Message::CartEmpty))?;

        return Ok(());
    }

    let currency_label = venue.currency_label.text(language);
    let mut builder = Builder::default();

    builder.push_record([
        "",
        language.text(Message::ColumnItem),
        language.text(Message::ColumnCustomizations),
        language.text(Message::ColumnQuantity),
        language.text(Message::ColumnPrice),
        language.text(Message::ColumnAmount),
    ]);

    for (idx, line) in cart.iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.name().text(language).to_string(),
            line.customizations().describe(language),
            line.quantity().to_string(),
            format!(
                "{} {currency_label}",
                format_amount(line.price().to_minor_units())
            ),
            format!(
                "{} {currency_label}",
                format_amount(line.total()?.to_minor_units())
            ),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "\n{table}")?;

    let totals = cart.totals()?;

    writeln!(
        out,
        " {} \x1b[1m{} {currency_label}\x1b[0m ({} {})\n",
        language.text(Message::OrderTotal),
        format_amount(totals.total_price.to_minor_units()),
        totals.total_items,
        language.text(Message::ColumnQuantity),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::LBP};
    use testresult::TestResult;

    use crate::{
        catalog::MenuItem,
        customizations::{Customizations, SpiceLevel},
        i18n::Localized,
    };

    use super::*;

    fn venue() -> Venue {
        Venue {
            name: Localized::new("Town Café".to_string(), "تاون كافيه".to_string()),
            currency_label: Localized::new("LBP".to_string(), "ل.ل".to_string()),
            order_phone: "+96170264131".to_string(),
        }
    }

    #[test]
    fn table_lists_lines_and_total() -> TestResult {
        let coffee = MenuItem::new(
            "coffee",
            Localized::new("Coffee".to_string(), "قهوة".to_string()),
            Money::from_minor(100_000, LBP),
            "hot-beverages",
        );

        let mut cart = Cart::new(LBP);

        cart.add(
            &coffee,
            2,
            Customizations::none()
                .with_size("Large")
                .with_spice_level(SpiceLevel::Mild),
        )?;

        let mut out = Vec::new();
        write_cart_table(&mut out, &cart, &venue(), Language::En)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Coffee"));
        assert!(output.contains("Mild · Large"));
        assert!(output.contains("100,000 LBP"));
        assert!(output.contains("200,000 LBP"));
        assert!(output.contains("Total:"));

        Ok(())
    }

    #[test]
    fn empty_cart_prints_empty_message() -> TestResult {
        let mut out = Vec::new();
        write_cart_table(&mut out, &Cart::new(LBP), &venue(), Language::Ar)?;

        assert_eq!(String::from_utf8(out)?, "السلة فارغة\n");

        Ok(())
    }
}
