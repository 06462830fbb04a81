//! Tabular projection of extracted rows.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use invx_core::ItemRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of rows
    Json,
    /// CSV with a header row
    Csv,
    /// Plain text table with totals
    Text,
}

pub fn format_rows(rows: &[ItemRow], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => format_csv(rows),
        OutputFormat::Text => Ok(format_text(rows)),
    }
}

fn format_csv(rows: &[ItemRow]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(ItemRow::HEADERS)?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(rows: &[ItemRow]) -> String {
    if rows.is_empty() {
        return "No line items were extracted.\n".to_string();
    }

    let mut widths = ItemRow::HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_line(&mut output, &ItemRow::HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut output, &rule, &widths);
    for row in rows {
        push_line(&mut output, &row.cells(), &widths);
    }

    let totals = price_totals(rows);
    if !totals.is_empty() {
        output.push('\n');
        for (currency, total) in &totals {
            let label = if currency.is_empty() { "(no currency)" } else { currency.as_str() };
            output.push_str(&format!("Total {}: {}\n", label, total));
        }
    }

    output
}

fn push_line(output: &mut String, cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    output.push_str(padded.join("  ").trim_end());
    output.push('\n');
}

/// Sum of parsable prices per currency. Unparsable prices are left out.
pub fn price_totals(rows: &[ItemRow]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for row in rows {
        if let Some(price) = row.item.price_decimal() {
            *totals.entry(row.item.currency.clone()).or_insert(Decimal::ZERO) += price;
        }
    }
    totals
}
