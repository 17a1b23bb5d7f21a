//! Company page → records.

use super::html::{self, Element};
use crate::core::{CompanyInfo, IsError, TransactionRecord};

/// Transaction rows carry at least this many cells; shorter rows are layout filler.
const MIN_CELLS: usize = 8;

const CURRENCY_CODES: [&str; 5] = ["SEK", "USD", "EUR", "NOK", "DKK"];

pub(crate) fn company_info(page: &str) -> CompanyInfo {
    CompanyInfo {
        company_name: html::first(page, "h1").map(|h| h.text()).unwrap_or_default(),
        value_bought: metric(page, "Value bought"),
        value_sold: metric(page, "Value sold"),
        net_insiders_buying: metric(page, "Net insiders buying"),
        trades_count: metric(page, "Trades"),
        insider_activity: metric(page, "Insider activity"),
    }
}

/// The value shown in the `<h5>` next to the `<h6>` labelled `label`.
///
/// The `<h5>` is looked up inside the label's enclosing `<div>` first, then
/// anywhere after the label.
fn metric(page: &str, label: &str) -> Option<String> {
    let h6 = html::elements(page, "h6")
        .into_iter()
        .find(|h| h.text().contains(label))?;

    if let Some(block) = html::enclosing(page, "div", h6.start)
        && let Some(h5) = html::first(block.inner, "h5")
    {
        return Some(h5.text());
    }
    html::first(&page[h6.end..], "h5").map(|h5| h5.text())
}

/// Extract every transaction row of the insider table.
///
/// # Errors
///
/// Returns [`IsError::Data`] when the page has no transaction table at all.
pub(crate) fn transactions(page: &str) -> Result<Vec<TransactionRecord>, IsError> {
    let table = find_table(page)
        .ok_or_else(|| IsError::Data("insider transaction table not found".into()))?;
    let body = html::first(table.inner, "tbody").map_or(table.inner, |b| b.inner);

    Ok(html::elements(body, "tr")
        .iter()
        .filter_map(|row| {
            let cells = html::elements(row.inner, "td");
            (cells.len() >= MIN_CELLS).then(|| transaction(&cells))
        })
        .collect())
}

/// The table whose header mentions insiders; failing that, the first table with a full-width row.
fn find_table(page: &str) -> Option<Element<'_>> {
    let tables = html::elements(page, "table");
    let by_header = tables.iter().find(|t| {
        html::first(t.inner, "thead").is_some_and(|head| head.text().contains("Insider"))
    });
    by_header.copied().or_else(|| {
        tables.into_iter().find(|t| {
            html::elements(t.inner, "tr")
                .iter()
                .any(|r| html::elements(r.inner, "td").len() >= MIN_CELLS)
        })
    })
}

// Cell 4 repeats shares/price/value for the mobile layout and is skipped.
fn transaction(cells: &[Element<'_>]) -> TransactionRecord {
    let insider = cells[3].inner;
    let number_of_shares = cells[5].text();
    let price = cells[6].text();
    let value = cells[7].text();
    let price_calculated = calculated_price(&number_of_shares, &value).unwrap_or_default();

    TransactionRecord {
        notification_date: cells[0].text(),
        transaction_date: cells[1].text(),
        transaction_type: last_line(cells[2].inner),
        insider_name: insider_name(insider),
        insider_position: insider_position(insider),
        insider_role: insider_role(insider),
        additional_info: additional_info(insider),
        number_of_shares,
        price,
        price_calculated,
        value,
    }
}

fn last_line(cell: &str) -> String {
    html::raw_text(cell)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .unwrap_or_default()
        .to_string()
}

fn insider_name(cell: &str) -> String {
    html::elements(cell, "a")
        .into_iter()
        .find(|a| a.attr("href").is_some_and(|h| h.contains("/en/insider/")))
        .map(|a| a.text())
        .unwrap_or_default()
}

fn insider_position(cell: &str) -> String {
    html::elements(cell, "p")
        .into_iter()
        .find_map(|p| html::first(p.inner, "small"))
        .map(|s| s.text())
        .unwrap_or_default()
}

fn insider_role(cell: &str) -> String {
    html::elements(cell, "span")
        .into_iter()
        .find(|s| s.has_class("badge") && s.has_class("badge-light"))
        .map(|s| s.text())
        .unwrap_or_default()
}

/// The last `<small>` of the cell that is not inside a `<p>`.
fn additional_info(cell: &str) -> Option<String> {
    let outside_p = html::without(cell, "p");
    html::elements(&outside_p, "small")
        .last()
        .map(|s| s.text())
        .filter(|t| !t.is_empty())
}

/// `value / shares` with two decimals, when both parse as positive numbers.
pub fn calculated_price(shares: &str, value: &str) -> Option<String> {
    let shares = parse_number(shares)?;
    let value = parse_number(value)?;
    (shares > 0.0 && value > 0.0).then(|| format!("{:.2}", value / shares))
}

fn parse_number(raw: &str) -> Option<f64> {
    let mut s = raw.to_string();
    for code in CURRENCY_CODES {
        s = s.replace(code, "");
    }
    let s: String = s
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
