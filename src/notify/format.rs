//! HTML rendering for alert and summary emails.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::companies::Company;
use crate::core::TransactionRecord;
use crate::tracker::RunSummary;

const DETECTED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ALERT_STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
.header { background-color: #d32f2f; color: white; padding: 20px; border-radius: 5px; }
.company { font-size: 24px; font-weight: bold; }
.transaction { background-color: #f5f5f5; margin: 15px 0; padding: 15px; border-left: 4px solid #d32f2f; border-radius: 3px; }
.transaction-type { display: inline-block; padding: 4px 8px; border-radius: 3px; font-weight: bold; font-size: 12px; }
.purchase { background-color: #4caf50; color: white; }
.sale { background-color: #f44336; color: white; }
.field { margin: 5px 0; }
.label { font-weight: bold; color: #555; display: inline-block; width: 150px; }
.footer { margin-top: 30px; padding-top: 15px; border-top: 1px solid #ddd; font-size: 12px; color: #777; }";

const SUMMARY_STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
.header { background-color: #1976d2; color: white; padding: 20px; border-radius: 5px; }
.company { background-color: #f5f5f5; margin: 10px 0; padding: 15px; border-left: 4px solid #1976d2; border-radius: 3px; }
.footer { margin-top: 30px; padding-top: 15px; border-top: 1px solid #ddd; font-size: 12px; color: #777; }";

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A transaction counts as a purchase when its type mentions one, in English or Swedish.
pub fn is_purchase(transaction_type: &str) -> bool {
    let t = transaction_type.to_lowercase();
    t.contains("purchase") || t.contains("köp")
}

fn or_na(s: &str) -> &str {
    if s.trim().is_empty() { "N/A" } else { s }
}

pub fn alert_subject(company_name: &str, count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("🚨 New Insider Trading: {company_name} ({count} transaction{plural})")
}

/// Render the new-transactions alert for one company.
pub fn alert_html(
    company: &Company,
    source_url: &str,
    transactions: &[TransactionRecord],
    detected_at: DateTime<Local>,
) -> String {
    let name = escape_html(&company.name);
    let mut html = String::new();
    let _ = write!(
        html,
        "<html>\n<head>\n<style>\n{ALERT_STYLE}\n</style>\n</head>\n<body>\n\
         <div class=\"header\">\n<div class=\"company\">{name}</div>\n\
         <div>New Insider Trading Detected</div>\n\
         <div style=\"font-size: 12px; margin-top: 10px;\">Detected: {}</div>\n</div>\n\
         <h2>New Transactions ({})</h2>\n",
        detected_at.format(DETECTED_FORMAT),
        transactions.len()
    );

    for (idx, txn) in transactions.iter().enumerate() {
        let kind = or_na(&txn.transaction_type);
        let (class, arrow) = if is_purchase(kind) {
            ("purchase", "📈")
        } else {
            ("sale", "📉")
        };
        let _ = write!(
            html,
            "<div class=\"transaction\">\n<h3 style=\"margin-top: 0;\">Transaction #{} {arrow}</h3>\n\
             <span class=\"transaction-type {class}\">{}</span>\n",
            idx + 1,
            escape_html(kind)
        );
        let fields = [
            ("Notification Date", txn.notification_date.as_str(), false),
            ("Transaction Date", txn.transaction_date.as_str(), false),
            ("Insider", txn.insider_name.as_str(), false),
            ("Position", txn.insider_position.as_str(), false),
            ("Role", txn.insider_role.as_str(), false),
            ("Number of Shares", txn.number_of_shares.as_str(), true),
            ("Price (displayed)", txn.price.as_str(), false),
            ("Price (calculated)", txn.price_calculated.as_str(), false),
            ("Total Value", txn.value.as_str(), true),
        ];
        for (label, value, strong) in fields {
            push_field(&mut html, label, or_na(value), strong);
        }
        if let Some(info) = txn.additional_info.as_deref().filter(|s| !s.trim().is_empty()) {
            push_field(&mut html, "Additional Info", info, false);
        }
        html.push_str("</div>\n");
    }

    let _ = write!(
        html,
        "<div class=\"footer\">\n<p>📊 <strong>Company:</strong> {name} ({})</p>\n\
         <p>🔗 <strong>Source:</strong> <a href=\"{}\">View on InsiderScreener</a></p>\n\
         <p><em>Automated alert from Insider Screener Monitor</em></p>\n</div>\n</body>\n</html>\n",
        escape_html(&company.slug),
        escape_html(source_url)
    );
    html
}

fn push_field(html: &mut String, label: &str, value: &str, strong: bool) {
    let value = escape_html(value);
    let value = if strong {
        format!("<strong>{value}</strong>")
    } else {
        value
    };
    let _ = writeln!(
        html,
        "<div class=\"field\"><span class=\"label\">{label}:</span> <span class=\"value\">{value}</span></div>"
    );
}

pub fn summary_subject(summary: &RunSummary) -> String {
    let companies = summary.companies_with_new_transactions().count();
    format!(
        "📊 Insider Trading Summary: {companies} companies, {} new transactions",
        summary.total_new_transactions()
    )
}

/// Render the end-of-run summary. Only companies with new transactions are listed.
pub fn summary_html(summary: &RunSummary, detected_at: DateTime<Local>) -> String {
    let listed: Vec<_> = summary.companies_with_new_transactions().collect();
    let mut html = String::new();
    let _ = write!(
        html,
        "<html>\n<head>\n<style>\n{SUMMARY_STYLE}\n</style>\n</head>\n<body>\n\
         <div class=\"header\">\n<h1 style=\"margin: 0;\">📊 Insider Trading Summary</h1>\n\
         <p style=\"margin: 5px 0 0 0;\">Detected: {}</p>\n</div>\n\
         <h2>Companies with New Transactions ({})</h2>\n",
        detected_at.format(DETECTED_FORMAT),
        listed.len()
    );
    for outcome in &listed {
        let _ = write!(
            html,
            "<div class=\"company\">\n<h3 style=\"margin-top: 0;\">{}</h3>\n\
             <p><strong>New transactions:</strong> {}</p>\n\
             <p><a href=\"{}\">View on InsiderScreener →</a></p>\n</div>\n",
            escape_html(&outcome.name),
            outcome.new_transactions,
            escape_html(&outcome.source_url)
        );
    }
    let _ = write!(
        html,
        "<div class=\"footer\">\n<p><strong>Total new transactions:</strong> {}</p>\n\
         <p><em>Automated summary from Insider Screener Monitor</em></p>\n</div>\n</body>\n</html>\n",
        summary.total_new_transactions()
    );
    html
}
