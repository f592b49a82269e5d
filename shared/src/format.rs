//! pt-BR display formatting
//!
//! Currency is always BRL. Dates accept `YYYY-MM-DD` (optionally followed
//! by a time part) and `DD/MM/YYYY`.

use chrono::{Datelike, NaiveDate};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Placeholder shown for a missing or malformed date
pub const INVALID_DATE: &str = "Data inválida";

/// Parse a decimal typed by a person or sent by the backend.
///
/// Accepts `"120.5"`, `"R$ 1.001,10"` and `"1001,10"`. A comma marks the
/// pt-BR notation, where dots are thousand separators.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned = raw.replace("R$", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replacen(',', ".", 1)
    } else {
        cleaned.to_string()
    };
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Format an amount as BRL, e.g. `R$ 1.234,56`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "R$ 0,00".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let units = group_thousands(cents / 100);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}R$ {units},{:02}", cents % 100)
}

/// Format a textual amount as BRL; unparseable input shows as zero
pub fn format_currency_str(raw: &str) -> String {
    format_currency(parse_decimal(raw).unwrap_or(0.0))
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(".")
}

/// Parse `YYYY-MM-DD[...]` or `DD/MM/YYYY`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(iso) = raw.get(..10)
        && let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d")
    {
        return Some(date);
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

/// Long pt-BR date, e.g. `05 de março de 2025`
pub fn format_date_long(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}

/// Long pt-BR date from raw text; [`INVALID_DATE`] when it does not parse
pub fn format_date_str(raw: Option<&str>) -> String {
    raw.and_then(parse_date)
        .map(format_date_long)
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Format a Brazilian phone number with area code.
///
/// 10 digits → `(11) 3456-7890`, 11 digits → `(11) 98765-4321`; anything
/// else is returned as typed.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        _ => raw.to_string(),
    }
}

/// Last six characters of an order id, as shown on cards and notices
pub fn short_id(id: &str) -> &str {
    match id.char_indices().rev().nth(5) {
        Some((idx, _)) => &id[idx..],
        None => id,
    }
}
