//! Display formatting helpers shared by the dashboard surfaces.
//!
//! Dates and currency follow the school's locale (en-IN): short month names,
//! IST wall-clock time, and Indian digit grouping for rupee amounts.

use chrono::{Datelike, FixedOffset, NaiveDate};

use crate::types::Timestamp;

/// IST is UTC+05:30.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Format a date as e.g. `12 Jan 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Format a UTC timestamp as IST wall-clock time, e.g. `12 Jan 2026, 14:05`.
pub fn format_date_time(timestamp: Timestamp) -> String {
    let ist = FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is in range");
    timestamp
        .with_timezone(&ist)
        .format("%-d %b %Y, %H:%M")
        .to_string()
}

/// Whole years elapsed between `date_of_birth` and `today`.
///
/// The year difference is reduced by one when the birthday has not yet
/// occurred in `today`'s year.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    let birthday_pending = (today.month(), today.day())
        < (date_of_birth.month(), date_of_birth.day());
    if birthday_pending {
        age -= 1;
    }
    age
}

/// Format a rupee amount with Indian digit grouping, e.g. `₹12,34,567.89`.
///
/// Grouping is 3 digits for the lowest group and 2 for every group above it.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed
        .split_once('.')
        .expect("{:.2} always yields a decimal point");
    format!("{sign}₹{}.{frac_part}", group_indian(int_part))
}

/// Apply Indian grouping to a bare digit string.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let bytes = head.as_bytes();
    let mut end = bytes.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// First letters of the first and last name, uppercased.
pub fn get_initials(first_name: &str, last_name: &str) -> String {
    let mut initials = String::new();
    initials.extend(first_name.chars().next().map(|c| c.to_ascii_uppercase()));
    initials.extend(last_name.chars().next().map(|c| c.to_ascii_uppercase()));
    initials
}

/// Truncate to `max_length` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_length).collect();
    format!("{truncated}...")
}

/// Render homogeneous JSON rows as CSV.
///
/// The header comes from the first row's keys; every cell is JSON-encoded so
/// commas and quotes inside values stay unambiguous. Missing and null cells
/// render as an empty quoted string. Returns an empty string for no rows.
pub fn export_csv(rows: &[serde_json::Value]) -> String {
    let Some(first) = rows.first().and_then(|row| row.as_object()) else {
        return String::new();
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| match row.get(header.as_str()) {
                None | Some(serde_json::Value::Null) => "\"\"".to_string(),
                Some(value) => value.to_string(),
            })
            .collect();
        lines.push(cells.join(","));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_date_without_zero_padding() {
        assert_eq!(format_date(date(2026, 1, 5)), "5 Jan 2026");
        assert_eq!(format_date(date(2025, 12, 25)), "25 Dec 2025");
    }

    #[test]
    fn formats_timestamp_in_ist() {
        // 08:35 UTC == 14:05 IST.
        let ts = Utc.with_ymd_and_hms(2026, 1, 12, 8, 35, 0).unwrap();
        assert_eq!(format_date_time(ts), "12 Jan 2026, 14:05");
    }

    #[test]
    fn age_counts_completed_years_only() {
        let dob = date(2010, 6, 15);
        assert_eq!(calculate_age(dob, date(2026, 6, 14)), 15);
        assert_eq!(calculate_age(dob, date(2026, 6, 15)), 16);
        assert_eq!(calculate_age(dob, date(2026, 6, 16)), 16);
    }

    #[test]
    fn currency_uses_indian_grouping() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(999.0), "₹999.00");
        assert_eq!(format_currency(1000.0), "₹1,000.00");
        assert_eq!(format_currency(123456.78), "₹1,23,456.78");
        assert_eq!(format_currency(1234567.89), "₹12,34,567.89");
        assert_eq!(format_currency(-2500.5), "-₹2,500.50");
    }

    #[test]
    fn initials_are_uppercased() {
        assert_eq!(get_initials("asha", "rao"), "AR");
        assert_eq!(get_initials("Ravi", ""), "R");
        assert_eq!(get_initials("", ""), "");
    }

    #[test]
    fn truncation_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer sentence", 8), "a longer...");
    }

    #[test]
    fn csv_export_quotes_cells_and_handles_missing_keys() {
        let rows = vec![
            serde_json::json!({"name": "Asha", "marks": 91}),
            serde_json::json!({"name": "Ravi, Jr.", "marks": null}),
        ];
        let csv = export_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "marks,name");
        assert_eq!(lines[1], "91,\"Asha\"");
        assert_eq!(lines[2], "\"\",\"Ravi, Jr.\"");
    }

    #[test]
    fn csv_export_of_nothing_is_empty() {
        assert_eq!(export_csv(&[]), "");
    }
}
