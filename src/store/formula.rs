//! Builders for Airtable `filterByFormula` expressions.
//!
//! User input only ever reaches a formula through [`string_literal`], so a
//! PIN can never change the shape of the filter.

use chrono::NaiveDate;

/// Quotes a value as a formula string literal.
///
/// # Example
///
/// ```
/// use pointage::store::formula::string_literal;
///
/// assert_eq!(string_literal("12\"34"), r#""12\"34""#);
/// ```
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            other => literal.push(other),
        }
    }
    literal.push('"');
    literal
}

/// Exact match of a text field against a value.
pub fn field_equals(field: &str, value: &str) -> String {
    format!("{{{}}}={}", field, string_literal(value))
}

/// Same-day match of a date field.
pub fn same_day(field: &str, date: NaiveDate) -> String {
    format!(
        "IS_SAME({{{}}}, DATETIME_PARSE(\"{}\"), \"day\")",
        field,
        date.format("%Y-%m-%d")
    )
}
