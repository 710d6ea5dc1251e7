use anyhow::{bail, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::Category;

/// A stored row of the `account` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: i64,
    pub title: String,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    /// Kept exactly as entered.
    pub amount: String,
    pub category: Category,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub month_budget: f64,
    pub photo: Option<Vec<u8>>,
}

impl Record {
    pub fn is_income(&self) -> bool {
        self.category == Category::Income
    }

    pub fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }

    /// Numeric value of the amount text, 0 when it does not parse.
    pub fn amount_value(&self) -> Decimal {
        parse_amount(&self.amount)
    }

    /// Fields of this record as an input, for full-field updates.
    /// The photo is left out so an update keeps the stored one.
    pub fn to_input(&self) -> RecordInput {
        RecordInput {
            title: self.title.clone(),
            date: self.date.clone(),
            amount: self.amount.clone(),
            category: self.category,
            photo: None,
        }
    }
}

/// Reads the leading numeric part of the text, the way SQLite's
/// `CAST(.. AS REAL)` does, so `"12abc"` is 12 and `"1e3"` is 1000.
/// Anything without a leading number, or out of `Decimal` range, is 0.
pub(crate) fn parse_amount(s: &str) -> Decimal {
    let text = s.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        mantissa_end = digits_from(int_end + 1);
    }
    // a lone sign or dot is not a number
    if !text[end..mantissa_end].bytes().any(|b| b.is_ascii_digit()) {
        return Decimal::ZERO;
    }

    let mut number_end = mantissa_end;
    if matches!(bytes.get(mantissa_end), Some(b'e' | b'E')) {
        let mut exp = mantissa_end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            number_end = exp_end;
        }
    }

    let sign = if text.starts_with('-') { "-" } else { "" };
    let mantissa = text[end..mantissa_end].trim_end_matches('.');
    let mantissa = if mantissa.starts_with('.') {
        format!("{sign}0{mantissa}")
    } else {
        format!("{sign}{mantissa}")
    };

    if number_end > mantissa_end {
        let exponent = text[mantissa_end + 1..number_end].trim_start_matches('+');
        Decimal::from_scientific(&format!("{mantissa}e{exponent}")).unwrap_or_default()
    } else {
        Decimal::from_str(&mantissa).unwrap_or_default()
    }
}

/// Income and expense totals over `records`. Sums saturate at the
/// `Decimal` range instead of overflowing.
pub(crate) fn category_totals(records: &[Record]) -> (Decimal, Decimal) {
    records
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), rec| {
            if rec.is_income() {
                (inc.saturating_add(rec.amount_value()), exp)
            } else {
                (inc, exp.saturating_add(rec.amount_value()))
            }
        })
}

/// User-supplied fields for an insert or a full-field update.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInput {
    pub title: String,
    pub date: String,
    pub amount: String,
    pub category: Category,
    /// `None` on update keeps the stored photo.
    pub photo: Option<Vec<u8>>,
}

impl RecordInput {
    pub fn new(title: String, date: String, amount: String, category: Category) -> Self {
        Self {
            title,
            date,
            amount,
            category,
            photo: None,
        }
    }

    pub fn with_photo(mut self, photo: Vec<u8>) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Trim and check the text fields, normalising the date to
    /// zero-padded `YYYY-MM-DD`. The amount is only checked for presence;
    /// non-numeric text is stored as-is and counts as 0 in reports.
    pub fn validate(mut self) -> Result<Self> {
        self.title = self.title.trim().to_string();
        self.amount = self.amount.trim().to_string();
        if self.title.is_empty() || self.amount.is_empty() {
            bail!("Title and amount are required");
        }
        let date = match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => bail!("Invalid date '{}' (expected YYYY-MM-DD)", self.date.trim()),
        };
        self.date = date.format("%Y-%m-%d").to_string();
        Ok(self)
    }
}
