#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_record(amount: &str, category: Category) -> Record {
    Record {
        id: 1,
        title: "Test".into(),
        date: "2024-01-15".into(),
        amount: amount.into(),
        category,
        year: 2024,
        month: 1,
        day: 15,
        month_budget: 0.0,
        photo: None,
    }
}

fn make_input(title: &str, date: &str, amount: &str) -> RecordInput {
    RecordInput::new(title.into(), date.into(), amount.into(), Category::Expense)
}

// ── Record ────────────────────────────────────────────────────

#[test]
fn test_income_and_expense() {
    let rec = make_record("10", Category::Income);
    assert!(rec.is_income());
    assert!(!rec.is_expense());

    let rec = make_record("10", Category::Expense);
    assert!(!rec.is_income());
    assert!(rec.is_expense());
}

#[test]
fn test_amount_value() {
    assert_eq!(make_record("42.99", Category::Expense).amount_value(), dec!(42.99));
    assert_eq!(make_record(" 7 ", Category::Expense).amount_value(), dec!(7));
    assert_eq!(make_record("0.01", Category::Income).amount_value(), dec!(0.01));
}

#[test]
fn test_amount_value_non_numeric_is_zero() {
    assert_eq!(make_record("abc", Category::Expense).amount_value(), Decimal::ZERO);
    assert_eq!(make_record("", Category::Expense).amount_value(), Decimal::ZERO);
}

#[test]
fn test_amount_value_reads_leading_number() {
    assert_eq!(make_record("12abc", Category::Expense).amount_value(), dec!(12));
    assert_eq!(make_record("1e3", Category::Expense).amount_value(), dec!(1000));
    assert_eq!(make_record("2.5E-1", Category::Expense).amount_value(), dec!(0.25));
    assert_eq!(make_record("-.5", Category::Expense).amount_value(), dec!(-0.5));
    assert_eq!(make_record("+4.", Category::Expense).amount_value(), dec!(4));
    assert_eq!(make_record("3e", Category::Expense).amount_value(), dec!(3));
    assert_eq!(make_record("  8 apples", Category::Expense).amount_value(), dec!(8));
}

#[test]
fn test_amount_value_without_digits_is_zero() {
    assert_eq!(make_record("-", Category::Expense).amount_value(), Decimal::ZERO);
    assert_eq!(make_record(".", Category::Expense).amount_value(), Decimal::ZERO);
    assert_eq!(make_record("e5", Category::Expense).amount_value(), Decimal::ZERO);
}

#[test]
fn test_category_totals() {
    let records = vec![
        make_record("100", Category::Income),
        make_record("40.50", Category::Expense),
        make_record("9.50", Category::Expense),
        make_record("abc", Category::Income),
    ];
    assert_eq!(category_totals(&records), (dec!(100), dec!(50)));
    assert_eq!(category_totals(&[]), (Decimal::ZERO, Decimal::ZERO));
}

#[test]
fn test_category_totals_saturate_on_huge_amounts() {
    let huge = "79228162514264337593543950335";
    let records = vec![
        make_record(huge, Category::Income),
        make_record(huge, Category::Income),
        make_record(huge, Category::Expense),
        make_record(huge, Category::Expense),
    ];
    let (income, expense) = category_totals(&records);
    assert_eq!(income, Decimal::MAX);
    assert_eq!(expense, Decimal::MAX);
}

#[test]
fn test_to_input_drops_photo() {
    let mut rec = make_record("5", Category::Income);
    rec.photo = Some(vec![1, 2, 3]);
    let input = rec.to_input();
    assert_eq!(input.title, "Test");
    assert_eq!(input.date, "2024-01-15");
    assert_eq!(input.amount, "5");
    assert_eq!(input.category, Category::Income);
    assert!(input.photo.is_none());
}

// ── RecordInput ───────────────────────────────────────────────

#[test]
fn test_validate_trims_fields() {
    let input = make_input("  Coffee  ", "2024-03-09", " 4.50 ").validate().unwrap();
    assert_eq!(input.title, "Coffee");
    assert_eq!(input.amount, "4.50");
    assert_eq!(input.date, "2024-03-09");
}

#[test]
fn test_validate_pads_date() {
    let input = make_input("Coffee", "2024-3-9", "4").validate().unwrap();
    assert_eq!(input.date, "2024-03-09");
}

#[test]
fn test_validate_requires_title_and_amount() {
    assert!(make_input("", "2024-01-01", "1").validate().is_err());
    assert!(make_input("   ", "2024-01-01", "1").validate().is_err());
    assert!(make_input("Title", "2024-01-01", "").validate().is_err());
}

#[test]
fn test_validate_rejects_bad_dates() {
    assert!(make_input("T", "2024-02-30", "1").validate().is_err());
    assert!(make_input("T", "2024/02/03", "1").validate().is_err());
    assert!(make_input("T", "yesterday", "1").validate().is_err());
}

#[test]
fn test_validate_accepts_non_numeric_amount() {
    let input = make_input("Odd", "2024-01-01", "abc").validate().unwrap();
    assert_eq!(input.amount, "abc");
}

#[test]
fn test_with_photo() {
    let input = make_input("Snap", "2024-01-01", "1").with_photo(vec![0xFF, 0xD8]);
    assert_eq!(input.photo, Some(vec![0xFF, 0xD8]));
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("income"), Some(Category::Income));
    assert_eq!(Category::parse("INCOME"), Some(Category::Income));
    assert_eq!(Category::parse(" expense "), Some(Category::Expense));
    assert_eq!(Category::parse("in"), Some(Category::Income));
    assert_eq!(Category::parse("out"), Some(Category::Expense));
    assert_eq!(Category::parse("savings"), None);
}

#[test]
fn test_category_from_stored() {
    assert_eq!(Category::from_stored(Some("income")), Category::Income);
    assert_eq!(Category::from_stored(Some("expense")), Category::Expense);
    assert_eq!(Category::from_stored(None), Category::Expense);
    assert_eq!(Category::from_stored(Some("")), Category::Expense);
}

#[test]
fn test_category_round_trip_str() {
    for cat in Category::all() {
        assert_eq!(Category::from_stored(Some(cat.as_str())), *cat);
        assert_eq!(Category::parse(cat.as_str()), Some(*cat));
    }
}

#[test]
fn test_category_display() {
    assert_eq!(Category::Income.to_string(), "Income");
    assert_eq!(Category::Expense.to_string(), "Expense");
    assert_eq!(Category::default(), Category::Expense);
}
