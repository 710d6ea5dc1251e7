#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Lunch", 20), "Lunch");
}

#[test]
fn test_truncate_long_title() {
    assert_eq!(truncate("Quarterly insurance premium", 10), "Quarterly…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Lunch", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("午餐和咖啡", 3), "午餐…");
}

// ── format_amount ──────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

#[test]
fn test_format_amount_rounds_to_two_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
}

// ── compact_amount ─────────────────────────────────────────

#[test]
fn test_compact_amount_small() {
    assert_eq!(compact_amount(0.0), "0");
    assert_eq!(compact_amount(99.6), "100");
    assert_eq!(compact_amount(999.0), "999");
}

#[test]
fn test_compact_amount_thousands() {
    assert_eq!(compact_amount(1000.0), "1.0k");
    assert_eq!(compact_amount(1530.0), "1.5k");
}

#[test]
fn test_compact_amount_millions() {
    assert_eq!(compact_amount(2_500_000.0), "2.5M");
}

// ── scrolling ──────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_moves_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_edges() {
    let (mut index, mut scroll) = (5, 4);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));

    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (9, 6));
}
