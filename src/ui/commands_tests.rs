#![allow(clippy::unwrap_used)]

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::{handle_command, run_pending};
use crate::db::Database;
use crate::models::Category;
use crate::report::ReportView;

fn setup() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let mut app = App::new();
    app.refresh_all(&db).unwrap();
    (app, db)
}

#[test]
fn test_add_record() {
    let (mut app, mut db) = setup();
    handle_command("add 2024-01-15 100.00 income Salary", &mut app, &mut db).unwrap();

    assert_eq!(app.records.len(), 1);
    let rec = &app.records[0];
    assert_eq!(rec.title, "Salary");
    assert_eq!(rec.amount, "100.00");
    assert_eq!(rec.category, Category::Income);
    assert!(app.status_message.starts_with("Added"));
}

#[test]
fn test_add_title_with_spaces() {
    let (mut app, mut db) = setup();
    handle_command("add 2024-02-02 12 expense Lunch with team", &mut app, &mut db).unwrap();
    assert_eq!(app.records[0].title, "Lunch with team");
}

#[test]
fn test_add_tolerates_repeated_spaces() {
    let (mut app, mut db) = setup();
    handle_command("add today  5   income  Pocket money", &mut app, &mut db).unwrap();

    assert_eq!(app.records.len(), 1);
    let rec = &app.records[0];
    assert_eq!(rec.amount, "5");
    assert_eq!(rec.category, Category::Income);
    assert_eq!(rec.title, "Pocket money");
}

#[test]
fn test_add_rejects_bad_input_without_writing() {
    let (mut app, mut db) = setup();

    handle_command("add 2024-13-01 5 expense Bad", &mut app, &mut db).unwrap();
    assert!(app.status_message.contains("Invalid date"));

    handle_command("add 2024-01-01 5 gift Bad", &mut app, &mut db).unwrap();
    assert!(app.status_message.contains("Unknown category"));

    handle_command("add 2024-01-01 5", &mut app, &mut db).unwrap();
    assert!(app.status_message.starts_with("Usage"));

    assert_eq!(db.get_record_count().unwrap(), 0);
}

#[test]
fn test_edit_selected_fields() {
    let (mut app, mut db) = setup();
    handle_command("add 2024-03-01 9 expense Cab", &mut app, &mut db).unwrap();

    handle_command("title Taxi home", &mut app, &mut db).unwrap();
    handle_command("amount 11.5", &mut app, &mut db).unwrap();
    handle_command("date 2024-03-02", &mut app, &mut db).unwrap();
    handle_command("income", &mut app, &mut db).unwrap();

    let rec = app.selected_record().unwrap();
    assert_eq!(rec.title, "Taxi home");
    assert_eq!(rec.amount, "11.5");
    assert_eq!(rec.date, "2024-03-02");
    assert_eq!((rec.year, rec.month, rec.day), (2024, 3, 2));
    assert_eq!(rec.category, Category::Income);
}

#[test]
fn test_edit_rejects_empty_amount() {
    let (mut app, mut db) = setup();
    handle_command("add 2024-03-01 9 expense Cab", &mut app, &mut db).unwrap();

    handle_command("amount    ", &mut app, &mut db).unwrap();
    assert!(app.status_message.starts_with("Usage"));
    assert_eq!(app.selected_record().unwrap().amount, "9");
}

#[test]
fn test_edit_without_selection() {
    let (mut app, mut db) = setup();
    handle_command("title Nothing", &mut app, &mut db).unwrap();
    assert_eq!(app.status_message, "No record selected");
}

#[test]
fn test_edit_of_vanished_record_reports_failure() {
    let (mut app, mut db) = setup();
    handle_command("add 2024-03-01 9 expense Cab", &mut app, &mut db).unwrap();
    let id = app.selected_record().unwrap().id;
    db.delete_record(id).unwrap();

    handle_command("title Gone", &mut app, &mut db).unwrap();
    assert!(app.status_message.starts_with("Update failed"));
    assert!(app.records.is_empty());
}

#[test]
fn test_delete_asks_for_confirmation() {
    let (mut app, mut db) = setup();
    handle_command("add 2024-04-01 3 expense Tea", &mut app, &mut db).unwrap();
    let id = app.selected_record().unwrap().id;

    handle_command("delete", &mut app, &mut db).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(
        app.pending_action,
        Some(PendingAction::DeleteRecord {
            id,
            title: "Tea".into()
        })
    );
    assert_eq!(db.get_record_count().unwrap(), 1);

    let action = app.pending_action.take().unwrap();
    run_pending(action.clone(), &mut app, &mut db).unwrap();
    assert_eq!(app.status_message, "Deleted: Tea");
    assert!(app.records.is_empty());

    run_pending(action, &mut app, &mut db).unwrap();
    assert!(app.status_message.starts_with("Delete failed"));
}

#[test]
fn test_year_command() {
    let (mut app, mut db) = setup();
    handle_command("add 2025-06-01 80 income Refund", &mut app, &mut db).unwrap();

    handle_command("year 2025", &mut app, &mut db).unwrap();
    assert_eq!(app.screen, Screen::Chart);
    assert_eq!(app.year, 2025);
    assert!(matches!(app.report, ReportView::Chart(_)));

    handle_command("year 2031", &mut app, &mut db).unwrap();
    assert_eq!(app.year, 2025);
    assert!(app.status_message.starts_with("Pick a year"));

    handle_command("next-year", &mut app, &mut db).unwrap();
    assert_eq!(app.year, 2026);
    assert_eq!(app.report, ReportView::NoData { year: 2026 });

    handle_command("prev-year", &mut app, &mut db).unwrap();
    assert_eq!(app.year, 2025);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut db) = setup();
    handle_command("chrt", &mut app, &mut db).unwrap();
    assert!(app.status_message.contains("Did you mean :chart?"));
}

#[test]
fn test_quit() {
    let (mut app, mut db) = setup();
    handle_command("q", &mut app, &mut db).unwrap();
    assert!(!app.running);
}
