use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::models::{Category, RecordInput};
use crate::report::{self, YEAR_CHOICES};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("r", "Go to Records", cmd_records, r);
    register_command!("records", "Go to Records", cmd_records, r);
    register_command!("c", "Go to Chart", cmd_chart, r);
    register_command!("chart", "Go to Chart", cmd_chart, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add record (e.g. :add 2024-01-15 100 income Salary)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add record (e.g. :a today 4.50 expense Coffee)",
        cmd_add,
        r
    );
    register_command!("title", "Retitle selected record", cmd_title, r);
    register_command!("amount", "Change amount of selected record", cmd_amount, r);
    register_command!(
        "date",
        "Change date of selected record (YYYY-MM-DD)",
        cmd_date,
        r
    );
    register_command!("income", "Mark selected record as income", cmd_income, r);
    register_command!("expense", "Mark selected record as expense", cmd_expense, r);
    register_command!("delete", "Delete selected record", cmd_delete, r);
    register_command!("year", "Show chart for a year (e.g. :year 2025)", cmd_year, r);
    register_command!("y", "Show chart for a year", cmd_year, r);
    register_command!("next-year", "Chart the next year", cmd_next_year, r);
    register_command!("prev-year", "Chart the previous year", cmd_prev_year, r);

    r
});

/// Run a `:` command. Storage failures are logged and reported in the
/// status bar; they never end the session.
pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app, db) {
            tracing::warn!(command = cmd_name, error = %e, "command failed");
            app.set_status(format!("Error: {e}"));
        }
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_records(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Records;
    app.refresh_records(db)?;
    Ok(())
}

fn cmd_chart(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Chart;
    app.refresh_report(db);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :add <date|today> <amount> <income|expense> <title>";

    // date, amount and category are single words; the rest is the title
    let mut rest = args.trim_start();
    let mut parts: Vec<&str> = Vec::with_capacity(4);
    for _ in 0..3 {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if end == 0 {
            break;
        }
        parts.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    parts.push(rest.trim_end());
    if parts.iter().any(|p| p.is_empty()) {
        app.set_status(USAGE);
        return Ok(());
    }

    let date = if parts[0].eq_ignore_ascii_case("today") {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    } else {
        parts[0].to_string()
    };
    let Some(category) = Category::parse(parts[2]) else {
        app.set_status(format!("Unknown category '{}'. {USAGE}", parts[2]));
        return Ok(());
    };

    let input = RecordInput::new(parts[3].to_string(), date, parts[1].to_string(), category);
    let input = match input.validate() {
        Ok(input) => input,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let id = db.insert_record(&input)?;
    app.refresh_all(db)?;
    if let Some(pos) = app.records.iter().position(|r| r.id == id) {
        app.record_index = pos;
    }
    app.set_status(format!(
        "Added {} '{}' ({}) on {}",
        input.category, input.title, input.amount, input.date
    ));
    Ok(())
}

/// Load the selected record, apply `change`, and save every field back.
fn edit_selected(
    app: &mut App,
    db: &mut Database,
    what: &str,
    change: impl FnOnce(&mut RecordInput),
) -> anyhow::Result<()> {
    let Some(record) = app.selected_record() else {
        app.set_status("No record selected");
        return Ok(());
    };
    let id = record.id;
    let mut input = record.to_input();
    change(&mut input);

    let input = match input.validate() {
        Ok(input) => input,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    if db.update_record(id, &input)? == 0 {
        app.set_status(format!("Update failed: record {id} no longer exists"));
    } else {
        app.set_status(format!("Updated {what} of '{}'", input.title));
    }
    app.refresh_all(db)?;
    Ok(())
}

fn cmd_title(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :title <new title>");
        return Ok(());
    }
    edit_selected(app, db, "title", |input| input.title = args.to_string())
}

fn cmd_amount(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :amount <value>");
        return Ok(());
    }
    edit_selected(app, db, "amount", |input| input.amount = args.to_string())
}

fn cmd_date(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :date <YYYY-MM-DD>");
        return Ok(());
    }
    edit_selected(app, db, "date", |input| input.date = args.to_string())
}

fn cmd_income(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    edit_selected(app, db, "category", |input| input.category = Category::Income)
}

fn cmd_expense(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    edit_selected(app, db, "category", |input| input.category = Category::Expense)
}

fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Records || app.records.is_empty() {
        app.set_status("Navigate to Records and select one first");
        return Ok(());
    }

    if let Some(record) = app.selected_record() {
        let id = record.id;
        let title = record.title.clone();
        app.confirm_message = format!("Delete '{title}'?");
        app.pending_action = Some(PendingAction::DeleteRecord { id, title });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

/// Carry out a confirmed action.
pub(crate) fn run_pending(action: PendingAction, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match action {
        PendingAction::DeleteRecord { id, title } => {
            if db.delete_record(id)? == 0 {
                app.set_status(format!("Delete failed: '{title}' no longer exists"));
            } else {
                app.set_status(format!("Deleted: {title}"));
            }
            app.refresh_all(db)?;
        }
    }
    Ok(())
}

fn cmd_year(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let (first, last) = (*YEAR_CHOICES.start(), *YEAR_CHOICES.end());
    match args.parse::<i32>() {
        Ok(year) if YEAR_CHOICES.contains(&year) => {
            app.set_year(db, year);
            app.screen = Screen::Chart;
            app.set_status(format!("Showing {year}"));
        }
        _ => app.set_status(format!("Pick a year between {first} and {last}")),
    }
    Ok(())
}

fn cmd_next_year(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let year = report::cycle_year(app.year, 1);
    app.set_year(db, year);
    Ok(())
}

fn cmd_prev_year(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let year = report::cycle_year(app.year, -1);
    app.set_year(db, year);
    Ok(())
}
