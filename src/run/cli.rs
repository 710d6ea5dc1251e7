use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use std::path::Path;

use crate::db::{Database, CURRENT_VERSION};
use crate::models::{category_totals, Category, Record, RecordInput};
use crate::report::{self, ReportView, YearlyReport};

const BAR_WIDTH: f64 = 40.0;
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], db),
        "list" | "ls" => cli_list(&args[2..], db),
        "show" => cli_show(&args[2..], db),
        "edit" => cli_edit(&args[2..], db),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "photo" => cli_photo(&args[2..], db),
        "report" | "r" => cli_report(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!(
                "pocket-ledger {} (schema v{CURRENT_VERSION})",
                env!("CARGO_PKG_VERSION")
            );
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Pocket Ledger - daily income and expense records");
    println!();
    println!("Usage: pocket-ledger [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <title> <amount>          Add a record");
    println!("    --date <YYYY-MM-DD>         Record date (default: today)");
    println!("    --income | --expense        Category (default: expense)");
    println!("    --photo <file>              Attach a photo");
    println!("  list                          List records, newest first");
    println!("    --year <YYYY>               Only records from this year");
    println!("  show <id>                     Show one record");
    println!("  edit <id>                     Change a record");
    println!("    --title, --amount, --date, --income, --expense, --photo");
    println!("  delete <id>                   Delete a record");
    println!("  photo <id> <out-file>         Save a record's photo to a file");
    println!("  report [YYYY]                 Monthly income/expense chart for a year");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Arguments that are neither flags nor flag values.
fn positionals(args: &[String]) -> Vec<&str> {
    const VALUE_FLAGS: [&str; 5] = ["--date", "--photo", "--year", "--title", "--amount"];
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

fn category_flag(args: &[String]) -> Option<Category> {
    if has_flag(args, "--income") {
        Some(Category::Income)
    } else if has_flag(args, "--expense") {
        Some(Category::Expense)
    } else {
        None
    }
}

fn read_photo(args: &[String]) -> Result<Option<Vec<u8>>> {
    flag_value(args, "--photo")
        .map(|path| {
            let path = shellexpand(path);
            std::fs::read(&path).with_context(|| format!("Failed to read photo: {path}"))
        })
        .transpose()
}

fn parse_id(args: &[String], usage: &str) -> Result<i64> {
    let raw = positionals(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    raw.parse::<i64>()
        .with_context(|| format!("Invalid record id: {raw}"))
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    let usage = "pocket-ledger add <title> <amount> [--date YYYY-MM-DD] [--income|--expense] [--photo <file>]";
    let pos = positionals(args);
    let (title, amount) = match pos.as_slice() {
        [title, amount, ..] => (*title, *amount),
        _ => anyhow::bail!("Usage: {usage}"),
    };

    let date = flag_value(args, "--date")
        .map(str::to_string)
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let category = category_flag(args).unwrap_or_default();

    let mut input = RecordInput::new(title.into(), date, amount.into(), category);
    if let Some(photo) = read_photo(args)? {
        input = input.with_photo(photo);
    }
    let input = input.validate()?;

    let id = db.insert_record(&input)?;
    println!("Added record {id}: {} {} on {}", input.category, input.amount, input.date);
    Ok(())
}

fn cli_list(args: &[String], db: &mut Database) -> Result<()> {
    let year = flag_value(args, "--year")
        .map(|y| y.parse::<i32>().with_context(|| format!("Invalid year: {y}")))
        .transpose()?;

    let records = db.get_records(year)?;
    if records.is_empty() {
        match year {
            Some(y) => println!("No records for {y}"),
            None => println!("No records"),
        }
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:<9} {:>12}  Title",
        "ID", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(60));

    for rec in &records {
        println!(
            "{:<6} {:<12} {:<9} {:>12}  {}{}",
            rec.id,
            rec.date,
            rec.category,
            rec.amount,
            rec.title,
            if rec.photo.is_some() { " [photo]" } else { "" },
        );
    }

    let (income, expense) = category_totals(&records);
    println!("{}", "─".repeat(60));
    println!("  Income:   {income:.2}");
    println!("  Expense:  {expense:.2}");
    println!("  Net:      {:.2}", income.saturating_sub(expense));
    if year.is_some() {
        println!("  Showing {} of {} records", records.len(), db.get_record_count()?);
    }
    Ok(())
}

fn cli_show(args: &[String], db: &mut Database) -> Result<()> {
    let id = parse_id(args, "pocket-ledger show <id>")?;
    match db.get_record(id)? {
        Some(rec) => print_record(&rec),
        None => eprintln!("Record {id} not found"),
    }
    Ok(())
}

fn print_record(rec: &Record) {
    println!("Record {}", rec.id);
    println!("{}", "─".repeat(40));
    println!("  Title:     {}", rec.title);
    println!("  Date:      {}", rec.date);
    println!("  Amount:    {}", rec.amount);
    println!("  Category:  {}", rec.category);
    println!("  Y/M/D:     {}/{}/{}", rec.year, rec.month, rec.day);
    println!("  Budget:    {:.2}", rec.month_budget);
    match &rec.photo {
        Some(bytes) => println!("  Photo:     {} bytes", bytes.len()),
        None => println!("  Photo:     none"),
    }
}

fn cli_edit(args: &[String], db: &mut Database) -> Result<()> {
    let id = parse_id(args, "pocket-ledger edit <id> [--title ..] [--amount ..] [--date ..] [--income|--expense] [--photo <file>]")?;
    let Some(existing) = db.get_record(id)? else {
        eprintln!("Record {id} not found");
        return Ok(());
    };

    let mut input = existing.to_input();
    if let Some(title) = flag_value(args, "--title") {
        input.title = title.into();
    }
    if let Some(amount) = flag_value(args, "--amount") {
        input.amount = amount.into();
    }
    if let Some(date) = flag_value(args, "--date") {
        input.date = date.into();
    }
    if let Some(category) = category_flag(args) {
        input.category = category;
    }
    if let Some(photo) = read_photo(args)? {
        input = input.with_photo(photo);
    }
    let input = input.validate()?;

    if db.update_record(id, &input)? == 0 {
        eprintln!("Record {id} not found");
    } else {
        println!("Updated record {id}");
    }
    Ok(())
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let id = parse_id(args, "pocket-ledger delete <id>")?;
    if db.delete_record(id)? == 0 {
        eprintln!("Record {id} not found");
    } else {
        println!("Deleted record {id}");
    }
    Ok(())
}

fn cli_photo(args: &[String], db: &mut Database) -> Result<()> {
    let usage = "pocket-ledger photo <id> <out-file>";
    let id = parse_id(args, usage)?;
    let out = positionals(args)
        .get(1)
        .map(|p| shellexpand(p))
        .ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;

    match db.get_record(id)? {
        None => eprintln!("Record {id} not found"),
        Some(Record { photo: None, .. }) => eprintln!("Record {id} has no photo"),
        Some(Record {
            photo: Some(bytes), ..
        }) => {
            std::fs::write(Path::new(&out), &bytes)
                .with_context(|| format!("Failed to write photo: {out}"))?;
            println!("Wrote {} bytes to {out}", bytes.len());
        }
    }
    Ok(())
}

fn cli_report(args: &[String], db: &mut Database) -> Result<()> {
    let year = match positionals(args).first() {
        Some(y) => y
            .parse::<i32>()
            .with_context(|| format!("Invalid year: {y}"))?,
        None => Local::now().year(),
    };

    match report::load(db, year) {
        ReportView::NoData { year } => println!("No data for year {year}"),
        ReportView::Chart(report) => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &YearlyReport) {
    let axis_max = report.axis_max();
    println!("Pocket Ledger - {}", report.year);
    println!("{}", "─".repeat(60));
    for (month, label) in MONTH_LABELS.iter().enumerate() {
        for &category in Category::all() {
            let (tag, fill) = match category {
                Category::Income => ("in ", '+'),
                Category::Expense => ("out", '-'),
            };
            let name = if category == Category::Income { *label } else { "" };
            match report.value_at(category, month) {
                Some(value) => {
                    let width = ((value / axis_max) * BAR_WIDTH).round() as usize;
                    println!(
                        "{name:<4}{tag} {:<40} {value:.2}",
                        fill.to_string().repeat(width)
                    );
                }
                None => println!("{name:<4}{tag}"),
            }
        }
    }
    println!("{}", "─".repeat(60));
    println!("  Income:    {:.2}", report.total(Category::Income));
    println!("  Expense:   {:.2}", report.total(Category::Expense));
    println!("  Peak:      {:.2}", report.max_value);
    println!("  Axis max:  {axis_max:.2}");
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
