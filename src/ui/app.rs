use anyhow::Result;
use chrono::{Datelike, Local};

use crate::db::Database;
use crate::models::*;
use crate::report::{self, ReportView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Records,
    Chart,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Records, Self::Chart]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Records => write!(f, "Records"),
            Self::Chart => write!(f, "Chart"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteRecord { id: i64, title: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Records
    pub(crate) records: Vec<Record>,
    pub(crate) record_index: usize,
    pub(crate) record_scroll: usize,

    // Chart
    pub(crate) year: i32,
    pub(crate) report: ReportView,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let year = report::default_year(Local::now().year());

        Self {
            running: true,
            screen: Screen::Records,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            records: Vec::new(),
            record_index: 0,
            record_scroll: 0,

            year,
            report: ReportView::NoData { year },

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh_records(&mut self, db: &Database) -> Result<()> {
        self.records = db.get_records(None)?;
        if self.record_index >= self.records.len() {
            self.record_index = self.records.len().saturating_sub(1);
        }
        if self.record_scroll > self.record_index {
            self.record_scroll = self.record_index;
        }
        Ok(())
    }

    /// Never fails: storage errors show up as the empty chart.
    pub(crate) fn refresh_report(&mut self, db: &Database) {
        self.report = report::load(db, self.year);
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_records(db)?;
        self.refresh_report(db);
        Ok(())
    }

    pub(crate) fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.record_index)
    }

    pub(crate) fn set_year(&mut self, db: &Database, year: i32) {
        self.year = year;
        self.refresh_report(db);
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
