use anyhow::Result;
use std::ops::RangeInclusive;

use crate::db::Database;
use crate::models::Category;

/// Years offered for selection. Fixed, not derived from the data.
pub(crate) const YEAR_CHOICES: RangeInclusive<i32> = 2024..=2030;

const AXIS_FLOOR: f64 = 100.0;
const AXIS_HEADROOM: f64 = 1.1;

/// Per-month income and expense totals for one year.
///
/// Both series are sparse: a month appears only when its total is
/// strictly positive. Month indices are 0-based (January = 0).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct YearlyReport {
    pub(crate) year: i32,
    pub(crate) income: Vec<(usize, f64)>,
    pub(crate) expense: Vec<(usize, f64)>,
    /// Largest single-month income or expense.
    pub(crate) max_value: f64,
}

impl YearlyReport {
    /// Runs two sum queries per month, 24 in total.
    pub(crate) fn build(db: &Database, year: i32) -> Result<Self> {
        let mut report = Self {
            year,
            income: Vec::new(),
            expense: Vec::new(),
            max_value: 0.0,
        };

        for month in 1..=12u32 {
            let index = (month - 1) as usize;
            let income = db.get_month_total(year, month, Category::Income)?;
            let expense = db.get_month_total(year, month, Category::Expense)?;
            tracing::debug!(year, month, income, expense, "monthly totals");

            if income > 0.0 {
                report.income.push((index, income));
            }
            if expense > 0.0 {
                report.expense.push((index, expense));
            }
            report.max_value = report.max_value.max(income.max(expense));
        }

        Ok(report)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }

    /// Upper bound for the value axis: 10% headroom, never below 100.
    pub(crate) fn axis_max(&self) -> f64 {
        (self.max_value * AXIS_HEADROOM).max(AXIS_FLOOR)
    }

    pub(crate) fn series(&self, category: Category) -> &[(usize, f64)] {
        match category {
            Category::Income => &self.income,
            Category::Expense => &self.expense,
        }
    }

    pub(crate) fn value_at(&self, category: Category, month_index: usize) -> Option<f64> {
        self.series(category)
            .iter()
            .find(|(i, _)| *i == month_index)
            .map(|(_, v)| *v)
    }

    pub(crate) fn total(&self, category: Category) -> f64 {
        self.series(category).iter().map(|(_, v)| v).sum()
    }
}

/// What a chart should show for a year.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReportView {
    Chart(YearlyReport),
    NoData { year: i32 },
}

impl ReportView {
    pub(crate) fn year(&self) -> i32 {
        match self {
            Self::Chart(report) => report.year,
            Self::NoData { year } => *year,
        }
    }
}

/// Build the report for `year`. Storage errors are logged and shown as
/// the empty state rather than surfaced to the chart.
pub(crate) fn load(db: &Database, year: i32) -> ReportView {
    match YearlyReport::build(db, year) {
        Ok(report) if !report.is_empty() => ReportView::Chart(report),
        Ok(_) => {
            tracing::info!(year, "no data for year");
            ReportView::NoData { year }
        }
        Err(e) => {
            tracing::warn!(year, error = %e, "failed to load yearly report");
            ReportView::NoData { year }
        }
    }
}

/// The current year when it is one of the choices, otherwise the first.
pub(crate) fn default_year(today_year: i32) -> i32 {
    if YEAR_CHOICES.contains(&today_year) {
        today_year
    } else {
        *YEAR_CHOICES.start()
    }
}

/// Step through the year choices, wrapping at both ends.
pub(crate) fn cycle_year(year: i32, delta: i32) -> i32 {
    let start = *YEAR_CHOICES.start();
    let len = YEAR_CHOICES.end() - start + 1;
    let offset = (year.clamp(start, *YEAR_CHOICES.end()) - start + delta).rem_euclid(len);
    start + offset
}
