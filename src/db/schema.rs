pub(crate) const SCHEMA_V4: &str = r#"
CREATE TABLE account (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT,
    date         TEXT,
    amount       TEXT,
    category     TEXT DEFAULT 'expense',
    year         INTEGER,
    month        INTEGER,
    day          INTEGER,
    month_budget REAL DEFAULT 0.0,
    photo        BLOB
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 4;

/// `SET` clause that derives year/month/day from `date`.
/// Anything that is not exactly `____-__-__` maps to 0/0/0.
pub(crate) const DATE_PARTS_ASSIGNMENT: &str = "
    year  = CASE WHEN date LIKE '____-__-__' THEN CAST(SUBSTR(date, 1, 4) AS INTEGER) ELSE 0 END,
    month = CASE WHEN date LIKE '____-__-__' THEN CAST(SUBSTR(date, 6, 2) AS INTEGER) ELSE 0 END,
    day   = CASE WHEN date LIKE '____-__-__' THEN CAST(SUBSTR(date, 9, 2) AS INTEGER) ELSE 0 END";

pub(crate) enum Step {
    Sql(&'static str),
    /// Fill year/month/day for every row that has a date.
    BackfillDateParts,
}

/// Upgrade steps. Each entry is (threshold, steps) and runs when the
/// stored version is below the threshold.
pub(crate) const MIGRATIONS: &[(i32, &[Step])] = &[
    (
        2,
        &[Step::Sql(
            "ALTER TABLE account ADD COLUMN category TEXT DEFAULT 'expense';",
        )],
    ),
    (
        3,
        &[
            Step::Sql("ALTER TABLE account ADD COLUMN year INTEGER;"),
            Step::Sql("ALTER TABLE account ADD COLUMN month INTEGER;"),
            Step::Sql("ALTER TABLE account ADD COLUMN day INTEGER;"),
            Step::Sql("ALTER TABLE account ADD COLUMN month_budget REAL DEFAULT 0.0;"),
            Step::BackfillDateParts,
        ],
    ),
    (4, &[Step::Sql("ALTER TABLE account ADD COLUMN photo BLOB;")]),
];
