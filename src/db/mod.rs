mod schema;

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::models::*;

pub(crate) use schema::CURRENT_VERSION;

const RECORD_COLUMNS: &str =
    "id, title, date, amount, category, year, month, day, month_budget, photo";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Self::from_connection(conn).context("Database migration failed")?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an open connection, creating or upgrading the schema first.
    pub(crate) fn from_connection(conn: Connection) -> Result<Self> {
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?)
    }

    fn migrate(&mut self) -> Result<()> {
        let current = self.schema_version()?;

        if current > schema::CURRENT_VERSION {
            bail!(
                "Database version {current} is newer than supported version {}",
                schema::CURRENT_VERSION
            );
        }
        if current == schema::CURRENT_VERSION {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        if current == 0 {
            // Fresh database - apply full schema
            tx.execute_batch(schema::SCHEMA_V4)?;
            tracing::info!(version = schema::CURRENT_VERSION, "created schema");
        } else {
            for &(threshold, steps) in schema::MIGRATIONS {
                if current >= threshold {
                    continue;
                }
                for step in steps {
                    match step {
                        schema::Step::Sql(sql) => tx.execute_batch(sql)?,
                        schema::Step::BackfillDateParts => {
                            let updated = tx.execute(
                                &format!(
                                    "UPDATE account SET {} WHERE date IS NOT NULL",
                                    schema::DATE_PARTS_ASSIGNMENT
                                ),
                                [],
                            )?;
                            tracing::info!(rows = updated, "backfilled date parts");
                        }
                    }
                }
                tracing::info!(from = current, threshold, "applied migration");
            }
        }
        tx.pragma_update(None, "user_version", schema::CURRENT_VERSION)?;
        tx.commit()?;
        Ok(())
    }

    // ── Records ───────────────────────────────────────────────

    pub(crate) fn insert_record(&mut self, input: &RecordInput) -> Result<i64> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO account (title, date, amount, category, photo)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                input.title,
                input.date,
                input.amount,
                input.category.as_str(),
                input.photo,
            ],
        )?;
        let id = tx.last_insert_rowid();
        refresh_date_parts(&tx, id)?;
        tx.commit()?;
        tracing::info!(id, "inserted record");
        Ok(id)
    }

    pub(crate) fn get_record(&self, id: i64) -> Result<Option<Record>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM account WHERE id = ?1"),
                params![id],
                record_from_row,
            )
            .optional()?)
    }

    /// Records newest first, optionally limited to one year by date prefix.
    pub(crate) fn get_records(&self, year: Option<i32>) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM account
             WHERE ?1 IS NULL OR date LIKE ?1
             ORDER BY date DESC, id DESC"
        ))?;
        let pattern = year.map(|y| format!("{y}-%"));
        let rows = stmt.query_map(params![pattern], record_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_record_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM account", [], |row| row.get(0))?)
    }

    /// Full-field update. The photo is only replaced when the input
    /// carries one. Returns the number of rows changed (0 or 1).
    pub(crate) fn update_record(&mut self, id: i64, input: &RecordInput) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE account
             SET title = ?1, date = ?2, amount = ?3, category = ?4,
                 photo = COALESCE(?5, photo)
             WHERE id = ?6",
            params![
                input.title,
                input.date,
                input.amount,
                input.category.as_str(),
                input.photo,
                id,
            ],
        )?;
        if changed > 0 {
            refresh_date_parts(&tx, id)?;
        }
        tx.commit()?;
        tracing::info!(id, changed, "updated record");
        Ok(changed)
    }

    /// Returns the number of rows removed (0 or 1).
    pub(crate) fn delete_record(&self, id: i64) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM account WHERE id = ?1", params![id])?;
        tracing::info!(id, removed, "deleted record");
        Ok(removed)
    }

    // ── Analytics ─────────────────────────────────────────────

    /// Sum of amounts for one month and category, matched on the date
    /// prefix. Non-numeric amounts count as 0; no rows gives 0.
    pub(crate) fn get_month_total(&self, year: i32, month: u32, category: Category) -> Result<f64> {
        let total: Option<f64> = self.conn.query_row(
            "SELECT SUM(COALESCE(CAST(amount AS REAL), 0)) FROM account
             WHERE date LIKE ?1 AND category = ?2",
            params![format!("{year}-{month:02}%"), category.as_str()],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0.0))
    }
}

fn refresh_date_parts(conn: &Connection, id: i64) -> Result<()> {
    conn.execute(
        &format!(
            "UPDATE account SET {} WHERE id = ?1",
            schema::DATE_PARTS_ASSIGNMENT
        ),
        params![id],
    )?;
    Ok(())
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    let category: Option<String> = row.get(4)?;
    Ok(Record {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        date: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        amount: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        category: Category::from_stored(category.as_deref()),
        year: row.get::<_, Option<i32>>(5)?.unwrap_or(0),
        month: row.get::<_, Option<i32>>(6)?.unwrap_or(0),
        day: row.get::<_, Option<i32>>(7)?.unwrap_or(0),
        month_budget: row.get::<_, Option<f64>>(8)?.unwrap_or(0.0),
        photo: row.get(9)?,
    })
}
