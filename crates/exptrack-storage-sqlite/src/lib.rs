//! exptrack-storage-sqlite
//!
//! Single-table SQLite persistence for the expense ledger.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{NaiveDate, NaiveDateTime};
use exptrack_core::{CoreError, CoreResult, ExpenseStore};
use exptrack_domain::{DailyTotal, DateWindow, ExpenseEntry, ExpenseFilter, NewExpense, RECENT_LIMIT};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

/// File name used when the ledger lives in a data directory.
pub const DEFAULT_DB_FILE: &str = "expenses.db";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY,
    date TEXT,
    category TEXT,
    amount REAL,
    description TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
";

const SELECT_COLUMNS: &str = "SELECT id, date, category, amount, description, created_at FROM expenses";
const NEWEST_FIRST: &str = " ORDER BY date DESC, id DESC";

/// [`ExpenseStore`] backed by one SQLite connection.
pub struct SqliteExpenseStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteExpenseStore {
    /// Opens (creating if needed) the ledger at `path`.
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| CoreError::Storage(err.to_string()))?;
        }
        let conn = Connection::open(path).map_err(storage_err)?;
        let store = Self::initialize(conn, Some(path.to_path_buf()))?;
        tracing::info!(path = %path.display(), "opened expense ledger");
        Ok(store)
    }

    pub fn open_in_memory() -> CoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        Self::initialize(conn, None)
    }

    /// Location of the database file; `None` for in-memory ledgers.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn initialize(conn: Connection, path: Option<PathBuf>) -> CoreResult<Self> {
        conn.busy_timeout(BUSY_TIMEOUT).map_err(storage_err)?;
        conn.execute_batch(SCHEMA).map_err(storage_err)?;
        // Fails early when an existing table lacks the expected columns.
        conn.prepare(&format!("{SELECT_COLUMNS} LIMIT 0"))
            .map_err(storage_err)?;
        Ok(Self { conn, path })
    }

    /// `(date, category, amount)` of every row in `window`, in insertion order.
    ///
    /// Totals are added up here rather than with SQL `SUM`, whose compensated
    /// summation disagrees with plain row-order addition.
    fn amounts(&self, window: Option<DateWindow>) -> CoreResult<Vec<(NaiveDate, String, f64)>> {
        let (clause, bounds) = window_clause(window.as_ref());
        let sql = format!("SELECT date, category, amount FROM expenses{clause} ORDER BY id");
        let mut stmt = self.conn.prepare(&sql).map_err(storage_err)?;
        let rows = stmt
            .query_map(bounds.as_slice(), |row| {
                let date: NaiveDate = row.get(0)?;
                let category: Option<String> = row.get(1)?;
                let amount: Option<f64> = row.get(2)?;
                Ok((date, category.unwrap_or_default(), amount.unwrap_or(0.0)))
            })
            .map_err(storage_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage_err)?;
        Ok(rows)
    }

    fn select(&self, sql: &str, params: &[&dyn ToSql]) -> CoreResult<Vec<ExpenseEntry>> {
        let mut stmt = self.conn.prepare(sql).map_err(storage_err)?;
        let rows = stmt
            .query_map(params, map_entry)
            .map_err(storage_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage_err)?;
        Ok(rows)
    }
}

impl ExpenseStore for SqliteExpenseStore {
    fn insert(&mut self, expense: NewExpense) -> CoreResult<i64> {
        self.conn
            .execute(
                "INSERT INTO expenses (date, category, amount, description) VALUES (?1, ?2, ?3, ?4)",
                params![
                    expense.date,
                    expense.category,
                    expense.amount,
                    expense.description
                ],
            )
            .map_err(storage_err)?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, category = %expense.category, "inserted expense");
        Ok(id)
    }

    fn delete(&mut self, id: i64) -> CoreResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])
            .map_err(storage_err)?;
        Ok(removed > 0)
    }

    fn delete_matching(&mut self, date: NaiveDate, amount: f64) -> CoreResult<usize> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM expenses WHERE date = ?1 AND amount = ?2",
                params![date, amount],
            )
            .map_err(storage_err)?;
        if removed > 1 {
            tracing::warn!(%date, amount, removed, "delete by date and amount removed several entries");
        }
        Ok(removed)
    }

    fn get(&self, id: i64) -> CoreResult<Option<ExpenseEntry>> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                map_entry,
            )
            .optional()
            .map_err(storage_err)
    }

    fn query(&self, filter: Option<&ExpenseFilter>) -> CoreResult<Vec<ExpenseEntry>> {
        let Some(filter) = filter else {
            let limit = i64::try_from(RECENT_LIMIT).unwrap_or(i64::MAX);
            return self.select(
                &format!("{SELECT_COLUMNS}{NEWEST_FIRST} LIMIT ?1"),
                &[&limit as &dyn ToSql],
            );
        };

        let mut sql = format!("{SELECT_COLUMNS} WHERE date BETWEEN ?1 AND ?2");
        let mut args: Vec<&dyn ToSql> = Vec::new();
        args.push(&filter.window.start);
        args.push(&filter.window.end);
        if let Some(category) = filter.category.as_ref() {
            sql.push_str(" AND category = ?3");
            args.push(category);
        }
        sql.push_str(NEWEST_FIRST);

        let mut rows = self.select(&sql, &args)?;
        rows.retain(|entry| filter.matches_text(entry));
        tracing::debug!(rows = rows.len(), "filtered expense query");
        Ok(rows)
    }

    fn all_entries(&self) -> CoreResult<Vec<ExpenseEntry>> {
        self.select(&format!("{SELECT_COLUMNS}{NEWEST_FIRST}"), &[])
    }

    fn sum_by_category(&self, window: Option<DateWindow>) -> CoreResult<BTreeMap<String, f64>> {
        let mut totals = BTreeMap::new();
        for (_, category, amount) in self.amounts(window)? {
            *totals.entry(category).or_insert(0.0) += amount;
        }
        Ok(totals)
    }

    fn sum_total(&self, window: Option<DateWindow>) -> CoreResult<f64> {
        Ok(self.amounts(window)?.into_iter().map(|(_, _, amount)| amount).sum())
    }

    fn daily_totals(&self, window: DateWindow) -> CoreResult<Vec<DailyTotal>> {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (date, _, amount) in self.amounts(Some(window))? {
            *by_date.entry(date).or_insert(0.0) += amount;
        }
        Ok(by_date
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect())
    }

    fn count(&self) -> CoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))
            .map_err(storage_err)?;
        usize::try_from(count).map_err(|err| CoreError::Storage(err.to_string()))
    }
}

fn window_clause(window: Option<&DateWindow>) -> (&'static str, Vec<&dyn ToSql>) {
    match window {
        Some(window) => (
            " WHERE date BETWEEN ?1 AND ?2",
            vec![&window.start as &dyn ToSql, &window.end],
        ),
        None => ("", Vec::new()),
    }
}

fn map_entry(row: &Row<'_>) -> rusqlite::Result<ExpenseEntry> {
    let category: Option<String> = row.get(2)?;
    let amount: Option<f64> = row.get(3)?;
    let description: Option<String> = row.get(4)?;
    let created_at: Option<NaiveDateTime> = row.get(5)?;
    let date: NaiveDate = row.get(1)?;
    Ok(ExpenseEntry {
        id: row.get(0)?,
        date,
        category: category.unwrap_or_default(),
        amount: amount.unwrap_or(0.0),
        description: description.unwrap_or_default(),
        created_at: created_at.unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN)),
    })
}

fn storage_err(err: rusqlite::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_timestamp_is_assigned_by_the_database() {
        let mut store = SqliteExpenseStore::open_in_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let id = store.insert(NewExpense::new(date, "Food", 1.0)).unwrap();
        let entry = store.get(id).unwrap().expect("entry stored");
        assert!(entry.created_at.date() >= date);
    }

    #[test]
    fn dates_are_stored_as_iso_text() {
        let mut store = SqliteExpenseStore::open_in_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        store.insert(NewExpense::new(date, "Food", 1.0)).unwrap();
        let raw: String = store
            .conn
            .query_row("SELECT date FROM expenses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(raw, "2024-03-01");
    }

    #[test]
    fn null_columns_from_other_writers_read_as_defaults() {
        let store = SqliteExpenseStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO expenses (date, category, amount) VALUES ('2024-03-02', 'Food', 3)",
                [],
            )
            .unwrap();
        let rows = store.all_entries().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "");
        assert_eq!(rows[0].amount, 3.0);
    }
}
