//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::{DatabaseId, ExpenseId},
};

/// Money spent running the study centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: DatabaseId,
    /// The amount spent.
    pub amount: f64,
    /// What kind of expense this was, e.g. "Electricity" or "Supplies".
    pub category: String,
    /// A text description of what the money went on.
    pub description: String,
    /// When the money was spent, as a `DD/MM/YYYY` string.
    pub expense_date: String,
    /// Whether the expense has been checked off against receipts.
    pub verified: bool,
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                expense_date TEXT NOT NULL,
                verified INTEGER NOT NULL DEFAULT 0
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    Ok(())
}

/// Retrieve all expenses from the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, category, description, expense_date, verified FROM expense",
        )?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
        .collect()
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to an expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, amount, category, description, expense_date, verified
             FROM expense WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Mark an expense as verified.
///
/// The `UPDATE` is guarded on `verified = 0` so an expense can only move from
/// unverified to verified once.
///
/// # Errors
/// This function will return a:
/// - [Error::VerifyMissingExpense] if `id` does not refer to an expense,
/// - or [Error::ExpenseAlreadyVerified] if the expense was already verified,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn verify_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_updated = connection.execute(
        "UPDATE expense SET verified = 1 WHERE id = :id AND verified = 0",
        &[(":id", &id)],
    )?;

    if rows_updated == 1 {
        return Ok(());
    }

    match get_expense(id, connection) {
        Ok(_) => Err(Error::ExpenseAlreadyVerified),
        Err(Error::NotFound) => Err(Error::VerifyMissingExpense),
        Err(error) => Err(error),
    }
}

/// Map a database row to an [Expense].
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        expense_date: row.get(4)?,
        verified: row.get(5)?,
    })
}

#[cfg(test)]
pub(crate) fn insert_expense(expense: &Expense, connection: &Connection) -> Expense {
    connection
        .prepare(
            "INSERT INTO expense (amount, category, description, expense_date, verified)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, category, description, expense_date, verified",
        )
        .unwrap()
        .query_row(
            (
                expense.amount,
                &expense.category,
                &expense.description,
                &expense.expense_date,
                expense.verified,
            ),
            map_expense_row,
        )
        .unwrap()
}

#[cfg(test)]
pub(crate) fn sample_expense(category: &str) -> Expense {
    Expense {
        id: 0,
        amount: 750.0,
        category: category.to_owned(),
        description: "Monthly bill".to_owned(),
        expense_date: "10/02/2026".to_owned(),
        verified: false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
