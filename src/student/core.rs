//! Defines the core data model and database queries for students.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// A member of the study centre.
///
/// Business dates (`valid_upto`, `joining_date`, `last_active_toggle`) are
/// stored as `DD/MM/YYYY` display strings and parsed on demand with
/// [crate::dates::parse_display_date].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// The ID of the student.
    pub id: DatabaseId,
    /// The student's full name.
    pub name: String,
    /// The student's phone number, including the country code for WhatsApp links.
    pub phone: String,
    /// The student's home address.
    pub address: String,
    /// The receipt number from the most recent payment, if one was recorded.
    pub receipt_number: Option<i64>,
    /// The name of the shift the student attends, e.g. "Morning" or "Full Shift".
    pub shift_name: String,
    /// When the student's shift starts, e.g. "06:00 AM".
    pub shift_start: String,
    /// When the student's shift ends, e.g. "12:00 PM".
    pub shift_end: String,
    /// The date the membership is paid up to, as a `DD/MM/YYYY` string.
    pub valid_upto: String,
    /// Whether the student is an active member.
    pub active: bool,
    /// The date the student joined, as a `DD/MM/YYYY` string.
    pub joining_date: String,
    /// The reason the student left, if they dropped out.
    pub drop_reason: Option<String>,
    /// The date `active` was last flipped, as a `DD/MM/YYYY` string.
    pub last_active_toggle: Option<String>,
}

/// Create the student table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_student_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS student (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                phone TEXT NOT NULL,
                address TEXT NOT NULL,
                receipt_number INTEGER,
                shift_name TEXT NOT NULL,
                shift_start TEXT NOT NULL,
                shift_end TEXT NOT NULL,
                valid_upto TEXT NOT NULL,
                active INTEGER NOT NULL,
                joining_date TEXT NOT NULL,
                drop_reason TEXT,
                last_active_toggle TEXT
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('student', 0)",
        (),
    )?;

    Ok(())
}

/// Retrieve all students from the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_students(connection: &Connection) -> Result<Vec<Student>, Error> {
    connection
        .prepare(
            "SELECT id, name, phone, address, receipt_number, shift_name, shift_start,
                    shift_end, valid_upto, active, joining_date, drop_reason,
                    last_active_toggle
             FROM student",
        )?
        .query_map([], map_student_row)?
        .map(|maybe_student| maybe_student.map_err(Error::SqlError))
        .collect()
}

/// Sort students by receipt number, highest first.
///
/// Students without a receipt number are treated as zero so they sort last.
pub fn sort_students_by_receipt(students: &mut [Student]) {
    students.sort_by_key(|student| std::cmp::Reverse(student.receipt_number.unwrap_or(0)));
}

/// Map a database row to a [Student].
pub fn map_student_row(row: &Row) -> Result<Student, rusqlite::Error> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        address: row.get(3)?,
        receipt_number: row.get(4)?,
        shift_name: row.get(5)?,
        shift_start: row.get(6)?,
        shift_end: row.get(7)?,
        valid_upto: row.get(8)?,
        active: row.get(9)?,
        joining_date: row.get(10)?,
        drop_reason: row.get(11)?,
        last_active_toggle: row.get(12)?,
    })
}

#[cfg(test)]
pub(crate) fn insert_student(student: &Student, connection: &Connection) -> Student {
    connection
        .prepare(
            "INSERT INTO student (name, phone, address, receipt_number, shift_name,
                                  shift_start, shift_end, valid_upto, active, joining_date,
                                  drop_reason, last_active_toggle)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             RETURNING id, name, phone, address, receipt_number, shift_name, shift_start,
                       shift_end, valid_upto, active, joining_date, drop_reason,
                       last_active_toggle",
        )
        .unwrap()
        .query_row(
            (
                &student.name,
                &student.phone,
                &student.address,
                student.receipt_number,
                &student.shift_name,
                &student.shift_start,
                &student.shift_end,
                &student.valid_upto,
                student.active,
                &student.joining_date,
                &student.drop_reason,
                &student.last_active_toggle,
            ),
            map_student_row,
        )
        .unwrap()
}

#[cfg(test)]
pub(crate) fn sample_student(name: &str) -> Student {
    Student {
        id: 0,
        name: name.to_owned(),
        phone: "911234567890".to_owned(),
        address: "12 Library Lane".to_owned(),
        receipt_number: Some(100),
        shift_name: "Morning".to_owned(),
        shift_start: "06:00 AM".to_owned(),
        shift_end: "12:00 PM".to_owned(),
        valid_upto: "28/02/2026".to_owned(),
        active: true,
        joining_date: "01/01/2026".to_owned(),
        drop_reason: None,
        last_active_toggle: None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
