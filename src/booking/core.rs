//! Defines the core data model and database queries for bookings.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::{BookingId, DatabaseId},
};

/// A fee payment made by a student.
///
/// `amount` is the total paid; `cash` and `online` record how it was split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// The ID of the booking.
    pub id: DatabaseId,
    /// When the payment was taken, as a `DD/MM/YYYY` string.
    pub booking_date: String,
    /// The total amount paid.
    pub amount: f64,
    /// The portion paid in cash.
    pub cash: f64,
    /// The portion paid by online transfer.
    pub online: f64,
    /// Whether the payment has been checked off against the bank statement.
    pub verified: bool,
    /// The ID of the student who paid.
    ///
    /// There is no foreign key constraint; a booking may reference a student
    /// that no longer exists and still renders (as "N/A") in the table.
    pub student_id: DatabaseId,
    /// The name on the account the transfer came from, when it differs from
    /// the student's own name.
    pub student_account_name: Option<String>,
}

/// Create the booking table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_booking_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS booking (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                booking_date TEXT NOT NULL,
                amount REAL NOT NULL,
                cash REAL NOT NULL,
                online REAL NOT NULL,
                verified INTEGER NOT NULL DEFAULT 0,
                student_id INTEGER NOT NULL,
                student_account_name TEXT
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('booking', 0)",
        (),
    )?;

    Ok(())
}

/// Retrieve all bookings from the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_bookings(connection: &Connection) -> Result<Vec<Booking>, Error> {
    connection
        .prepare(
            "SELECT id, booking_date, amount, cash, online, verified, student_id,
                    student_account_name
             FROM booking",
        )?
        .query_map([], map_booking_row)?
        .map(|maybe_booking| maybe_booking.map_err(Error::SqlError))
        .collect()
}

/// Retrieve a booking from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a booking,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_booking(id: BookingId, connection: &Connection) -> Result<Booking, Error> {
    let booking = connection
        .prepare(
            "SELECT id, booking_date, amount, cash, online, verified, student_id,
                    student_account_name
             FROM booking WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_booking_row)?;

    Ok(booking)
}

/// Mark a booking as verified.
///
/// The `UPDATE` is guarded on `verified = 0` so the database is the source of
/// truth: a booking can only move from unverified to verified once.
///
/// # Errors
/// This function will return a:
/// - [Error::VerifyMissingBooking] if `id` does not refer to a booking,
/// - or [Error::BookingAlreadyVerified] if the booking was already verified,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn verify_booking(id: BookingId, connection: &Connection) -> Result<(), Error> {
    let rows_updated = connection.execute(
        "UPDATE booking SET verified = 1 WHERE id = :id AND verified = 0",
        &[(":id", &id)],
    )?;

    if rows_updated == 1 {
        return Ok(());
    }

    match get_booking(id, connection) {
        Ok(_) => Err(Error::BookingAlreadyVerified),
        Err(Error::NotFound) => Err(Error::VerifyMissingBooking),
        Err(error) => Err(error),
    }
}

/// Map a database row to a [Booking].
pub fn map_booking_row(row: &Row) -> Result<Booking, rusqlite::Error> {
    Ok(Booking {
        id: row.get(0)?,
        booking_date: row.get(1)?,
        amount: row.get(2)?,
        cash: row.get(3)?,
        online: row.get(4)?,
        verified: row.get(5)?,
        student_id: row.get(6)?,
        student_account_name: row.get(7)?,
    })
}

#[cfg(test)]
pub(crate) fn insert_booking(booking: &Booking, connection: &Connection) -> Booking {
    connection
        .prepare(
            "INSERT INTO booking (booking_date, amount, cash, online, verified, student_id,
                                  student_account_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, booking_date, amount, cash, online, verified, student_id,
                       student_account_name",
        )
        .unwrap()
        .query_row(
            (
                &booking.booking_date,
                booking.amount,
                booking.cash,
                booking.online,
                booking.verified,
                booking.student_id,
                &booking.student_account_name,
            ),
            map_booking_row,
        )
        .unwrap()
}

#[cfg(test)]
pub(crate) fn sample_booking(student_id: crate::database_id::StudentId) -> Booking {
    Booking {
        id: 0,
        booking_date: "05/02/2026".to_owned(),
        amount: 1500.0,
        cash: 500.0,
        online: 1000.0,
        verified: false,
        student_id,
        student_account_name: None,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::{Error, db::initialize};

    use super::{get_all_bookings, get_booking, insert_booking, sample_booking, verify_booking};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn get_all_returns_inserted_bookings() {
        let conn = get_test_connection();
        let first = insert_booking(&sample_booking(1), &conn);
        let second = insert_booking(&sample_booking(2), &conn);

        let bookings = get_all_bookings(&conn).unwrap();

        assert_eq!(bookings, vec![first, second]);
    }

    #[test]
    fn get_booking_returns_not_found_for_unknown_id() {
        let conn = get_test_connection();

        let result = get_booking(999, &conn);

        assert!(matches!(result, Err(Error::NotFound)), "got {result:?}");
    }

    #[test]
    fn verify_marks_booking_verified() {
        let conn = get_test_connection();
        let booking = insert_booking(&sample_booking(1), &conn);

        verify_booking(booking.id, &conn).unwrap();

        let updated = get_booking(booking.id, &conn).unwrap();
        assert!(updated.verified, "want booking to be verified");
    }

    #[test]
    fn verify_twice_fails() {
        let conn = get_test_connection();
        let booking = insert_booking(&sample_booking(1), &conn);
        verify_booking(booking.id, &conn).unwrap();

        let result = verify_booking(booking.id, &conn);

        assert!(
            matches!(result, Err(Error::BookingAlreadyVerified)),
            "got {result:?}"
        );
    }

    #[test]
    fn verify_missing_booking_fails() {
        let conn = get_test_connection();

        let result = verify_booking(999, &conn);

        assert!(
            matches!(result, Err(Error::VerifyMissingBooking)),
            "got {result:?}"
        );
    }
}
