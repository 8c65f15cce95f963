//! Joins bookings with the students who paid them.
//!
//! Bookings reference students without a foreign key constraint, so a booking
//! whose student has been deleted must still render. The join substitutes
//! "N/A" for the student columns instead of dropping the row.

use std::collections::HashMap;

use crate::{database_id::StudentId, student::Student};

use super::Booking;

/// The placeholder shown for student columns when the referenced student no
/// longer exists.
pub const MISSING_STUDENT_PLACEHOLDER: &str = "N/A";

/// A booking enriched with columns from the student who paid it.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRow {
    /// The underlying booking.
    pub booking: Booking,
    /// The student's name, or "N/A" when the reference dangles.
    pub student_name: String,
    /// The student's membership expiry date, or "N/A".
    pub valid_upto: String,
    /// The student's shift name, or "N/A".
    pub shift_name: String,
}

/// Index students by their database ID for joining against bookings.
pub fn students_by_id(students: Vec<Student>) -> HashMap<StudentId, Student> {
    students
        .into_iter()
        .map(|student| (student.id, student))
        .collect()
}

/// Enrich each booking with the matching student's columns, preserving the
/// booking order.
pub fn join_bookings_with_students(
    bookings: &[Booking],
    students: &HashMap<StudentId, Student>,
) -> Vec<BookingRow> {
    bookings
        .iter()
        .map(|booking| match students.get(&booking.student_id) {
            Some(student) => BookingRow {
                booking: booking.clone(),
                student_name: student.name.clone(),
                valid_upto: student.valid_upto.clone(),
                shift_name: student.shift_name.clone(),
            },
            None => BookingRow {
                booking: booking.clone(),
                student_name: MISSING_STUDENT_PLACEHOLDER.to_owned(),
                valid_upto: MISSING_STUDENT_PLACEHOLDER.to_owned(),
                shift_name: MISSING_STUDENT_PLACEHOLDER.to_owned(),
            },
        })
        .collect()
}
