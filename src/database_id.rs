//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// The ID of a student record.
pub type StudentId = i64;
/// The ID of a booking record.
pub type BookingId = i64;
/// The ID of an expense record.
pub type ExpenseId = i64;
