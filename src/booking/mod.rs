//! Booking management for the front desk app.
//!
//! This module contains everything related to bookings (fee payments):
//! - The `Booking` model and its database queries
//! - The join that enriches bookings with student details
//! - Named filter modes for the bookings list
//! - View handlers for the list page and the two-step verification flow

mod bookings_page;
pub(crate) mod core;
mod filter;
mod join;
mod verify_endpoint;
mod verify_page;

pub use bookings_page::get_bookings_page;
pub use core::{Booking, create_booking_table, get_all_bookings, get_booking, verify_booking};
pub use filter::BookingFilter;
pub use join::{BookingRow, join_bookings_with_students, students_by_id};
pub use verify_endpoint::verify_booking_endpoint;
pub use verify_page::get_booking_verify_page;
