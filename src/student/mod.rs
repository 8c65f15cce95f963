//! Student management for the front desk app.
//!
//! This module contains everything related to students:
//! - The `Student` model and its database queries
//! - Named filter modes for the students list
//! - View handlers for the students and expired members pages

pub(crate) mod core;
mod expired_page;
mod filter;
mod students_page;

pub use core::{Student, create_student_table, get_all_students, sort_students_by_receipt};
pub use expired_page::get_expired_members_page;
pub use filter::StudentFilter;
pub use students_page::get_students_page;
