//! Expense management for the front desk app.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and its database queries
//! - Named filter modes for the expenses list
//! - View handlers for the list page and the two-step verification flow

pub(crate) mod core;
mod expenses_page;
mod filter;
mod verify_endpoint;
mod verify_page;

pub use core::{Expense, create_expense_table, get_all_expenses, get_expense, verify_expense};
pub use expenses_page::get_expenses_page;
pub use filter::ExpenseFilter;
pub use verify_endpoint::verify_expense_endpoint;
pub use verify_page::get_expense_verify_page;
