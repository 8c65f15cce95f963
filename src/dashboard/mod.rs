//! The monthly overview page: headline figures for the current month and a
//! pie chart of students per shift.

mod aggregation;
mod cards;
mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
