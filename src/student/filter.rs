//! Named filter modes for the students list.

use serde::Deserialize;
use time::Date;

use crate::dates::{is_current_month, parse_display_date};

use super::Student;

/// The named filter modes offered on the students page.
///
/// Modes never compose; each request re-fetches the full set and applies a
/// single mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudentFilter {
    /// Every student, regardless of status.
    #[default]
    All,
    /// Students whose joining date falls in the current month.
    RegisteredThisMonth,
    /// Students who were marked inactive during the current month.
    DroppedThisMonth,
    /// Every student marked inactive.
    AllDropped,
}

impl StudentFilter {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::RegisteredThisMonth => "registered-this-month",
            Self::DroppedThisMonth => "dropped-this-month",
            Self::AllDropped => "all-dropped",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Students",
            Self::RegisteredThisMonth => "Registered This Month",
            Self::DroppedThisMonth => "Dropped This Month",
            Self::AllDropped => "All Dropped",
        }
    }

    /// Apply this filter mode to the full student set.
    pub fn apply(self, students: Vec<Student>, today: Date) -> Vec<Student> {
        match self {
            Self::All => students,
            Self::RegisteredThisMonth => students
                .into_iter()
                .filter(|student| {
                    is_current_month(parse_display_date(&student.joining_date), today)
                })
                .collect(),
            Self::DroppedThisMonth => students
                .into_iter()
                .filter(|student| {
                    !student.active
                        && is_current_month(
                            student
                                .last_active_toggle
                                .as_deref()
                                .and_then(parse_display_date),
                            today,
                        )
                })
                .collect(),
            Self::AllDropped => students
                .into_iter()
                .filter(|student| !student.active)
                .collect(),
        }
    }
}
