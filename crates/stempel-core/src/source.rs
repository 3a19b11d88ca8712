//! Narrow interfaces to the engine's external collaborators.
//!
//! The engine consumes events and produces a [`MonthlyReport`]; where
//! those come from and go to (databases, object stores, spreadsheets,
//! e-mail) is behind these traits. Implementations live in other
//! crates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::event::AttendanceEvent;
use crate::report::MonthlyReport;
use crate::types::DeviceId;

/// A single public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Date of the holiday.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
}

/// Provides the attendance events a report is calculated from.
pub trait RecordSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists the events captured by `device` within `[start, end]`,
    /// both bounds inclusive.
    fn records(
        &self,
        device: &DeviceId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceEvent>, Self::Error>;
}

/// Provides public holidays for report presentation.
pub trait HolidaySource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Holidays of the given month in the given country.
    fn holidays(
        &self,
        year: i32,
        month: u32,
        country: &str,
    ) -> Result<Vec<Holiday>, Self::Error>;
}

/// Renders a finished report into an output format.
pub trait ReportRenderer {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produces the rendered report bytes (e.g. a spreadsheet).
    fn render(&self, report: &MonthlyReport) -> Result<Vec<u8>, Self::Error>;
}

/// Delivers a rendered report to a target.
pub trait ReportPublisher {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends the payload to the named target (file path, bucket key,
    /// mail address; interpretation is up to the implementation).
    fn publish(&self, payload: &[u8], target: &str) -> Result<(), Self::Error>;
}
