//! Core report calculation for the stempel time tracker.
//!
//! This crate turns a chronologically unordered set of attendance
//! events into a per-day and monthly summary of worked time, break
//! time, and day classification (work/illness/vacation):
//! - Calendar helpers: date-only comparison, month iteration, weekend test
//! - Pairing: clock-in/clock-out events become worked intervals, with a
//!   synthesized closing event for unclosed days
//! - Break policy: locale-configured mandatory break deduction
//! - Gap filling: days without events inherit a carried-over
//!   illness/vacation classification
//!
//! Persistence, holiday lookup, and report rendering/delivery are
//! external collaborators behind the traits in [`source`].

pub mod calendar;
mod event;
mod locale;
mod report;
pub mod source;
mod types;

pub use event::{AttendanceEvent, DayType, UnknownDayType};
pub use locale::{Locale, LocaleError};
pub use report::{DayRecord, MonthlyReport, ReportCalculator, ReportError};
pub use types::{DeviceId, RecordKey, ValidationError};
