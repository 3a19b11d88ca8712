//! Monthly report calculation.
//!
//! Turns a flat, unordered set of attendance events into one
//! [`MonthlyReport`]: events are grouped by calendar day, paired into
//! worked intervals, reduced by the locale's mandatory break rules,
//! classified, and finally padded so the report covers every calendar
//! date of the requested month exactly once.
//!
//! # Algorithm Summary
//!
//! 1. Group events by the calendar date of their timestamp
//! 2. Per day: classify, pair clock-in/clock-out events (synthesizing a
//!    closing event for an odd count), apply break deductions
//! 3. Fill calendar gaps, carrying illness/vacation into days without
//!    events

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, TimeDelta};
use thiserror::Error;

use crate::calendar;
use crate::event::{AttendanceEvent, DayType};
use crate::locale::{Locale, LocaleError};

/// Errors for report calculation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The requested (year, month) pair is not a valid calendar month.
    #[error("{year}-{month:02} is not a valid calendar month")]
    InvalidMonth { year: i32, month: u32 },

    /// The locale configuration cannot be calculated with.
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// One calendar day of the report: its classification, computed worked
/// and break time, and the events (including synthesized ones) that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    /// Calendar date of this day.
    pub date: NaiveDate,
    /// Classification of this day.
    pub day_type: DayType,
    /// Total worked time after break deduction.
    pub working_time: TimeDelta,
    /// Total break time, observed or mandated.
    pub break_time: TimeDelta,
    /// Events contributing to this day, time-sorted after calculation.
    pub events: Vec<AttendanceEvent>,
}

impl DayRecord {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            day_type: DayType::Work,
            working_time: TimeDelta::zero(),
            break_time: TimeDelta::zero(),
            events: Vec::new(),
        }
    }

    fn filler(date: NaiveDate, day_type: DayType) -> Self {
        Self {
            day_type,
            ..Self::empty(date)
        }
    }
}

/// Finished report for one calendar month.
///
/// `days` holds every calendar date of the month exactly once, in
/// ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    /// Year this report was calculated for.
    pub year: i32,
    /// Month this report was calculated for (1-12).
    pub month: u32,
    /// Locale the report was calculated under.
    pub locale: Locale,
    /// One record per calendar day of the month, ascending by date.
    pub days: Vec<DayRecord>,
    /// Sum of all days' worked time.
    pub total_working_time: TimeDelta,
}

/// Calculates monthly reports from a set of attendance events.
///
/// The calculator is a pure function of its inputs: independent
/// instances (different device, different month) can run in parallel
/// without synchronization.
#[derive(Debug, Clone)]
pub struct ReportCalculator {
    locale: Locale,
    records: Vec<AttendanceEvent>,
}

impl ReportCalculator {
    /// A calculator over the given events and locale.
    pub const fn new(records: Vec<AttendanceEvent>, locale: Locale) -> Self {
        Self { locale, records }
    }

    /// Replaces the event set used for calculation.
    pub fn with_records(&mut self, records: Vec<AttendanceEvent>) {
        self.records = records;
    }

    /// Calculates the report for the given year and month.
    ///
    /// `latest_type` is the classification in effect at the start of
    /// the month, e.g. a vacation still running from the previous
    /// month. Events outside the requested month are ignored.
    pub fn monthly_report(
        &self,
        year: i32,
        month: u32,
        latest_type: DayType,
    ) -> Result<MonthlyReport, ReportError> {
        self.locale.validate()?;
        let month_dates: Vec<NaiveDate> = calendar::month_days(year, month)
            .ok_or(ReportError::InvalidMonth { year, month })?
            .collect();

        let mut days = split_to_days(&self.records);
        days.retain(|date, _| date.year() == year && date.month() == month);

        for (date, day) in &mut days {
            day.day_type = classify(*date, &day.events);
            calculate_working_time(day, self.locale.default_work_time);
            apply_breaks(day, &self.locale.breaks);
        }

        let days = fill_calendar_gaps(&month_dates, days, latest_type);
        let total_working_time = days
            .iter()
            .fold(TimeDelta::zero(), |acc, day| acc + day.working_time);

        tracing::debug!(
            year,
            month,
            days = days.len(),
            total_minutes = total_working_time.num_minutes(),
            "assembled monthly report"
        );
        Ok(MonthlyReport {
            year,
            month,
            locale: self.locale.clone(),
            days,
            total_working_time,
        })
    }
}

/// Groups events into per-day records, keyed and ordered by date.
/// Within a day, the caller's relative event order is preserved.
fn split_to_days(records: &[AttendanceEvent]) -> BTreeMap<NaiveDate, DayRecord> {
    let mut days: BTreeMap<NaiveDate, DayRecord> = BTreeMap::new();
    for record in records {
        let date = calendar::as_date(record.timestamp);
        days.entry(date)
            .or_insert_with(|| DayRecord::empty(date))
            .events
            .push(record.clone());
    }
    days
}

/// Classifies a day from its events: the first illness or vacation
/// event in input order wins, everything else is a work day.
///
/// First-seen-wins is a deliberate policy: callers that need a stable
/// result for days mixing both absence kinds must control input order.
fn classify(date: NaiveDate, events: &[AttendanceEvent]) -> DayType {
    let mut first_absence = None;
    let mut illness = false;
    let mut vacation = false;
    for event in events {
        match event.kind {
            DayType::Illness => illness = true,
            DayType::Vacation => vacation = true,
            DayType::Work | DayType::Weekend => continue,
        }
        if first_absence.is_none() {
            first_absence = Some(event.kind);
        }
    }
    if illness && vacation {
        tracing::warn!(%date, "day carries both illness and vacation events, first in input order wins");
    }
    first_absence.unwrap_or(DayType::Work)
}

/// Sums a day's worked time by pairing time-sorted events into
/// clock-in/clock-out intervals. An odd event count gets a synthesized
/// closing event first.
fn calculate_working_time(day: &mut DayRecord, default_work_time: TimeDelta) {
    day.working_time = TimeDelta::zero();
    day.break_time = TimeDelta::zero();
    if day.events.is_empty() {
        return;
    }

    // Stable sort: events with equal timestamps keep their input order,
    // so pairing is deterministic across runs.
    day.events.sort_by_key(|event| event.timestamp);
    if day.events.len() % 2 != 0 {
        if let Some(closing) = closing_event(&day.events, default_work_time) {
            // The synthesized timestamp is always past the last event,
            // so pushing keeps the list sorted.
            day.events.push(closing);
        }
    }

    day.working_time = day
        .events
        .chunks_exact(2)
        .fold(TimeDelta::zero(), |acc, pair| {
            acc + (pair[1].timestamp - pair[0].timestamp)
        });
}

/// An estimated end-of-day event for a day with an unclosed interval.
///
/// If the span from first to last event is still short of the default
/// work time, the day ends a full default work time after the first
/// event; otherwise one minute after the last one.
fn closing_event(
    events: &[AttendanceEvent],
    default_work_time: TimeDelta,
) -> Option<AttendanceEvent> {
    let first = events.first()?;
    let last = events.last()?;
    let span = last.timestamp - first.timestamp;
    let end = if span < default_work_time {
        first.timestamp + default_work_time
    } else {
        last.timestamp + TimeDelta::minutes(1)
    };
    Some(AttendanceEvent::estimated_end(end))
}

/// Applies the locale's mandatory break table to a computed day.
///
/// Every satisfied threshold contributes its break amount; the amounts
/// are summed, not tiered. If the breaks observed between worked
/// intervals fall short of that sum, the shortfall is deducted from
/// the worked time.
fn apply_breaks(day: &mut DayRecord, breaks: &BTreeMap<TimeDelta, TimeDelta>) {
    let span = match (day.events.first(), day.events.last()) {
        (Some(first), Some(last)) => last.timestamp - first.timestamp,
        _ => return,
    };

    let required = breaks
        .iter()
        .filter(|&(&threshold, _)| day.working_time >= threshold)
        .fold(TimeDelta::zero(), |acc, (_, &amount)| acc + amount);

    let observed = span - day.working_time;
    if observed < required {
        day.working_time = day.working_time - (required - observed);
        day.break_time = required;
    } else {
        day.break_time = observed;
    }
}

/// Pads the explicit days so every date of the month appears exactly
/// once, in ascending order.
///
/// A date without events becomes a filler day: it takes the carried
/// over type while that type is an absence, and a plain zero-duration
/// work day otherwise. Only explicit days update the carry-over, so an
/// absence run extends until the next day with events (or month end).
fn fill_calendar_gaps(
    month_dates: &[NaiveDate],
    mut explicit: BTreeMap<NaiveDate, DayRecord>,
    latest_type: DayType,
) -> Vec<DayRecord> {
    let mut carry = latest_type;
    let mut days = Vec::with_capacity(month_dates.len());
    for &date in month_dates {
        if let Some(day) = explicit.remove(&date) {
            carry = day.day_type;
            days.push(day);
        } else {
            let fill_type = if carry.is_absence() { carry } else { DayType::Work };
            days.push(DayRecord::filler(date, fill_type));
        }
    }
    debug_assert!(
        explicit.is_empty(),
        "days outside the requested month must be filtered out before gap filling"
    );
    days
}
