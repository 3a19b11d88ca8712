//! Locale settings that drive break deduction and day synthesis.

use std::collections::BTreeMap;

use chrono::TimeDelta;
use thiserror::Error;

/// Errors for malformed locale configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The default work time must be a positive duration.
    #[error("default work time must be positive, got {0}")]
    NonPositiveDefaultWorkTime(TimeDelta),

    /// A break table entry carries a negative threshold or break.
    #[error("negative break rule: {threshold} requires {amount}")]
    NegativeBreakRule {
        threshold: TimeDelta,
        amount: TimeDelta,
    },
}

/// Country-specific settings for report calculation.
///
/// `timezone` and `date_format` are carried for report renderers only;
/// calculation never reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// ISO 3166-1 country code.
    pub country: String,
    /// IANA timezone name used when formatting report output.
    pub timezone: Option<String>,
    /// Date format string used when formatting report output.
    pub date_format: Option<String>,
    /// Assumed length of a full work day (including breaks). Used to
    /// synthesize a missing end-of-day event.
    pub default_work_time: TimeDelta,
    /// Mandatory break table: worked-duration threshold to required
    /// break. Every satisfied threshold contributes its break; the sum
    /// is independent of iteration order by construction.
    pub breaks: BTreeMap<TimeDelta, TimeDelta>,
}

impl Locale {
    /// A locale with no presentation settings.
    pub fn new(
        country: impl Into<String>,
        default_work_time: TimeDelta,
        breaks: BTreeMap<TimeDelta, TimeDelta>,
    ) -> Self {
        Self {
            country: country.into(),
            timezone: None,
            date_format: None,
            default_work_time,
            breaks,
        }
    }

    /// Rejects configurations the engine cannot calculate with.
    pub fn validate(&self) -> Result<(), LocaleError> {
        if self.default_work_time <= TimeDelta::zero() {
            return Err(LocaleError::NonPositiveDefaultWorkTime(
                self.default_work_time,
            ));
        }
        for (&threshold, &amount) in &self.breaks {
            if threshold < TimeDelta::zero() || amount < TimeDelta::zero() {
                return Err(LocaleError::NegativeBreakRule { threshold, amount });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn german_locale() -> Locale {
        Locale::new(
            "DE",
            TimeDelta::hours(8) + TimeDelta::minutes(30),
            BTreeMap::from([
                (TimeDelta::hours(6), TimeDelta::minutes(30)),
                (TimeDelta::hours(9), TimeDelta::minutes(15)),
            ]),
        )
    }

    #[test]
    fn well_formed_locale_passes() {
        assert_eq!(german_locale().validate(), Ok(()));
    }

    #[test]
    fn zero_default_work_time_is_rejected() {
        let mut locale = german_locale();
        locale.default_work_time = TimeDelta::zero();
        assert!(matches!(
            locale.validate(),
            Err(LocaleError::NonPositiveDefaultWorkTime(_))
        ));
    }

    #[test]
    fn negative_break_rule_is_rejected() {
        let mut locale = german_locale();
        locale
            .breaks
            .insert(TimeDelta::hours(10), TimeDelta::minutes(-5));
        assert!(matches!(
            locale.validate(),
            Err(LocaleError::NegativeBreakRule { .. })
        ));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let mut locale = german_locale();
        locale
            .breaks
            .insert(TimeDelta::minutes(-1), TimeDelta::minutes(5));
        assert!(matches!(
            locale.validate(),
            Err(LocaleError::NegativeBreakRule { .. })
        ));
    }
}
