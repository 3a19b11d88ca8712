//! Attendance events and day classification values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{DeviceId, RecordKey};

/// Classification of a tracked day, also the kind of a captured event.
///
/// `Weekend` exists as a classification value only; capture devices
/// never produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    Work,
    Illness,
    Vacation,
    Weekend,
}

impl DayType {
    /// True for the types that represent a full-day absence and
    /// carry over into neighboring days without events.
    pub const fn is_absence(self) -> bool {
        matches!(self, Self::Illness | Self::Vacation)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Illness => "illness",
            Self::Vacation => "vacation",
            Self::Weekend => "weekend",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DayType {
    type Err = UnknownDayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "illness" => Ok(Self::Illness),
            "vacation" => Ok(Self::Vacation),
            "weekend" => Ok(Self::Weekend),
            _ => Err(UnknownDayType(s.to_string())),
        }
    }
}

impl Serialize for DayType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown day type strings.
#[derive(Debug, Clone, Error)]
#[error("unknown day type: {0}")]
pub struct UnknownDayType(String);

/// One captured (or synthesized) attendance moment.
///
/// Timestamps are second precision on the UTC scale; timezone handling
/// is a presentation concern of report renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Store-assigned key. `None` until the record has been persisted,
    /// always `None` for synthesized events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<RecordKey>,
    /// Device that captured the event. `None` for synthesized events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceId>,
    /// What was tracked.
    pub kind: DayType,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// True only for events the engine invented to close an open day.
    #[serde(default)]
    pub estimated: bool,
}

impl AttendanceEvent {
    /// A real event captured by a device.
    pub const fn captured(device: DeviceId, kind: DayType, timestamp: DateTime<Utc>) -> Self {
        Self {
            key: None,
            device: Some(device),
            kind,
            timestamp,
            estimated: false,
        }
    }

    /// A synthesized end-of-day marker. Always `Work`-typed and flagged
    /// as estimated; carries neither key nor device.
    pub(crate) const fn estimated_end(timestamp: DateTime<Utc>) -> Self {
        Self {
            key: None,
            device: None,
            kind: DayType::Work,
            timestamp,
            estimated: true,
        }
    }

    /// Attaches the key assigned by the persistence collaborator.
    #[must_use]
    pub fn with_key(mut self, key: RecordKey) -> Self {
        self.key = Some(key);
        self
    }
}
