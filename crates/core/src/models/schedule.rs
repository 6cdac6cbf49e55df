use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::{
    conflict::{ConflictReason, ConflictReport},
    errors::CourseError,
};

/// Day on which a weekly slot recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Every day, monday first
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = s.trim();
        DayOfWeek::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(day))
            .ok_or_else(|| CourseError::Validation(format!("Unknown day of week: {day:?}")))
    }
}

/// Wall-clock time of day, stored as minutes since midnight.
///
/// Parsed from `"HH:MM"` (a single-digit hour is accepted, as is a
/// trailing `:00` seconds field) and always rendered zero-padded, so
/// comparisons never depend on string formatting. `"24:00"` is the end of
/// the day; it can close a slot but never open one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MINUTES_PER_DAY: u16 = 24 * 60;
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(Self::MINUTES_PER_DAY);

    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(u16::from(hour) * 60 + u16::from(minute)))
        } else {
            None
        }
    }

    /// Accepts `0..=1440`; 1440 is [`TimeOfDay::END_OF_DAY`].
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= Self::MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || CourseError::Validation(format!("Invalid time of day: {raw:?}"));

        if matches!(raw, "24:00" | "24:00:00") {
            return Ok(TimeOfDay::END_OF_DAY);
        }

        let time = NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| invalid())?;

        if time.second() != 0 || time.nanosecond() != 0 {
            return Err(invalid());
        }

        TimeOfDay::from_hm(time.hour() as u8, time.minute() as u8).ok_or_else(invalid)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Anything occupying a half-open `[start, end)` block on one weekday
pub trait TimeBlock {
    fn day(&self) -> DayOfWeek;
    fn start(&self) -> TimeOfDay;
    fn end(&self) -> TimeOfDay;

    /// Half-open overlap on the same day. Blocks that only touch at an
    /// endpoint do not overlap.
    fn overlaps<B: TimeBlock + ?Sized>(&self, other: &B) -> bool {
        self.day() == other.day() && !(self.end() <= other.start() || self.start() >= other.end())
    }
}

/// A time block held in a specific room
pub trait RoomBooking: TimeBlock {
    fn room(&self) -> &str;
}

/// One weekly recurring block of a persisted course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub id: Uuid,
    pub day_of_week: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub room: String,
}

impl ScheduleSlot {
    pub fn from_candidate(candidate: SlotCandidate) -> Self {
        Self {
            id: Uuid::new_v4(),
            day_of_week: candidate.day_of_week,
            start_time: candidate.start_time,
            end_time: candidate.end_time,
            room: candidate.room,
        }
    }
}

impl TimeBlock for ScheduleSlot {
    fn day(&self) -> DayOfWeek {
        self.day_of_week
    }

    fn start(&self) -> TimeOfDay {
        self.start_time
    }

    fn end(&self) -> TimeOfDay {
        self.end_time
    }
}

impl RoomBooking for ScheduleSlot {
    fn room(&self) -> &str {
        &self.room
    }
}

/// A validated slot that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCandidate {
    pub day_of_week: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub room: String,
}

impl SlotCandidate {
    /// Builds a candidate, rejecting empty rooms and non-positive durations.
    pub fn new(
        day_of_week: DayOfWeek,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        room: &str,
    ) -> Result<Self, CourseError> {
        let room = room.trim();
        if room.is_empty() {
            return Err(CourseError::Validation("room must not be empty".to_string()));
        }
        if end_time <= start_time {
            return Err(CourseError::Validation(format!(
                "endTime {end_time} must be after startTime {start_time}"
            )));
        }

        Ok(Self {
            day_of_week,
            start_time,
            end_time,
            room: room.to_string(),
        })
    }
}

impl From<&ScheduleSlot> for SlotCandidate {
    fn from(slot: &ScheduleSlot) -> Self {
        Self {
            day_of_week: slot.day_of_week,
            start_time: slot.start_time,
            end_time: slot.end_time,
            room: slot.room.clone(),
        }
    }
}

impl TimeBlock for SlotCandidate {
    fn day(&self) -> DayOfWeek {
        self.day_of_week
    }

    fn start(&self) -> TimeOfDay {
        self.start_time
    }

    fn end(&self) -> TimeOfDay {
        self.end_time
    }
}

impl RoomBooking for SlotCandidate {
    fn room(&self) -> &str {
        &self.room
    }
}

/// Raw slot as submitted by a client; every field is optional so missing
/// values surface as validation errors instead of deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub day_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room: Option<String>,
}

impl TryFrom<&SlotRequest> for SlotCandidate {
    type Error = CourseError;

    fn try_from(request: &SlotRequest) -> Result<Self, Self::Error> {
        let day: DayOfWeek = required(&request.day_of_week, "dayOfWeek")?.parse()?;
        let start: TimeOfDay = required(&request.start_time, "startTime")?.parse()?;
        let end: TimeOfDay = required(&request.end_time, "endTime")?.parse()?;
        let room = required(&request.room, "room")?;

        SlotCandidate::new(day, start, end, room)
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, CourseError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CourseError::Validation(format!("{field} is required")))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConflictRequest {
    #[serde(flatten)]
    pub slot: SlotRequest,
    pub teacher_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConflictResponse {
    pub conflict: bool,
    pub reasons: Vec<ConflictReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckConflictResponse {
    /// Body returned alongside a 400 when a conflict check payload is unusable
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            conflict: false,
            reasons: Vec::new(),
            message: Some(message.into()),
        }
    }
}

impl From<ConflictReport> for CheckConflictResponse {
    fn from(report: ConflictReport) -> Self {
        Self {
            conflict: report.conflict,
            reasons: report.reasons.into_iter().collect(),
            message: None,
        }
    }
}
