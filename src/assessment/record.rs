//! Canonical assessment records.
//!
//! Records arrive from the persistence layer in whatever shape the producer
//! used (`type` or `assessment_type` or `assessmentType`, `completedAt` or
//! `completed_at`, several status spellings). [`AssessmentRecord::from_value`]
//! reads all of them into one canonical shape.

use crate::error::{ReadinessError, RecordErrorKind, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TYPE_FIELDS: &[&str] = &["type", "assessment_type", "assessmentType"];
const COMPLETED_AT_FIELDS: &[&str] = &["completedAt", "completed_at"];
const PAYLOAD_FIELDS: &[&str] = &["rawPayload", "raw_payload"];

/// Lifecycle status of an assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum AssessmentStatus {
    Completed,
    InProgress,
    NotStarted,
    /// Missing or unrecognized status
    #[default]
    Unknown,
}

impl AssessmentStatus {
    /// Rank used to pick the canonical record; higher wins.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Completed => 3,
            Self::InProgress => 2,
            Self::NotStarted => 1,
            Self::Unknown => 0,
        }
    }

    /// Canonical wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::NotStarted => "not-started",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a status, accepting case, `_` and space variants.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let normalized: String = value
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "completed" | "complete" | "done" => Self::Completed,
            "in-progress" | "inprogress" | "started" => Self::InProgress,
            "not-started" | "notstarted" | "pending" => Self::NotStarted,
            _ => {
                tracing::warn!("Unrecognized assessment status '{value}'");
                Self::Unknown
            }
        }
    }
}

impl From<String> for AssessmentStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One assessment submission in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub assessment_type: String,
    pub status: AssessmentStatus,
    pub score: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Producer payload the record was read from
    #[serde(skip_serializing_if = "Value::is_null")]
    pub raw_payload: Value,
}

impl AssessmentRecord {
    /// Create a record with no score, timestamp or payload.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        assessment_type: impl Into<String>,
        status: AssessmentStatus,
    ) -> Self {
        Self {
            id: id.into(),
            assessment_type: assessment_type.into(),
            status,
            score: None,
            completed_at: None,
            raw_payload: Value::Null,
        }
    }

    /// Set the completion timestamp.
    #[must_use]
    pub fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Set the score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Whether the assessment was completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == AssessmentStatus::Completed
    }

    /// Read a record from a producer payload.
    ///
    /// `index` is the record's position in its batch and only feeds error
    /// messages. Fails when the payload is not an object or has no type
    /// (absent, null or blank); scalar types are stringified and every other
    /// field falls back to a default. Numeric completion times are epoch
    /// milliseconds. A payload that already
    /// carries a `rawPayload` (a serialized canonical record) keeps it, so
    /// reading a record back is lossless.
    pub fn from_value(value: &Value, index: usize) -> Result<Self> {
        let context = || format!("record #{index}");
        let Some(object) = value.as_object() else {
            return Err(ReadinessError::malformed_record(
                context(),
                RecordErrorKind::NotAnObject(json_kind(value).to_string()),
            ));
        };

        let assessment_type = first_field(object, TYPE_FIELDS)
            .and_then(|kind| match kind {
                Value::String(kind) => Some(kind.trim().to_string()),
                Value::Number(kind) => Some(kind.to_string()),
                Value::Bool(kind) => Some(kind.to_string()),
                _ => None,
            })
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ReadinessError::missing_type(context()))?;

        let id = match object.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => String::new(),
        };

        let status = match object.get("status") {
            Some(Value::String(status)) => AssessmentStatus::parse(status),
            _ => AssessmentStatus::Unknown,
        };

        let score = object.get("score").and_then(|score| match score {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });

        let completed_at = first_field(object, COMPLETED_AT_FIELDS).and_then(|raw| {
            let parsed = match raw {
                Value::String(text) => parse_timestamp(text),
                // Numbers are epoch milliseconds
                Value::Number(millis) => millis
                    .as_i64()
                    .or_else(|| millis.as_f64().filter(|m| m.is_finite()).map(|m| m as i64))
                    .and_then(DateTime::from_timestamp_millis),
                _ => None,
            };
            if parsed.is_none() {
                tracing::warn!("Ignoring unparseable completion time {raw} in {}", context());
            }
            parsed
        });

        let raw_payload = first_field(object, PAYLOAD_FIELDS)
            .cloned()
            .unwrap_or_else(|| value.clone());

        Ok(Self {
            id,
            assessment_type,
            status,
            score,
            completed_at,
            raw_payload,
        })
    }
}

fn first_field<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| object.get(*name).filter(|v| !v.is_null()))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse an RFC 3339 timestamp, a naive date-time, or a plain date
/// (midnight UTC). Naive values are taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
