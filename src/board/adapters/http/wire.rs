//! Wire representations of REST API payloads.
//!
//! Field names follow the API. Every inbound payload is converted into a
//! validated domain value before it reaches the board.

use crate::board::domain::{
    BoardColumn, BoardDomainError, BoardTask, ColumnId, EstimatedHours, TaskId, TaskPriority,
    TaskTitle, UserId,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while converting wire payloads into domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WireError {
    /// A field failed domain validation.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// A date field is not ISO-8601.
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    /// A numeric field holds text that is not a number.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// The record does not have the expected shape.
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Board column as served by `GET /task-statuses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusDto {
    /// Column identifier.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Display color.
    #[serde(rename = "cor")]
    pub color: String,
}

impl TryFrom<TaskStatusDto> for BoardColumn {
    type Error = WireError;

    fn try_from(dto: TaskStatusDto) -> Result<Self, Self::Error> {
        Ok(Self::from_parts(dto.id, dto.name, dto.color)?)
    }
}

/// Priority labels used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WirePriority {
    /// Low.
    #[serde(rename = "baixa")]
    Low,
    /// Medium.
    #[serde(rename = "media")]
    Medium,
    /// High.
    #[serde(rename = "alta")]
    High,
}

impl From<WirePriority> for TaskPriority {
    fn from(priority: WirePriority) -> Self {
        match priority {
            WirePriority::Low => Self::Low,
            WirePriority::Medium => Self::Medium,
            WirePriority::High => Self::High,
        }
    }
}

/// Numeric field that the API may send as a JSON number or a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    /// Plain JSON number.
    Number(f64),
    /// Decimal rendered as text.
    Text(String),
}

impl WireNumber {
    fn to_f64(&self) -> Result<f64, WireError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| WireError::InvalidNumber(text.clone())),
        }
    }
}

/// Task as served by `GET /projects/{id}/tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDto {
    /// Task identifier.
    pub id: i64,
    /// Title.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Description.
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    /// Priority label.
    #[serde(rename = "prioridade")]
    pub priority: WirePriority,
    /// Current column.
    pub status_id: i64,
    /// Owning user.
    #[serde(rename = "responsavel_id", default)]
    pub owner_id: Option<i64>,
    /// Scheduled start.
    #[serde(rename = "data_inicio", default)]
    pub start_date: Option<String>,
    /// Scheduled end.
    #[serde(rename = "data_fim", default)]
    pub end_date: Option<String>,
    /// Estimated effort in hours.
    #[serde(rename = "estimativa_horas", default)]
    pub estimated_hours: Option<WireNumber>,
}

impl TryFrom<TaskDto> for BoardTask {
    type Error = WireError;

    fn try_from(dto: TaskDto) -> Result<Self, Self::Error> {
        let mut task = Self::new(
            TaskId::new(dto.id)?,
            TaskTitle::new(dto.title)?,
            ColumnId::new(dto.status_id)?,
        )
        .with_priority(dto.priority.into());
        if let Some(description) = dto.description {
            task = task.with_description(description);
        }
        if let Some(owner) = dto.owner_id {
            task = task.with_owner(UserId::new(owner)?);
        }
        if let Some(hours) = dto.estimated_hours {
            task = task.with_estimated_hours(EstimatedHours::new(hours.to_f64()?)?);
        }
        let start = parse_optional_date(dto.start_date.as_deref())?;
        let end = parse_optional_date(dto.end_date.as_deref())?;
        Ok(task.with_schedule(start, end)?)
    }
}

/// Body of `PUT /tasks/{id}` when only the status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskStatusBody {
    /// New column.
    pub status_id: i64,
}

impl From<ColumnId> for UpdateTaskStatusBody {
    fn from(status_id: ColumnId) -> Self {
        Self {
            status_id: status_id.into(),
        }
    }
}

/// Error body returned by the API on failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    #[serde(default)]
    pub message: Option<String>,
}

/// Parses dates sent either as `YYYY-MM-DD` or as full timestamps.
fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, WireError> {
    let Some(text) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(timestamp.date_naive()));
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(timestamp.date()));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| WireError::InvalidDate(text.to_owned()))
}
