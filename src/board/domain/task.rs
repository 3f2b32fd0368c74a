//! Task records as shown on a board.

use super::{BoardDomainError, ColumnId, TaskId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl TaskPriority {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = BoardDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(BoardDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

/// Non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the trimmed value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Estimated effort in hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimatedHours(f64);

impl EstimatedHours {
    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidEstimatedHours`] when the value is
    /// negative, NaN, or infinite.
    pub fn new(value: f64) -> Result<Self, BoardDomainError> {
        if !value.is_finite() || value.is_sign_negative() {
            return Err(BoardDomainError::InvalidEstimatedHours(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the estimate in hours.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Task record held by the board cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardTask {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    status_id: ColumnId,
    owner_id: Option<UserId>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    estimated_hours: Option<EstimatedHours>,
}

impl BoardTask {
    /// Creates a task with required fields and medium priority.
    #[must_use]
    pub const fn new(id: TaskId, title: TaskTitle, status_id: ColumnId) -> Self {
        Self {
            id,
            title,
            description: None,
            priority: TaskPriority::Medium,
            status_id,
            owner_id: None,
            start_date: None,
            end_date: None,
            estimated_hours: None,
        }
    }

    /// Sets the description. Blank descriptions are stored as absent.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into();
        self.description = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the owning user.
    #[must_use]
    pub const fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Sets the estimated effort.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: EstimatedHours) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the scheduled dates.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EndBeforeStart`] when both dates are set and
    /// the end precedes the start.
    pub fn with_schedule(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, BoardDomainError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(BoardDomainError::EndBeforeStart { start, end });
            }
        }
        self.start_date = start_date;
        self.end_date = end_date;
        Ok(self)
    }

    /// Returns a copy of this task placed in another column.
    #[must_use]
    pub(crate) fn moved_to(&self, status_id: ColumnId) -> Self {
        Self {
            status_id,
            ..self.clone()
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the column the task currently sits in.
    #[must_use]
    pub const fn status_id(&self) -> ColumnId {
        self.status_id
    }

    /// Returns the owning user, if any.
    #[must_use]
    pub const fn owner_id(&self) -> Option<UserId> {
        self.owner_id
    }

    /// Returns the scheduled start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the scheduled end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the estimated effort, if any.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<EstimatedHours> {
        self.estimated_hours
    }
}
