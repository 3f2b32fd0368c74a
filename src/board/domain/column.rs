//! Board columns and the ordered column set.

use super::{BoardDomainError, ColumnId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty display name of a board column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnName(String);

impl ColumnName {
    /// Creates a validated column name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] when the trimmed value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyColumnName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex display color of a board column, normalised to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnColor(String);

impl ColumnColor {
    /// Creates a validated `#rgb` or `#rrggbb` color.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidColumnColor`] for any other shape.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let is_valid = normalized.strip_prefix('#').is_some_and(|digits| {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
        });
        if !is_valid {
            return Err(BoardDomainError::InvalidColumnColor(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the color as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A board column, which is also a task status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    id: ColumnId,
    name: ColumnName,
    color: ColumnColor,
}

impl BoardColumn {
    /// Creates a column from validated parts.
    #[must_use]
    pub const fn new(id: ColumnId, name: ColumnName, color: ColumnColor) -> Self {
        Self { id, name, color }
    }

    /// Creates a column from raw parts.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when any part fails validation.
    pub fn from_parts(
        id: i64,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self::new(
            ColumnId::new(id)?,
            ColumnName::new(name)?,
            ColumnColor::new(color)?,
        ))
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column name.
    #[must_use]
    pub const fn name(&self) -> &ColumnName {
        &self.name
    }

    /// Returns the column display color.
    #[must_use]
    pub const fn color(&self) -> &ColumnColor {
        &self.color
    }
}

/// Columns of one board in display order, unique by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BoardColumn>", into = "Vec<BoardColumn>")]
pub struct ColumnSet {
    columns: Vec<BoardColumn>,
}

impl ColumnSet {
    /// Creates a column set, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateColumn`] when two columns share an
    /// identifier.
    pub fn new(columns: impl IntoIterator<Item = BoardColumn>) -> Result<Self, BoardDomainError> {
        let mut collected: Vec<BoardColumn> = Vec::new();
        for column in columns {
            if collected.iter().any(|existing| existing.id() == column.id()) {
                return Err(BoardDomainError::DuplicateColumn(column.id()));
            }
            collected.push(column);
        }
        Ok(Self { columns: collected })
    }

    /// Returns `true` when a column with the identifier is loaded.
    #[must_use]
    pub fn contains(&self, id: ColumnId) -> bool {
        self.columns.iter().any(|column| column.id() == id)
    }

    /// Looks up a column by identifier.
    #[must_use]
    pub fn get(&self, id: ColumnId) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.id() == id)
    }

    /// Resolves an untrusted drop-target value to a loaded column.
    #[must_use]
    pub fn resolve(&self, raw: i64) -> Option<ColumnId> {
        ColumnId::from_raw(raw).filter(|id| self.contains(*id))
    }

    /// Iterates columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = &BoardColumn> {
        self.columns.iter()
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` when no columns are loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<BoardColumn>> for ColumnSet {
    type Error = BoardDomainError;

    fn try_from(columns: Vec<BoardColumn>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<ColumnSet> for Vec<BoardColumn> {
    fn from(set: ColumnSet) -> Self {
        set.columns
    }
}
