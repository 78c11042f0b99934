//! Delimited Id List Value Object
//!
//! Role and menu grants are persisted as comma separated id strings
//! (`"1,4,9"`). This type is the parsed, ordered form of such a column.

use std::fmt;
use std::str::FromStr;

use kernel::id::Id;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Separator used in persisted id lists
pub const ID_LIST_SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed id `{segment}` in list `{raw}`")]
pub struct IdListError {
    pub raw: String,
    pub segment: String,
}

/// Ordered list of typed ids, stored as a delimited string
pub struct IdList<T> {
    ids: Vec<Id<T>>,
}

impl<T> IdList<T> {
    pub fn new(ids: Vec<Id<T>>) -> Self {
        Self { ids }
    }

    pub fn empty() -> Self {
        Self { ids: Vec::new() }
    }

    /// Parse a delimited column; blank segments are skipped
    pub fn parse(raw: &str) -> Result<Self, IdListError> {
        raw.split(ID_LIST_SEPARATOR)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment.parse::<Id<T>>().map_err(|_| IdListError {
                    raw: raw.to_string(),
                    segment: segment.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn ids(&self) -> &[Id<T>] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Persisted form
    pub fn join(&self) -> String {
        self.to_string()
    }
}

impl<T> Clone for IdList<T> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
        }
    }
}

impl<T> PartialEq for IdList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl<T> Eq for IdList<T> {}

impl<T> Default for IdList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for IdList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids.iter()).finish()
    }
}

impl<T> fmt::Display for IdList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", ID_LIST_SEPARATOR)?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

impl<T> FromStr for IdList<T> {
    type Err = IdListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T> From<Vec<Id<T>>> for IdList<T> {
    fn from(ids: Vec<Id<T>>) -> Self {
        Self::new(ids)
    }
}

impl<T> FromIterator<Id<T>> for IdList<T> {
    fn from_iter<I: IntoIterator<Item = Id<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> Serialize for IdList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for IdList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
