//! Exercise history as grouped by the server, one section per day.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistoryEntry {
    pub id: String,
    pub name: String,
    pub group: String,
    pub hour: String,
    pub created_at: String,
}

/// A day heading and the exercises recorded on it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistoryByDay {
    pub title: String,
    pub data: Vec<HistoryEntry>,
}

impl HistoryByDay {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
