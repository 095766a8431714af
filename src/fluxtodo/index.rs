//! # Display Indexes
//!
//! Users refer to todos by their 1-based position in the list (`fluxtodo
//! toggle 2`). Positions are resolved to [`ClientId`]s before any action is
//! dispatched, because actions carry item references, not positions.

use crate::error::{Result, TodoError};
use crate::model::{ClientId, TodoItem};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(usize);

impl DisplayIndex {
    pub fn new(position: usize) -> Option<Self> {
        (position > 0).then_some(Self(position))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(DisplayIndex::new)
            .ok_or_else(|| TodoError::Api(format!("Invalid index format: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub item: TodoItem,
    pub index: DisplayIndex,
}

/// Assigns display indexes to items in store order.
pub fn index_items(items: Vec<TodoItem>) -> Vec<DisplayItem> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| DisplayItem {
            item,
            index: DisplayIndex(i + 1),
        })
        .collect()
}

/// Resolves each index against `items`. Fails on the first index that is
/// out of range. Duplicates are kept, in the order given.
pub fn resolve(items: &[TodoItem], indexes: &[DisplayIndex]) -> Result<Vec<(DisplayIndex, ClientId)>> {
    indexes
        .iter()
        .map(|idx| {
            items
                .get(idx.0 - 1)
                .map(|item| (*idx, item.cid()))
                .ok_or_else(|| TodoError::Api(format!("Index {} not found", idx)))
        })
        .collect()
}
