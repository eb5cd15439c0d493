//! The to-do item and the two partitions it can live in.

use serde::{Deserialize, Serialize};

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub done: bool,
    pub value: String,
}

/// Which filtered view of the items table a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Todo,
    Done,
}

impl Partition {
    /// Both partitions, in display order.
    pub const ALL: [Partition; 2] = [Partition::Todo, Partition::Done];

    /// The `done` flag this partition filters on.
    pub fn done(self) -> bool {
        matches!(self, Partition::Done)
    }

    /// Heading shown above a non-empty list.
    pub fn heading(self) -> &'static str {
        match self {
            Partition::Todo => "Todo",
            Partition::Done => "Complete",
        }
    }
}
