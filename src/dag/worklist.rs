// src/dag/worklist.rs

//! Pending-unit sequence driving the scheduler loop.

use std::collections::VecDeque;

use crate::unit::UnitName;

/// Ordered sequence of unit names waiting to be considered.
///
/// The back doubles as the primary pop point and as the place where missing
/// dependencies are pushed; the front is where a waiting candidate goes so
/// it is reconsidered only after everything else currently queued.
///
/// The same name may appear several times (e.g. a dependency pushed by two
/// different dependents). The scheduler discards entries that are already
/// terminal.
#[derive(Debug, Default, Clone)]
pub struct Worklist {
    items: VecDeque<UnitName>,
}

impl Worklist {
    pub fn push_front(&mut self, name: UnitName) {
        self.items.push_front(name);
    }

    pub fn push_back(&mut self, name: UnitName) {
        self.items.push_back(name);
    }

    pub fn pop_back(&mut self) -> Option<UnitName> {
        self.items.pop_back()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: Into<UnitName>> FromIterator<S> for Worklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}
