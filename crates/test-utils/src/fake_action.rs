use std::sync::{Arc, Mutex};

use modsched::unit::{Outcome, Unit};

/// Shared record of which units actually executed, in order.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names in execution order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    pub fn was_called(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Index of the first call to `name`, if any.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.calls.lock().unwrap().iter().position(|c| c == name)
    }

    /// Whether `first` executed strictly before `second`.
    pub fn ran_before(&self, first: &str, second: &str) -> bool {
        match (self.position(first), self.position(second)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    /// A unit whose action records its name and returns `outcome`.
    pub fn unit(&self, name: &str, outcome: Outcome) -> Unit {
        let calls = Arc::clone(&self.calls);
        let recorded = name.to_string();
        Unit::new(name, move || {
            calls.lock().unwrap().push(recorded.clone());
            outcome
        })
    }
}

/// Build recording units from `(name, outcome, hard deps, soft deps)` rows.
///
/// Handy for table-style tests.
pub fn units_from_table(
    log: &CallLog,
    rows: &[(&str, Outcome, &[&str], &[&str])],
) -> Vec<Unit> {
    rows.iter()
        .map(|(name, outcome, hard, soft)| {
            log.unit(name, *outcome)
                .with_hard_dependencies(hard.iter().copied())
                .with_soft_dependencies(soft.iter().copied())
        })
        .collect()
}
