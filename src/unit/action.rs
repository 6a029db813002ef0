// src/unit/action.rs

//! The executable part of a unit.

use super::Outcome;

/// Something a unit runs when all its dependencies are settled.
///
/// The scheduler calls [`Action::execute`] at most once per unit and treats
/// it as opaque: whatever side effects it has (writing intermediate files,
/// calling out to models or services) are its own business.
///
/// Any `FnMut() -> Outcome + Send` closure is an `Action`, so ad-hoc units
/// need no extra type. Production code uses
/// [`CommandAction`](crate::exec::CommandAction).
pub trait Action: Send {
    fn execute(&mut self) -> Outcome;
}

impl<F> Action for F
where
    F: FnMut() -> Outcome + Send,
{
    fn execute(&mut self) -> Outcome {
        self()
    }
}
