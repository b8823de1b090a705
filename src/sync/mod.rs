//! Server push events and the reducer that folds them into local state.

mod events;
mod reducer;

pub use events::{DemoRef, EventQueue, PushEvent, Reminder, StatusChange};
pub use reducer::{DemoReducer, ReducerOutcome};
