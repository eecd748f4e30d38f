//! Controller layer: wizard events, the state machine, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
