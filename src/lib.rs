//! Elsinore — the final duel of Hamlet as a deterministic turn engine.
//!
//! Runs the whole scene as a single state machine over typed inputs and
//! outputs: the scripted dialogue, the fencing exchange, the poisoned cup
//! and four endings. The engine owns no clocks, timers or rendering;
//! drivers feed it player input and completion callbacks, and apply the
//! presentation commands it returns. One seed reproduces one session.

pub mod core;
pub mod schema;
pub mod script;
