//! The engine proper: combat arithmetic, the dialogue queue, tunable
//! config, and the input/output reducer that ties them together.

pub mod combat;
pub mod config;
pub mod dialogue;
pub mod engine;
