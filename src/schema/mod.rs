//! Plain data types shared across the engine: the cast, the dialogue beat
//! format, and the input/output wire contract.

pub mod beat;
pub mod character;
pub mod event;
