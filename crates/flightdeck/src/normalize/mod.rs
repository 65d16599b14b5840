//! Normalization engine: raw tables in, canonical tables out.

pub mod engine;
pub mod surrogate;
pub mod time;

pub use engine::{Counters, normalize};
pub use surrogate::surrogate_id;
pub use time::parse_timestamp;
