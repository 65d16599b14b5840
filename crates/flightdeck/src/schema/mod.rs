//! Canonical record schema and header resolution.

pub mod fields;
pub mod resolver;

pub use fields::{
    BOOLEAN_FIELDS, CANONICAL_ORDER, NUMERIC_FIELDS, RAW_DATETIME_FIELDS, REQUIRED_FIELDS,
    STRING_FIELDS,
};
pub use resolver::{HeaderResolver, normalize_header};
