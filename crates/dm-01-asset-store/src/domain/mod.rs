//! # Domain Layer
//!
//! Pure domain logic for the Asset Store subsystem. No I/O happens here.
//!
//! ## Modules
//!
//! - `entities` - Asset ids, kinds, typed asset shapes and records
//! - `registry` - Variant registry (kind → field schema)
//! - `codec` - Encode/decode between untyped JSON and typed records
//! - `schema` - OpenAPI document derived from the registry
//! - `errors` - Domain error types

pub mod codec;
pub mod entities;
pub mod errors;
pub mod registry;
pub mod schema;
