//! Integration tests across dm-01 (asset store), dm-02 (gateway) and the runtime wiring.

pub mod flows;
pub mod server;
