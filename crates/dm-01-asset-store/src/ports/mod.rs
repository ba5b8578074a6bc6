//! # Ports Layer
//!
//! Defines the port traits for the Asset Store subsystem.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (API exposed to the HTTP gateway)
//! - `outbound.rs` - Driven ports (persistence required by the service)

pub mod inbound;
pub mod outbound;
