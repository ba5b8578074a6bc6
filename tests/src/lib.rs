//! # Data Manager Test Suite
//!
//! Cross-crate flows driving the gateway router over real asset stores.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs     # POST/GET through the router, file store on disk
//!     └── server.rs    # Real TCP listener with graceful shutdown
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dm-tests
//! cargo test -p dm-tests integration::server::
//! ```

pub mod integration;
