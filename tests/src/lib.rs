//! # DAG Admission Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for the check stages
//! └── src/integration/  # Cross-crate flows with real signatures
//!     ├── support.rs    # Validator network, DAG builder, recording host
//!     ├── flows.rs      # Gossip, ban and eviction flows through the pipeline
//!     └── lifecycle.rs  # Backpressure, epoch change, telemetry
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dag-tests
//! cargo test -p dag-tests integration::flows
//! cargo bench -p dag-tests
//! ```

#![allow(dead_code)]

pub mod integration;
