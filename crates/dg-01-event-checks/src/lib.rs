//! # Event Checks Subsystem (DG-01)
//!
//! Validation gauntlet for DAG events before they are connected to the local
//! graph.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): the checkers, pure functions of their inputs
//! - **Ports Layer** (`ports/`): validator traits and the epoch / tx-signer
//!   collaborators the checkers consume
//! - **Adapters** (`adapters/`): secp256k1 tx signer, in-memory epoch state
//! - **Service Layer** (`service.rs`): composes the checkers in order
//! - **Pool** (`pool.rs`): bounded worker pool running the heavy checker
//!
//! ## Check Order
//!
//! | Stage | Needs | Fails with |
//! |-------|-------|------------|
//! | Basic | event | structural and gas-accounting errors |
//! | Epoch | event, current validators | `NotRelevant`, `Auth` |
//! | Parents | event, resolved parent headers | relational errors |
//! | Heavy | event, tx signer | `WrongEventSig`, `MalformedTxSig`, `WrongTxHash` |
//!
//! Only `NotRelevant` and `AlreadyConnected` are benign; every other error
//! is grounds for penalising the peer that relayed the event
//! (see [`is_ban`]).

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod pool;
pub mod ports;
pub mod service;

pub use adapters::{EcdsaTxSigner, StaticEpochReader};
pub use config::{DagRules, EventRules, GasRules, HeavyCheckConfig};
pub use domain::ban::is_ban;
pub use domain::basic::BasicChecker;
pub use domain::epoch::EpochChecker;
pub use domain::errors::EventCheckError;
pub use domain::gas::{calc_gas_power_used, intrinsic_gas};
pub use domain::heavy::HeavyChecker;
pub use domain::parents::ParentsChecker;
pub use metrics::CheckMetrics;
pub use pool::{HeavyCheckPool, ValidatedBatch, MAX_BATCH, MAX_QUEUED_TASKS};
pub use ports::inbound::{EventCheckApi, EventValidator};
pub use ports::outbound::{EpochReader, TxSigner, TxSignerError};
pub use service::{validate_all, EventCheckService};
