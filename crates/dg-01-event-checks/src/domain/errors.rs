//! # Event Check Errors
//!
//! Every reason an event can be refused admission.

use thiserror::Error;

/// Why an event was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventCheckError {
    // =========================================================================
    // Structural
    // =========================================================================
    /// Version is not `EVENT_VERSION`.
    #[error("Unsupported event version: {0}")]
    Version(u8),

    #[error("Event too large: {size} bytes exceeds {max}")]
    TooLarge { size: usize, max: usize },

    #[error("Extra data too large: {size} bytes exceeds {max}")]
    ExtraTooLarge { size: usize, max: usize },

    #[error("Too many parents: {count} exceeds {max}")]
    TooManyParents { count: usize, max: usize },

    /// A 1-based counter is zero.
    #[error("Event field not initialised: {field}")]
    NotInited { field: &'static str },

    #[error("Event has zero claimed time")]
    ZeroTime,

    #[error("Event with seq > 1 has no parents")]
    NoParents,

    /// Signature is not 65 bytes.
    #[error("Malformed event signature: {0} bytes")]
    SigMalformed(usize),

    /// A counter is large enough to overflow downstream arithmetic.
    #[error("Event field value too large: {field}")]
    HugeValue { field: &'static str },

    // =========================================================================
    // Resource accounting
    // =========================================================================
    #[error("Gas power used {used} exceeds limit {max}")]
    TooBigGasUsed { used: u64, max: u64 },

    #[error("Wrong gas power used: declared {declared}, calculated {calculated}")]
    WrongGasUsed { declared: u64, calculated: u64 },

    #[error("Transaction {index}: gas {gas} below intrinsic gas {intrinsic}")]
    IntrinsicGas { index: usize, gas: u64, intrinsic: u64 },

    #[error("Transaction {index}: negative value or gas price")]
    NegativeValue { index: usize },

    // =========================================================================
    // Relational (require resolved parents)
    // =========================================================================
    #[error("Wrong lamport: declared {declared}, expected {expected}")]
    WrongLamport { declared: u32, expected: u32 },

    #[error("Event references the same parent twice")]
    DoubleParents,

    #[error("Wrong self-parent")]
    WrongSelfParent,

    #[error("Wrong sequence number")]
    WrongSeq,

    #[error("Claimed time is not after the self-parent's")]
    PastTime,

    // =========================================================================
    // Cryptographic
    // =========================================================================
    #[error("Event signature does not match creator")]
    WrongEventSig,

    #[error("Transaction {index}: malformed signature: {reason}")]
    MalformedTxSig { index: usize, reason: String },

    #[error("Transactions do not match tx_hash")]
    WrongTxHash,

    // =========================================================================
    // Authorization / timing
    // =========================================================================
    /// Creator is not a validator of the current epoch.
    #[error("Creator is not an authorised validator")]
    Auth,

    /// Event belongs to another epoch.
    #[error("Event epoch {event} is not the current epoch {current}")]
    NotRelevant { event: u32, current: u32 },

    // =========================================================================
    // Benign / operational
    // =========================================================================
    #[error("Event already connected")]
    AlreadyConnected,

    #[error("Heavy check pool terminated")]
    Terminated,

    /// The host's process callback refused the event.
    #[error("Event processing failed: {0}")]
    Process(String),
}

impl EventCheckError {
    /// Stable label for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Version(_) => "version",
            Self::TooLarge { .. } => "too_large",
            Self::ExtraTooLarge { .. } => "extra_too_large",
            Self::TooManyParents { .. } => "too_many_parents",
            Self::NotInited { .. } => "not_inited",
            Self::ZeroTime => "zero_time",
            Self::NoParents => "no_parents",
            Self::SigMalformed(_) => "sig_malformed",
            Self::HugeValue { .. } => "huge_value",
            Self::TooBigGasUsed { .. } => "too_big_gas_used",
            Self::WrongGasUsed { .. } => "wrong_gas_used",
            Self::IntrinsicGas { .. } => "intrinsic_gas",
            Self::NegativeValue { .. } => "negative_value",
            Self::WrongLamport { .. } => "wrong_lamport",
            Self::DoubleParents => "double_parents",
            Self::WrongSelfParent => "wrong_self_parent",
            Self::WrongSeq => "wrong_seq",
            Self::PastTime => "past_time",
            Self::WrongEventSig => "wrong_event_sig",
            Self::MalformedTxSig { .. } => "malformed_tx_sig",
            Self::WrongTxHash => "wrong_tx_hash",
            Self::Auth => "auth",
            Self::NotRelevant { .. } => "not_relevant",
            Self::AlreadyConnected => "already_connected",
            Self::Terminated => "terminated",
            Self::Process(_) => "process",
        }
    }

    /// Whether the relaying peer should be penalised for this error.
    pub fn is_ban(&self) -> bool {
        !matches!(self, Self::NotRelevant { .. } | Self::AlreadyConnected)
    }
}
