//! Domain layer: buffered-event bookkeeping.

pub mod incomplete;
