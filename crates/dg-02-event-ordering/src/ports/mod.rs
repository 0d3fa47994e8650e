//! Ports layer: the host callbacks the buffer and pipeline drive.

pub mod outbound;
