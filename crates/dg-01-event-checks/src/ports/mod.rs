//! Ports layer: inbound validator APIs and outbound collaborators.

pub mod inbound;
pub mod outbound;
