//! Domain layer: the checkers and the error taxonomy.

pub mod ban;
pub mod basic;
pub mod epoch;
pub mod errors;
pub mod gas;
pub mod heavy;
pub mod parents;
