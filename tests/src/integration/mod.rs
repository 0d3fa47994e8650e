//! Cross-crate integration flows.

#[cfg(test)]
mod support;

mod flows;
mod lifecycle;
