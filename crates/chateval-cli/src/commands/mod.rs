//! Command implementations

pub mod bench;
