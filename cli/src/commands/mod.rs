//! Command implementations

pub mod probes;
pub mod run;
pub mod version;
