//! Process bootstrap shared by the homework bot binaries

pub mod bootstrap;

pub use bootstrap::{init_env, init_tracing};
