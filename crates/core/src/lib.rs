//! Homework bot core - Domain logic and models
//!
//! This crate contains pure domain logic with no I/O operations.
//! Configuration, response validation, message rendering and
//! deduplication live here.

pub mod config;
pub mod dedup;
pub mod error;
pub mod messages;
pub mod models;
pub mod validation;

pub use config::CoreConfig;
pub use dedup::{ErrorMemo, has_changed};
pub use error::{ConfigError, ResponseError, ResponseResult};
pub use messages::{failure_message, status_message};
pub use models::{Homework, HomeworkStatus, StatusResponse};
pub use validation::{parse_homework, parse_status, validate_response};
