//! Notification texts sent to the chat

use std::fmt::Display;

use crate::models::Homework;

/// Prefix of every failure notice
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Render the message announcing a homework's new status
pub fn status_message(homework: &Homework) -> String {
    format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.name,
        homework.status.verdict()
    )
}

/// Render the message reporting a failed poll cycle
pub fn failure_message(error: &impl Display) -> String {
    format!("{}: {}", FAILURE_PREFIX, error)
}
