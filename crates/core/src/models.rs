//! Core domain models
//!
//! These models represent what the status API reports about a homework.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::ResponseError;

/// Review status of a homework, as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [Self; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Wire name used by the status API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the user
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ResponseError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single homework entry taken from the `homeworks` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub status: HomeworkStatus,
}

/// A status API body that passed shape validation
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    /// Raw records, newest first; may be empty
    pub homeworks: Vec<Value>,

    /// Server time the response was produced at, if echoed
    pub current_date: Option<i64>,
}

impl StatusResponse {
    /// The record a poll cycle reports on
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_wire_name() {
        for status in HomeworkStatus::ALL {
            assert_eq!(status.as_str().parse::<HomeworkStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_unknown_status() {
        let err = "pending".parse::<HomeworkStatus>().unwrap_err();
        assert_eq!(err, ResponseError::UnknownStatus("pending".to_string()));
    }

    #[test]
    fn test_status_matching_is_case_sensitive() {
        assert!("Approved".parse::<HomeworkStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&HomeworkStatus::Reviewing).unwrap();
        assert_eq!(json, "\"reviewing\"");
    }

    #[test]
    fn test_latest_is_first_entry() {
        let response = StatusResponse {
            homeworks: vec![
                serde_json::json!({"homework_name": "new"}),
                serde_json::json!({"homework_name": "old"}),
            ],
            current_date: None,
        };

        assert_eq!(response.latest().unwrap()["homework_name"], "new");
    }
}
