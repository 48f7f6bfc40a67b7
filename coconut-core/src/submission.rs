//! User-originated price submissions

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of report a submission is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    /// Disputes the currently published price
    Correction,
    /// Adds a new price point for a district/market
    NewSubmission,
}

/// Review state of a submission.
///
/// `pending -> {approved, rejected}` is terminal; transitions are owned by an
/// external admin process, the core only ever creates `pending` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "pending"),
            SubmissionStatus::Approved => write!(f, "approved"),
            SubmissionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            _ => Err(format!("Unknown submission status: {}", s)),
        }
    }
}

/// A crowd-sourced price report, subject to admin review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Sequential 1-based id within the submission log
    pub id: u64,

    /// Correction of the published price, or a new price point
    #[serde(rename = "type")]
    pub kind: SubmissionKind,

    /// The price the user reported
    pub user_price: Decimal,

    /// The system's published average at submission time (corrections only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_price: Option<Decimal>,

    /// District the report is for
    pub district: String,

    /// Specific market within the district
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,

    /// Optional contact details for follow-up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the submission was recorded
    pub timestamp: DateTime<Utc>,

    /// Current review state
    pub status: SubmissionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "pending".parse::<SubmissionStatus>(),
            Ok(SubmissionStatus::Pending)
        );
        assert_eq!(
            "Approved".parse::<SubmissionStatus>(),
            Ok(SubmissionStatus::Approved)
        );
        assert!("archived".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_submission_kind_serialized_as_type() {
        let submission = Submission {
            id: 1,
            kind: SubmissionKind::NewSubmission,
            user_price: dec!(31.5),
            system_price: None,
            district: "Chennai".to_string(),
            market: None,
            contact: None,
            notes: None,
            timestamp: Utc::now(),
            status: SubmissionStatus::Pending,
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["type"], "new_submission");
        assert_eq!(json["status"], "pending");
        // corrections-only field is omitted entirely for new submissions
        assert!(json.get("system_price").is_none());
    }
}
