use crate::framework::ListRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Direction of a gate crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    #[serde(rename = "Checked In")]
    CheckedIn,
    #[serde(rename = "Checked Out")]
    CheckedOut,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::CheckedIn => "Checked In",
            EntryStatus::CheckedOut => "Checked Out",
        }
    }
}

/// One check-in or check-out recorded by hostel security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: EntryStatus,
    pub date_and_time: DateTime<Utc>,
}

impl AccessEntry {
    pub fn new(id: impl Into<String>, status: EntryStatus, date_and_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            status,
            date_and_time,
        }
    }
}

impl ListRecord for AccessEntry {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "id" => Some(Cow::Borrowed(&self.id)),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.date_and_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_backend_json() {
        let entry: AccessEntry = serde_json::from_str(
            r#"{"_id": "e1", "status": "Checked In", "dateAndTime": "2024-03-05T23:50:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.status, EntryStatus::CheckedIn);
        assert_eq!(entry.field("status").as_deref(), Some("Checked In"));
    }
}
