use crate::framework::ListRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

/// A student's request to move rooms, reviewed by a warden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomChangeRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub student_name: String,
    pub roll_number: String,
    pub current_room: String,
    #[serde(default)]
    pub preferred_room: Option<String>,
    #[serde(default)]
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl ListRecord for RoomChangeRequest {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "studentName" => Some(Cow::Borrowed(&self.student_name)),
            "rollNumber" => Some(Cow::Borrowed(&self.roll_number)),
            "currentRoom" => Some(Cow::Borrowed(&self.current_room)),
            "preferredRoom" => self.preferred_room.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}
