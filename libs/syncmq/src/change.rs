use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user was deleted by the user service (`message_type = 1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUser {
    pub user_id: i64,
}

/// An event's fields changed in the event service (`message_type = 2`).
/// Carries the full post-edit field set so dependents can overwrite
/// their replica without a read-back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditEvent {
    pub event_id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub tags: Vec<String>,
    pub created_by: Option<i64>,
    pub datetime: DateTime<Utc>,
}

/// An event was deleted by the event service (`message_type = 3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEvent {
    pub event_id: i64,
}

/// Typed change notification carried on the sync queue.
///
/// Wire format: a UTF-8 JSON object holding the variant's fields plus a
/// numeric `message_type` discriminant used for consumer dispatch. The
/// field names and the discriminant values are a client-visible contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    DeleteUser(DeleteUser),
    EditEvent(EditEvent),
    DeleteEvent(DeleteEvent),
}

impl ChangeEvent {
    pub fn message_type(&self) -> u8 {
        match self {
            ChangeEvent::DeleteUser(_) => 1,
            ChangeEvent::EditEvent(_) => 2,
            ChangeEvent::DeleteEvent(_) => 3,
        }
    }

    /// Serialize to queue bytes: the variant payload with `message_type`
    /// spliced in.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        let mut value = match self {
            ChangeEvent::DeleteUser(c) => serde_json::to_value(c)?,
            ChangeEvent::EditEvent(c) => serde_json::to_value(c)?,
            ChangeEvent::DeleteEvent(c) => serde_json::to_value(c)?,
        };
        value["message_type"] = serde_json::Value::from(self.message_type());
        serde_json::to_vec(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn delete_event_wire_format() {
        let bytes = ChangeEvent::DeleteEvent(DeleteEvent { event_id: 5 })
            .to_bytes()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["message_type"], 3);
        assert_eq!(value["event_id"], 5);
    }

    #[test]
    fn edit_event_carries_full_field_set() {
        let change = EditEvent {
            event_id: 9,
            name: "Intro to Robotics".into(),
            description: "hands-on".into(),
            location: "Lab 2".into(),
            tags: vec!["ROBOTICS".into()],
            created_by: Some(3),
            datetime: Utc.with_ymd_and_hms(2024, 8, 2, 12, 0, 0).unwrap(),
        };
        let bytes = ChangeEvent::EditEvent(change.clone()).to_bytes().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["message_type"], 2);
        assert_eq!(value["name"], "Intro to Robotics");
        let back: EditEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, change);
    }

    #[test]
    fn delete_user_wire_format() {
        let bytes = ChangeEvent::DeleteUser(DeleteUser { user_id: 11 })
            .to_bytes()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["message_type"], 1);
        assert_eq!(value["user_id"], 11);
    }
}
