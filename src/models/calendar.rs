use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslamicEvent {
    pub date: String,
    pub event: String,
    pub description: String,
}

/// A client heartbeat recorded by `zee status ping`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.to_string(),
            timestamp: Utc::now(),
        }
    }
}
