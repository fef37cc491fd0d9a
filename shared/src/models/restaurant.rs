//! Restaurant Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Restaurant entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Opening time as entered by the admin, e.g. `10:00`
    pub open_time: String,
    /// Closing time, e.g. `22:00`
    pub close_time: String,
    pub created_at: DateTime<Utc>,
}

/// Create restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    pub name: String,
    pub address: String,
    pub open_time: String,
    pub close_time: String,
}
