use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A shift boundary, either as typed by HR or already split into parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShiftTime {
    Parsed { hour: u32, minute: u32 },
    Text(String),
}

impl From<&str> for ShiftTime {
    fn from(value: &str) -> Self {
        ShiftTime::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "start": "09:00",
    "end": "13:00",
    "splitStart": { "hour": 16, "minute": 0 },
    "splitEnd": "8:00 PM",
    "weeklyHours": 40
}))]
pub struct Shift {
    #[schema(value_type = Object)]
    pub start: ShiftTime,
    #[schema(value_type = Object)]
    pub end: ShiftTime,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub split_start: Option<ShiftTime>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub split_end: Option<ShiftTime>,
    #[serde(default)]
    pub weekly_hours: Option<f64>,
}
