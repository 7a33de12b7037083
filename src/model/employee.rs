use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A roster entry as seen by the portals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "employeeNo": "EMP-001", "name": "John Doe" }))]
pub struct Employee {
    #[schema(example = "EMP-001")]
    pub employee_no: String,

    #[schema(example = "John Doe")]
    pub name: String,
}

impl Employee {
    pub fn new(employee_no: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            employee_no: employee_no.into(),
            name: name.into(),
        }
    }
}
