use crate::api::attendance::MyArrivalResponse;
use crate::api::shift::ShiftLabelResponse;
use crate::dashboard::lateness::DaySummary;
use crate::dashboard::salary::{SalaryRow, SalarySummary};
use crate::model::employee::Employee;
use crate::model::shift::Shift;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Branch Portal API",
        version = "0.1.0",
        description = r#"
## Branch Portal

Derived views for the payroll/HR portals, computed from the upstream HR API.

### 🔹 Key Features
- **Attendance dashboard**
  - Employees 10+ and 30+ minutes late, present and absent counts
- **Salary dashboard**
  - Branch totals and per-employee chart rows for a month
- **Self service**
  - An employee's own arrival status for a day
- **Shift labels**
  - Single and split shifts rendered for display

### 🔐 Security
Every `/api` endpoint requires an access token issued by the HR API
(**JWT Bearer**). Branch managers only see their own branch.
"#,
    ),
    paths(
        crate::api::attendance::branch_attendance,
        crate::api::attendance::my_attendance,

        crate::api::salary::branch_salary,

        crate::api::shift::label_shift
    ),
    components(
        schemas(
            DaySummary,
            Employee,
            MyArrivalResponse,
            SalarySummary,
            SalaryRow,
            Shift,
            ShiftLabelResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Dashboard", description = "Branch manager and admin dashboards"),
        (name = "Self service", description = "Employee self-service views"),
        (name = "Shift", description = "Shift formatting"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/dashboard/attendance",
            "/api/dashboard/salary",
            "/api/me/attendance",
            "/api/shift/label",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }

    #[test]
    fn declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
