use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::auth::Session,
    config::Config,
    dashboard::lateness::{Arrival, classify_employee, minutes_late, summarize_day},
    error::ApiError,
    model::employee::Employee,
    upstream::client::HrApi,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DayQuery {
    /// Calendar day, defaults to today (server local time)
    #[param(value_type = Option<String>, example = "2024-01-01")]
    pub date: Option<NaiveDate>,
    /// Admins only: branch to inspect
    #[param(example = "B-01")]
    pub branch_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyArrivalResponse {
    #[schema(example = "EMP-001")]
    pub employee_no: String,
    #[schema(value_type = String, format = "date", example = "2024-01-01")]
    pub date: NaiveDate,
    #[schema(value_type = Object, example = json!({
        "status": "entered",
        "firstIn": "2024-01-01T10:15:00",
        "minutesLate": 15
    }))]
    pub arrival: Arrival,
    /// Positive minutes late, null when on time or not measurable
    #[schema(example = 15, nullable = true)]
    pub minutes_late: Option<u32>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Branch attendance dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/attendance",
    params(DayQuery),
    responses(
        (status = 200, description = "Lateness buckets and presence counts", body = crate::dashboard::lateness::DaySummary),
        (status = 400, description = "Malformed date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(name = "branch_attendance", skip(session, api, config), fields(user_id = session.user_id))]
pub async fn branch_attendance(
    session: Session,
    api: web::Data<dyn HrApi>,
    config: web::Data<Config>,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, ApiError> {
    session.require_manager_or_admin()?;
    let branch = session.branch_scope(query.branch_id.as_deref())?;
    let date = query.date.unwrap_or_else(today);

    let (roster, logs) = futures::join!(
        api.branch_employees(&session, branch),
        api.attendance_by_date(&session, date)
    );

    // a failed fetch shows as an empty list on this widget
    let roster = roster.unwrap_or_else(|e| {
        warn!(error = %e, "Roster fetch failed, using empty roster");
        Vec::new()
    });
    let logs = logs.unwrap_or_else(|e| {
        warn!(error = %e, %date, "Attendance fetch failed, using empty log list");
        Vec::new()
    });

    let summary = summarize_day(date, &roster, &logs, &config.lateness);

    info!(
        %date,
        roster = roster.len(),
        logs = logs.len(),
        present = summary.present_count,
        late10 = summary.late10.len(),
        late30 = summary.late30.len(),
        unknown = summary.unknown.len(),
        "Attendance summary computed"
    );

    Ok(HttpResponse::Ok().json(summary))
}

/// Caller's own arrival for a day
#[utoipa::path(
    get,
    path = "/api/me/attendance",
    params(DayQuery),
    responses(
        (status = 200, description = "Arrival classification", body = MyArrivalResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile"),
        (status = 502, description = "Upstream HR service unavailable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Self service"
)]
#[instrument(name = "my_attendance", skip(session, api, config), fields(user_id = session.user_id))]
pub async fn my_attendance(
    session: Session,
    api: web::Data<dyn HrApi>,
    config: web::Data<Config>,
    query: web::Query<DayQuery>,
) -> Result<HttpResponse, ApiError> {
    let employee_no = session.require_employee_no()?;
    let date = query.date.unwrap_or_else(today);

    let logs = api
        .attendance_by_date(&session, date)
        .await
        .inspect_err(|e| error!(error = %e, %date, "Attendance fetch failed"))?;

    let me = Employee::new(employee_no, session.username.clone());
    let arrival = classify_employee(&me, &logs, &config.lateness);
    let minutes = minutes_late(&me, &logs, &config.lateness);

    Ok(HttpResponse::Ok().json(MyArrivalResponse {
        employee_no: me.employee_no,
        date,
        arrival,
        minutes_late: minutes,
    }))
}
