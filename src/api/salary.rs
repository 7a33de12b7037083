use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{error, info, instrument};
use utoipa::IntoParams;

use crate::{
    auth::auth::Session,
    dashboard::salary::summarize_salaries,
    error::ApiError,
    upstream::client::HrApi,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    /// `YYYY-MM`, defaults to the current month
    #[param(example = "2026-01")]
    pub month: Option<String>,
    /// Admins only: branch to inspect
    #[param(example = "B-01")]
    pub branch_id: Option<String>,
}

/// Accepts `YYYY-MM` and returns it in canonical form.
pub fn parse_month(raw: &str) -> Result<String, ApiError> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m").to_string())
        .map_err(|_| ApiError::BadRequest(format!("month must be YYYY-MM, got {raw:?}")))
}

/// Branch salary dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/salary",
    params(MonthQuery),
    responses(
        (status = 200, description = "Branch salary totals and chart rows", body = crate::dashboard::salary::SalarySummary),
        (status = 400, description = "Malformed month"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 502, description = "Upstream HR service unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(name = "branch_salary", skip(session, api), fields(user_id = session.user_id))]
pub async fn branch_salary(
    session: Session,
    api: web::Data<dyn HrApi>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, ApiError> {
    session.require_manager_or_admin()?;
    let branch = session.branch_scope(query.branch_id.as_deref())?;
    let month = match &query.month {
        Some(raw) => parse_month(raw)?,
        None => Local::now().format("%Y-%m").to_string(),
    };

    let (roster, salaries) = futures::join!(
        api.branch_employees(&session, branch),
        api.salary_by_month(&session, &month)
    );

    let roster = roster.inspect_err(|e| error!(error = %e, "Roster fetch failed"))?;
    let salaries = salaries.inspect_err(|e| error!(error = %e, %month, "Salary fetch failed"))?;

    let summary = summarize_salaries(&month, &roster, &salaries);

    info!(
        %month,
        headcount = summary.headcount,
        missing = summary.missing,
        "Salary summary computed"
    );

    Ok(HttpResponse::Ok().json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_are_canonicalized() {
        assert_eq!(parse_month("2026-1").unwrap(), "2026-01");
        assert_eq!(parse_month(" 2026-12 ").unwrap(), "2026-12");
    }

    #[test]
    fn bad_months_are_rejected() {
        assert!(parse_month("2026-13").is_err());
        assert!(parse_month("January").is_err());
        assert!(parse_month("2026-01-15").is_err());
    }
}
