use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::Display;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    auth::auth::Session,
    model::{attendance::AttendanceLog, employee::Employee, salary::SalaryRecord},
    utils::normalize::{normalize_employees, normalize_logs, normalize_salaries},
};

pub const ROSTER_PATH: &str = "/branch/employees";
pub const ATTENDANCE_PATH: &str = "/attendance/by-date";
pub const SALARY_PATH: &str = "/salary/by-month";

#[derive(Debug, Display)]
pub enum UpstreamError {
    #[display(fmt = "request to {} failed: {}", path, source)]
    Transport { path: String, source: reqwest::Error },

    #[display(fmt = "{} returned HTTP {}", path, status)]
    Status { path: String, status: u16 },

    #[display(fmt = "{} returned an undecodable body: {}", path, source)]
    Decode { path: String, source: reqwest::Error },
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Transport { source, .. } | UpstreamError::Decode { source, .. } => Some(source),
            UpstreamError::Status { .. } => None,
        }
    }
}

/// Read side of the upstream HR API, already normalized to typed records.
#[async_trait]
pub trait HrApi: Send + Sync {
    async fn branch_employees(
        &self,
        session: &Session,
        branch_id: Option<&str>,
    ) -> Result<Vec<Employee>, UpstreamError>;

    async fn attendance_by_date(
        &self,
        session: &Session,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceLog>, UpstreamError>;

    async fn salary_by_month(
        &self,
        session: &Session,
        month: &str,
    ) -> Result<Vec<SalaryRecord>, UpstreamError>;
}

pub struct HttpHrApi {
    client: Client,
    base_url: String,
}

impl HttpHrApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET with the caller's bearer token forwarded.
    async fn get_json(
        &self,
        session: &Session,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&session.token)
            .query(query)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        debug!(path, "Upstream responded");

        response
            .json::<Value>()
            .await
            .map_err(|source| UpstreamError::Decode {
                path: path.to_string(),
                source,
            })
    }
}

#[async_trait]
impl HrApi for HttpHrApi {
    #[instrument(skip(self, session), fields(user_id = session.user_id))]
    async fn branch_employees(
        &self,
        session: &Session,
        branch_id: Option<&str>,
    ) -> Result<Vec<Employee>, UpstreamError> {
        let query: Vec<(&str, String)> = branch_id
            .map(|id| vec![("branchId", id.to_string())])
            .unwrap_or_default();

        let payload = self.get_json(session, ROSTER_PATH, &query).await?;
        Ok(normalize_employees(&payload))
    }

    #[instrument(skip(self, session), fields(user_id = session.user_id))]
    async fn attendance_by_date(
        &self,
        session: &Session,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceLog>, UpstreamError> {
        let query = [("date", date.format("%Y-%m-%d").to_string())];

        let payload = self.get_json(session, ATTENDANCE_PATH, &query).await?;
        Ok(normalize_logs(&payload))
    }

    #[instrument(skip(self, session), fields(user_id = session.user_id))]
    async fn salary_by_month(
        &self,
        session: &Session,
        month: &str,
    ) -> Result<Vec<SalaryRecord>, UpstreamError> {
        let query = [("month", month.to_string())];

        let payload = self.get_json(session, SALARY_PATH, &query).await?;
        Ok(normalize_salaries(&payload))
    }
}
