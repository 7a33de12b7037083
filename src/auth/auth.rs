use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

use crate::{
    error::ApiError,
    model::role::Role,
    models::{Claims, TokenType},
};

/// The authenticated caller for one request.
///
/// Built by the auth middleware from a verified access token and dropped with
/// the request; the raw token travels with it so upstream calls act as the
/// same user.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: u64,
    pub username: String,
    pub role: Role,
    pub branch_id: Option<String>,

    /// Present only if this user is linked to an employee record
    pub employee_no: Option<String>,
}

impl Session {
    pub fn from_claims(token: &str, claims: Claims) -> Result<Self, ApiError> {
        if claims.token_type != TokenType::Access {
            return Err(ApiError::Unauthorized("Access token required".into()));
        }

        let role = Role::from_id(claims.role)
            .ok_or_else(|| ApiError::Unauthorized("Invalid role".into()))?;

        Ok(Session {
            token: token.to_string(),
            user_id: claims.user_id,
            username: claims.sub,
            role,
            branch_id: claims.branch_id,
            employee_no: claims.employee_no,
        })
    }

    pub fn require_manager_or_admin(&self) -> Result<(), ApiError> {
        if matches!(self.role, Role::Admin | Role::BranchManager) {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Branch manager/Admin only".into()))
        }
    }

    /// Admins may look at any branch; managers are pinned to their own.
    pub fn branch_scope<'a>(&'a self, requested: Option<&'a str>) -> Result<Option<&'a str>, ApiError> {
        match self.role {
            Role::Admin => Ok(requested),
            Role::BranchManager => match (self.branch_id.as_deref(), requested) {
                (None, _) => Err(ApiError::Forbidden("No branch assigned".into())),
                (Some(own), Some(other)) if own != other => {
                    Err(ApiError::Forbidden("Not your branch".into()))
                }
                (own, _) => Ok(own),
            },
            Role::Employee => Err(ApiError::Forbidden("Branch manager/Admin only".into())),
        }
    }

    pub fn require_employee_no(&self) -> Result<&str, ApiError> {
        self.employee_no
            .as_deref()
            .ok_or_else(|| ApiError::Forbidden("No employee profile".into()))
    }
}

impl FromRequest for Session {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Session>()
                .cloned()
                .ok_or_else(|| ApiError::Unauthorized("Missing token".into())),
        )
    }
}
