use serde::{Deserialize, Serialize};

/// Portal token claims, as issued by the upstream HR API.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,

    pub token_type: TokenType,
    /// Branch the account manages or belongs to
    #[serde(default)]
    pub branch_id: Option<String>,
    /// Present only if this user is linked to an employee record
    #[serde(default)]
    pub employee_no: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
