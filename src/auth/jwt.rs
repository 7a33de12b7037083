use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::models::Claims;

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
pub mod testing {
    use std::time::{SystemTime, UNIX_EPOCH};

    use jsonwebtoken::{EncodingKey, Header, encode};

    use crate::models::{Claims, TokenType};

    fn now() -> usize {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize
    }

    pub fn claims(role: u8, branch_id: Option<&str>, employee_no: Option<&str>) -> Claims {
        Claims {
            user_id: 7,
            sub: "manager@branch".to_string(),
            role,
            exp: now() + 900,
            jti: format!("jti-{role}"),
            token_type: TokenType::Access,
            branch_id: branch_id.map(str::to_string),
            employee_no: employee_no.map(str::to_string),
        }
    }

    pub fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{claims, sign};
    use super::*;

    #[test]
    fn round_trips_portal_claims() {
        let token = sign(&claims(2, Some("B-01"), None), "s3cret");
        let decoded = verify_token(&token, "s3cret").unwrap();

        assert_eq!(decoded.role, 2);
        assert_eq!(decoded.branch_id.as_deref(), Some("B-01"));
        assert_eq!(decoded.employee_no, None);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign(&claims(1, None, None), "s3cret");
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut expired = claims(1, None, None);
        expired.exp = 1_000;
        let token = sign(&expired, "s3cret");

        assert!(verify_token(&token, "s3cret").is_err());
    }
}
