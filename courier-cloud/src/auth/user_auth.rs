//! Caller JWT authentication for the order API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// JWT claims for an order-intake caller
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaims {
    /// User ID (decimal string)
    pub sub: String,
    pub email: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated caller, inserted into request extensions
#[derive(Debug, Clone)]
pub struct UserIdentity {
    /// Recorded as `owner_id` on addresses and orders the caller creates
    pub owner_id: i64,
    pub email: String,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT for a user
pub fn create_token(
    owner_id: i64,
    email: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = UserClaims {
        sub: owner_id.to_string(),
        email: email.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify the bearer token and attach a [`UserIdentity`] to the request.
pub async fn user_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity =
        authenticate(&request, &state.jwt_secret).map_err(IntoResponse::into_response)?;
    tracing::debug!(owner_id = identity.owner_id, email = %identity.email, "Caller authenticated");
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn authenticate(request: &Request, secret: &str) -> Result<UserIdentity, AppError> {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::not_authenticated)?
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format"))?;

    let token_data = jsonwebtoken::decode::<UserClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let owner_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::invalid_token("Invalid token subject"))?;

    Ok(UserIdentity {
        owner_id,
        email: token_data.claims.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use shared::error::ErrorCode;

    const SECRET: &str = "test-secret";

    fn request_with(auth: Option<String>) -> Request {
        let mut builder = http::Request::builder().uri("/api/orders");
        if let Some(value) = auth {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let token = create_token(42, "ops@example.com", SECRET).unwrap();
        let request = request_with(Some(format!("Bearer {token}")));
        let identity = authenticate(&request, SECRET).unwrap();

        assert_eq!(identity.owner_id, 42);
        assert_eq!(identity.email, "ops@example.com");
    }

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let err = authenticate(&request_with(None), SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token(42, "ops@example.com", "other-secret").unwrap();
        let err = authenticate(&request_with(Some(format!("Bearer {token}"))), SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_expired_token() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = UserClaims {
            sub: "42".into(),
            email: "ops@example.com".into(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = authenticate(&request_with(Some(format!("Bearer {token}"))), SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn test_non_bearer_scheme_is_invalid() {
        let err = authenticate(&request_with(Some("Basic abc".into())), SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }
}
