//! Resolves the caller from the identity token issued by the auth provider.
//!
//! The token is read from an `Authorization: Bearer` header first, then from
//! the identity cookie, and verified with the shared secret.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ErrorBody;
use crate::models::config::ServerConfig;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no identity token")]
    MissingToken,

    #[error("invalid identity token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("server configuration is not registered")]
    MissingConfig,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingConfig => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AuthError::MissingConfig => {
                log::error!("Cannot authenticate request: {self}");
                "Internal Server Error"
            }
            _ => "Unauthorized",
        };
        HttpResponse::build(self.status_code()).json(ErrorBody::new(message))
    }
}

/// Verifies an HS256 token and returns its claims.
pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedUser, AuthError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);
    Ok(decode::<AuthenticatedUser>(token, &key, &validation)?.claims)
}

/// Signs claims the way the auth provider does; used by tests and tooling.
pub fn encode_token(user: &AuthenticatedUser, secret: &str) -> Result<String, AuthError> {
    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::new(Algorithm::HS256), user, &key)?)
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn identity_token(req: &HttpRequest) -> Option<String> {
    req.get_identity().ok()?.id().ok()
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or(AuthError::MissingConfig)?;
    let token = bearer_token(req)
        .or_else(|| identity_token(req))
        .ok_or(AuthError::MissingToken)?;
    decode_token(&token, &config.secret)
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = authenticate(req);
        if let Err(err) = &result {
            log::debug!("Rejected request to {}: {err}", req.path());
        }
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: usize) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "42".to_string(),
            email: "ann@example.com".to_string(),
            hub_id: 3,
            name: "Ann".to_string(),
            roles: vec!["crm".to_string()],
            exp,
        }
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn token_round_trips_with_the_shared_secret() {
        let user = claims(far_future());
        let token = encode_token(&user, "secret").unwrap();
        assert_eq!(decode_token(&token, "secret").unwrap(), user);
    }

    #[test]
    fn wrong_secret_or_expired_token_is_rejected() {
        let token = encode_token(&claims(far_future()), "secret").unwrap();
        assert!(matches!(
            decode_token(&token, "other"),
            Err(AuthError::InvalidToken(_))
        ));

        let expired = encode_token(&claims(1), "secret").unwrap();
        assert!(decode_token(&expired, "secret").is_err());
    }

    #[test]
    fn reads_bearer_header() {
        let req = actix_web::test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def"));

        let req = actix_web::test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic xyz"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
