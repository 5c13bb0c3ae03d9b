use fintrack_common::token::auth_token::{AuthToken, AuthTokenClaims};
use fintrack_common::token::{Token, TokenError};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use futures::future;

use crate::env;
use crate::handlers::error::HttpErrorResponse;
use crate::middleware::into_actix_error_res;

/// The identity a request's bearer token resolves to. Obtaining this
/// extractor is the only way a handler gets an owner ID, so every ledger
/// operation downstream is necessarily scoped to a verified identity.
#[derive(Debug)]
pub struct VerifiedUser {
    pub claims: AuthTokenClaims,
}

impl FromRequest for VerifiedUser {
    type Error = HttpErrorResponse;
    type Future = future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match into_actix_error_res(resolve_identity(req)) {
            Ok(claims) => future::ok(VerifiedUser { claims }),
            Err(e) => future::err(e),
        }
    }
}

fn resolve_identity(req: &HttpRequest) -> Result<AuthTokenClaims, TokenError> {
    let token = bearer_token(req).ok_or(TokenError::TokenMissing)?;
    let decoded = AuthToken::decode(token)?;
    let claims = decoded.verify(&env::CONF.token_signing_key)?;

    Ok(claims.clone())
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let header = req.headers().get(header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;

    header.strip_prefix("Bearer ")
}
