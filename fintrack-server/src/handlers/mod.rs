pub mod budget;
pub mod health;
pub mod transaction;
pub mod user;

use fintrack_common::ledger::LedgerError;

use self::error::HttpErrorResponse;

/// Maps a ledger failure onto an HTTP response. Validation and ownership
/// errors pass through with their own messages; store failures are logged
/// here and answered with the caller-supplied generic message so internals
/// never reach the client.
pub(crate) fn into_http_error(
    error: LedgerError,
    store_failure_msg: &'static str,
) -> HttpErrorResponse {
    match error {
        LedgerError::InvalidInput(msg) => HttpErrorResponse::IncorrectlyFormed(msg),
        LedgerError::NotFound(msg) => HttpErrorResponse::DoesNotExist(msg),
        LedgerError::Forbidden(msg) => HttpErrorResponse::NotOwner(msg),
        LedgerError::Store(e) => {
            log::error!("{e}");
            HttpErrorResponse::InternalError(String::from(store_failure_msg))
        }
    }
}

pub mod error {
    use fintrack_common::request_io::Envelope;

    use actix_web::http::{header, StatusCode};
    use actix_web::{HttpResponse, HttpResponseBuilder};
    use std::fmt;
    use tokio::sync::oneshot;

    #[derive(Debug)]
    pub enum HttpErrorResponse {
        // 400
        IncorrectlyFormed(String),
        ConflictWithExisting(String),

        // 401
        IncorrectCredential(String),
        BadToken(String),
        TokenExpired(String),
        TokenMissing(String),

        // 403
        NotOwner(String),

        // 404
        DoesNotExist(String),

        // 500
        InternalError(String),
    }

    impl std::error::Error for HttpErrorResponse {}

    impl fmt::Display for HttpErrorResponse {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message())
        }
    }

    impl HttpErrorResponse {
        fn message(&self) -> &str {
            match self {
                HttpErrorResponse::IncorrectlyFormed(msg)
                | HttpErrorResponse::ConflictWithExisting(msg)
                | HttpErrorResponse::IncorrectCredential(msg)
                | HttpErrorResponse::BadToken(msg)
                | HttpErrorResponse::TokenExpired(msg)
                | HttpErrorResponse::TokenMissing(msg)
                | HttpErrorResponse::NotOwner(msg)
                | HttpErrorResponse::DoesNotExist(msg)
                | HttpErrorResponse::InternalError(msg) => msg,
            }
        }
    }

    impl actix_web::error::ResponseError for HttpErrorResponse {
        fn error_response(&self) -> HttpResponse {
            HttpResponseBuilder::new(self.status_code())
                .insert_header((header::CONTENT_TYPE, "application/json"))
                .json(Envelope::error(String::from(self.message())))
        }

        fn status_code(&self) -> StatusCode {
            match *self {
                HttpErrorResponse::IncorrectlyFormed(_)
                | HttpErrorResponse::ConflictWithExisting(_) => StatusCode::BAD_REQUEST,
                HttpErrorResponse::IncorrectCredential(_)
                | HttpErrorResponse::BadToken(_)
                | HttpErrorResponse::TokenExpired(_)
                | HttpErrorResponse::TokenMissing(_) => StatusCode::UNAUTHORIZED,
                HttpErrorResponse::NotOwner(_) => StatusCode::FORBIDDEN,
                HttpErrorResponse::DoesNotExist(_) => StatusCode::NOT_FOUND,
                HttpErrorResponse::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl From<actix_web::error::BlockingError> for HttpErrorResponse {
        fn from(_err: actix_web::error::BlockingError) -> Self {
            HttpErrorResponse::InternalError(String::from("Actix thread pool failure"))
        }
    }

    impl From<oneshot::error::RecvError> for HttpErrorResponse {
        fn from(_err: oneshot::error::RecvError) -> Self {
            HttpErrorResponse::InternalError(String::from("Rayon thread pool failure"))
        }
    }
}

#[cfg(test)]
pub mod test_utils {
    use fintrack_common::db::{self, DbThreadPool};
    use fintrack_common::models::user::User;
    use fintrack_common::threadrand::SecureRng;
    use fintrack_common::token::auth_token::{AuthToken, NewAuthTokenClaims};

    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::env;

    pub fn unique_email() -> String {
        format!("handler-test-{}@fintrack.test", SecureRng::next_u128())
    }

    pub fn create_user(db_thread_pool: &DbThreadPool) -> User {
        let user_dao = db::user::Dao::new(db_thread_pool);
        user_dao
            .create_user("Test User", &unique_email(), "test_password_hash")
            .expect("Failed to create test user")
    }

    pub fn access_token_for(user: &User) -> String {
        let expiration = (SystemTime::now() + env::CONF.access_token_lifetime)
            .duration_since(UNIX_EPOCH)
            .expect("Failed to fetch system time")
            .as_secs();

        let claims = NewAuthTokenClaims {
            user_id: user.id,
            user_name: &user.name,
            user_email: &user.email,
            expiration,
        };

        AuthToken::sign_new(claims, &env::CONF.token_signing_key)
    }

    pub fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {token}"))
    }

    pub fn delete_user(user: &User) {
        use diesel::{QueryDsl, RunQueryDsl};

        use fintrack_common::schema::users::dsl::users;

        if let Ok(mut conn) = env::testing::DB_THREAD_POOL.get() {
            let _ = diesel::delete(users.find(user.id)).execute(&mut conn);
        }
    }
}
