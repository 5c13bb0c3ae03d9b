use fintrack_common::db::{self, DaoError, DbThreadPool};
use fintrack_common::request_io::{
    CredentialPair, Envelope, IdentityMessage, InputUser, SignInResponse,
};
use fintrack_common::token::auth_token::{AuthToken, NewAuthTokenClaims};
use fintrack_common::validators::{self, Validity};

use actix_web::{web, HttpResponse};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::oneshot;
use zeroize::Zeroizing;

use crate::env;
use crate::handlers::error::HttpErrorResponse;

// Unknown emails and wrong passwords share this message to prevent user
// enumeration attacks
const INCORRECT_CREDENTIALS_MSG: &str = "Incorrect email or password";

pub async fn register(
    db_thread_pool: web::Data<DbThreadPool>,
    user_data: web::Json<InputUser>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let name = user_data.name.clone().unwrap_or_default();
    let email = user_data.email.clone().unwrap_or_default();
    let password = user_data.password.clone().unwrap_or_default();

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(HttpErrorResponse::IncorrectlyFormed(String::from(
            "Please provide name, email, and password",
        )));
    }

    if let Validity::Invalid(msg) = validators::validate_email_address(&email) {
        return Err(HttpErrorResponse::IncorrectlyFormed(msg));
    }

    let email_clone = email.clone();
    let db_thread_pool_ref = db_thread_pool.clone();
    let existing_user = match web::block(move || {
        let user_dao = db::user::Dao::new(&db_thread_pool_ref);
        user_dao.get_user_by_email(&email_clone)
    })
    .await?
    {
        Ok(u) => u,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to check for existing user",
            )));
        }
    };

    if existing_user.is_some() {
        return Err(HttpErrorResponse::ConflictWithExisting(String::from(
            "User already exists",
        )));
    }

    let password = Zeroizing::new(password.into_bytes());
    let (sender, receiver) = oneshot::channel();

    rayon::spawn(move || {
        let hash_result = argon2_kdf::Hasher::default()
            .algorithm(argon2_kdf::Algorithm::Argon2id)
            .salt_length(env::CONF.hash_salt_length)
            .hash_length(env::CONF.hash_length)
            .iterations(env::CONF.hash_iterations)
            .memory_cost_kib(env::CONF.hash_mem_cost_kib)
            .threads(env::CONF.hash_threads)
            .secret(argon2_kdf::Secret::using_bytes(&env::CONF.hashing_key))
            .hash(&password);

        let hash = match hash_result {
            Ok(h) => h,
            Err(e) => {
                sender.send(Err(e)).expect("Sending to channel failed");
                return;
            }
        };

        sender.send(Ok(hash)).expect("Sending to channel failed");
    });

    let password_hash = match receiver.await? {
        Ok(h) => h.to_string(),
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to hash password",
            )));
        }
    };

    let user = match web::block(move || {
        let user_dao = db::user::Dao::new(&db_thread_pool);
        user_dao.create_user(&name, &email, &password_hash)
    })
    .await?
    {
        Ok(u) => u,
        // The existence pre-check can race a concurrent registration; the
        // unique constraint on email is the backstop
        Err(DaoError::QueryFailure(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        ))) => {
            return Err(HttpErrorResponse::ConflictWithExisting(String::from(
                "User already exists",
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to create user",
            )));
        }
    };

    Ok(HttpResponse::Created().json(Envelope::data_with_message(
        String::from("User registered successfully"),
        IdentityMessage {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    )))
}

pub async fn sign_in(
    db_thread_pool: web::Data<DbThreadPool>,
    credentials: web::Json<CredentialPair>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let email = credentials.email.clone().unwrap_or_default();
    let password = credentials.password.clone().unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(HttpErrorResponse::IncorrectlyFormed(String::from(
            "Please provide email and password",
        )));
    }

    let user = match web::block(move || {
        let user_dao = db::user::Dao::new(&db_thread_pool);
        user_dao.get_user_by_email(&email)
    })
    .await?
    {
        Ok(u) => u,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to get user",
            )));
        }
    };

    let Some(user) = user else {
        return Err(HttpErrorResponse::IncorrectCredential(String::from(
            INCORRECT_CREDENTIALS_MSG,
        )));
    };

    let password = Zeroizing::new(password.into_bytes());
    let password_hash = user.password_hash.clone();
    let (sender, receiver) = oneshot::channel();

    rayon::spawn(move || {
        let hash = match argon2_kdf::Hash::from_str(&password_hash) {
            Ok(h) => h,
            Err(e) => {
                sender.send(Err(e)).expect("Sending to channel failed");
                return;
            }
        };

        let does_password_match_hash = hash.verify_with_secret(
            &password,
            argon2_kdf::Secret::using_bytes(&env::CONF.hashing_key),
        );

        sender
            .send(Ok(does_password_match_hash))
            .expect("Sending to channel failed");
    });

    match receiver.await? {
        Ok(true) => (),
        Ok(false) => {
            return Err(HttpErrorResponse::IncorrectCredential(String::from(
                INCORRECT_CREDENTIALS_MSG,
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to verify password",
            )));
        }
    }

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

    let token = AuthToken::sign_new(claims, &env::CONF.token_signing_key);

    Ok(HttpResponse::Ok().json(Envelope::data(SignInResponse {
        token,
        user: IdentityMessage {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::web::Data;
    use actix_web::App;

    use fintrack_common::token::Token;

    use crate::handlers::test_utils;
    use crate::services;

    fn registration(email: &str) -> InputUser {
        InputUser {
            name: Some(String::from("Test User")),
            email: Some(String::from(email)),
            password: Some(String::from("correct horse battery staple")),
        }
    }

    #[actix_web::test]
    async fn test_register_login_round_trip() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let email = test_utils::unique_email();

        let req = TestRequest::post()
            .uri("/api/user/register")
            .set_json(registration(&email))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // Registering the same email again must conflict
        let req = TestRequest::post()
            .uri("/api/user/register")
            .set_json(registration(&email))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = TestRequest::post()
            .uri("/api/user/login")
            .set_json(CredentialPair {
                email: Some(email.clone()),
                password: Some(String::from("correct horse battery staple")),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let envelope: Envelope<SignInResponse> = serde_json::from_slice(&body).unwrap();
        let signin = envelope.data.unwrap();

        assert_eq!(signin.user.email, email);

        // The issued token must verify against the process signing key and
        // carry the registered identity
        let decoded = AuthToken::decode(&signin.token).unwrap();
        let claims = decoded.verify(&env::CONF.token_signing_key).unwrap();
        assert_eq!(claims.user_id, signin.user.id);
        assert_eq!(claims.user_email, email);

        let user_dao = db::user::Dao::new(&env::testing::DB_THREAD_POOL);
        let user = user_dao.get_user_by_email(&email).unwrap().unwrap();
        test_utils::delete_user(&user);
    }

    #[actix_web::test]
    async fn test_login_failures_are_unauthorized_and_uniform() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let email = test_utils::unique_email();

        let req = TestRequest::post()
            .uri("/api/user/register")
            .set_json(registration(&email))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // Wrong password
        let req = TestRequest::post()
            .uri("/api/user/login")
            .set_json(CredentialPair {
                email: Some(email.clone()),
                password: Some(String::from("wrong password")),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let wrong_password_body = test::read_body(resp).await;

        // Unknown email answers identically
        let req = TestRequest::post()
            .uri("/api/user/login")
            .set_json(CredentialPair {
                email: Some(test_utils::unique_email()),
                password: Some(String::from("wrong password")),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let unknown_email_body = test::read_body(resp).await;

        assert_eq!(wrong_password_body, unknown_email_body);

        let user_dao = db::user::Dao::new(&env::testing::DB_THREAD_POOL);
        let user = user_dao.get_user_by_email(&email).unwrap().unwrap();
        test_utils::delete_user(&user);
    }

    #[actix_web::test]
    async fn test_register_requires_all_fields_and_valid_email() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let mut missing_password = registration(&test_utils::unique_email());
        missing_password.password = None;

        let req = TestRequest::post()
            .uri("/api/user/register")
            .set_json(missing_password)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = TestRequest::post()
            .uri("/api/user/register")
            .set_json(registration("not-an-email"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
