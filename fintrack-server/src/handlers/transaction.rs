use fintrack_common::db::DbThreadPool;
use fintrack_common::ledger::{self, CreateOutcome};
use fintrack_common::request_io::{Envelope, InputMonth, InputTransaction};

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::handlers::error::HttpErrorResponse;
use crate::handlers::into_http_error;
use crate::middleware::auth::VerifiedUser;

pub async fn create(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    transaction_data: web::Json<InputTransaction>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;

    let outcome = web::block(move || {
        let service = ledger::transaction::Service::new(&db_thread_pool);
        service.create(owner_id, &transaction_data.0)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to create transaction"))?;

    Ok(match outcome {
        CreateOutcome::Created(transaction) => HttpResponse::Created().json(
            Envelope::data_with_message(String::from("Transaction added"), transaction),
        ),
        CreateOutcome::AlreadyExists(existing) => {
            HttpResponse::Ok().json(Envelope::data_with_message(
                String::from("Transaction with this type, category, and date already exists"),
                existing,
            ))
        }
    })
}

pub async fn get_all(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;

    let transactions = web::block(move || {
        let service = ledger::transaction::Service::new(&db_thread_pool);
        service.list(owner_id)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to get transactions"))?;

    Ok(HttpResponse::Ok().json(Envelope::data(transactions)))
}

pub async fn get(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    transaction_id: web::Path<Uuid>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;
    let transaction_id = transaction_id.into_inner();

    let transaction = web::block(move || {
        let service = ledger::transaction::Service::new(&db_thread_pool);
        service.get(owner_id, transaction_id)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to get transaction"))?;

    Ok(HttpResponse::Ok().json(Envelope::data(transaction)))
}

pub async fn edit(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    transaction_id: web::Path<Uuid>,
    transaction_data: web::Json<InputTransaction>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;
    let transaction_id = transaction_id.into_inner();

    let transaction = web::block(move || {
        let service = ledger::transaction::Service::new(&db_thread_pool);
        service.update(owner_id, transaction_id, &transaction_data.0)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to update transaction"))?;

    Ok(HttpResponse::Ok().json(Envelope::data_with_message(
        String::from("Transaction updated"),
        transaction,
    )))
}

pub async fn delete(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    transaction_id: web::Path<Uuid>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;
    let transaction_id = transaction_id.into_inner();

    web::block(move || {
        let service = ledger::transaction::Service::new(&db_thread_pool);
        service.delete(owner_id, transaction_id)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to delete transaction"))?;

    Ok(HttpResponse::Ok().json(Envelope::message(String::from("Transaction deleted"))))
}

pub async fn summary(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    month_data: web::Json<InputMonth>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;

    let summary = web::block(move || {
        let service = ledger::transaction::Service::new(&db_thread_pool);
        service.monthly_summary(owner_id, month_data.date.as_deref().unwrap_or(""))
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to build monthly summary"))?;

    Ok(HttpResponse::Ok().json(Envelope::data(summary)))
}

pub async fn details(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    month_data: web::Json<InputMonth>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;

    let details = web::block(move || {
        let service = ledger::transaction::Service::new(&db_thread_pool);
        service.monthly_details(owner_id, month_data.date.as_deref().unwrap_or(""))
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to get monthly transactions"))?;

    let message = format!("Income and expense transactions for {}", details.month);

    Ok(HttpResponse::Ok().json(Envelope::data_with_message(message, details)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::web::Data;
    use actix_web::App;

    use fintrack_common::models::transaction::Transaction;
    use fintrack_common::request_io::{MonthlySummary, ResponseStatus};

    use crate::env;
    use crate::handlers::test_utils;
    use crate::services;

    fn income(title: &str, amount_cents: i64, category: &str, date: &str) -> InputTransaction {
        InputTransaction {
            title: Some(String::from(title)),
            amount_cents: Some(amount_cents),
            transaction_type: Some(String::from("income")),
            category: Some(String::from(category)),
            date: Some(String::from(date)),
        }
    }

    fn expense(title: &str, amount_cents: i64, category: &str, date: &str) -> InputTransaction {
        InputTransaction {
            transaction_type: Some(String::from("expense")),
            ..income(title, amount_cents, category, date)
        }
    }

    #[actix_web::test]
    async fn test_create_get_and_soft_duplicate() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let user = test_utils::create_user(&env::testing::DB_THREAD_POOL);
        let token = test_utils::access_token_for(&user);

        let req = TestRequest::post()
            .uri("/api/transaction")
            .insert_header(test_utils::bearer(&token))
            .set_json(income("Paycheck", 50000, "Salary", "2024/5"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = test::read_body(resp).await;
        let envelope: Envelope<Transaction> = serde_json::from_slice(&body).unwrap();
        let created = envelope.data.unwrap();

        // Same (type, category, date) answers 200 with the original record
        let req = TestRequest::post()
            .uri("/api/transaction")
            .insert_header(test_utils::bearer(&token))
            .set_json(income("Second paycheck", 999, "Salary", "2024/5"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let envelope: Envelope<Transaction> = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.status, ResponseStatus::Success);
        assert_eq!(envelope.data.unwrap().id, created.id);

        let req = TestRequest::get()
            .uri(&format!("/api/transaction/{}", created.id))
            .insert_header(test_utils::bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        test_utils::delete_user(&user);
    }

    #[actix_web::test]
    async fn test_requests_without_token_are_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let req = TestRequest::get().uri("/api/transaction").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = TestRequest::post()
            .uri("/api/transaction")
            .set_json(income("Paycheck", 50000, "Salary", "2024/5"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_other_users_records_are_forbidden() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let owner = test_utils::create_user(&env::testing::DB_THREAD_POOL);
        let owner_token = test_utils::access_token_for(&owner);
        let intruder = test_utils::create_user(&env::testing::DB_THREAD_POOL);
        let intruder_token = test_utils::access_token_for(&intruder);

        let req = TestRequest::post()
            .uri("/api/transaction")
            .insert_header(test_utils::bearer(&owner_token))
            .set_json(expense("Rent", 120000, "Housing", "2024/5"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = test::read_body(resp).await;
        let envelope: Envelope<Transaction> = serde_json::from_slice(&body).unwrap();
        let created = envelope.data.unwrap();

        let uri = format!("/api/transaction/{}", created.id);

        let req = TestRequest::get()
            .uri(&uri)
            .insert_header(test_utils::bearer(&intruder_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = TestRequest::delete()
            .uri(&uri)
            .insert_header(test_utils::bearer(&intruder_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // A nonexistent ID is a 404, not a 403
        let req = TestRequest::get()
            .uri(&format!("/api/transaction/{}", Uuid::now_v7()))
            .insert_header(test_utils::bearer(&intruder_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        test_utils::delete_user(&owner);
        test_utils::delete_user(&intruder);
    }

    #[actix_web::test]
    async fn test_monthly_summary_and_validation() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let user = test_utils::create_user(&env::testing::DB_THREAD_POOL);
        let token = test_utils::access_token_for(&user);

        for input in [
            income("Paycheck", 500, "Salary", "2024/5"),
            income("Side gig", 200, "Consulting", "2024/5"),
            expense("Groceries", 300, "Food", "2024/5"),
        ] {
            let req = TestRequest::post()
                .uri("/api/transaction")
                .insert_header(test_utils::bearer(&token))
                .set_json(input)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = TestRequest::post()
            .uri("/api/transaction/summary")
            .insert_header(test_utils::bearer(&token))
            .set_json(InputMonth {
                date: Some(String::from("2024/5")),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let envelope: Envelope<MonthlySummary> = serde_json::from_slice(&body).unwrap();
        let summary = envelope.data.unwrap();

        assert_eq!(summary.total_income, 700);
        assert_eq!(summary.total_expense, 300);
        assert_eq!(summary.balance, 400);

        let req = TestRequest::post()
            .uri("/api/transaction/summary")
            .insert_header(test_utils::bearer(&token))
            .set_json(InputMonth {
                date: Some(String::from("May-2024")),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        test_utils::delete_user(&user);
    }
}
