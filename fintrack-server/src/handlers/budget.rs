use fintrack_common::db::DbThreadPool;
use fintrack_common::ledger::{self, CreateOutcome};
use fintrack_common::request_io::{Envelope, InputBudget, InputMonth};

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::handlers::error::HttpErrorResponse;
use crate::handlers::into_http_error;
use crate::middleware::auth::VerifiedUser;

pub async fn create(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    budget_data: web::Json<InputBudget>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;

    let outcome = web::block(move || {
        let service = ledger::budget::Service::new(&db_thread_pool);
        service.create(owner_id, &budget_data.0)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to create budget"))?;

    Ok(match outcome {
        CreateOutcome::Created(budget) => HttpResponse::Created().json(
            Envelope::data_with_message(String::from("Budget added"), budget),
        ),
        CreateOutcome::AlreadyExists(existing) => {
            HttpResponse::Ok().json(Envelope::data_with_message(
                String::from("Budget for this month and year already exists"),
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

    let budgets = web::block(move || {
        let service = ledger::budget::Service::new(&db_thread_pool);
        service.list(owner_id)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to get budgets"))?;

    Ok(HttpResponse::Ok().json(Envelope::data(budgets)))
}

pub async fn get_by_date(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    month_data: web::Json<InputMonth>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;

    let budgets = web::block(move || {
        let service = ledger::budget::Service::new(&db_thread_pool);
        service.list_for_month(owner_id, month_data.date.as_deref().unwrap_or(""))
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to get budgets"))?;

    Ok(HttpResponse::Ok().json(Envelope::data(budgets)))
}

pub async fn get(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    budget_id: web::Path<Uuid>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;
    let budget_id = budget_id.into_inner();

    let budget = web::block(move || {
        let service = ledger::budget::Service::new(&db_thread_pool);
        service.get(owner_id, budget_id)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to get budget"))?;

    Ok(HttpResponse::Ok().json(Envelope::data(budget)))
}

pub async fn edit(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    budget_id: web::Path<Uuid>,
    budget_data: web::Json<InputBudget>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;
    let budget_id = budget_id.into_inner();

    let budget = web::block(move || {
        let service = ledger::budget::Service::new(&db_thread_pool);
        service.update(owner_id, budget_id, &budget_data.0)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to update budget"))?;

    Ok(HttpResponse::Ok().json(Envelope::data_with_message(
        String::from("Budget updated"),
        budget,
    )))
}

pub async fn delete(
    db_thread_pool: web::Data<DbThreadPool>,
    user: VerifiedUser,
    budget_id: web::Path<Uuid>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let owner_id = user.claims.user_id;
    let budget_id = budget_id.into_inner();

    web::block(move || {
        let service = ledger::budget::Service::new(&db_thread_pool);
        service.delete(owner_id, budget_id)
    })
    .await?
    .map_err(|e| into_http_error(e, "Failed to delete budget"))?;

    Ok(HttpResponse::Ok().json(Envelope::message(String::from("Budget deleted"))))
}
