use actix_web::web::*;

use crate::handlers::transaction;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/transaction")
            .route("", post().to(transaction::create))
            .route("", get().to(transaction::get_all))
            .route("/summary", post().to(transaction::summary))
            .route("/details", post().to(transaction::details))
            .route("/{transaction_id}", get().to(transaction::get))
            .route("/{transaction_id}", put().to(transaction::edit))
            .route("/{transaction_id}", delete().to(transaction::delete)),
    );
}
