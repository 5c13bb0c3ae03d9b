use actix_web::web::*;

use crate::handlers::budget;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/budget")
            .route("", post().to(budget::create))
            .route("", get().to(budget::get_all))
            .route("/by_date", post().to(budget::get_by_date))
            .route("/{budget_id}", get().to(budget::get))
            .route("/{budget_id}", put().to(budget::edit))
            .route("/{budget_id}", delete().to(budget::delete)),
    );
}
