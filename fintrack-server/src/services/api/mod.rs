use actix_web::web::*;

mod budget;
mod health;
mod transaction;
mod user;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/api")
            .configure(budget::configure)
            .configure(health::configure)
            .configure(transaction::configure)
            .configure(user::configure),
    );
}
