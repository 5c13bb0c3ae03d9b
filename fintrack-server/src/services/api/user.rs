use actix_web::web::*;

use crate::handlers::user;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/user")
            .route("/register", post().to(user::register))
            .route("/login", post().to(user::sign_in)),
    );
}
