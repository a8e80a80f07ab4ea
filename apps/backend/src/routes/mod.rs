use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod admin;
pub mod games;
pub mod health;

/// Register every route. Protected scopes carry their own `JwtExtract`,
/// so tests and `main` share one router.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(
        web::scope("/api/games")
            .wrap(JwtExtract)
            .configure(games::configure_routes),
    );

    cfg.service(
        web::scope("/api/admin")
            .wrap(JwtExtract)
            .configure(admin::configure_routes),
    );
}
