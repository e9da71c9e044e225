use crate::utils::webutils::validate_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub mod auth;
pub mod health;
pub mod history;
pub mod me;
pub mod ocr;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let user_auth = HttpAuthentication::bearer(validate_token);

    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope("/auth")
            .service(auth::register::register)
            .service(auth::login::login)
    );
    cfg.service(
        web::scope("/me").service(me::me).wrap(user_auth.clone())
    );
    cfg.service(
        web::scope("/ocr")
            .service(ocr::scan::simple_pdf)
            .service(ocr::scan::scanned_pdf)
            .service(ocr::scan::image)
            .service(ocr::scan::auto_detect)
            .wrap(user_auth.clone())
    );
    cfg.service(
        web::scope("/history")
            .service(history::list::list)
            .service(history::delete::remove)
            .wrap(user_auth)
    );
}
