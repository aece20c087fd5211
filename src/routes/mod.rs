use crate::utils::webutils::validate_admin_token;
use actix_web::web;

pub mod email;
pub mod health;
pub mod password;
pub mod session;
pub mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let admin_auth = actix_web_httpauth::middleware::HttpAuthentication::bearer(validate_admin_token);

    cfg.service(web::scope("/health").service(health::health));
    cfg.service(
        web::scope("/user").service(
            web::scope("/create")
                .service(user::create::create)
                .wrap(admin_auth.clone()),
        ),
    );
    cfg.service(
        web::scope("/session")
            .service(web::scope("/signin").service(session::signin::signin))
            .service(web::scope("/resume").service(session::resume::resume))
            .service(web::scope("/signout").service(session::signout::signout)),
    );
    cfg.service(
        web::scope("/password")
            .service(web::scope("/forgot").service(password::forgot::forgot))
            .service(web::scope("/reset").service(password::reset::reset)),
    );
    cfg.service(
        web::scope("/email")
            .service(
                web::scope("/request")
                    .service(email::request::request)
                    .wrap(admin_auth),
            )
            .service(web::scope("/confirm").service(email::confirm::confirm)),
    );
}
