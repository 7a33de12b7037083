use crate::{
    api::{attendance, salary, shift},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    HttpRequest,
    error::{JsonPayloadError, QueryPayloadError},
    middleware::from_fn,
    web,
};

use crate::error::ApiError;

// Helper to build per-scope limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = 60_000 / requests_per_min as u64;
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_default();
    Governor::new(&cfg)
}

// Extractor failures use the same JSON envelope as handler errors
fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::JsonConfig::default().error_handler(json_error));

    let public_limiter = build_limiter(config.rate_public_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::resource("/health")
            .wrap(public_limiter)
            .route(web::get().to(crate::health)),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/dashboard")
                    // /dashboard/attendance
                    .service(
                        web::resource("/attendance")
                            .route(web::get().to(attendance::branch_attendance)),
                    )
                    // /dashboard/salary
                    .service(web::resource("/salary").route(web::get().to(salary::branch_salary))),
            )
            .service(
                web::scope("/me")
                    // /me/attendance
                    .service(web::resource("/attendance").route(web::get().to(attendance::my_attendance))),
            )
            .service(
                web::scope("/shift")
                    // /shift/label
                    .service(web::resource("/label").route(web::post().to(shift::label_shift))),
            ),
    );
}
