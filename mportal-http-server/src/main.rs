use log::info;

use actix_web::{middleware::Logger, web, App, HttpServer};

pub(crate) mod auth;
pub(crate) mod router;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    mportal_lib::config::init();
    let log_level = mportal_lib::config::get_env_var_or_default("RUST_LOG", "info");
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Logger initialized at log level: {}", log_level);

    if let Err(e) = mportal_database::setup().await {
        panic!("Failed to setup database connection: {}", e);
    }
    HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .service(router::health)
            .service(
                web::scope("/api")
                    .service(router::mentor::projects)
                    .service(router::mentor::project_sops)
                    .service(router::mentor::update_rankings)
                    .service(router::mentor::my_rankings),
            )
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
