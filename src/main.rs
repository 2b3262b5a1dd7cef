use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use kurso_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(handlers::health_check)
            .service(handlers::get_test)
            .service(handlers::submit_attempt)
            .service(handlers::get_has_passed)
            .service(handlers::get_attempt_history)
            .service(handlers::complete_lesson)
            .service(handlers::get_completion_status)
            .service(handlers::get_sequence)
            .service(handlers::reorder_content)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
