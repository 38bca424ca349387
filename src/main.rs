use actix_web::{middleware::Logger, web, App, HttpServer};

use skyline_server::{
    app_state::AppState,
    config::Config,
    handlers::{question_handler, score_handler},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .service(question_handler::list_questions)
            .service(question_handler::create_question)
            .service(question_handler::delete_question)
            .service(score_handler::get_score)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
