mod assets;
mod builders;
mod config;
mod db;
mod error;
mod export;
mod lang;
mod platform;
mod render;
mod services;
mod state;

use crate::config::Config;
use crate::state::AppState;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::parse();
    let bind = (config.host.clone(), config.port);

    let state = AppState::from_config(config)
        .map_err(|e| io::Error::other(format!("Failed to initialize: {}", e)))?;
    let state = web::Data::new(state);

    info!(
        "Server running at http://{}:{} (database {})",
        bind.0,
        bind.1,
        state.db.path().display()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(services::configure)
    })
        .bind(bind)?
        .run()
        .await
}
