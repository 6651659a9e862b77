use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::models::config::ServerConfig;
use crate::repository::CardsRepository;
use crate::repository::scryfall::ScryfallRepository;
use crate::routes::search::search_cards;

pub mod client;
pub mod coalescer;
pub mod domain;
pub mod dto;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo: Arc<dyn CardsRepository> =
        Arc::new(ScryfallRepository::new(server_config.cards_api_base.clone()));
    let repo = web::Data::from(repo);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(search_cards)
            .app_data(repo.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
