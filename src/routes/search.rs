use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use log::error;

use crate::dto::search::{CardsQueryResponse, SearchCardsParams};
use crate::models::config::ServerConfig;
use crate::pagination;
use crate::repository::CardsRepository;
use crate::routes::error_response;
use crate::services::search as search_service;
use crate::services::search::RetryPolicy;

#[get("/search")]
pub async fn search_cards(
    params: web::Query<SearchCardsParams>,
    repo: web::Data<dyn CardsRepository>,
    server_config: web::Data<ServerConfig>,
    req: HttpRequest,
) -> impl Responder {
    log::info!("attempt to retrieve cards with: {}", req.uri());

    let retry = RetryPolicy::new(server_config.max_search_attempts);

    match search_service::search_cards(repo.get_ref(), params.into_inner(), &retry).await {
        Ok(outcome) => {
            let request_uri = req.uri().to_string();
            let links = pagination::build_links(
                &request_uri,
                &outcome.query,
                outcome.has_more,
                &server_config.search_path,
            );

            HttpResponse::Ok().json(CardsQueryResponse {
                total: outcome.total,
                data: outcome.cards,
                links,
            })
        }
        Err(e) => {
            error!("Failed to search cards: {e}");
            error_response(&e)
        }
    }
}
