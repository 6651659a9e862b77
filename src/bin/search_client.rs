//! Terminal search client: issues coalesced searches against a running
//! gateway and prints the resulting page with a pager summary.

use std::env;
use std::process;

use dotenvy::dotenv;

use cardfinder::client::SearchApiClient;
use cardfinder::coalescer::CallCoalescer;
use cardfinder::domain::types::SearchTerm;
use cardfinder::pagination::{self, DISPLAY_MAX_PER_PAGE};
use cardfinder::repository::CardsSearchQuery;

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = env::args().skip(1);
    let term = match args.next() {
        Some(term) => term,
        None => {
            eprintln!("usage: search_client <term> [page]");
            process::exit(2);
        }
    };
    let page = args.next().and_then(|p| p.parse::<u32>().ok());

    let term = match SearchTerm::new(term) {
        Ok(term) => term,
        Err(err) => {
            log::error!("Cannot search: {err}");
            process::exit(1);
        }
    };

    let api_base =
        env::var("SEARCH_API_BASE").unwrap_or_else(|_| "http://localhost:8889".to_string());

    let mut query = CardsSearchQuery::new(term);
    if let Some(page) = page {
        query = query.page(page);
    }

    let coalescer = CallCoalescer::new(SearchApiClient::new(api_base));

    coalescer
        .search(query, |results| {
            for card in &results.data {
                let prices: Vec<String> = [
                    card.prices.usd.as_deref().map(|p| format!("${p}")),
                    card.prices.eur.as_deref().map(|p| format!("{p} EUR")),
                ]
                .into_iter()
                .flatten()
                .collect();

                println!(
                    "{} [{}] {} {}",
                    card.name,
                    card.set_name,
                    capitalize(&card.rarity),
                    prices.join(" / ")
                );
            }

            let pager = pagination::pager_index(results.total, DISPLAY_MAX_PER_PAGE, &results.links);
            println!(
                "{} results, page {} / {}",
                results.total, pager.current_page, pager.total_pages
            );
        })
        .await;
}
