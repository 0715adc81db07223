use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, web};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use golf_scorer::args;
use golf_scorer::gateway::API_URL_ENV;
use golf_scorer::{AppState, SheetGateway, configure};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks()?;
    init_tracing(args.log_json);

    match &args.api.endpoint {
        Some(url) => tracing::info!(host = url.host_str().unwrap_or_default(), "score api configured"),
        None => tracing::warn!("{API_URL_ENV} is not set; loads and saves will fail"),
    }

    let state = AppState::new(Arc::new(SheetGateway::new(args.api.clone())));
    let static_dir = args.static_dir.clone();

    tracing::info!(bind = %args.bind, "starting golf-scorer");
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(state.clone()))
            .configure(configure)
            .route("/health", web::get().to(HttpResponse::Ok))
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind(args.bind.as_str())?
    .run()
    .await?;
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
