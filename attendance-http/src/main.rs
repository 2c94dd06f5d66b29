use std::net::SocketAddr;

use attendance_registry::{
    Registry,
    clap::Parser,
    settings::{build_config, build_file_path, command::Args},
};
use axum::http::{Method, header};
use enviroment::build_address;
use middleware::tower_trace;
use server::build_routes;
use tower_http::cors::{Any, CorsLayer};

mod enviroment;
mod error;
mod logging;
mod middleware;
mod server;
mod wrappers;

mod doc;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut file_path = args.file_path;
    if file_path.is_empty() {
        file_path = build_file_path();
    }

    let listener = tokio::net::TcpListener::bind(build_address())
        .await
        .unwrap();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    let config = build_config(args.env_config, &file_path);
    let _logging = logging::init_logging(&config.logging);
    let registry = Registry::build(config, None).await.unwrap();
    let token = registry.token().clone();

    axum::serve(
        listener,
        tower_trace(build_routes(registry))
            .layer(cors)
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        tokio::select! {
            _ = token.cancelled() => {
            }
        }
    })
    .await
    .unwrap()
}
