//! promql-lsp: LSP server that validates PromQL tokens on hover

use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use promql_lsp::Backend;

#[tokio::main]
async fn main() {
    // Logs go to stderr, stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting promql-lsp server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    tracing::info!("Client connection closed, exiting");
}
