//! LSP Backend implementation

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::document::DocumentStore;
use crate::error::Error;
use crate::hover::HoverResolver;
use crate::validator::{ExpressionValidator, PromqlValidator};

/// The LSP backend that handles all language server requests
pub struct Backend<V = PromqlValidator> {
    /// The LSP client for sending notifications
    client: Client,
    /// Open documents keyed by URI
    documents: DocumentStore,
    /// Hover resolution against the expression grammar
    hover: HoverResolver<V>,
}

impl Backend<PromqlValidator> {
    /// Create a new backend validating PromQL
    pub fn new(client: Client) -> Self {
        Self::with_validator(client, Arc::new(PromqlValidator::new()))
    }
}

impl<V: ExpressionValidator> Backend<V> {
    /// Create a backend using a custom expression validator
    pub fn with_validator(client: Client, validator: Arc<V>) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            hover: HoverResolver::new(validator),
        }
    }

    /// The documents currently tracked by this backend
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Apply a full-text change notification
    async fn apply_change(&self, params: DidChangeTextDocumentParams) -> crate::error::Result<()> {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        if params.content_changes.len() > 1 {
            tracing::warn!(
                "Received {} content changes for {}, only the first is applied",
                params.content_changes.len(),
                uri
            );
        }

        // Full sync: the first change carries the whole document
        let change = params
            .content_changes
            .into_iter()
            .next()
            .ok_or(Error::MalformedNotification("didChange without content changes"))?;

        tracing::debug!("Document changed: {} (version {})", uri, version);
        self.documents.replace(uri, change.text, version).await;
        Ok(())
    }
}

#[tower_lsp::async_trait]
impl<V: ExpressionValidator> LanguageServer for Backend<V> {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        ..Default::default()
                    },
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("Server initialized");
        self.client
            .log_message(MessageType::INFO, "promql-lsp initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        tracing::debug!("Document opened: {} (version {})", uri, version);

        self.documents
            .open(uri, params.text_document.text, version)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        if let Err(err) = self.apply_change(params).await {
            tracing::warn!("Ignoring change for {}: {}", uri, err);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        if self.documents.close(&uri).await {
            tracing::debug!("Document closed: {}", uri);
        } else {
            tracing::warn!("Ignoring close for {}: {}", uri, Error::DocumentNotFound);
        }
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        match self.hover.resolve(&self.documents, &uri, position).await {
            Ok(hover) => Ok(Some(hover)),
            Err(err) => {
                tracing::debug!("Hover failed for {} at {:?}: {}", uri, position, err);
                Err(err.into())
            }
        }
    }
}
