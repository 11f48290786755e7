//! Document state management

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;

use crate::error::{Error, Result};

/// A snapshot of an open text document
#[derive(Debug, Clone)]
pub struct Document {
    /// The full document text
    pub text: Arc<str>,
    /// The document version reported by the client
    pub version: i32,
}

impl Document {
    /// Create a new document with the given text and version
    pub fn new(text: impl Into<Arc<str>>, version: i32) -> Self {
        Self {
            text: text.into(),
            version,
        }
    }
}

/// Thread-safe map of open documents keyed by URI
///
/// Every operation takes the lock once. Texts are shared `Arc<str>` snapshots,
/// so the critical section never copies document contents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<Url, Document>>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the initial text of a newly opened document, overwriting any previous text
    pub async fn open(&self, uri: Url, text: String, version: i32) {
        let document = Document::new(text, version);
        self.documents.write().await.insert(uri, document);
    }

    /// Replace the full text of a document
    ///
    /// An unknown URI is opened implicitly.
    pub async fn replace(&self, uri: Url, text: String, version: i32) {
        let document = Document::new(text, version);
        let previous = self.documents.write().await.insert(uri.clone(), document);
        if previous.is_none() {
            tracing::debug!("Change for unopened document, opening implicitly: {}", uri);
        }
    }

    /// Get the current snapshot of a document
    pub async fn get(&self, uri: &Url) -> Result<Document> {
        self.documents
            .read()
            .await
            .get(uri)
            .cloned()
            .ok_or(Error::DocumentNotFound)
    }

    /// Forget a document, returning whether it was open
    pub async fn close(&self, uri: &Url) -> bool {
        self.documents.write().await.remove(uri).is_some()
    }

    /// Number of tracked documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether no documents are tracked
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;

    fn uri(name: &str) -> Url {
        Url::parse(&format!("file:///tmp/{name}.promql")).unwrap()
    }

    #[tokio::test]
    async fn test_open_then_get() {
        let store = DocumentStore::new();
        store.open(uri("a"), "up".to_string(), 1).await;

        let doc = store.get(&uri("a")).await.unwrap();
        assert_eq!(&*doc.text, "up");
        assert_eq!(doc.version, 1);
    }

    #[tokio::test]
    async fn test_replace_supersedes_text() {
        let store = DocumentStore::new();
        store.open(uri("a"), "rate(x[5m])\n".to_string(), 1).await;
        store.replace(uri("a"), "up".to_string(), 2).await;

        let doc = store.get(&uri("a")).await.unwrap();
        assert_eq!(&*doc.text, "up");
        assert_eq!(doc.version, 2);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_replace_is_idempotent() {
        let store = DocumentStore::new();
        store.open(uri("a"), "x".to_string(), 1).await;
        store.replace(uri("a"), "y".to_string(), 2).await;
        let once = store.get(&uri("a")).await.unwrap();
        store.replace(uri("a"), "y".to_string(), 2).await;
        let twice = store.get(&uri("a")).await.unwrap();

        assert_eq!(once.text, twice.text);
        assert_eq!(once.version, twice.version);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_replace_unknown_opens_implicitly() {
        let store = DocumentStore::new();
        store.replace(uri("new"), "up".to_string(), 3).await;
        assert_eq!(&*store.get(&uri("new")).await.unwrap().text, "up");
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = DocumentStore::new();
        assert!(store.is_empty().await);
        assert_matches!(store.get(&uri("missing")).await, Err(Error::DocumentNotFound));
    }

    #[tokio::test]
    async fn test_close_evicts() {
        let store = DocumentStore::new();
        store.open(uri("a"), "up".to_string(), 1).await;

        assert!(store.close(&uri("a")).await);
        assert!(!store.close(&uri("a")).await);
        assert_matches!(store.get(&uri("a")).await, Err(Error::DocumentNotFound));
    }

    #[tokio::test]
    async fn test_snapshot_survives_replace() {
        let store = DocumentStore::new();
        store.open(uri("a"), "old".to_string(), 1).await;
        let snapshot = store.get(&uri("a")).await.unwrap();
        store.replace(uri("a"), "new".to_string(), 2).await;

        assert_eq!(&*snapshot.text, "old");
        assert_eq!(&*store.get(&uri("a")).await.unwrap().text, "new");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_distinct_uris() {
        const N: usize = 64;
        let store = Arc::new(DocumentStore::new());

        let mut writers = Vec::new();
        for i in 0..N {
            let store = Arc::clone(&store);
            writers.push(tokio::spawn(async move {
                let uri = uri(&format!("doc{i}"));
                store.open(uri.clone(), format!("open {i}"), 1).await;
                store.replace(uri, format!("metric_{i}"), 2).await;
            }));
        }
        for writer in writers {
            writer.await.unwrap();
        }

        let mut readers = Vec::new();
        for i in 0..N {
            let store = Arc::clone(&store);
            readers.push(tokio::spawn(async move {
                let doc = store.get(&uri(&format!("doc{i}"))).await.unwrap();
                (i, doc)
            }));
        }
        for reader in readers {
            let (i, doc) = reader.await.unwrap();
            assert_eq!(&*doc.text, format!("metric_{i}"));
            assert_eq!(doc.version, 2);
        }
        assert_eq!(store.len().await, N);
    }
}
