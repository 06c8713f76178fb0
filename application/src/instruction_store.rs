//! Instruction store — retrieval-augmented guidance lookup.
//!
//! Indexes the instruction corpus for similarity search. [`load`] splits
//! the corpus, embeds every entry in one batched request, and builds the
//! in-memory index; it must run exactly once before [`search`]. The index
//! is read-only afterward.
//!
//! [`search`] uses adaptive threshold retrieval instead of a fixed top-N
//! cutoff: it starts with one candidate and widens only while every
//! candidate so far cleared the score floor (meaning widening might surface
//! more), capped at `max_k` candidates examined.
//!
//! [`load`]: InstructionStore::load
//! [`search`]: InstructionStore::search

use crate::ports::embeddings::{EmbeddingError, EmbeddingPort};
use bootsmith_domain::{CorpusEntry, RetrievalConfig, split_corpus};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Minimum query length accepted by [`InstructionStore::search`]; shorter
/// queries would retrieve noise.
const MIN_QUERY_CHARS: usize = 10;

/// Errors raised by the instruction store
#[derive(Error, Debug)]
pub enum InstructionStoreError {
    /// `search` was called before `load` — a sequencing bug in the caller.
    #[error("Instruction index has not been built yet")]
    NotReady,

    #[error("Query must be at least {MIN_QUERY_CHARS} characters, got {0}")]
    InvalidQuery(usize),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}

struct IndexedEntry {
    entry: CorpusEntry,
    vector: Vec<f32>,
}

/// Similarity index over the instruction corpus.
pub struct InstructionStore {
    embeddings: Arc<dyn EmbeddingPort>,
    config: RetrievalConfig,
    index: Option<Vec<IndexedEntry>>,
}

impl InstructionStore {
    pub fn new(embeddings: Arc<dyn EmbeddingPort>, config: RetrievalConfig) -> Self {
        Self {
            embeddings,
            config,
            index: None,
        }
    }

    /// Split `corpus_text` into entries, embed them, and build the index.
    pub async fn load(&mut self, corpus_text: &str) -> Result<(), InstructionStoreError> {
        let entries = split_corpus(corpus_text);
        if entries.is_empty() {
            self.index = Some(Vec::new());
            return Ok(());
        }

        let texts: Vec<String> = entries.iter().map(|e| e.text.clone()).collect();
        let vectors = self.embeddings.embed(&texts).await?;
        if vectors.len() != entries.len() {
            return Err(InstructionStoreError::Embedding(
                EmbeddingError::MalformedResponse(format!(
                    "expected {} vectors, got {}",
                    entries.len(),
                    vectors.len()
                )),
            ));
        }

        debug!("Instruction index built with {} entries", entries.len());
        self.index = Some(
            entries
                .into_iter()
                .zip(vectors)
                .map(|(entry, vector)| IndexedEntry { entry, vector })
                .collect(),
        );
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    /// Retrieve guidance snippets relevant to `query`, best match first.
    ///
    /// Fails with [`InstructionStoreError::InvalidQuery`] for queries under
    /// ten characters without touching the index or the embedding provider.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, InstructionStoreError> {
        let query_len = query.chars().count();
        if query_len < MIN_QUERY_CHARS {
            return Err(InstructionStoreError::InvalidQuery(query_len));
        }

        let index = self.index.as_ref().ok_or(InstructionStoreError::NotReady)?;
        if index.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self
            .embeddings
            .embed(std::slice::from_ref(&query.to_string()))
            .await?
            .into_iter()
            .next()
            .ok_or(InstructionStoreError::Embedding(
                EmbeddingError::MalformedResponse("empty embedding batch".to_string()),
            ))?;

        // Rank the whole index once; the adaptive loop only decides how far
        // down the ranking to look.
        let mut scored: Vec<(f32, &IndexedEntry)> = index
            .iter()
            .map(|e| (cosine_similarity(&query_vector, &e.vector), e))
            .filter(|(score, _)| !score.is_nan())
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let min_score = self.config.min_similarity_score;
        let mut k = 1usize;
        loop {
            let examined = k.min(self.config.max_k).min(scored.len());
            let candidates = &scored[..examined];
            let passing = candidates.iter().filter(|(s, _)| *s >= min_score).count();

            // Widen only while every candidate cleared the floor — a
            // below-floor candidate means deeper entries score lower still.
            let can_widen = passing == examined
                && examined < self.config.max_k
                && examined < scored.len();
            if can_widen {
                k = (k + self.config.k_increment).min(self.config.max_k);
                continue;
            }

            debug!(
                examined,
                passing,
                "Instruction search finished (query: {} chars)",
                query_len
            );
            return Ok(candidates
                .iter()
                .filter(|(s, _)| *s >= min_score)
                .map(|(_, e)| e.entry.text.clone())
                .collect());
        }
    }
}

/// Cosine similarity between two equal-dimension vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embeds each text as a fixed vector keyed by its first word; counts
    /// calls so tests can assert when no lookup happened.
    struct KeyedEmbeddings {
        calls: AtomicUsize,
    }

    impl KeyedEmbeddings {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn vector_for(text: &str) -> Vec<f32> {
            match text.split_whitespace().next().unwrap_or("") {
                "alpha" => vec![1.0, 0.0, 0.0],
                "beta" => vec![0.8, 0.6, 0.0],
                "gamma" => vec![0.0, 0.0, 1.0],
                // Queries starting with "find" point straight at alpha;
                // anything else matches nothing.
                "find" => vec![1.0, 0.0, 0.0],
                _ => vec![0.0, 0.0, 0.0],
            }
        }
    }

    #[async_trait]
    impl EmbeddingPort for KeyedEmbeddings {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
        }
    }

    const CORPUS: &str = "1. alpha uses eslint\n2. beta uses prettier\n3. gamma uses vitest";

    async fn loaded_store(config: RetrievalConfig) -> (InstructionStore, Arc<KeyedEmbeddings>) {
        let embeddings = Arc::new(KeyedEmbeddings::new());
        let mut store = InstructionStore::new(embeddings.clone(), config);
        store.load(CORPUS).await.unwrap();
        (store, embeddings)
    }

    #[tokio::test]
    async fn test_search_before_load_is_not_ready() {
        let store = InstructionStore::new(
            Arc::new(KeyedEmbeddings::new()),
            RetrievalConfig::default(),
        );
        let result = store.search("find the eslint guidance").await;
        assert!(matches!(result, Err(InstructionStoreError::NotReady)));
    }

    #[tokio::test]
    async fn test_short_query_rejected_without_lookup() {
        let (store, embeddings) = loaded_store(RetrievalConfig::default()).await;
        let calls_after_load = embeddings.calls.load(Ordering::SeqCst);

        let result = store.search("too short").await;
        assert!(matches!(
            result,
            Err(InstructionStoreError::InvalidQuery(9))
        ));
        // No embedding call happened for the rejected query.
        assert_eq!(embeddings.calls.load(Ordering::SeqCst), calls_after_load);
    }

    #[tokio::test]
    async fn test_search_returns_descending_matches_above_floor() {
        let (store, _) = loaded_store(RetrievalConfig::default()).await;

        let results = store.search("find eslint setup").await.unwrap();
        // alpha scores 1.0, beta 0.8, gamma 0.0 — floor is 0.5.
        assert_eq!(
            results,
            vec!["alpha uses eslint".to_string(), "beta uses prettier".to_string()]
        );
    }

    #[tokio::test]
    async fn test_widening_never_exceeds_max_k() {
        // Every entry matches the query perfectly, so widening would go on
        // forever without the cap.
        let config = RetrievalConfig {
            min_similarity_score: 0.1,
            max_k: 2,
            k_increment: 2,
        };
        let embeddings = Arc::new(KeyedEmbeddings::new());
        let mut store = InstructionStore::new(embeddings, config);
        store
            .load("1. alpha a\n2. alpha b\n3. alpha c\n4. alpha d\n5. alpha e")
            .await
            .unwrap();

        let results = store.search("find all the things").await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_no_matches_below_floor() {
        let (store, _) = loaded_store(RetrievalConfig::default()).await;
        // The fallback query vector is orthogonal to everything but itself.
        let results = store.search("unrelated question here").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_corpus_searches_empty() {
        let mut store = InstructionStore::new(
            Arc::new(KeyedEmbeddings::new()),
            RetrievalConfig::default(),
        );
        store.load("").await.unwrap();
        assert!(store.is_ready());
        let results = store.search("find eslint setup").await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
