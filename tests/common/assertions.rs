//! Custom test assertions

use embedding_fallback::{Embedding, FallbackStats};

/// Assert every embedding has `dim` components
pub fn assert_dims(embeddings: &[Embedding], dim: usize) {
    for (i, embedding) in embeddings.iter().enumerate() {
        assert_eq!(
            embedding.len(),
            dim,
            "embedding {} has {} dimensions, expected {}",
            i,
            embedding.len(),
            dim
        );
    }
}

/// Assert the per-provider (failures, overloads) counters
pub fn assert_counters(stats: &FallbackStats, expected: &[(u64, u64)]) {
    let actual: Vec<(u64, u64)> = stats
        .providers
        .iter()
        .map(|p| (p.failures, p.overloads))
        .collect();
    assert_eq!(actual, expected, "(failures, overloads) per provider");
}
