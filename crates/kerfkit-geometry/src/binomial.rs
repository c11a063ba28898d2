//! Memoized binomial coefficients for the Bernstein basis.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Rows of Pascal's triangle keyed by control point count.
///
/// `row(n)` has length `n` and holds `C(n - 1, k)` for `k` in `0..n`.
/// Rows never change once computed, so the cache can be shared freely
/// between threads; a race to fill the same row only costs a recomputation.
#[derive(Debug, Default)]
pub struct BinomialCache {
    rows: RwLock<HashMap<usize, Arc<[f64]>>>,
}

impl BinomialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache, created on first use.
    pub fn shared() -> Arc<BinomialCache> {
        static SHARED: OnceLock<Arc<BinomialCache>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(BinomialCache::new())).clone()
    }

    pub fn row(&self, n: usize) -> Arc<[f64]> {
        if let Some(row) = self.rows.read().get(&n) {
            return row.clone();
        }

        let row: Arc<[f64]> = if n <= 1 {
            vec![1.0; n].into()
        } else {
            let base = self.row(n - 1);
            // zip(base + [0], [0] + base)
            (0..n)
                .map(|k| {
                    let left = if k < base.len() { base[k] } else { 0.0 };
                    let right = if k > 0 { base[k - 1] } else { 0.0 };
                    left + right
                })
                .collect::<Vec<_>>()
                .into()
        };

        self.rows.write().entry(n).or_insert(row).clone()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}
