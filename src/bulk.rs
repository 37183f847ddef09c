//! Concurrent per-item fan-out shared by the bulk endpoints and the client
//! stores.

use std::future::Future;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// Summary of a bulk operation; successes are never rolled back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BulkOutcome {
    pub fn from_results<K, T, E>(results: &[(K, Result<T, E>)]) -> Self {
        let failed = results.iter().filter(|(_, result)| result.is_err()).count();
        Self {
            requested: results.len(),
            succeeded: results.len() - failed,
            failed,
        }
    }
}

/// Runs `op` once per key, all concurrently, and pairs every key with its
/// result in input order.
pub async fn fan_out<K, T, E, F, Fut>(keys: &[K], op: F) -> Vec<(K, Result<T, E>)>
where
    K: Clone,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let results = join_all(keys.iter().cloned().map(&op)).await;
    keys.iter().cloned().zip(results).collect()
}
