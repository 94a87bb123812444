//! Batch splitting and parallel batch generation.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::errors::GenerationError;

pub const DEFAULT_WORKERS: usize = 4;

/// Split `quantity` into `workers` sizes that sum to `quantity` and differ by
/// at most one, larger batches first.
pub fn split_batches(quantity: usize, workers: usize) -> Result<Vec<usize>, GenerationError> {
    if workers == 0 {
        return Err(GenerationError::InvalidOptions(
            "worker count must be at least 1".to_string(),
        ));
    }
    let base = quantity / workers;
    let remainder = quantity % workers;
    Ok((0..workers)
        .map(|index| if index < remainder { base + 1 } else { base })
        .collect())
}

/// Build `quantity` records on a pool of `workers` threads.
///
/// Each batch owns a `ChaCha8Rng` seeded from `rng`. Output keeps batch
/// submission order regardless of which worker finishes first.
pub fn generate_batches<T, R, F>(
    quantity: usize,
    workers: usize,
    rng: &mut R,
    build: F,
) -> Result<Vec<T>, GenerationError>
where
    T: Send,
    R: Rng + ?Sized,
    F: Fn(&mut ChaCha8Rng) -> Result<T, GenerationError> + Sync,
{
    let sizes = split_batches(quantity, workers)?;
    let batches: Vec<(usize, usize, ChaCha8Rng)> = sizes
        .into_iter()
        .enumerate()
        .map(|(index, size)| (index, size, ChaCha8Rng::from_seed(rng.random())))
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("circusgen-batch-{index}"))
        .build()
        .map_err(|err| GenerationError::ThreadPool(err.to_string()))?;

    let results: Result<Vec<Vec<T>>, GenerationError> = pool.install(|| {
        batches
            .into_par_iter()
            .map(|(index, size, mut batch_rng)| {
                let start = Instant::now();
                let rows = (0..size)
                    .map(|_| build(&mut batch_rng))
                    .collect::<Result<Vec<T>, GenerationError>>()?;
                debug!(
                    batch = index,
                    rows = rows.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "batch generated"
                );
                Ok(rows)
            })
            .collect()
    });

    let mut rows = Vec::with_capacity(quantity);
    for batch in results? {
        rows.extend(batch);
    }
    Ok(rows)
}
