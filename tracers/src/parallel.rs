//! Parallel Work

use std::ops::Range;

/// Split `0..n_items` into chunks of `chunk_size` and map each chunk with
/// `f` on a pool of `n_threads` workers. Results are returned in chunk
/// order. With a single thread the chunks are processed on the caller's
/// thread.
///
/// * `n_items`    - Number of items.
/// * `n_threads`  - Number of worker threads.
/// * `chunk_size` - Items per work item.
/// * `f`          - Maps a chunk's item range to its result.
pub fn parallel_chunks<T, F>(n_items: usize, n_threads: usize, chunk_size: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(Range<usize>) -> T + Sync,
{
    let chunk_size = chunk_size.max(1);
    let n_chunks = (n_items + chunk_size - 1) / chunk_size;
    let chunk = |i: usize| i * chunk_size..((i + 1) * chunk_size).min(n_items);

    if n_threads <= 1 || n_chunks <= 1 {
        return (0..n_chunks).map(|i| f(chunk(i))).collect();
    }

    let mut results: Vec<(usize, T)> = Vec::with_capacity(n_chunks);
    let outcome = crossbeam::scope(|scope| {
        let (tx, rx) = crossbeam_channel::bounded(n_threads);
        let (result_tx, result_rx) = crossbeam_channel::unbounded();

        // Spawn worker threads.
        for _ in 0..n_threads.min(n_chunks) {
            let rxc = rx.clone();
            let result_tx = result_tx.clone();
            let f = &f;
            let chunk = &chunk;
            scope.spawn(move |_| {
                for chunk_idx in rxc.iter() {
                    if result_tx.send((chunk_idx, f(chunk(chunk_idx)))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(rx); // Drop extra rx since we've cloned one for each worker.
        drop(result_tx);

        // Send work.
        for chunk_idx in 0..n_chunks {
            if tx.send(chunk_idx).is_err() {
                break;
            }
        }
        drop(tx);

        results.extend(result_rx.iter());
    });

    if let Err(e) = outcome {
        std::panic::resume_unwind(e);
    }

    results.sort_by_key(|(i, _)| *i);
    results.into_iter().map(|(_, r)| r).collect()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
