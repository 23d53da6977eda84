use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Fan-out executor: one spawned task per input, bounded by a semaphore,
/// results handed back in input order.
pub struct ConcurrentProbe {
    semaphore: Arc<Semaphore>,
    completed: Arc<AtomicUsize>,
    errors: Arc<AtomicUsize>,
}

impl ConcurrentProbe {
    pub fn new(concurrency: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            completed: Arc::new(AtomicUsize::new(0)),
            errors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Run `task_fn` over every task concurrently.
    ///
    /// Output slot `i` always belongs to `tasks[i]`, whatever the completion
    /// order. A task that panics or is cancelled gets `fallback(&task)` in its
    /// slot instead, so the whole run never fails.
    pub async fn execute<T, F, Fut, G>(&self, tasks: Vec<T>, task_fn: F, fallback: G) -> Vec<Fut::Output>
    where
        T: Clone + Send + 'static,
        F: Fn(T) -> Fut + Clone + Send + 'static,
        Fut: std::future::Future + Send + 'static,
        Fut::Output: Send + 'static,
        G: Fn(&T) -> Fut::Output,
    {
        let mut futures = FuturesUnordered::new();

        for (idx, task) in tasks.iter().cloned().enumerate() {
            let semaphore = self.semaphore.clone();
            let task_fn = task_fn.clone();
            let completed = self.completed.clone();

            let handle = tokio::spawn(async move {
                // Permit is held for the lifetime of the probe. The semaphore
                // is never closed, so a failed acquire just runs unthrottled.
                let _permit = semaphore.acquire_owned().await.ok();
                let result = task_fn(task).await;
                completed.fetch_add(1, Ordering::Relaxed);
                result
            });
            futures.push(handle.map(move |joined| (idx, joined)));
        }

        let mut slots: Vec<Option<Fut::Output>> = std::iter::repeat_with(|| None).take(tasks.len()).collect();
        while let Some((idx, joined)) = futures.next().await {
            match joined {
                Ok(output) => slots[idx] = Some(output),
                Err(e) => {
                    self.errors.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(task = idx, error = %e, "fan-out task did not complete");
                }
            }
        }

        slots
            .into_iter()
            .zip(tasks.iter())
            .map(|(slot, task)| slot.unwrap_or_else(|| fallback(task)))
            .collect()
    }

    /// (completed, errors) across every `execute` call on this executor.
    pub fn stats(&self) -> (usize, usize) {
        (
            self.completed.load(Ordering::Relaxed),
            self.errors.load(Ordering::Relaxed),
        )
    }
}
