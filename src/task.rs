use futures::channel::oneshot;

/// Result of a job running on a worker thread.
///
/// The UI thread polls it once per frame with [`TaskHandle::try_take`] and
/// never blocks on it.
#[derive(Debug)]
pub struct TaskHandle<T> {
    rx: oneshot::Receiver<T>,
}

/// What a poll of a [`TaskHandle`] found
#[derive(Debug, PartialEq, Eq)]
pub enum Poll<T> {
    Pending,
    Done(T),
    /// The worker went away without reporting (it panicked)
    Lost,
}

impl<T: Send + 'static> TaskHandle<T> {
    /// Run `job` on a new thread. `on_done` runs on that thread right after
    /// the result is handed over, typically to request a repaint.
    pub fn spawn<F, D>(name: &str, job: F, on_done: D) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
        D: FnOnce() + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let spawned = std::thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || {
                let _ = tx.send(job());
                on_done();
            });
        if let Err(err) = spawned {
            // The sender was dropped with the closure, so polls report Lost
            log::error!("Failed to spawn worker {name}: {err}");
        }
        Self { rx }
    }

    pub fn try_take(&mut self) -> Poll<T> {
        match self.rx.try_recv() {
            Ok(Some(value)) => Poll::Done(value),
            Ok(None) => Poll::Pending,
            Err(oneshot::Canceled) => Poll::Lost,
        }
    }
}
