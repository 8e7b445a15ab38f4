use std::{
    future::Future,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use tokio::sync::watch;

use crate::error::{Error, Result};

/// Cooperative cancellation for one in-flight request.
///
/// - `cancel()` flips a boolean and wakes every waiter.
/// - Guarded calls select on the call itself, its timeout, and the flag.
#[derive(Clone, Debug)]
pub struct CancellationState {
    tx: watch::Sender<bool>,
}

impl Default for CancellationState {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn cancel(&self) {
        // `send` refuses to update the value while nobody is subscribed.
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

async fn wait_for_cancel(mut cancel_rx: watch::Receiver<bool>) {
    loop {
        if *cancel_rx.borrow_and_update() {
            return;
        }
        if cancel_rx.changed().await.is_err() {
            // Sender dropped; nobody can cancel any more.
            std::future::pending::<()>().await;
        }
    }
}

/// Starts `call` and runs it until it finishes, `timeout` elapses, or `cancel`
/// fires.
///
/// A timeout is reported as [`Error::Upstream`], a cancellation as
/// [`Error::Cancelled`]. An already cancelled state never starts the call.
pub async fn guarded<T, C, F>(cancel: &CancellationState, timeout: Duration, call: C) -> Result<T>
where
    C: FnOnce() -> F,
    F: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    let call = call();

    let cancel_rx = cancel.subscribe();
    tokio::select! {
        res = tokio::time::timeout(timeout, call) => match res {
            Ok(inner) => inner,
            Err(_) => Err(Error::Upstream(format!(
                "request timed out after {} ms",
                timeout.as_millis()
            ))),
        },
        _ = wait_for_cancel(cancel_rx) => Err(Error::Cancelled),
    }
}

/// Identifies one request handed out by [`LatestRequest::begin`].
#[derive(Clone, Debug)]
pub struct RequestTicket {
    generation: u64,
    cancel: CancellationState,
}

impl RequestTicket {
    pub fn cancellation(&self) -> &CancellationState {
        &self.cancel
    }
}

/// Tracks the most recent request of a kind (for example "similar tracks for
/// the selected seed").
///
/// Beginning a new request cancels the previous one, and only the latest
/// ticket is current, so a slow, superseded request can never publish its
/// result over a newer one.
#[derive(Debug, Default)]
pub struct LatestRequest {
    current: Mutex<Option<RequestTicket>>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = match current.as_ref() {
            Some(previous) => {
                previous.cancel.cancel();
                previous.generation + 1
            }
            None => 1,
        };

        let ticket = RequestTicket {
            generation,
            cancel: CancellationState::new(),
        };
        *current = Some(ticket.clone());
        ticket
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current
            .as_ref()
            .is_some_and(|latest| latest.generation == ticket.generation)
    }

    /// Cancels the current request, e.g. when the requester goes away.
    pub fn cancel(&self) {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(latest) = current.as_ref() {
            latest.cancel.cancel();
        }
    }
}
