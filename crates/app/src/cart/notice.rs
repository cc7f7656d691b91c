//! Transient notices.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{runtime::Handle, sync::watch, time::sleep};

/// A message channel whose value clears itself after a time-to-live.
///
/// Every `show` bumps a generation counter inside the watch lock, so an
/// expiring timer only clears the notice it was started for.
#[derive(Debug)]
pub(crate) struct Notice {
    tx: watch::Sender<Option<String>>,
    generation: AtomicU64,
    ttl: Duration,
}

impl Notice {
    pub(crate) fn new(ttl: Duration) -> Arc<Self> {
        let (tx, _) = watch::channel(None);

        Arc::new(Self {
            tx,
            generation: AtomicU64::new(0),
            ttl,
        })
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }

    pub(crate) fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    /// Publish `message`, replacing any current notice.
    ///
    /// Outside a tokio runtime the notice stays until replaced or cleared.
    pub(crate) fn show(self: &Arc<Self>, message: impl Into<String>) {
        let message = message.into();
        let mut generation = 0;

        self.tx.send_modify(|current| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *current = Some(message);
        });

        let Ok(handle) = Handle::try_current() else {
            return;
        };

        let notice = Arc::clone(self);

        handle.spawn(async move {
            sleep(notice.ttl).await;
            notice.expire(generation);
        });
    }

    pub(crate) fn clear(&self) {
        self.tx.send_if_modified(|current| {
            self.generation.fetch_add(1, Ordering::SeqCst);

            current.take().is_some()
        });
    }

    fn expire(&self, generation: u64) {
        self.tx.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }

            current.take().is_some()
        });
    }
}
