//! Debounced search session
//!
//! Keystrokes go through [`SearchSession::on_input`]; the filtered view is
//! recomputed only once input has been quiet for the debounce delay. Every
//! view that survives is published on a `watch` channel, so readers always
//! see the latest complete rendering.

use crate::debounce::Debouncer;
use crate::navigator::PageView;
use crate::render::RenderedView;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Search input bound to a page snapshot
#[derive(Debug)]
pub struct SearchSession {
    view: Arc<PageView>,
    debouncer: Debouncer,
    tx: Arc<watch::Sender<RenderedView>>,
}

impl SearchSession {
    /// Create session; the initial published view is the unfiltered one
    #[must_use]
    pub fn new(view: PageView, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(view.full());
        Self {
            view: Arc::new(view),
            debouncer: Debouncer::new(delay),
            tx: Arc::new(tx),
        }
    }

    /// Receive every published view
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RenderedView> {
        self.tx.subscribe()
    }

    /// Latest published view
    #[must_use]
    pub fn current(&self) -> RenderedView {
        self.tx.borrow().clone()
    }

    /// Handle a change of the search input
    ///
    /// Supersedes any recomputation still waiting for its delay. Must be
    /// called from within a tokio runtime.
    pub fn on_input(&self, query: impl Into<String>) {
        let query = query.into();
        let view = Arc::clone(&self.view);
        let tx = Arc::clone(&self.tx);
        self.debouncer.schedule(move || {
            tx.send_replace(view.search(&query));
        });
    }

    /// Render `query` immediately, dropping any pending recomputation
    pub fn submit(&self, query: &str) {
        self.debouncer.run_now(|| {
            self.tx.send_replace(self.view.search(query));
        });
    }

    /// Clear the query and show everything immediately
    pub fn clear(&self) {
        self.debouncer.run_now(|| {
            self.tx.send_replace(self.view.full());
        });
    }

    /// Wait for the pending recomputation, if any, to be published
    pub async fn flush(&self) {
        self.debouncer.flush().await;
    }

    /// Whether a recomputation is waiting for its delay
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
