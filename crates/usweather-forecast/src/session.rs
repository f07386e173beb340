//! Search session: debounced input, one result slot, and the view phase.
//!
//! Each lookup gets a sequence number. Starting a lookup aborts the one in
//! flight, and a completion is applied only while its number is still the
//! latest issued, so the slot always reflects the most recently *started*
//! search and never a slower, older one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::debounce::Debouncer;
use crate::pipeline::Lookup;
use crate::types::{Resolution, ResolvedResult};
use crate::variant::FailurePolicy;

/// idle -> loading -> {success, no-op, error}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Success,
    NoOp,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: ViewPhase,
    /// Sequence number of the latest lookup started
    pub sequence: u64,
    /// Query of the latest lookup started
    pub query: String,
    pub result: Option<ResolvedResult>,
}

impl SessionSnapshot {
    fn idle() -> Self {
        Self {
            phase: ViewPhase::Idle,
            sequence: 0,
            query: String::new(),
            result: None,
        }
    }

    /// Whether the lookup numbered `sequence` has finished and been applied.
    pub fn is_settled(&self, sequence: u64) -> bool {
        self.sequence == sequence && self.phase != ViewPhase::Loading
    }
}

struct SessionInner<L> {
    lookup: Arc<L>,
    failure: FailurePolicy,
    latest: AtomicU64,
    closed: AtomicBool,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    state: watch::Sender<SessionSnapshot>,
}

impl<L: Lookup> SessionInner<L> {
    fn dispatch(self: &Arc<Self>, query: String) -> u64 {
        let mut in_flight = self.in_flight.lock();
        if self.closed.load(Ordering::SeqCst) {
            tracing::debug!("Session closed; not looking up {:?}", query);
            return self.latest.load(Ordering::SeqCst);
        }

        // Too short to search: leave any lookup in flight alone.
        if !self.lookup.accepts(&query) {
            tracing::trace!("Not looking up {:?}", query);
            self.state.send_if_modified(|s| {
                if s.phase == ViewPhase::Loading || s.phase == ViewPhase::NoOp {
                    return false;
                }
                s.phase = ViewPhase::NoOp;
                true
            });
            return self.latest.load(Ordering::SeqCst);
        }

        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = in_flight.take() {
            previous.abort();
        }

        self.state.send_modify(|s| {
            s.phase = ViewPhase::Loading;
            s.sequence = sequence;
            s.query = query.clone();
        });
        tracing::debug!("Lookup #{} started for {:?}", sequence, query);

        let inner = Arc::clone(self);
        let lookup = Arc::clone(&self.lookup);
        *in_flight = Some(tokio::spawn(async move {
            let resolution = lookup.lookup(query).await;
            inner.apply(sequence, resolution);
        }));

        sequence
    }

    fn apply(&self, sequence: u64, resolution: Resolution) {
        let _guard = self.in_flight.lock();

        if sequence != self.latest.load(Ordering::SeqCst) {
            tracing::debug!("Discarding stale result of lookup #{}", sequence);
            return;
        }

        let failure = self.failure;
        self.state.send_modify(|s| match resolution {
            Resolution::Success(resolved) => {
                s.result = Some(ResolvedResult::Forecast(resolved));
                s.phase = ViewPhase::Success;
            }
            Resolution::Empty => {
                s.phase = ViewPhase::NoOp;
            }
            Resolution::Failure(e) => match failure {
                FailurePolicy::ShowBanner => {
                    s.result = Some(ResolvedResult::Error(e.user_message().to_string()));
                    s.phase = ViewPhase::Error;
                }
                FailurePolicy::Swallow => {
                    tracing::debug!("Keeping previous result after failure: {}", e);
                    s.phase = ViewPhase::NoOp;
                }
            },
        });
    }

    fn close(&self) {
        let mut in_flight = self.in_flight.lock();
        self.closed.store(true, Ordering::SeqCst);
        if let Some(handle) = in_flight.take() {
            handle.abort();
        }
    }
}

pub struct SearchSession<L: Lookup> {
    inner: Arc<SessionInner<L>>,
    debouncer: Option<Debouncer<String>>,
}

impl<L: Lookup> SearchSession<L> {
    /// Start a session. Must be called from within a tokio runtime.
    pub fn new(lookup: L, quiet_interval: Duration, failure: FailurePolicy) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::idle());
        let inner = Arc::new(SessionInner {
            lookup: Arc::new(lookup),
            failure,
            latest: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            in_flight: Mutex::new(None),
            state,
        });

        let on_settle = {
            let inner = Arc::clone(&inner);
            move |query: String| {
                inner.dispatch(query);
            }
        };

        Self {
            debouncer: Some(Debouncer::spawn(quiet_interval, on_settle)),
            inner,
        }
    }

    /// Feed the current contents of the search box.
    pub fn input(&self, text: impl Into<String>) {
        if let Some(debouncer) = &self.debouncer {
            debouncer.push(text.into());
        }
    }

    /// Start a lookup immediately, bypassing the debouncer. Returns its sequence number.
    pub fn search_now(&self, query: impl Into<String>) -> u64 {
        self.inner.dispatch(query.into())
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Tear down: drop pending input and abort any lookup in flight.
    pub async fn shutdown(mut self) {
        self.inner.close();
        if let Some(debouncer) = self.debouncer.take() {
            debouncer.shutdown().await;
        }
    }
}

impl<L: Lookup> Drop for SearchSession<L> {
    fn drop(&mut self) {
        self.inner.close();
    }
}
