use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use blog_core::{Error, Result};
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;
use tracing::debug;

/// Requirements for anything used as a cache key.
pub trait QueryKey: Debug + Hash + Eq + Clone + Send + Sync + 'static {}
impl<K> QueryKey for K where K: Debug + Hash + Eq + Clone + Send + Sync + 'static {}

/// Requirements for cached values.
pub trait QueryValue: Clone + Send + Sync + 'static {}
impl<V> QueryValue for V where V: Clone + Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never requested, or disabled.
    Idle,
    Loading,
    Success,
    Error,
}

/// What an observer sees for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<V> {
    pub status: QueryStatus,
    pub data: Option<V>,
    pub error: Option<Error>,
}

impl<V> Default for QueryState<V> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<V> QueryState<V> {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }

    /// First load: nothing to show yet.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading && self.data.is_none()
    }

    /// Any request in flight, including a refetch over cached data.
    pub fn is_fetching(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    pub fn is_idle(&self) -> bool {
        self.status == QueryStatus::Idle
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }
}

type Request<V> = Shared<BoxFuture<'static, Result<V>>>;

struct Entry<V> {
    state: watch::Sender<QueryState<V>>,
    stale: bool,
    in_flight: Option<(u64, Request<V>)>,
}

impl<V> Entry<V> {
    fn new() -> Self {
        let (state, _) = watch::channel(QueryState::idle());
        Self {
            state,
            stale: false,
            in_flight: None,
        }
    }
}

impl<V: Clone> Entry<V> {
    fn fresh_data(&self) -> Option<V> {
        let state = self.state.borrow();
        match (&state.status, &state.data) {
            (QueryStatus::Success, Some(data)) if !self.stale => Some(data.clone()),
            _ => None,
        }
    }
}

struct Inner<K, V> {
    entries: HashMap<K, Entry<V>>,
    next_request: u64,
}

/// Keyed result cache with request de-duplication.
///
/// Bookkeeping happens under a short synchronous lock that is never held
/// across an `.await`.
pub struct QueryCache<K, V> {
    inner: Arc<Mutex<Inner<K, V>>>,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: QueryKey, V: QueryValue> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: QueryKey, V: QueryValue> QueryCache<K, V> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                next_request: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        // a panic elsewhere cannot leave the map half-updated
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers interest in `key`. Dropping the receiver unregisters it.
    pub fn subscribe(&self, key: &K) -> watch::Receiver<QueryState<V>> {
        self.lock()
            .entries
            .entry(key.clone())
            .or_insert_with(Entry::new)
            .state
            .subscribe()
    }

    pub fn state(&self, key: &K) -> QueryState<V> {
        self.lock()
            .entries
            .get(key)
            .map(|entry| entry.state.borrow().clone())
            .unwrap_or_default()
    }

    pub fn observer_count(&self, key: &K) -> usize {
        self.lock()
            .entries
            .get(key)
            .map_or(0, |entry| entry.state.receiver_count())
    }

    pub fn is_stale(&self, key: &K) -> bool {
        self.lock().entries.get(key).map_or(false, |entry| entry.stale)
    }

    pub fn is_fetching(&self, key: &K) -> bool {
        self.lock()
            .entries
            .get(key)
            .map_or(false, |entry| entry.in_flight.is_some())
    }

    /// Returns fresh cached data, joins a request already in flight for
    /// `key`, or starts a new one with `fetcher`.
    pub async fn fetch<F, Fut>(&self, key: K, fetcher: F) -> Result<V>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let (request_id, request) = {
            let mut inner = self.lock();
            let next_request = inner.next_request;
            let entry = inner.entries.entry(key.clone()).or_insert_with(Entry::new);

            if let Some(data) = entry.fresh_data() {
                return Ok(data);
            }

            let joined = entry
                .in_flight
                .as_ref()
                .map(|(id, request)| (*id, request.clone()));
            match joined {
                Some(joined) => {
                    debug!("Joining in-flight request for {:?}", key);
                    joined
                }
                None => {
                    debug!("Fetching {:?}", key);
                    let request = fetcher().boxed().shared();
                    entry.in_flight = Some((next_request, request.clone()));
                    entry.state.send_modify(|state| {
                        state.status = QueryStatus::Loading;
                        state.error = None;
                    });
                    inner.next_request += 1;
                    (next_request, request)
                }
            }
        };

        let result = request.await;
        self.settle(&key, request_id, &result);
        result
    }

    /// Writes a finished request back, unless it was superseded by an
    /// invalidation or already written by another waiter.
    fn settle(&self, key: &K, request_id: u64, result: &Result<V>) {
        let mut inner = self.lock();
        let Some(entry) = inner.entries.get_mut(key) else {
            return;
        };
        match &entry.in_flight {
            Some((id, _)) if *id == request_id => {}
            _ => {
                debug!("Skipping write-back for {:?}: request superseded or already settled", key);
                return;
            }
        }

        entry.in_flight = None;
        entry.stale = false;
        entry.state.send_modify(|state| match result {
            Ok(data) => {
                state.status = QueryStatus::Success;
                state.data = Some(data.clone());
                state.error = None;
            }
            Err(e) => {
                state.status = QueryStatus::Error;
                state.data = None;
                state.error = Some(e.clone());
            }
        });
    }

    /// Marks `key` stale so the next read refetches. Cached data stays
    /// visible until then; a request in flight is detached and its result
    /// will not be written back.
    pub fn invalidate(&self, key: &K) {
        let mut inner = self.lock();
        if let Some(entry) = inner.entries.get_mut(key) {
            debug!("Invalidating {:?}", key);
            entry.stale = true;
            if entry.in_flight.take().is_some() {
                entry.state.send_modify(|state| {
                    if state.data.is_some() {
                        state.status = QueryStatus::Success;
                    } else {
                        state.status = QueryStatus::Idle;
                    }
                });
            }
        }
    }
}
