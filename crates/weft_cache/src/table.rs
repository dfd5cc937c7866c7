//! The data table: query state, page cache and fetch coordination.

use crate::loading::LoadingFlags;
use crate::{
    DataTableConfig, LoadMode, Page, PageCache, ScrollMetrics, Selection, TableMetrics,
    VisibleWindow, WindowCursor,
};
use derive_getters::Getters;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, info, instrument, warn};
use weft_core::{FilterOption, QueryState, Row, SearchRequest, SortSpec};
use weft_error::{SearchError, SearchErrorKind};
use weft_interface::{Navigator, NoopNavigator, Notifier, SearchBackend, TracingNotifier};

type SharedFetch = Shared<BoxFuture<'static, Result<Page, SearchError>>>;

/// A backend request other callers for the same page can join.
struct InFlight {
    ticket: u64,
    fetch: SharedFetch,
}

/// Everything mutable about a table.
///
/// Lives behind a std mutex that is only held for short synchronous
/// sections, never across an `.await`.
struct TableState {
    cache: PageCache,
    cursor: WindowCursor,
    query: QueryState,
    selection: Selection,
    aggregations: Option<Map<String, Value>>,
    flags: LoadingFlags,
    /// Bumped on every reset; responses from older generations are dropped
    generation: u64,
    next_ticket: u64,
    in_flight: HashMap<u32, InFlight>,
}

impl TableState {
    fn new(page_size: u32) -> Self {
        Self {
            cache: PageCache::new(),
            cursor: WindowCursor::new(page_size),
            query: QueryState::new(),
            selection: Selection::new(),
            aggregations: None,
            flags: LoadingFlags::default(),
            generation: 0,
            next_ticket: 0,
            in_flight: HashMap::new(),
        }
    }

    /// Clear the cache, rewind the cursor, drop the selection and start a
    /// new generation.
    ///
    /// Requests of the old generation keep running but no longer count as
    /// loading, and their responses are discarded.
    fn reset(&mut self) {
        self.cache.clear();
        self.cursor.rewind();
        self.selection.clear();
        self.aggregations = None;
        self.flags = LoadingFlags::default();
        self.generation += 1;
        self.in_flight.clear();
    }

    /// Reserve an incremental load of `target` if nothing prevents it,
    /// moving the cursor there.
    fn claim_slide(&mut self, target: u32, mode: LoadMode) -> Option<u32> {
        if target == 0 || self.flags.is_active(mode) || self.cache.contains(target) {
            return None;
        }
        self.cursor.move_to(target);
        Some(target)
    }
}

fn lock_state(state: &Mutex<TableState>) -> MutexGuard<'_, TableState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lowers the loading flag and retires the in-flight entry of one request,
/// however the request ends.
///
/// A reset already lowered the flags of its generation, so a guard from an
/// older generation leaves them alone.
struct LoadGuard {
    state: Weak<Mutex<TableState>>,
    mode: LoadMode,
    page: u32,
    ticket: u64,
    generation: u64,
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut st = lock_state(&state);
        if st.generation == self.generation {
            st.flags.lower(self.mode);
        }
        if st
            .in_flight
            .get(&self.page)
            .is_some_and(|entry| entry.ticket == self.ticket)
        {
            st.in_flight.remove(&self.page);
        }
    }
}

/// What one request needs once it has left the table's lock.
struct FetchContext {
    backend: Arc<dyn SearchBackend>,
    notifier: Arc<dyn Notifier>,
    state: Weak<Mutex<TableState>>,
    metrics: TableMetrics,
    fallback_message: String,
}

impl FetchContext {
    async fn run(
        self,
        request: SearchRequest,
        page: u32,
        generation: u64,
        guard: LoadGuard,
    ) -> Result<Page, SearchError> {
        let _guard = guard;
        self.metrics.record_fetch();

        let outcome = self.backend.search(&request).await;

        let superseded = || SearchError::new(SearchErrorKind::Superseded { page, generation });
        let Some(state) = self.state.upgrade() else {
            return Err(superseded());
        };

        let result = {
            let mut st = lock_state(&state);
            if st.generation != generation {
                Err(superseded())
            } else {
                outcome.map(|response| {
                    let (items, total, took, aggregations) = response.into_parts();
                    let rows: Page = items.into_iter().map(Row::from_item).collect();
                    st.cursor.record_response(total, took);
                    if aggregations.is_some() {
                        st.aggregations = aggregations;
                    }
                    st.cache.set(page, Arc::clone(&rows));
                    rows
                })
            }
        };

        match &result {
            Ok(rows) => debug!(page, rows = rows.len(), generation, "Cached page"),
            Err(e) if e.is_superseded() => {
                self.metrics.record_stale();
                debug!(page, generation, "Discarded response from a previous generation");
            }
            Err(e) => {
                self.metrics.record_failure();
                warn!(page, error = %e, "Page load failed");
                let reason = e.reason();
                let message = if reason.trim().is_empty() {
                    self.fallback_message.as_str()
                } else {
                    reason.as_str()
                };
                self.notifier.notify_error(message);
            }
        }

        result
    }
}

/// Result of handling one scroll event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct ScrollOutcome {
    /// Estimated visible rows; `None` when nothing is loaded
    window: Option<VisibleWindow>,
    /// Page requested by a forward prefetch
    forward: Option<u32>,
    /// Page requested by a backward prefetch
    backward: Option<u32>,
}

/// Searchable, sortable, incrementally loaded result table.
///
/// Holds the query state, a sparse cache of fetched pages and the selection,
/// and coordinates requests to a [`SearchBackend`]:
///
/// - a cached page is never requested again until the next reset;
/// - concurrent loads of the same page share one request;
/// - a response that lands after a reset is dropped;
/// - a failed load leaves the cache untouched and notifies the user.
///
/// Each backend request runs as its own Tokio task, so the table must be
/// used inside a Tokio runtime. A request outlives callers that stop waiting
/// for it and still caches its page and lowers its loading flag.
///
/// # Example
///
/// ```rust,ignore
/// let table = DataTable::new(backend, DataTableConfig::new("material"));
/// table.initialize().await;
/// table.set_query("cotton").await;
/// let rows = table.rows();
/// ```
pub struct DataTable {
    backend: Arc<dyn SearchBackend>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    config: DataTableConfig,
    metrics: TableMetrics,
    state: Arc<Mutex<TableState>>,
}

impl DataTable {
    /// Table over `backend`, reporting errors through tracing and without
    /// URL synchronization.
    pub fn new(backend: Arc<dyn SearchBackend>, config: DataTableConfig) -> Self {
        let state = TableState::new(*config.page_size());
        Self {
            backend,
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(NoopNavigator),
            metrics: TableMetrics::new(config.index()),
            config,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Report load failures through `notifier`.
    pub fn with_notifier(self, notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier, ..self }
    }

    /// Mirror the query state into the URL handled by `navigator`.
    pub fn with_navigator(self, navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator, ..self }
    }

    /// Table configuration.
    pub fn config(&self) -> &DataTableConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, TableState> {
        lock_state(&self.state)
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Load `page`, from the cache if present.
    ///
    /// Returns `None` when the load failed (the user has been notified) or
    /// was superseded by a reset.
    pub async fn load_page(&self, page: u32, mode: LoadMode) -> Option<Page> {
        match self.fetch_page(page, mode).await {
            Ok(rows) => Some(rows),
            Err(e) => {
                debug!(page, error = %e, "Page not loaded");
                None
            }
        }
    }

    /// Load `page`, from the cache if present, reporting why it failed.
    ///
    /// A cached page returns immediately without touching the loading flags.
    /// Otherwise the flag for `mode` stays raised until the request settles.
    #[instrument(skip(self), fields(index = %self.config.index()))]
    pub async fn fetch_page(&self, page: u32, mode: LoadMode) -> Result<Page, SearchError> {
        if page == 0 {
            return Err(SearchError::new(SearchErrorKind::InvalidPage(page)));
        }

        let fetch = {
            let mut st = self.lock();
            if let Some(rows) = st.cache.get(page) {
                self.metrics.record_hit();
                debug!(page, "Page served from cache");
                return Ok(rows);
            }
            match st.in_flight.get(&page) {
                Some(in_flight) => {
                    debug!(page, "Joining in-flight request");
                    in_flight.fetch.clone()
                }
                None => self.start_fetch(&mut st, page, mode),
            }
        };

        fetch.await
    }

    fn start_fetch(&self, st: &mut TableState, page: u32, mode: LoadMode) -> SharedFetch {
        let generation = st.generation;
        let ticket = st.next_ticket;
        st.next_ticket += 1;

        let request =
            SearchRequest::for_page(self.config.index().clone(), &st.query, page, *self.config.page_size())
                .with_agg_requests(self.config.agg_requests().clone());

        st.flags.raise(mode);
        let guard = LoadGuard {
            state: Arc::downgrade(&self.state),
            mode,
            page,
            ticket,
            generation,
        };
        let context = FetchContext {
            backend: Arc::clone(&self.backend),
            notifier: Arc::clone(&self.notifier),
            state: Arc::downgrade(&self.state),
            metrics: self.metrics.clone(),
            fallback_message: self.config.generic_error_message().clone(),
        };

        debug!(page, %mode, generation, "Requesting page");
        // The request settles even if every caller stops waiting for it.
        let task = tokio::spawn(context.run(request, page, generation, guard));
        let fetch = async move {
            task.await.unwrap_or_else(|e| {
                Err(SearchError::new(SearchErrorKind::Transport(format!(
                    "page {} request task failed: {}",
                    page, e
                ))))
            })
        }
        .boxed()
        .shared();
        st.in_flight.insert(
            page,
            InFlight {
                ticket,
                fetch: fetch.clone(),
            },
        );
        fetch
    }

    /// Read the query state from the URL, reset and load page 1.
    #[instrument(skip(self), fields(index = %self.config.index()))]
    pub async fn initialize(&self) -> Option<Page> {
        let from_url = QueryState::from_url_params(&self.navigator.query_params());
        info!(query = %from_url.query(), filters = from_url.filters().len(), "Initializing table");
        {
            let mut st = self.lock();
            st.query = from_url;
            st.reset();
        }
        self.load_page(1, LoadMode::Search).await
    }

    /// Reset and load page 1 again under the current query state.
    #[instrument(skip(self), fields(index = %self.config.index()))]
    pub async fn reload(&self) -> Option<Page> {
        self.reset();
        self.load_page(1, LoadMode::Search).await
    }

    /// Clear cache and selection and rewind to page 1 without loading.
    ///
    /// Requests still in flight are abandoned; their responses are dropped.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Load the page after the cursor unless it is cached or a forward load
    /// is already running.
    pub async fn slide_window_down(&self) -> Option<Page> {
        let target = {
            let mut st = self.lock();
            let next = st.cursor.current_page().saturating_add(1);
            st.claim_slide(next, LoadMode::Forward)
        };
        match target {
            Some(page) => self.load_page(page, LoadMode::Forward).await,
            None => None,
        }
    }

    /// Load the page before the cursor unless it is cached, before page 1,
    /// or a backward load is already running.
    pub async fn slide_window_up(&self) -> Option<Page> {
        let target = {
            let mut st = self.lock();
            let previous = st.cursor.current_page().saturating_sub(1);
            st.claim_slide(previous, LoadMode::Backward)
        };
        match target {
            Some(page) => self.load_page(page, LoadMode::Backward).await,
            None => None,
        }
    }

    /// Track the viewport and prefetch neighbouring pages near either edge.
    ///
    /// Forward and backward prefetches run concurrently; each direction is
    /// skipped while a load in that direction is in flight.
    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> ScrollOutcome {
        let outcome = {
            let mut st = self.lock();
            let row_count = st.cache.row_count();
            let Some(window) =
                VisibleWindow::estimate(metrics, row_count, *self.config.page_size())
            else {
                return ScrollOutcome::default();
            };
            st.cursor.move_to(*window.page());

            let threshold = *self.config.prefetch_threshold();
            let backward = if window.near_start(threshold) {
                st.claim_slide(window.page().saturating_sub(1), LoadMode::Backward)
            } else {
                None
            };
            let forward = if window.near_end(row_count, threshold) {
                st.claim_slide(window.page().saturating_add(1), LoadMode::Forward)
            } else {
                None
            };

            ScrollOutcome {
                window: Some(window),
                forward,
                backward,
            }
        };

        if outcome.forward.is_some() || outcome.backward.is_some() {
            debug!(
                forward = ?outcome.forward,
                backward = ?outcome.backward,
                "Prefetching from scroll"
            );
        }

        futures::join!(
            async {
                if let Some(page) = outcome.forward {
                    self.load_page(page, LoadMode::Forward).await;
                }
            },
            async {
                if let Some(page) = outcome.backward {
                    self.load_page(page, LoadMode::Backward).await;
                }
            }
        );

        outcome
    }

    // ---------------------------------------------------------------------
    // Query state
    // ---------------------------------------------------------------------

    /// Replace the query state as one change.
    ///
    /// If it differs from the current state: resets the table, writes the new
    /// state to the URL and loads page 1. Returns whether anything changed.
    #[instrument(skip(self, next), fields(index = %self.config.index()))]
    pub async fn apply_query(&self, next: QueryState) -> bool {
        {
            let mut st = self.lock();
            if st.query == next {
                return false;
            }
            st.query = next;
            st.reset();
        }

        self.sync_to_url();
        self.load_page(1, LoadMode::Search).await;
        true
    }

    /// Change the query state through `update`, as one change.
    pub async fn update_query(&self, update: impl FnOnce(QueryState) -> QueryState) -> bool {
        let next = update(self.query_state());
        self.apply_query(next).await
    }

    /// Replace the free-text query.
    pub async fn set_query(&self, query: impl Into<String>) -> bool {
        let query = query.into();
        self.update_query(|state| state.with_query(query)).await
    }

    /// Replace all filters.
    pub async fn set_filters(&self, filters: BTreeMap<String, Value>) -> bool {
        self.update_query(|state| state.with_filters(filters)).await
    }

    /// Replace the sort keys.
    pub async fn set_sort(&self, sort: Vec<SortSpec>) -> bool {
        self.update_query(|state| state.with_sort(sort)).await
    }

    fn sync_to_url(&self) {
        let params = self.lock().query.to_url_params();
        self.navigator.replace_query_params(params);
    }

    /// Current query state.
    pub fn query_state(&self) -> QueryState {
        self.lock().query.clone()
    }

    // ---------------------------------------------------------------------
    // Window
    // ---------------------------------------------------------------------

    /// Cached rows in page order.
    pub fn rows(&self) -> Vec<Row> {
        self.lock().cache.flatten()
    }

    /// Rows of one cached page.
    pub fn page(&self, page: u32) -> Option<Page> {
        self.lock().cache.get(page)
    }

    /// Cached page numbers in ascending order.
    pub fn cached_pages(&self) -> Vec<u32> {
        self.lock().cache.page_numbers()
    }

    pub fn row_count(&self) -> usize {
        self.lock().cache.row_count()
    }

    /// Whether the highest cached page is full.
    pub fn has_more(&self) -> bool {
        self.lock().cache.has_more(*self.config.page_size())
    }

    /// Whether the lowest cached page comes after page 1.
    pub fn has_previous(&self) -> bool {
        self.lock().cache.has_previous()
    }

    pub fn current_page(&self) -> u32 {
        *self.lock().cursor.current_page()
    }

    /// Total matches reported by the latest response.
    pub fn total_count(&self) -> u64 {
        *self.lock().cursor.total_count()
    }

    pub fn total_pages(&self) -> u64 {
        self.lock().cursor.total_pages()
    }

    /// Backend time of the latest response, in milliseconds.
    pub fn took(&self) -> u64 {
        *self.lock().cursor.took()
    }

    /// Aggregations of the latest response that carried any.
    pub fn aggregations(&self) -> Option<Map<String, Value>> {
        self.lock().aggregations.clone()
    }

    /// Filter options from the aggregation named `key`.
    pub fn filter_options(&self, key: &str) -> Vec<FilterOption> {
        self.lock()
            .aggregations
            .as_ref()
            .and_then(|aggs| aggs.get(key))
            .map(FilterOption::from_aggregation)
            .unwrap_or_default()
    }

    /// Reset counter; requests tagged with an older value are discarded.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Whether an incremental load in either direction is running.
    pub fn is_loading(&self) -> bool {
        let st = self.lock();
        st.flags.is_active(LoadMode::Forward) || st.flags.is_active(LoadMode::Backward)
    }

    pub fn is_loading_forward(&self) -> bool {
        self.lock().flags.is_active(LoadMode::Forward)
    }

    pub fn is_loading_backward(&self) -> bool {
        self.lock().flags.is_active(LoadMode::Backward)
    }

    /// Whether an initial or query-change load is running.
    pub fn is_search_loading(&self) -> bool {
        self.lock().flags.is_active(LoadMode::Search)
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Select `row`; rows without an identifier are ignored.
    pub fn select(&self, row: Row) -> bool {
        self.lock().selection.select(row)
    }

    pub fn deselect(&self, id: &str) -> bool {
        self.lock().selection.deselect(id)
    }

    /// Flip the selection of `row`; returns whether it is now selected.
    pub fn toggle_selection(&self, row: Row) -> bool {
        self.lock().selection.toggle(row)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.lock().selection.contains(id)
    }

    pub fn selected_rows(&self) -> Vec<Row> {
        self.lock().selection.rows()
    }

    pub fn selected_count(&self) -> usize {
        self.lock().selection.len()
    }

    pub fn clear_selection(&self) {
        self.lock().selection.clear();
    }
}
