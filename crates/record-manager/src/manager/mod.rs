//! Record Manager
//!
//! Binds one REST collection to local page state: cursor, filters, the
//! in-progress draft, the edit mode and the fetched page.
//!
//! All operations take `&self`; state lives in a `RefCell` that is never
//! borrowed across an `.await`. List requests are ticketed and only the
//! latest issued ticket may apply its response.

mod query;


use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::{
    Draft, EditMode, FilterSet, Notice, NoticeKind, Page, PageCursor, Record, RecordId, Sort,
};
use crate::error::{Error, Result};
use crate::schema::{CollectionSchema, FilterEncoding, FilterPolicy};
use crate::service::{DataService, ListQuery};

use query::{build_query, local_filter};

/// Fetches per `list` call when the page keeps moving (clamp, vanished page)
const MAX_LIST_ATTEMPTS: u32 = 3;

/// What happened to a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// The response replaced the shown page
    Applied { total_pages: u32, shown: usize },
    /// A newer request was issued (or the manager detached) first
    Superseded,
}

/// Read-only view of the manager for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerSnapshot {
    pub schema: &'static CollectionSchema,
    /// Shown records, after local filtering and sorting
    pub records: Vec<Record>,
    pub total_count: u64,
    pub cursor: PageCursor,
    /// Filter values as typed
    pub filters: FilterSet,
    /// Filter values the shown page was requested with
    pub applied_filters: FilterSet,
    pub draft: Draft,
    pub mode: EditMode,
    pub notice: Option<Notice>,
    pub loading: bool,
    pub sort: Option<Sort>,
    pub reference_options: Vec<Record>,
}

struct ManagerState {
    records: Vec<Record>,
    total_count: u64,
    cursor: PageCursor,
    filters: FilterSet,
    applied_filters: FilterSet,
    draft: Draft,
    mode: EditMode,
    notice: Option<Notice>,
    loading: bool,
    sort: Option<Sort>,
    reference_options: Vec<Record>,
    latest_ticket: u64,
    detached: bool,
}

/// Result of applying one list response
enum Step {
    Done(ListOutcome),
    /// The count shrank below the cursor; fetch the clamped page
    Refetch,
    /// The page vanished; reload from page 1, then move to the last page
    Vanished,
}

type Observer = Box<dyn Fn(ManagerSnapshot)>;

pub struct RecordManager {
    schema: &'static CollectionSchema,
    service: Rc<dyn DataService>,
    page_size: u32,
    state: RefCell<ManagerState>,
    observer: RefCell<Option<Observer>>,
}

impl RecordManager {
    pub fn new(schema: &'static CollectionSchema, service: Rc<dyn DataService>, page_size: u32) -> Self {
        let state = ManagerState {
            records: Vec::new(),
            total_count: 0,
            cursor: PageCursor::default(),
            filters: FilterSet::new(),
            applied_filters: FilterSet::new(),
            draft: Draft::empty(schema),
            mode: EditMode::Create,
            notice: None,
            loading: false,
            sort: None,
            reference_options: Vec::new(),
            latest_ticket: 0,
            detached: false,
        };
        Self {
            schema,
            service,
            page_size: page_size.max(1),
            state: RefCell::new(state),
            observer: RefCell::new(None),
        }
    }

    pub fn schema(&self) -> &'static CollectionSchema {
        self.schema
    }

    /// Called with a fresh snapshot after every state change
    pub fn set_observer(&self, observer: impl Fn(ManagerSnapshot) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    pub fn snapshot(&self) -> ManagerSnapshot {
        let st = self.state.borrow();
        let mut records = local_filter(self.schema, &st.applied_filters, &st.records);
        if let Some(sort) = &st.sort {
            sort.apply(&mut records);
        }
        ManagerSnapshot {
            schema: self.schema,
            records,
            total_count: st.total_count,
            cursor: st.cursor,
            filters: st.filters.clone(),
            applied_filters: st.applied_filters.clone(),
            draft: st.draft.clone(),
            mode: st.mode.clone(),
            notice: st.notice.clone(),
            loading: st.loading,
            sort: st.sort.clone(),
            reference_options: st.reference_options.clone(),
        }
    }

    fn notify(&self) {
        if self.state.borrow().detached {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(snapshot);
        }
    }

    fn is_detached(&self) -> bool {
        self.state.borrow().detached
    }

    /// Store an error notice (unless detached) and hand the error back
    fn fail(&self, context: &str, error: Error) -> Error {
        log::error!("[{}] {}: {}", self.schema.collection, context, error);
        if !self.is_detached() {
            self.state.borrow_mut().notice = Some(Notice::error(format!("{}: {}", context, error)));
            self.notify();
        }
        error
    }

    // ========================
    // Lifecycle
    // ========================

    /// First load: the page plus, where a field references another
    /// collection, that collection's unfiltered first page.
    pub async fn mount(&self) -> Result<ListOutcome> {
        let outcome = self.list().await;
        if self.schema.reference_collection().is_some() {
            // reference failures are surfaced as a notice; the page itself loaded
            let _ = self.load_reference_options().await;
        }
        outcome
    }

    /// Refetch the reference collection used for suggestions
    pub async fn load_reference_options(&self) -> Result<usize> {
        let Some(collection) = self.schema.reference_collection() else {
            return Ok(0);
        };
        match self.service.list(collection, &ListQuery::new()).await {
            Ok(page) => {
                if self.is_detached() {
                    return Ok(0);
                }
                let n = page.results.len();
                self.state.borrow_mut().reference_options = page.results;
                self.notify();
                Ok(n)
            }
            Err(e) => Err(self.fail(&format!("Could not load {}", collection), e)),
        }
    }

    /// Discard every in-flight response and stop notifying
    pub fn detach(&self) {
        let mut st = self.state.borrow_mut();
        st.detached = true;
        st.latest_ticket += 1;
        drop(st);
        self.observer.borrow_mut().take();
        log::debug!("[{}] detached", self.schema.collection);
    }

    // ========================
    // Listing
    // ========================

    /// Fetch the current (filters, page) and replace the shown set.
    ///
    /// A shrunken count clamps the cursor and refetches; a 404 past page 1
    /// reloads page 1 and then moves to the new last page. `Applied` is only
    /// returned for a response that was actually applied.
    pub async fn list(&self) -> Result<ListOutcome> {
        let mut seek_last = false;
        for _ in 0..MAX_LIST_ATTEMPTS {
            match self.fetch_once(seek_last).await? {
                Step::Done(outcome) => return Ok(outcome),
                Step::Refetch => seek_last = false,
                Step::Vanished => seek_last = true,
            }
        }
        let page = {
            let mut st = self.state.borrow_mut();
            st.records.clear();
            st.total_count = 0;
            st.cursor.page
        };
        let error = Error::NotFound(format!("{} page {}", self.schema.collection, page));
        Err(self.fail(&format!("Could not load {}", self.schema.title), error))
    }

    async fn fetch_once(&self, seek_last: bool) -> Result<Step> {
        let (ticket, query) = {
            let mut st = self.state.borrow_mut();
            st.latest_ticket += 1;
            st.loading = true;
            let query = build_query(self.schema, &st.applied_filters, st.cursor.page, self.page_size);
            (st.latest_ticket, query)
        };
        log::debug!("[{}] list #{} {:?}", self.schema.collection, ticket, query.to_pairs());
        self.notify();

        let result = self.service.list(self.schema.collection, &query).await;
        self.apply_list(ticket, result, seek_last)
    }

    fn apply_list(&self, ticket: u64, result: Result<Page<Record>>, seek_last: bool) -> Result<Step> {
        let mut st = self.state.borrow_mut();
        if st.detached || ticket != st.latest_ticket {
            log::warn!(
                "[{}] dropping response #{} (latest is #{})",
                self.schema.collection, ticket, st.latest_ticket
            );
            return Ok(Step::Done(ListOutcome::Superseded));
        }
        st.loading = false;
        match result {
            Ok(page) => {
                let mut results = page.results;
                results.truncate(self.page_size as usize);
                st.records = results;
                st.total_count = page.count;
                let clamped = st.cursor.update_total(page.count, self.page_size);
                if matches!(&st.notice, Some(n) if n.kind == NoticeKind::Error) {
                    st.notice = None;
                }
                let last = st.cursor.total_pages;
                let move_to_last = seek_last && st.cursor.page < last;
                if move_to_last {
                    st.cursor.page = last;
                }
                let outcome = ListOutcome::Applied { total_pages: last, shown: st.records.len() };
                drop(st);
                if clamped || move_to_last {
                    log::debug!("[{}] page moved, refetching", self.schema.collection);
                    return Ok(Step::Refetch);
                }
                self.notify();
                Ok(Step::Done(outcome))
            }
            Err(Error::NotFound(_)) if st.cursor.page > 1 => {
                log::debug!("[{}] page {} vanished, reloading", self.schema.collection, st.cursor.page);
                st.cursor.page = 1;
                Ok(Step::Vanished)
            }
            Err(e) => {
                st.records.clear();
                st.total_count = 0;
                drop(st);
                Err(self.fail(&format!("Could not load {}", self.schema.title), e))
            }
        }
    }

    /// Move to `page`; `None` (and no state change) when out of range
    pub async fn change_page(&self, page: u32) -> Option<Result<ListOutcome>> {
        {
            let mut st = self.state.borrow_mut();
            if !st.cursor.contains(page) {
                return None;
            }
            st.cursor.page = page;
        }
        Some(self.list().await)
    }

    fn filters_are_local(&self) -> bool {
        self.schema.filter_encoding == FilterEncoding::Local
    }

    /// Re-filter the page already held; no request is made
    fn apply_local(&self) -> ListOutcome {
        self.notify();
        let st = self.state.borrow();
        let shown = local_filter(self.schema, &st.applied_filters, &st.records).len();
        ListOutcome::Applied { total_pages: st.cursor.total_pages, shown }
    }

    /// Update one filter.
    ///
    /// Immediate schemas apply it and refetch from page 1 right away;
    /// deferred schemas wait for [`apply_filters`](Self::apply_filters).
    /// Local filters take effect on the held page without a request.
    /// Returns `None` when no request was made.
    pub async fn set_filter(&self, key: &str, value: &str) -> Option<Result<ListOutcome>> {
        if self.schema.filter(key).is_none() {
            log::warn!("[{}] no filter named {:?}", self.schema.collection, key);
            return None;
        }
        let local = self.filters_are_local();
        let immediate = !local && self.schema.filter_policy == FilterPolicy::Immediate;
        {
            let mut st = self.state.borrow_mut();
            st.filters.set(key, value);
            if local {
                st.applied_filters = st.filters.clone();
            } else if immediate {
                st.applied_filters = st.filters.clone();
                st.cursor.reset();
            }
        }
        if immediate {
            Some(self.list().await)
        } else {
            self.notify();
            None
        }
    }

    /// Apply typed filters and refetch from page 1 (local filters just re-filter)
    pub async fn apply_filters(&self) -> Result<ListOutcome> {
        let local = self.filters_are_local();
        {
            let mut st = self.state.borrow_mut();
            st.applied_filters = st.filters.clone();
            if !local {
                st.cursor.reset();
            }
        }
        if local {
            return Ok(self.apply_local());
        }
        self.list().await
    }

    pub async fn clear_filters(&self) -> Result<ListOutcome> {
        let local = self.filters_are_local();
        {
            let mut st = self.state.borrow_mut();
            st.filters.clear();
            st.applied_filters.clear();
            if !local {
                st.cursor.reset();
            }
        }
        if local {
            return Ok(self.apply_local());
        }
        self.list().await
    }

    /// Sort the shown page by `field`, flipping direction on repeat
    pub fn toggle_sort(&self, field: &str) {
        if self.schema.field(field).is_none() {
            return;
        }
        {
            let mut st = self.state.borrow_mut();
            let next = Sort::toggled(st.sort.as_ref(), field);
            st.sort = Some(next);
        }
        self.notify();
    }

    // ========================
    // Draft & edit mode
    // ========================

    pub fn set_draft_field(&self, field: &str, value: &str) {
        self.state.borrow_mut().draft.set(field, value);
        self.notify();
    }

    /// Load `record` into the form; the next submit updates it
    pub fn begin_edit(&self, record: &Record) {
        {
            let mut st = self.state.borrow_mut();
            st.draft = Draft::from_record(self.schema, record);
            st.mode = EditMode::Edit(record.clone());
        }
        self.notify();
    }

    pub fn cancel_edit(&self) {
        self.reset_form();
        self.notify();
    }

    fn reset_form(&self) {
        let mut st = self.state.borrow_mut();
        st.draft = Draft::empty(self.schema);
        st.mode = EditMode::Create;
    }

    pub fn dismiss_notice(&self) {
        self.state.borrow_mut().notice = None;
        self.notify();
    }

    // ========================
    // Mutations
    // ========================

    /// Send the current draft, as a create or an update depending on the mode
    pub async fn submit(&self) -> Result<Record> {
        let (draft, mode) = {
            let st = self.state.borrow();
            (st.draft.clone(), st.mode.clone())
        };
        match mode {
            EditMode::Create => self.create(&draft).await,
            EditMode::Edit(record) => match record.id() {
                Some(id) => self.update(&id, &draft).await,
                None => Err(self.fail("Cannot update", Error::MissingField("id".to_string()))),
            },
        }
    }

    fn payload(&self, draft: &Draft) -> Result<serde_json::Value> {
        draft.to_payload(self.schema).map_err(|e| self.fail("Check the form", e))
    }

    pub async fn create(&self, draft: &Draft) -> Result<Record> {
        let body = self.payload(draft)?;
        let record = self
            .service
            .create(self.schema.collection, &body)
            .await
            .map_err(|e| self.fail(&format!("Could not add {}", self.schema.noun), e))?;
        log::info!("[{}] created {:?}", self.schema.collection, record.id());
        self.after_save(&record, false);
        let _ = self.list().await;
        Ok(record)
    }

    pub async fn update(&self, id: &RecordId, draft: &Draft) -> Result<Record> {
        let body = self.payload(draft)?;
        let record = self
            .service
            .update(self.schema.collection, id, &body)
            .await
            .map_err(|e| self.fail(&format!("Could not update {}", self.schema.noun), e))?;
        log::info!("[{}] updated {}", self.schema.collection, id);
        self.after_save(&record, true);
        let _ = self.list().await;
        Ok(record)
    }

    fn after_save(&self, saved: &Record, is_update: bool) {
        if self.is_detached() {
            return;
        }
        self.reset_form();
        let mut st = self.state.borrow_mut();
        if self.schema.optimistic {
            merge_saved(&mut st.records, saved);
        }
        let verb = if is_update { "updated" } else { "added" };
        st.notice = Some(Notice::info(format!("{} {}", self.schema.noun, verb)));
        drop(st);
        self.notify();
    }

    /// Delete `id`; leaves create mode if that record was being edited
    pub async fn remove(&self, id: &RecordId) -> Result<()> {
        self.service
            .delete(self.schema.collection, id)
            .await
            .map_err(|e| self.fail(&format!("Could not delete {}", self.schema.noun), e))?;
        log::info!("[{}] deleted {}", self.schema.collection, id);
        if !self.is_detached() {
            let editing_removed = self.state.borrow().mode.editing_id().as_ref() == Some(id);
            if editing_removed {
                self.reset_form();
            }
            let mut st = self.state.borrow_mut();
            if self.schema.optimistic {
                st.records.retain(|r| r.id().as_ref() != Some(id));
            }
            st.notice = Some(Notice::info(format!("{} deleted", self.schema.noun)));
            drop(st);
            self.notify();
        }
        let _ = self.list().await;
        Ok(())
    }

    /// Fetch one record by id (detail views)
    pub async fn retrieve(&self, id: &RecordId) -> Result<Record> {
        self.service
            .retrieve(self.schema.collection, id)
            .await
            .map_err(|e| self.fail(&format!("Could not load {}", self.schema.noun), e))
    }
}

/// Append a created record or replace an updated one, keyed by id
fn merge_saved(records: &mut Vec<Record>, saved: &Record) {
    let id = saved.id();
    match records.iter_mut().find(|r| id.is_some() && r.id() == id) {
        Some(existing) => *existing = saved.clone(),
        None => records.push(saved.clone()),
    }
}
