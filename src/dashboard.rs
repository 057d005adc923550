//! Session state for one signed-in user: the loaded applications, the
//! current filter/sort/page selection and the favorite set.
//!
//! Store calls go through the `RecordStore` passed in at construction. A failed
//! call leaves the local state exactly as it was and records a user-facing
//! message in `last_error`.

use tracing::{error, info};

use crate::error::{DashboardError, StoreError, ValidationError};
use crate::favorites::FavoriteStore;
use crate::models::{Application, ApplicationPatch, Identity, NewApplication, Status};
use crate::pipeline::{self, ListPage, ListQuery, SortDirection, SortKey, StatusFilter, PAGE_SIZE_OPTIONS};
use crate::store::{FetchOptions, RecordStore};
use crate::summary::{self, Summary};

pub struct Dashboard<'a, S: RecordStore> {
    store: &'a S,
    owner: Identity,
    records: Vec<Application>,
    query: ListQuery,
    favorites: FavoriteStore,
    last_error: Option<String>,
}

impl<'a, S: RecordStore> Dashboard<'a, S> {
    /// Builds the dashboard and performs the initial fetch.
    pub fn open(
        store: &'a S,
        owner: Identity,
        favorites: FavoriteStore,
        query: ListQuery,
    ) -> Result<Self, DashboardError> {
        let mut dashboard = Self {
            store,
            owner,
            records: Vec::new(),
            query,
            favorites,
            last_error: None,
        };
        dashboard.refresh()?;
        Ok(dashboard)
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    pub fn records(&self) -> &[Application] {
        &self.records
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn favorites(&self) -> &FavoriteStore {
        &self.favorites
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn find(&self, id: &str) -> Option<&Application> {
        self.records.iter().find(|a| a.id == id)
    }

    pub fn view(&self) -> ListPage<'_> {
        pipeline::derive(&self.records, &self.query)
    }

    pub fn summary(&self) -> Summary {
        summary::summarize(&self.records, self.favorites.ids())
    }

    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            include_archived: self.query.status.needs_archived(),
            sort: self.query.sort,
            direction: self.query.direction,
        }
    }

    /// Whether a record with `status` belongs in the currently loaded set.
    fn keeps(&self, status: Status) -> bool {
        status.is_active() || self.query.status.needs_archived()
    }

    fn fail(&mut self, action: &str, err: DashboardError) -> DashboardError {
        error!(owner = %self.owner.id, action, error = %err, "dashboard action failed");
        self.last_error = Some(err.user_message());
        err
    }

    pub fn refresh(&mut self) -> Result<(), DashboardError> {
        match self.store.fetch(&self.owner.id, &self.fetch_options()) {
            Ok(records) => {
                self.records = records;
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("refresh", DashboardError::Load(e))),
        }
    }

    // --- Query selection ---

    pub fn set_search(&mut self, search: &str) {
        self.query.search = search.to_string();
        self.query.page = 1;
    }

    /// Changing to or from the archived filter changes what has to be
    /// fetched, so that case re-fetches.
    pub fn set_status_filter(&mut self, filter: StatusFilter) -> Result<(), DashboardError> {
        let refetch = filter.needs_archived() != self.query.status.needs_archived();
        let (previous, previous_page) = (self.query.status, self.query.page);
        self.query.status = filter;
        self.query.page = 1;
        if refetch {
            if let Err(e) = self.refresh() {
                self.query.status = previous;
                self.query.page = previous_page;
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.query.page = 1;
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        self.query.direction = direction;
        self.query.page = 1;
    }

    pub fn toggle_direction(&mut self) {
        self.set_direction(self.query.direction.reversed());
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ValidationError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ValidationError::InvalidPageSize(page_size));
        }
        self.query.page_size = page_size;
        self.query.page = 1;
        Ok(())
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total_pages = self.view().total_pages;
        self.query.page = pipeline::clamp_page(page, total_pages);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.query.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.query.page.saturating_sub(1));
    }

    // --- Mutations ---

    pub fn create(&mut self, new: &NewApplication) -> Result<Application, DashboardError> {
        if let Err(e) = new.validate() {
            return Err(self.fail("create", e.into()));
        }
        match self.store.create(&self.owner.id, new) {
            Ok(app) => {
                info!(id = %app.id, company = %app.company, "application added");
                if self.keeps(app.status) {
                    self.records.insert(0, app.clone());
                }
                self.last_error = None;
                Ok(app)
            }
            Err(e) => Err(self.fail("create", e.into())),
        }
    }

    pub fn update(&mut self, id: &str, patch: &ApplicationPatch) -> Result<Application, DashboardError> {
        if let Err(e) = patch.validate() {
            return Err(self.fail("update", e.into()));
        }
        match self.store.update(&self.owner.id, id, patch) {
            Ok(app) => {
                self.replace_local(&app);
                self.last_error = None;
                Ok(app)
            }
            Err(e) => Err(self.fail("update", e.into())),
        }
    }

    pub fn set_status(&mut self, id: &str, status: Status) -> Result<Application, DashboardError> {
        match self.store.set_status(&self.owner.id, id, status) {
            Ok(app) => {
                self.replace_local(&app);
                self.last_error = None;
                Ok(app)
            }
            Err(e) => Err(self.fail("set_status", e.into())),
        }
    }

    /// Archives the record and re-fetches. If only the re-fetch fails the
    /// archive is already saved and the error is `DashboardError::Load`.
    pub fn archive(&mut self, id: &str) -> Result<Application, DashboardError> {
        let app = self.set_status(id, Status::Archived)?;
        self.refresh()?;
        Ok(app)
    }

    /// Permanently removes the record from the store.
    pub fn delete(&mut self, id: &str) -> Result<(), DashboardError> {
        match self.store.delete(&self.owner.id, id) {
            Ok(()) => {
                self.records.retain(|a| a.id != id);
                self.last_error = None;
                info!(id, "application deleted");
                Ok(())
            }
            Err(e) => Err(self.fail("delete", e.into())),
        }
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, DashboardError> {
        match self.favorites.toggle(id) {
            Ok(now) => Ok(now),
            Err(e) => Err(self.fail("toggle_favorite", e.into())),
        }
    }

    /// Drops every favorite, as happens on sign-out.
    pub fn clear_favorites(&mut self) -> Result<(), DashboardError> {
        self.favorites.clear().map_err(|e: StoreError| self.fail("clear_favorites", e.into()))
    }

    fn replace_local(&mut self, app: &Application) {
        let keep = self.keeps(app.status);
        match self.records.iter().position(|a| a.id == app.id) {
            Some(idx) if keep => self.records[idx] = app.clone(),
            Some(idx) => {
                self.records.remove(idx);
            }
            None if keep => self.records.insert(0, app.clone()),
            None => {}
        }
    }
}
