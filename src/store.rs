use crate::error::StoreError;
use crate::models::{Application, ApplicationPatch, NewApplication, Status};
use crate::pipeline::{SortDirection, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    pub include_archived: bool,
    pub sort: SortKey,
    pub direction: SortDirection,
}

/// Owner-scoped access to the applications table.
///
/// Every call takes the owner id and only ever sees that owner's rows; an id
/// that belongs to someone else is reported as `StoreError::NotFound`.
pub trait RecordStore {
    fn fetch(&self, owner: &str, options: &FetchOptions) -> Result<Vec<Application>, StoreError>;

    fn get(&self, owner: &str, id: &str) -> Result<Option<Application>, StoreError>;

    fn create(&self, owner: &str, new: &NewApplication) -> Result<Application, StoreError>;

    fn update(&self, owner: &str, id: &str, patch: &ApplicationPatch) -> Result<Application, StoreError>;

    fn set_status(&self, owner: &str, id: &str, status: Status) -> Result<Application, StoreError>;

    fn delete(&self, owner: &str, id: &str) -> Result<(), StoreError>;
}
