use std::path::PathBuf;
use thiserror::Error;

/// Rejected input, caught before any store call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("sale price cannot be higher than the regular price")]
    InvalidPrice,

    #[error("page size {0} is not one of 6, 12, 24, 48")]
    InvalidPageSize(usize),
}

/// Any failed read or write against the record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No record with id '{0}'")]
    NotFound(String),

    #[error("Id prefix '{0}' matches more than one record")]
    AmbiguousId(String),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not signed in. Run 'apptrack login <email>' first.")]
    NotSignedIn,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse session file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a dashboard action. The local state is unchanged when one is
/// returned.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The fetch of the record list failed. Nothing was written.
    #[error(transparent)]
    Load(StoreError),
}

impl DashboardError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Validation(e) => {
                let text = e.to_string();
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => text,
                }
            }
            DashboardError::Store(StoreError::NotFound(_)) => {
                "That application no longer exists.".to_string()
            }
            DashboardError::Store(_) => "Could not save your changes. Please try again.".to_string(),
            DashboardError::Load(_) => "Could not load your applications. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> StoreError {
        StoreError::Io {
            path: "store".into(),
            source: std::io::Error::other("offline"),
        }
    }

    #[test]
    fn test_user_messages() {
        let missing = DashboardError::from(ValidationError::MissingField("company"));
        assert_eq!(missing.user_message(), "Company is required");

        let gone = DashboardError::from(StoreError::NotFound("abc".to_string()));
        assert_eq!(gone.user_message(), "That application no longer exists.");

        let write = DashboardError::from(offline());
        assert_eq!(write.user_message(), "Could not save your changes. Please try again.");

        let read = DashboardError::Load(offline());
        assert_eq!(read.user_message(), "Could not load your applications. Please try again.");
    }
}
