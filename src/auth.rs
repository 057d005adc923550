//! Identity and the session gate.
//!
//! `LocalAuth` keeps the signed-in identity in a small JSON file. Owner ids are
//! derived from the email so that signing in again restores the same records.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AuthError;
use crate::models::Identity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Identity),
    SignedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

pub type AuthCallback = Box<dyn FnMut(&AuthEvent)>;

pub trait AuthProvider {
    fn current_identity(&self) -> Result<Option<Identity>, AuthError>;

    fn sign_in(&mut self, email: &str) -> Result<Identity, AuthError>;

    fn sign_out(&mut self) -> Result<(), AuthError>;

    fn subscribe(&mut self, callback: AuthCallback) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Returns the signed-in identity, or `AuthError::NotSignedIn`.
pub fn require_identity(auth: &dyn AuthProvider) -> Result<Identity, AuthError> {
    auth.current_identity()?.ok_or(AuthError::NotSignedIn)
}

pub struct LocalAuth {
    path: PathBuf,
    subscribers: Vec<(SubscriptionId, AuthCallback)>,
    next_subscription: u64,
}

impl LocalAuth {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    fn notify(&mut self, event: &AuthEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }

    fn io_error(&self, source: std::io::Error) -> AuthError {
        AuthError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl AuthProvider for LocalAuth {
    fn current_identity(&self) -> Result<Option<Identity>, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn sign_in(&mut self, email: &str) -> Result<Identity, AuthError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        let identity = Identity {
            id: owner_id_for(email),
            email: email.to_string(),
            signed_in_at: Utc::now(),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AuthError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(&identity)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        info!(email = %identity.email, "signed in");
        self.notify(&AuthEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.io_error(e)),
        }
        info!("signed out");
        self.notify(&AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&mut self, callback: AuthCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, callback));
        debug!(subscription = id.0, "auth subscriber added");
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub, _)| *sub != id);
    }
}

/// Stable owner id for an email address.
pub fn owner_id_for(email: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, email.trim().to_lowercase().as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_gate_rejects_when_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let auth = LocalAuth::new(&dir.path().join("session.json"));
        assert!(matches!(require_identity(&auth), Err(AuthError::NotSignedIn)));
    }

    #[test]
    fn test_sign_in_persists_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut auth = LocalAuth::new(&path);
        let identity = auth.sign_in("  Ada@Example.com ").unwrap();

        assert_eq!(identity.email, "Ada@Example.com");
        let again = LocalAuth::new(&path);
        assert_eq!(require_identity(&again).unwrap(), identity);
    }

    #[test]
    fn test_owner_id_is_stable_per_email() {
        assert_eq!(owner_id_for("ada@example.com"), owner_id_for("ADA@example.com "));
        assert_ne!(owner_id_for("ada@example.com"), owner_id_for("bob@example.com"));
    }

    #[test]
    fn test_sign_in_rejects_bad_email() {
        let dir = tempfile::tempdir().unwrap();
        let mut auth = LocalAuth::new(&dir.path().join("session.json"));
        assert!(matches!(auth.sign_in(""), Err(AuthError::InvalidEmail(_))));
        assert!(matches!(auth.sign_in("nobody"), Err(AuthError::InvalidEmail(_))));
    }

    #[test]
    fn test_subscribers_see_sign_in_and_out() {
        let dir = tempfile::tempdir().unwrap();
        let mut auth = LocalAuth::new(&dir.path().join("session.json"));
        let seen: Rc<RefCell<Vec<AuthEvent>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let sub = auth.subscribe(Box::new(move |event| sink.borrow_mut().push(event.clone())));

        auth.sign_in("ada@example.com").unwrap();
        auth.sign_out().unwrap();
        assert!(auth.current_identity().unwrap().is_none());

        auth.unsubscribe(sub);
        auth.sign_in("ada@example.com").unwrap();

        let events = seen.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], AuthEvent::SignedIn(_)));
        assert_eq!(events[1], AuthEvent::SignedOut);
    }
}
