//! Session
//!
//! Current authenticated identity, handed to stores at construction.
//! Clones share the same underlying state.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Default)]
pub struct Session {
    owner: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Session with nobody signed in
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(email: &str) -> DomainResult<Self> {
        let session = Self::default();
        session.sign_in(email)?;
        Ok(session)
    }

    pub fn sign_in(&self, email: &str) -> DomainResult<()> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::InvalidInput(format!("'{}' is not an email address", email)));
        }
        *self.owner.write().unwrap_or_else(PoisonError::into_inner) = Some(email.to_string());
        Ok(())
    }

    pub fn sign_out(&self) {
        *self.owner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Email of the signed-in user
    pub fn owner(&self) -> Option<String> {
        self.owner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.owner().is_some()
    }

    pub fn require_owner(&self) -> DomainResult<String> {
        self.owner().ok_or(DomainError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let session = Session::anonymous();
        let shared = session.clone();
        assert!(!shared.is_signed_in());

        session.sign_in(" a@x.com ").unwrap();
        assert_eq!(shared.owner().as_deref(), Some("a@x.com"));

        shared.sign_out();
        assert_eq!(session.require_owner(), Err(DomainError::Unauthenticated));
    }

    #[test]
    fn test_rejects_non_email() {
        let session = Session::anonymous();
        assert!(session.sign_in("").is_err());
        assert!(session.sign_in("bob").is_err());
        assert!(Session::signed_in("bob@x.com").unwrap().is_signed_in());
    }
}
