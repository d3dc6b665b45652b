//! References between entities.
//!
//! Every relation field of a template or report is always present: it either holds the
//! loaded entity or just the id of an entity that has not been fetched. An id of `0`
//! is the "unset" reference and is what a freshly constructed entity starts with, so
//! callers can dereference a relation without first checking for absence and still
//! tell an unset relation apart through [`Ref::is_null`].

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Anything persisted with an integer primary key. `0` means "not saved".
pub trait Identified {
    fn id(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ref<T> {
    /// Only the id is known. `Unresolved(0)` is the null reference.
    Unresolved(i64),
    /// The referenced entity has been loaded.
    Resolved(T),
}

impl<T> Ref<T> {
    pub const fn null() -> Self {
        Ref::Unresolved(0)
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Ref::Resolved(value) => Some(value),
            Ref::Unresolved(_) => None,
        }
    }

    pub fn into_resolved(self) -> Option<T> {
        match self {
            Ref::Resolved(value) => Some(value),
            Ref::Unresolved(_) => None,
        }
    }
}

impl<T: Identified> Ref<T> {
    pub fn id(&self) -> i64 {
        match self {
            Ref::Unresolved(id) => *id,
            Ref::Resolved(value) => value.id(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.id() == 0
    }
}

impl<T> Default for Ref<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<i64> for Ref<T> {
    fn from(id: i64) -> Self {
        Ref::Unresolved(id)
    }
}

/// Unresolved references serialize as `{"id": n}`, resolved ones as the entity itself.
impl<T: Serialize> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ref::Unresolved(id) => {
                let mut state = serializer.serialize_struct("Ref", 1)?;
                state.serialize_field("id", id)?;
                state.end()
            }
            Ref::Resolved(value) => value.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::account::Account;

    #[test]
    fn test_null_reference_is_unset() {
        let account: Ref<Account> = Ref::default();
        assert!(account.is_null());
        assert_eq!(account.id(), 0);
        assert!(account.resolved().is_none());
    }

    #[test]
    fn test_resolved_reference_reports_entity_id() {
        let account = Ref::Resolved(Account {
            id: 7,
            login: "admin".to_string(),
        });
        assert_eq!(account.id(), 7);
        assert!(!account.is_null());
    }

    #[test]
    fn test_unresolved_serializes_as_id_object() {
        let account: Ref<Account> = Ref::Unresolved(3);
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3 }));
    }
}
