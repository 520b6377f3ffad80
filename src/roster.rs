use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::models::{Activity, Config};

/// How a roster failure is reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Rejected,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Activity not found: {activity}")]
    ActivityNotFound { activity: String },

    #[error("{email} is not signed up for {activity}")]
    ParticipantNotFound { activity: String, email: String },

    #[error("{email} is already signed up for {activity}")]
    AlreadyRegistered { activity: String, email: String },

    #[error("{activity} is full ({max_participants} participants)")]
    ActivityFull {
        activity: String,
        max_participants: u32,
    },

    #[error("Email must not be empty")]
    InvalidEmail,
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ActivityNotFound { .. } | Self::ParticipantNotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyRegistered { .. } | Self::ActivityFull { .. } | Self::InvalidEmail => {
                ErrorKind::Rejected
            }
        }
    }
}

type Slot = Arc<Mutex<Activity>>;

/// In-memory activity rosters.
///
/// Every activity has its own lock, so a signup or unregister runs its
/// checks and its mutation as one step even when requests for the same
/// activity arrive in parallel. The outer map is only locked while the
/// activity handle is looked up.
#[derive(Default)]
pub struct RosterStore {
    activities: RwLock<IndexMap<String, Slot>>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding the catalog of a (validated) config.
    pub fn from_config(config: &Config) -> Self {
        let store = Self::new();
        for entry in &config.activities {
            store.insert(&entry.name, entry.to_activity());
        }
        store
    }

    /// Add an activity, replacing any record with the same name.
    pub fn insert(&self, name: &str, activity: Activity) {
        self.activities
            .write()
            .insert(name.to_string(), Arc::new(Mutex::new(activity)));
    }

    pub fn len(&self) -> usize {
        self.activities.read().len()
    }

    /// Snapshot of every activity, in catalog order.
    pub fn list(&self) -> IndexMap<String, Activity> {
        self.activities
            .read()
            .iter()
            .map(|(name, slot)| (name.clone(), slot.lock().clone()))
            .collect()
    }

    pub fn signup(&self, activity: &str, email: &str) -> Result<(), RosterError> {
        let slot = self.slot(activity)?;
        if email.trim().is_empty() {
            return Err(RosterError::InvalidEmail);
        }
        let mut record = slot.lock();

        if record.participants.iter().any(|p| p == email) {
            return Err(RosterError::AlreadyRegistered {
                activity: activity.to_string(),
                email: email.to_string(),
            });
        }
        if record.is_full() {
            return Err(RosterError::ActivityFull {
                activity: activity.to_string(),
                max_participants: record.max_participants,
            });
        }

        record.participants.push(email.to_string());
        Ok(())
    }

    pub fn unregister(&self, activity: &str, email: &str) -> Result<(), RosterError> {
        let slot = self.slot(activity)?;
        let mut record = slot.lock();

        let pos = record
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| RosterError::ParticipantNotFound {
                activity: activity.to_string(),
                email: email.to_string(),
            })?;
        record.participants.remove(pos);
        Ok(())
    }

    fn slot(&self, activity: &str) -> Result<Slot, RosterError> {
        self.activities
            .read()
            .get(activity)
            .cloned()
            .ok_or_else(|| RosterError::ActivityNotFound {
                activity: activity.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(name: &str, max_participants: u32) -> RosterStore {
        let store = RosterStore::new();
        store.insert(name, Activity::new("Temporary activity for testing", "Now", max_participants));
        store
    }

    fn participants(store: &RosterStore, name: &str) -> Vec<String> {
        store.list()[name].participants.clone()
    }

    #[test]
    fn test_signup_appends_in_order() {
        let store = store_with("Chess Club", 5);
        store.signup("Chess Club", "a@example.com").unwrap();
        store.signup("Chess Club", "b@example.com").unwrap();
        store.signup("Chess Club", "c@example.com").unwrap();
        assert_eq!(
            participants(&store, "Chess Club"),
            vec!["a@example.com", "b@example.com", "c@example.com"]
        );
    }

    #[test]
    fn test_capacity_rejects_next_signup() {
        for n in 1..=5u32 {
            let store = store_with("Club", n);
            for i in 0..n {
                store.signup("Club", &format!("user{i}@example.com")).unwrap();
            }
            let err = store.signup("Club", "late@example.com").unwrap_err();
            assert_eq!(
                err,
                RosterError::ActivityFull {
                    activity: "Club".into(),
                    max_participants: n
                }
            );
            assert_eq!(err.kind(), ErrorKind::Rejected);
            assert_eq!(participants(&store, "Club").len(), n as usize);
        }
    }

    #[test]
    fn test_duplicate_signup_rejected() {
        let store = store_with("Club", 2);
        store.signup("Club", "user1@example.com").unwrap();
        let err = store.signup("Club", "user1@example.com").unwrap_err();
        assert!(matches!(err, RosterError::AlreadyRegistered { .. }));
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(participants(&store, "Club"), vec!["user1@example.com"]);
    }

    #[test]
    fn test_duplicate_checked_before_capacity() {
        let store = store_with("Club", 1);
        store.signup("Club", "user1@example.com").unwrap();
        let err = store.signup("Club", "user1@example.com").unwrap_err();
        assert!(matches!(err, RosterError::AlreadyRegistered { .. }));
    }

    #[test]
    fn test_unregister_then_unregister_again() {
        let store = store_with("Club", 2);
        store.signup("Club", "user1@example.com").unwrap();
        store.unregister("Club", "user1@example.com").unwrap();
        assert!(participants(&store, "Club").is_empty());

        let err = store.unregister("Club", "user1@example.com").unwrap_err();
        assert!(matches!(err, RosterError::ParticipantNotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_unregister_frees_a_spot() {
        let store = store_with("Club", 1);
        store.signup("Club", "first@example.com").unwrap();
        store.unregister("Club", "first@example.com").unwrap();
        store.signup("Club", "second@example.com").unwrap();
        assert_eq!(participants(&store, "Club"), vec!["second@example.com"]);
    }

    #[test]
    fn test_unknown_activity() {
        let store = store_with("Club", 2);
        let err = store.signup("club", "user@example.com").unwrap_err();
        assert_eq!(
            err,
            RosterError::ActivityNotFound {
                activity: "club".into()
            }
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = store.unregister("Nope", "user@example.com").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_empty_email_rejected() {
        let store = store_with("Club", 2);
        assert_eq!(store.signup("Club", "  ").unwrap_err(), RosterError::InvalidEmail);
        assert!(participants(&store, "Club").is_empty());
    }

    #[test]
    fn test_unknown_activity_checked_before_email() {
        let store = store_with("Club", 2);
        let err = store.signup("No Such Club", "").unwrap_err();
        assert_eq!(
            err,
            RosterError::ActivityNotFound {
                activity: "No Such Club".into()
            }
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_from_config_keeps_catalog_order() {
        let cfg = crate::config::builtin_config().unwrap();
        let store = RosterStore::from_config(&cfg);
        let names: Vec<String> = store.list().keys().cloned().collect();
        let expected: Vec<String> = cfg.activities.iter().map(|a| a.name.clone()).collect();
        assert_eq!(names, expected);
        assert_eq!(store.len(), cfg.activities.len());
    }

    #[test]
    fn test_parallel_signups_respect_capacity() {
        let store = store_with("Club", 10);
        std::thread::scope(|s| {
            for t in 0..8 {
                let store = &store;
                s.spawn(move || {
                    for i in 0..20 {
                        let _ = store.signup("Club", &format!("t{t}-u{i}@example.com"));
                    }
                });
            }
        });
        let roster = participants(&store, "Club");
        assert_eq!(roster.len(), 10);
        let mut unique = roster.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 10);
    }
}
