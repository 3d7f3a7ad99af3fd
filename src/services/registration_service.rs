use serde::Serialize;
use tracing::info;

use crate::database::ActivityStore;
use crate::error::{ConflictReason, RegistrationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationAction {
    SignedUp,
    Unregistered,
}

/// Confirmation of a completed signup or unregister.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub activity: String,
    pub email: String,
    pub action: RegistrationAction,
}

impl Registration {
    fn new(activity: &str, email: &str, action: RegistrationAction) -> Self {
        Self {
            activity: activity.to_string(),
            email: email.to_string(),
            action,
        }
    }

    pub fn message(&self) -> String {
        match self.action {
            RegistrationAction::SignedUp => {
                format!("Signed up {} for {}", self.email, self.activity)
            }
            RegistrationAction::Unregistered => {
                format!("Unregistered {} from {}", self.email, self.activity)
            }
        }
    }
}

/// Adds `email` to the roster of `activity_name`.
///
/// Names and emails are compared exactly. The membership check and the append
/// happen under the activity's lock. `max_participants` is not enforced.
pub fn signup(
    store: &ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<Registration, RegistrationError> {
    store
        .update(activity_name, |activity| {
            if activity.has_participant(email) {
                return Err(conflict(activity_name, email, ConflictReason::AlreadySignedUp));
            }
            activity.participants.push(email.to_string());
            Ok(())
        })
        .unwrap_or_else(|| Err(not_found(activity_name)))?;

    info!(activity = %activity_name, email = %email, "participant signed up");
    Ok(Registration::new(
        activity_name,
        email,
        RegistrationAction::SignedUp,
    ))
}

/// Removes one occurrence of `email` from the roster of `activity_name`.
pub fn unregister(
    store: &ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<Registration, RegistrationError> {
    store
        .update(activity_name, |activity| {
            let Some(pos) = activity.participants.iter().position(|p| p == email) else {
                return Err(conflict(activity_name, email, ConflictReason::NotSignedUp));
            };
            activity.participants.remove(pos);
            Ok(())
        })
        .unwrap_or_else(|| Err(not_found(activity_name)))?;

    info!(activity = %activity_name, email = %email, "participant unregistered");
    Ok(Registration::new(
        activity_name,
        email,
        RegistrationAction::Unregistered,
    ))
}

fn not_found(activity_name: &str) -> RegistrationError {
    RegistrationError::NotFound {
        activity: activity_name.to_string(),
    }
}

fn conflict(activity_name: &str, email: &str, reason: ConflictReason) -> RegistrationError {
    RegistrationError::Conflict {
        activity: activity_name.to_string(),
        email: email.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed;
    use crate::models::Activity;

    fn store() -> ActivityStore {
        seed::build_store(None).expect("default seed")
    }

    fn roster(store: &ActivityStore, name: &str) -> Vec<String> {
        store.get(name).expect("activity exists").participants
    }

    fn is_conflict(err: &RegistrationError, expected: ConflictReason) -> bool {
        matches!(err, RegistrationError::Conflict { reason, .. } if *reason == expected)
    }

    #[test]
    fn soccer_team_scenario() {
        let store = store();
        assert!(roster(&store, "Soccer Team").is_empty());

        let ok = signup(&store, "Soccer Team", "a@x.edu").unwrap();
        assert_eq!(ok.message(), "Signed up a@x.edu for Soccer Team");
        assert_eq!(roster(&store, "Soccer Team"), vec!["a@x.edu".to_string()]);

        let err = signup(&store, "Soccer Team", "a@x.edu").unwrap_err();
        assert!(is_conflict(&err, ConflictReason::AlreadySignedUp));
        assert!(err.to_string().contains("already signed up"));

        let ok = unregister(&store, "Soccer Team", "a@x.edu").unwrap();
        assert_eq!(ok.message(), "Unregistered a@x.edu from Soccer Team");
        assert!(roster(&store, "Soccer Team").is_empty());

        let err = unregister(&store, "Soccer Team", "a@x.edu").unwrap_err();
        assert!(is_conflict(&err, ConflictReason::NotSignedUp));
        assert!(err.to_string().contains("not signed up"));

        let err = signup(&store, "Ghost Club", "a@x.edu").unwrap_err();
        assert_eq!(
            err,
            RegistrationError::NotFound {
                activity: "Ghost Club".to_string()
            }
        );
        assert_eq!(err.to_string(), "Activity not found");
    }

    #[test]
    fn unknown_activity_is_not_found_for_both_operations() {
        let store = store();
        for name in ["Ghost Club", "", "soccer team", "Soccer Team ", " Soccer Team"] {
            assert!(matches!(
                signup(&store, name, "a@x.edu"),
                Err(RegistrationError::NotFound { .. })
            ));
            assert!(matches!(
                unregister(&store, name, "a@x.edu"),
                Err(RegistrationError::NotFound { .. })
            ));
        }
    }

    #[test]
    fn unregister_without_signup_conflicts() {
        let store = store();
        let err = unregister(&store, "Art Club", "nobody@x.edu").unwrap_err();
        assert!(is_conflict(&err, ConflictReason::NotSignedUp));
        assert_eq!(err.activity(), "Art Club");
        assert_eq!(err.email(), Some("nobody@x.edu"));
    }

    #[test]
    fn signup_unregister_signup_leaves_one_entry() {
        let store = store();
        signup(&store, "Soccer Team", "cycle@x.edu").unwrap();
        unregister(&store, "Soccer Team", "cycle@x.edu").unwrap();
        signup(&store, "Soccer Team", "cycle@x.edu").unwrap();

        let roster = roster(&store, "Soccer Team");
        assert_eq!(roster.iter().filter(|e| *e == "cycle@x.edu").count(), 1);
    }

    #[test]
    fn membership_is_independent_across_activities() {
        let store = store();
        signup(&store, "Soccer Team", "multi@x.edu").unwrap();
        signup(&store, "Basketball Club", "multi@x.edu").unwrap();
        assert_eq!(roster(&store, "Soccer Team"), vec!["multi@x.edu".to_string()]);
        assert_eq!(roster(&store, "Basketball Club"), vec!["multi@x.edu".to_string()]);

        unregister(&store, "Soccer Team", "multi@x.edu").unwrap();
        assert!(roster(&store, "Soccer Team").is_empty());
        assert_eq!(roster(&store, "Basketball Club"), vec!["multi@x.edu".to_string()]);
    }

    #[test]
    fn roster_keeps_insertion_order() {
        let store = store();
        for email in ["c@x.edu", "a@x.edu", "b@x.edu"] {
            signup(&store, "Math Club", email).unwrap();
        }
        unregister(&store, "Math Club", "a@x.edu").unwrap();
        assert_eq!(
            roster(&store, "Math Club"),
            vec!["c@x.edu".to_string(), "b@x.edu".to_string()]
        );
    }

    #[test]
    fn emails_are_compared_exactly() {
        let store = store();
        signup(&store, "Drama Club", "Case@x.edu").unwrap();
        signup(&store, "Drama Club", "case@x.edu").unwrap();
        signup(&store, "Drama Club", " case@x.edu").unwrap();
        assert_eq!(roster(&store, "Drama Club").len(), 3);

        let err = unregister(&store, "Drama Club", "CASE@x.edu").unwrap_err();
        assert!(is_conflict(&err, ConflictReason::NotSignedUp));
    }

    #[test]
    fn capacity_is_not_enforced() {
        let store =
            ActivityStore::from_activities(vec![Activity::new("Tiny Club", "t", "s", 1)]).unwrap();
        signup(&store, "Tiny Club", "one@x.edu").unwrap();
        signup(&store, "Tiny Club", "two@x.edu").unwrap();
        assert_eq!(roster(&store, "Tiny Club").len(), 2);
    }

    #[test]
    fn concurrent_duplicate_signups_admit_exactly_one() {
        let store = store();
        let successes = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| scope.spawn(|| signup(&store, "Chess Club", "race@x.edu").is_ok()))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or(false))
                .filter(|ok| *ok)
                .count()
        });
        assert_eq!(successes, 1);
        assert_eq!(roster(&store, "Chess Club"), vec!["race@x.edu".to_string()]);
    }
}
