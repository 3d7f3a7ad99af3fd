use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::CatalogError;
use crate::models::Activity;

/// In-memory activity catalog.
///
/// The name -> record map is fixed at construction; each record sits behind
/// its own lock so that a check-then-act on one roster is atomic while
/// different activities never contend. Cloning the store clones the handle,
/// not the data.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    activities: Arc<BTreeMap<String, Mutex<Activity>>>,
}

impl ActivityStore {
    /// Builds the catalog, rejecting duplicate names and duplicate roster entries.
    pub fn from_activities(activities: Vec<Activity>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for activity in activities {
            if let Some(email) = first_duplicate(&activity.participants) {
                return Err(CatalogError::DuplicateParticipant {
                    activity: activity.name,
                    email,
                });
            }

            match map.entry(activity.name.clone()) {
                Entry::Occupied(_) => return Err(CatalogError::DuplicateActivity(activity.name)),
                Entry::Vacant(slot) => {
                    slot.insert(Mutex::new(activity));
                }
            }
        }
        Ok(Self {
            activities: Arc::new(map),
        })
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Snapshot of one activity. `name` must match exactly.
    pub fn get(&self, name: &str) -> Option<Activity> {
        self.activities.get(name).map(|slot| lock(slot).clone())
    }

    /// Snapshot of the whole catalog, keyed by name.
    pub fn list(&self) -> BTreeMap<String, Activity> {
        self.activities
            .iter()
            .map(|(name, slot)| (name.clone(), lock(slot).clone()))
            .collect()
    }

    /// Runs `f` on the named activity while holding its lock.
    ///
    /// Returns `None` when no activity has this name. The store applies no
    /// membership rules of its own.
    pub fn update<R>(&self, name: &str, f: impl FnOnce(&mut Activity) -> R) -> Option<R> {
        let slot = self.activities.get(name)?;
        let mut activity = lock(slot);
        Some(f(&mut activity))
    }
}

fn first_duplicate(participants: &[String]) -> Option<String> {
    let mut seen = HashSet::new();
    participants
        .iter()
        .find(|email| !seen.insert(email.as_str()))
        .cloned()
}

// Every mutation leaves the roster a valid Vec, so a poisoned lock is still usable.
fn lock(slot: &Mutex<Activity>) -> MutexGuard<'_, Activity> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
