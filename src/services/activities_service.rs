use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::database::ActivityStore;
use crate::models::Activity;

/// Public projection of an activity; the name is the map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityView {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl From<Activity> for ActivityView {
    fn from(activity: Activity) -> Self {
        Self {
            description: activity.description,
            schedule: activity.schedule,
            max_participants: activity.max_participants,
            participants: activity.participants,
        }
    }
}

pub fn list_activities(store: &ActivityStore) -> BTreeMap<String, ActivityView> {
    let activities: BTreeMap<String, ActivityView> = store
        .list()
        .into_iter()
        .map(|(name, activity)| (name, ActivityView::from(activity)))
        .collect();
    debug!(count = activities.len(), "listed activities");
    activities
}
