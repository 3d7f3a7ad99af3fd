use std::fs;
use std::path::Path;

use tracing::info;

use crate::database::activity_store::ActivityStore;
use crate::error::CatalogError;
use crate::models::Activity;

/// Built-in catalog. Every roster starts empty.
pub fn default_activities() -> Vec<Activity> {
    vec![
        Activity::new(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
        ),
        Activity::new(
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
        ),
        Activity::new(
            "Gym Class",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
        ),
        Activity::new(
            "Soccer Team",
            "Join the school soccer team and compete in matches",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            22,
        ),
        Activity::new(
            "Basketball Club",
            "Practice basketball skills and play in local tournaments",
            "Wednesdays, 3:30 PM - 5:00 PM",
            15,
        ),
        Activity::new(
            "Art Club",
            "Explore painting, drawing, and other visual arts",
            "Mondays, 3:30 PM - 5:00 PM",
            18,
        ),
        Activity::new(
            "Drama Club",
            "Act, direct, and produce school plays and performances",
            "Thursdays, 3:30 PM - 5:30 PM",
            20,
        ),
        Activity::new(
            "Math Club",
            "Solve challenging problems and prepare for math competitions",
            "Tuesdays, 3:30 PM - 4:30 PM",
            16,
        ),
        Activity::new(
            "Debate Team",
            "Develop public speaking and argumentation skills",
            "Fridays, 4:00 PM - 5:30 PM",
            12,
        ),
    ]
}

/// Reads a JSON array of activities. `participants` may be omitted.
pub fn load_seed_file(path: &Path) -> Result<Vec<Activity>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Seeds the store from `seed_file` when given, otherwise from the built-in list.
pub fn build_store(seed_file: Option<&Path>) -> Result<ActivityStore, CatalogError> {
    let activities = match seed_file {
        Some(path) => {
            let activities = load_seed_file(path)?;
            info!(path = %path.display(), count = activities.len(), "loaded activity seed file");
            activities
        }
        None => default_activities(),
    };
    ActivityStore::from_activities(activities)
}
