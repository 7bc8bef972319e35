//! In-memory lesson plan store
//!
//! Plain create/read/update/delete over [`LessonPlan`] records, keyed by
//! id. Listing is newest first.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use mission_ast::{LessonPlan, NewLessonPlan, PlanStatus};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Lesson plan records held in memory
#[derive(Debug, Default, Clone)]
pub struct PlanStore {
    plans: HashMap<String, LessonPlan>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// All plans, newest `created_at` first
    pub fn list(&self) -> Vec<&LessonPlan> {
        let mut plans: Vec<&LessonPlan> = self.plans.values().collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        plans
    }

    /// Look up a plan; `None` when it does not exist
    pub fn get(&self, id: &str) -> Option<&LessonPlan> {
        self.plans.get(id)
    }

    /// Create a pending plan stamped with the current time
    pub fn create(&mut self, request: NewLessonPlan) -> Result<&LessonPlan> {
        self.create_at(request, Utc::now())
    }

    /// Create a pending plan with an explicit timestamp.
    ///
    /// Fails with [`CoreError::InvalidRequest`] when the wizard input is
    /// incomplete or names an option the wizard does not offer.
    pub fn create_at(
        &mut self,
        request: NewLessonPlan,
        created_at: DateTime<Utc>,
    ) -> Result<&LessonPlan> {
        if let Err(err) = request.validate() {
            warn!(title = %request.title, %err, "rejecting lesson plan request");
            return Err(err.into());
        }
        let id = Uuid::new_v4().simple().to_string();
        debug!(%id, title = %request.title, "creating lesson plan");
        let plan = LessonPlan::from_request(id.clone(), request, created_at);
        let plan: &LessonPlan = self.plans.entry(id).or_insert(plan);
        Ok(plan)
    }

    /// Insert an existing record, replacing any plan with the same id
    pub fn insert(&mut self, plan: LessonPlan) -> Option<LessonPlan> {
        self.plans.insert(plan.id.clone(), plan)
    }

    /// Store the generator's output and status
    pub fn update_plan(
        &mut self,
        id: &str,
        generated_plan: impl Into<String>,
        status: PlanStatus,
    ) -> Result<&LessonPlan> {
        let plan = self
            .plans
            .get_mut(id)
            .ok_or_else(|| CoreError::plan_not_found(id))?;
        plan.generated_plan = Some(generated_plan.into());
        plan.status = status;
        debug!(%id, %status, "updated lesson plan");
        Ok(plan)
    }

    /// Reset a plan to `pending` so the generator picks it up again
    pub fn request_regeneration(&mut self, id: &str) -> Result<&LessonPlan> {
        let plan = self
            .plans
            .get_mut(id)
            .ok_or_else(|| CoreError::plan_not_found(id))?;
        plan.status = PlanStatus::Pending;
        debug!(%id, "regeneration requested");
        Ok(plan)
    }

    /// Delete a plan
    pub fn remove(&mut self, id: &str) -> Result<LessonPlan> {
        self.plans
            .remove(id)
            .ok_or_else(|| CoreError::plan_not_found(id))
    }

    /// Load every `*.json` record in a directory.
    ///
    /// Files that fail to decode are skipped with a warning; the number of
    /// loaded plans is returned.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match load_record(&path) {
                Ok(plan) => {
                    self.insert(plan);
                    loaded += 1;
                }
                Err(err) => warn!(path = %path.display(), error = %err, "skipping plan record"),
            }
        }
        debug!(loaded, dir = %dir.display(), "loaded plan records");
        Ok(loaded)
    }
}

/// Read one plan record from a JSON file
pub fn load_record(path: &Path) -> Result<LessonPlan> {
    let text = std::fs::read_to_string(path)?;
    let plan: LessonPlan = serde_json::from_str(&text)?;
    if plan.id.trim().is_empty() {
        return Err(CoreError::invalid_record(format!(
            "{} has an empty id",
            path.display()
        )));
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(title: &str) -> NewLessonPlan {
        NewLessonPlan {
            title: title.to_string(),
            subject: "Science".to_string(),
            grade_level: "5th Grade".to_string(),
            learning_objectives: "Observe".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_is_pending() {
        let mut store = PlanStore::new();
        let plan = store.create(request("Rocks")).unwrap();
        assert_eq!(plan.status, PlanStatus::Pending);
        assert!(plan.generated_plan.is_none());
        assert_eq!(plan.id.len(), 32);
    }

    #[test]
    fn test_create_rejects_invalid_request() {
        let mut store = PlanStore::new();
        let err = store.create(NewLessonPlan::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest(_)));

        let unknown_grade = NewLessonPlan {
            grade_level: "Grad School".to_string(),
            ..request("Rocks")
        };
        let err = store.create(unknown_grade).unwrap_err();
        assert!(err.to_string().contains("Grad School"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_newest_first() {
        let mut store = PlanStore::new();
        let early = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        store.create_at(request("Old"), early).unwrap();
        store.create_at(request("New"), late).unwrap();

        let titles: Vec<_> = store.list().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
    }

    #[test]
    fn test_update_and_regenerate() {
        let mut store = PlanStore::new();
        let id = store.create(request("Tides")).unwrap().id.clone();

        let plan = store.update_plan(&id, "## Intro\nWaves", PlanStatus::Done).unwrap();
        assert_eq!(plan.status, PlanStatus::Done);

        let plan = store.request_regeneration(&id).unwrap();
        assert_eq!(plan.status, PlanStatus::Pending);
        assert_eq!(plan.generated_plan.as_deref(), Some("## Intro\nWaves"));
    }

    #[test]
    fn test_missing_ids() {
        let mut store = PlanStore::new();
        assert!(store.get("nope").is_none());
        assert!(store
            .update_plan("nope", "", PlanStatus::Done)
            .unwrap_err()
            .is_not_found());
        assert!(store.request_regeneration("nope").unwrap_err().is_not_found());
        assert!(store.remove("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove() {
        let mut store = PlanStore::new();
        let id = store.create(request("Gone")).unwrap().id.clone();
        assert_eq!(store.remove(&id).unwrap().title, "Gone");
        assert!(store.is_empty());
    }
}
