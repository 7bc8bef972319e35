//! Lesson plan records
//!
//! A [`LessonPlan`] is created from the wizard form as `pending`, filled in
//! by the generator, and finally carries the raw `generated_plan` text that
//! the outline parser consumes. Field names follow the camelCase JSON used
//! by the dashboard's backing store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Grade levels offered by the plan wizard
pub const GRADE_LEVELS: &[&str] = &[
    "Kindergarten",
    "1st Grade",
    "2nd Grade",
    "3rd Grade",
    "4th Grade",
    "5th Grade",
    "6th Grade",
    "7th Grade",
    "8th Grade",
    "9th Grade",
    "10th Grade",
    "11th Grade",
    "12th Grade",
    "College",
];

/// Assignment types offered by the plan wizard
pub const ASSIGNMENT_TYPES: &[&str] = &[
    "Lecture",
    "Discussion",
    "Lab/Experiment",
    "Essay",
    "Quiz/Test",
    "Group Project",
    "Presentation",
    "Homework",
    "Activity/Worksheet",
];

/// Lesson durations offered by the plan wizard
pub const DURATIONS: &[&str] = &[
    "30 minutes",
    "45 minutes",
    "60 minutes",
    "90 minutes",
    "2 hours",
    "Full day",
];

/// Generation status of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Queued, generator not started
    #[default]
    Pending,
    /// Generator running
    Generating,
    /// `generated_plan` is final
    Done,
    /// Generation failed; unrecognised statuses land here too
    #[serde(other)]
    Error,
}

impl PlanStatus {
    /// Decode a stored status string, mapping unknown values to `Error`
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "generating" => Self::Generating,
            "done" => Self::Done,
            _ => Self::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Generating => "generating",
            Self::Done => "done",
            Self::Error => "error",
        }
    }

    /// Whether the plan is still waiting on the generator
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Pending | Self::Generating)
    }

    /// Badge text shown next to the plan title
    pub fn badge(self) -> &'static str {
        match self {
            Self::Pending | Self::Generating => "Generating...",
            Self::Done => "Ready",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wizard input for a new plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLessonPlan {
    pub title: String,
    pub subject: String,
    pub grade_level: String,
    #[serde(default)]
    pub assignment_types: Vec<String>,
    pub duration: String,
    pub learning_objectives: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl NewLessonPlan {
    /// Check the request the way the wizard gates its submit button.
    ///
    /// Title, subject, grade level and learning objectives are required.
    /// Grade level, duration and assignment types must come from the
    /// wizard's option lists; an empty duration is allowed.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        let required: [(&'static str, &str); 4] = [
            ("title", &self.title),
            ("subject", &self.subject),
            ("gradeLevel", &self.grade_level),
            ("learningObjectives", &self.learning_objectives),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(InvalidRequest::missing(field));
            }
        }
        if !GRADE_LEVELS.contains(&self.grade_level.as_str()) {
            return Err(InvalidRequest::unknown("gradeLevel", &self.grade_level));
        }
        if !self.duration.is_empty() && !DURATIONS.contains(&self.duration.as_str()) {
            return Err(InvalidRequest::unknown("duration", &self.duration));
        }
        if let Some(kind) = self
            .assignment_types
            .iter()
            .find(|kind| !ASSIGNMENT_TYPES.contains(&kind.as_str()))
        {
            return Err(InvalidRequest::unknown("assignmentTypes", kind));
        }
        Ok(())
    }
}

/// Wizard input rejected by [`NewLessonPlan::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRequest {
    /// camelCase name of the offending field
    pub field: &'static str,
    /// Rejected value; `None` when the field was empty
    pub value: Option<String>,
}

impl InvalidRequest {
    fn missing(field: &'static str) -> Self {
        Self { field, value: None }
    }

    fn unknown(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: Some(value.to_string()),
        }
    }
}

impl fmt::Display for InvalidRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            None => write!(f, "missing required field '{}'", self.field),
            Some(value) => write!(f, "unknown {} '{}'", self.field, value),
        }
    }
}

impl std::error::Error for InvalidRequest {}

/// A stored lesson plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlan {
    /// Opaque record identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub subject: String,
    pub grade_level: String,
    #[serde(default)]
    pub assignment_types: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub learning_objectives: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    /// Raw generated text; present once the generator has written it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_plan: Option<String>,
    #[serde(default)]
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
}

impl LessonPlan {
    /// Build a fresh `pending` record from wizard input
    pub fn from_request(
        id: impl Into<String>,
        request: NewLessonPlan,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: request.title,
            subject: request.subject,
            grade_level: request.grade_level,
            assignment_types: request.assignment_types,
            duration: request.duration,
            learning_objectives: request.learning_objectives,
            additional_notes: request.additional_notes,
            generated_plan: None,
            status: PlanStatus::Pending,
            created_at,
        }
    }

    /// Display header for renderers
    pub fn meta(&self) -> PlanMeta {
        PlanMeta {
            title: self.title.clone(),
            subject: Some(self.subject.clone()).filter(|s| !s.is_empty()),
            grade_level: Some(self.grade_level.clone()).filter(|s| !s.is_empty()),
            duration: Some(self.duration.clone()).filter(|s| !s.is_empty()),
            assignment_types: self.assignment_types.clone(),
            learning_objectives: Some(self.learning_objectives.clone())
                .filter(|s| !s.is_empty()),
            additional_notes: self.additional_notes.clone().filter(|s| !s.is_empty()),
        }
    }
}

/// Plan header shown above the rendered sections
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMeta {
    pub title: String,
    pub subject: Option<String>,
    pub grade_level: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub assignment_types: Vec<String>,
    pub learning_objectives: Option<String>,
    pub additional_notes: Option<String>,
}

impl PlanMeta {
    /// Create metadata with just a title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// One-line summary, e.g. `Science · 5th Grade · 45 minutes`
    pub fn summary(&self) -> String {
        [&self.subject, &self.grade_level, &self.duration]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" · ")
    }

    /// Labelled detail rows, skipping absent fields
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        if let Some(subject) = &self.subject {
            rows.push(("Subject", subject.clone()));
        }
        if let Some(grade) = &self.grade_level {
            rows.push(("Grade", grade.clone()));
        }
        rows.push((
            "Duration",
            self.duration
                .clone()
                .unwrap_or_else(|| "Not specified".to_string()),
        ));
        if !self.assignment_types.is_empty() {
            rows.push(("Assignment Types", self.assignment_types.join(", ")));
        }
        if let Some(objectives) = &self.learning_objectives {
            rows.push(("Learning Objectives", objectives.clone()));
        }
        if let Some(notes) = &self.additional_notes {
            rows.push(("Additional Notes", notes.clone()));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r###"{
            "_id": "k57abc",
            "title": "Photosynthesis",
            "subject": "Science",
            "gradeLevel": "5th Grade",
            "assignmentTypes": ["Lecture", "Lab/Experiment"],
            "duration": "45 minutes",
            "learningObjectives": "Explain how plants make food",
            "generatedPlan": "## Objectives\n- Explain\n",
            "status": "done",
            "createdAt": "2025-02-10T14:30:00.000Z"
        }"###
    }

    #[test]
    fn test_decode_store_json() {
        let plan: LessonPlan = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(plan.id, "k57abc");
        assert_eq!(plan.grade_level, "5th Grade");
        assert_eq!(plan.status, PlanStatus::Done);
        assert_eq!(plan.assignment_types.len(), 2);
        assert!(plan.additional_notes.is_none());
    }

    #[test]
    fn test_unknown_status_is_error() {
        let status: PlanStatus = serde_json::from_str("\"exploded\"").unwrap();
        assert_eq!(status, PlanStatus::Error);
        assert_eq!(PlanStatus::parse_lenient("generating"), PlanStatus::Generating);
        assert_eq!(PlanStatus::parse_lenient("???"), PlanStatus::Error);
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(PlanStatus::Pending.badge(), "Generating...");
        assert_eq!(PlanStatus::Generating.badge(), "Generating...");
        assert_eq!(PlanStatus::Done.badge(), "Ready");
        assert!(PlanStatus::Pending.is_in_progress());
        assert!(!PlanStatus::Error.is_in_progress());
    }

    #[test]
    fn test_from_request_is_pending() {
        let request = NewLessonPlan {
            title: "Fractions".to_string(),
            subject: "Math".to_string(),
            grade_level: "3rd Grade".to_string(),
            duration: "60 minutes".to_string(),
            learning_objectives: "Compare fractions".to_string(),
            ..Default::default()
        };
        let plan = LessonPlan::from_request("p1", request, Utc::now());
        assert_eq!(plan.status, PlanStatus::Pending);
        assert!(plan.generated_plan.is_none());
    }

    #[test]
    fn test_meta_summary_and_details() {
        let plan: LessonPlan = serde_json::from_str(sample_json()).unwrap();
        let meta = plan.meta();
        assert_eq!(meta.summary(), "Science · 5th Grade · 45 minutes");

        let details = meta.details();
        assert_eq!(details[0], ("Subject", "Science".to_string()));
        assert!(details
            .iter()
            .any(|(label, value)| *label == "Assignment Types" && value == "Lecture, Lab/Experiment"));
        assert!(!details.iter().any(|(label, _)| *label == "Additional Notes"));
    }

    #[test]
    fn test_meta_missing_duration() {
        let meta = PlanMeta::with_title("Untitled");
        assert_eq!(meta.summary(), "");
        assert_eq!(meta.details(), vec![("Duration", "Not specified".to_string())]);
    }

    fn wizard_request() -> NewLessonPlan {
        NewLessonPlan {
            title: "Fractions".to_string(),
            subject: "Math".to_string(),
            grade_level: "3rd Grade".to_string(),
            assignment_types: vec!["Quiz/Test".to_string()],
            duration: "60 minutes".to_string(),
            learning_objectives: "Compare fractions".to_string(),
            additional_notes: None,
        }
    }

    #[test]
    fn test_validate_accepts_wizard_request() {
        assert_eq!(wizard_request().validate(), Ok(()));

        let request = NewLessonPlan {
            duration: String::new(),
            assignment_types: Vec::new(),
            ..wizard_request()
        };
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let err = NewLessonPlan::default().validate().unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.to_string(), "missing required field 'title'");

        let request = NewLessonPlan {
            learning_objectives: "   ".to_string(),
            ..wizard_request()
        };
        assert_eq!(request.validate().unwrap_err().field, "learningObjectives");
    }

    #[test]
    fn test_validate_rejects_unknown_options() {
        let request = NewLessonPlan {
            grade_level: "13th Grade".to_string(),
            ..wizard_request()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.field, "gradeLevel");
        assert_eq!(err.value.as_deref(), Some("13th Grade"));

        let request = NewLessonPlan {
            duration: "3 weeks".to_string(),
            ..wizard_request()
        };
        assert_eq!(request.validate().unwrap_err().field, "duration");

        let request = NewLessonPlan {
            assignment_types: vec!["Lecture".to_string(), "Field Trip".to_string()],
            ..wizard_request()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "unknown assignmentTypes 'Field Trip'");
    }

    #[test]
    fn test_wizard_options() {
        assert_eq!(GRADE_LEVELS.first(), Some(&"Kindergarten"));
        assert_eq!(GRADE_LEVELS.last(), Some(&"College"));
        assert!(ASSIGNMENT_TYPES.contains(&"Quiz/Test"));
        assert_eq!(DURATIONS.len(), 6);
    }
}
