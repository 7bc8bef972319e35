//! Plan view gating
//!
//! Decides what a plan page shows before any rendering happens. "Not yet
//! loaded" and "does not exist" are different states, and only a finished
//! plan is parsed into sections.

use std::time::{Duration, Instant};

use mission_ast::{LessonPlan, PlanMeta, PlanStatus, Section};
use serde::Serialize;
use tracing::debug;

use crate::outline::parse_sections_with;

pub const LOADING_MESSAGE: &str = "Loading lesson plan...";
pub const NOT_FOUND_MESSAGE: &str = "Lesson plan not found";
pub const BACK_LINK: &str = "← Back to Lesson Planner";
pub const WAITING_MESSAGE: &str = "Generating your lesson plan";
pub const WAITING_HINT: &str =
    "This usually takes a minute or two. This page will update automatically.";
pub const ERROR_MESSAGE: &str = "Something went wrong generating this lesson plan.";
pub const ERROR_HINT: &str = "You can try creating a new one from the Lesson Planner page.";

/// Default delay before the regenerate action is offered again
pub const REGENERATE_COOLDOWN: Duration = Duration::from_secs(3);

/// Load state of a record lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordState<T> {
    /// The lookup has not answered yet
    Loading,
    /// The lookup answered and there is no such record
    NotFound,
    Loaded(T),
}

impl<T> RecordState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl<T> From<Option<T>> for RecordState<T> {
    /// An answered lookup: `None` means not found
    fn from(value: Option<T>) -> Self {
        match value {
            Some(record) => Self::Loaded(record),
            None => Self::NotFound,
        }
    }
}

/// What the plan page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlanView {
    Loading,
    NotFound {
        back_link: &'static str,
    },
    /// Generator has not finished
    Waiting {
        meta: PlanMeta,
        status: PlanStatus,
    },
    /// Generation failed; offer a retry
    Failed {
        meta: PlanMeta,
    },
    /// Finished; `sections` may be empty, which means "no content"
    Ready {
        meta: PlanMeta,
        sections: Vec<Section>,
    },
}

impl PlanView {
    /// Resolve the view for a lookup result
    pub fn resolve(state: &RecordState<LessonPlan>, default_title: &str) -> Self {
        let plan = match state {
            RecordState::Loading => return Self::Loading,
            RecordState::NotFound => {
                return Self::NotFound {
                    back_link: BACK_LINK,
                }
            }
            RecordState::Loaded(plan) => plan,
        };

        let meta = plan.meta();
        match plan.status {
            PlanStatus::Pending | PlanStatus::Generating => Self::Waiting {
                meta,
                status: plan.status,
            },
            PlanStatus::Error => Self::Failed { meta },
            PlanStatus::Done => {
                let raw = plan.generated_plan.as_deref().unwrap_or_default();
                let sections = parse_sections_with(raw, default_title);
                debug!(id = %plan.id, sections = sections.len(), "plan ready");
                Self::Ready { meta, sections }
            }
        }
    }

    /// Headline message for non-ready states
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::NotFound { .. } => Some(NOT_FOUND_MESSAGE),
            Self::Waiting { .. } => Some(WAITING_MESSAGE),
            Self::Failed { .. } => Some(ERROR_MESSAGE),
            Self::Ready { .. } => None,
        }
    }

    /// Secondary hint text
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Waiting { .. } => Some(WAITING_HINT),
            Self::Failed { .. } => Some(ERROR_HINT),
            _ => None,
        }
    }

    /// Whether a retry affordance is shown
    pub fn can_retry(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn meta(&self) -> Option<&PlanMeta> {
        match self {
            Self::Waiting { meta, .. } | Self::Failed { meta } | Self::Ready { meta, .. } => {
                Some(meta)
            }
            Self::Loading | Self::NotFound { .. } => None,
        }
    }
}

/// Client-side gate for the regenerate action.
///
/// Firing the action disables it for a fixed cooldown whether or not the
/// reset succeeded.
#[derive(Debug, Clone)]
pub struct RegenerateGate {
    cooldown: Duration,
    fired_at: Option<Instant>,
}

impl Default for RegenerateGate {
    fn default() -> Self {
        Self::new(REGENERATE_COOLDOWN)
    }
}

impl RegenerateGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            fired_at: None,
        }
    }

    /// Whether the action is enabled at `now`
    pub fn is_ready(&self, now: Instant) -> bool {
        match self.fired_at {
            Some(fired) => now.saturating_duration_since(fired) >= self.cooldown,
            None => true,
        }
    }

    /// Try to fire at `now`; returns `false` while cooling down
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.fired_at = Some(now);
        true
    }

    /// Time left until the action is enabled again
    pub fn remaining(&self, now: Instant) -> Duration {
        self.fired_at.map_or(Duration::ZERO, |fired| {
            self.cooldown
                .saturating_sub(now.saturating_duration_since(fired))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mission_ast::NewLessonPlan;

    fn plan(status: PlanStatus, generated: Option<&str>) -> LessonPlan {
        let mut plan = LessonPlan::from_request(
            "p1",
            NewLessonPlan {
                title: "Volcanoes".to_string(),
                ..Default::default()
            },
            Utc::now(),
        );
        plan.status = status;
        plan.generated_plan = generated.map(str::to_string);
        plan
    }

    #[test]
    fn test_loading_and_not_found_differ() {
        let loading = PlanView::resolve(&RecordState::Loading, "Lesson Plan");
        let missing = PlanView::resolve(&RecordState::from(None), "Lesson Plan");
        assert_eq!(loading, PlanView::Loading);
        assert_eq!(loading.message(), Some(LOADING_MESSAGE));
        assert!(matches!(missing, PlanView::NotFound { .. }));
        assert_eq!(missing.message(), Some(NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_in_progress_waits() {
        for status in [PlanStatus::Pending, PlanStatus::Generating] {
            let view = PlanView::resolve(
                &RecordState::Loaded(plan(status, Some("## A\nx"))),
                "Lesson Plan",
            );
            assert!(matches!(view, PlanView::Waiting { .. }));
            assert_eq!(view.hint(), Some(WAITING_HINT));
        }
    }

    #[test]
    fn test_error_offers_retry() {
        let view = PlanView::resolve(
            &RecordState::Loaded(plan(PlanStatus::Error, None)),
            "Lesson Plan",
        );
        assert!(view.can_retry());
        assert_eq!(view.meta().map(|m| m.title.as_str()), Some("Volcanoes"));
    }

    #[test]
    fn test_done_parses_sections() {
        let view = PlanView::resolve(
            &RecordState::Loaded(plan(PlanStatus::Done, Some("## Intro\nHello\n"))),
            "Lesson Plan",
        );
        match view {
            PlanView::Ready { sections, .. } => {
                assert_eq!(sections, vec![Section::new("Intro", "Hello\n")]);
            }
            other => panic!("expected ready view, got {:?}", other),
        }
    }

    #[test]
    fn test_done_without_text_is_empty() {
        let view = PlanView::resolve(
            &RecordState::Loaded(plan(PlanStatus::Done, None)),
            "Lesson Plan",
        );
        assert!(matches!(view, PlanView::Ready { ref sections, .. } if sections.is_empty()));
        assert_eq!(view.message(), None);
    }

    #[test]
    fn test_regenerate_cooldown() {
        let start = Instant::now();
        let mut gate = RegenerateGate::default();
        assert!(gate.try_fire(start));
        assert!(!gate.try_fire(start + Duration::from_secs(1)));
        assert_eq!(
            gate.remaining(start + Duration::from_secs(1)),
            Duration::from_secs(2)
        );
        assert!(gate.is_ready(start + Duration::from_secs(3)));
        assert!(gate.try_fire(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_view_json_tag() {
        let json = serde_json::to_value(PlanView::Loading).unwrap();
        assert_eq!(json["state"], "loading");
    }
}
