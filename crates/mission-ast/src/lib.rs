//! mission-ast - value types for Mission Control
//!
//! This crate provides the immutable types shared by the outline parser,
//! the three plan renderers and the consensus gauge:
//!
//! - [`Section`] and [`Line`]: the parsed shape of a generated lesson plan
//! - [`Inline`]: emphasis runs produced at render time
//! - [`LessonPlan`]: the stored record a plan is generated into
//! - [`Signal`]: a consensus signal snapshot for one topic

pub mod inline;
pub mod plan;
pub mod record;
pub mod signal;

pub use inline::{plain_text, FormatType, Inline};
pub use plan::{Line, LineKind, Section};
pub use record::{
    InvalidRequest, LessonPlan, NewLessonPlan, PlanMeta, PlanStatus, ASSIGNMENT_TYPES, DURATIONS,
    GRADE_LEVELS,
};
pub use signal::{Direction, Signal, SourceKind, Strength, UnknownDirection};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
