//! mission CLI - command-line interface library
//!
//! This library provides the CLI functionality for Mission Control:
//! - Sections / Classify: inspect how a plan is parsed
//! - Render: screen cards, HTML, DOCX or PPTX
//! - Show / List: plan records as the plan page and the planner list see them
//! - Gauge: consensus gauge readings as JSON or SVG
//!
//! # Library Usage
//!
//! ```ignore
//! use mission_cli::{render_command, AppConfig, RenderFormat};
//!
//! let config = AppConfig::default();
//! render_command(&input, RenderFormat::Docx, Some(&output), None, &config, &mut std::io::stdout())?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Parsed sections as JSON
//! mission sections plan.txt
//!
//! # Export a stored record as a slide deck
//! mission render k57abc.json --format pptx -o plan.pptx
//!
//! # Gauge drawing for a bearish signal
//! mission gauge --score 64 --direction bearish --svg
//! ```

pub mod app;
pub mod config;

// Re-export main entry point and types
pub use app::{
    classify_command, gauge_command, list_command, load_input, render_command, sections_command,
    show_command,
};
pub use app::{init_tracing, run_cli, OutputFormat, PlanInput, RenderFormat};
pub use config::AppConfig;
