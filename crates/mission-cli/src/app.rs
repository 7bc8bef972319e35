use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use mission_ast::{Direction, Line, PlanMeta, Section};
use mission_core::gauge::GaugeTheme;
use mission_core::store::load_record;
use mission_core::view::RecordState;
use mission_core::{
    classify_lines, parse_sections_with, GaugeReading, PlanStore, PlanView, ScreenPage,
    ScreenRenderer,
};
use mission_docx::DocxWriter;
use mission_pptx::{DeckBuilder, PptxWriter};

use crate::config::AppConfig;

/// Output format for inspection commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

/// Target format for the render command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Screen cards as JSON
    Cards,
    /// Screen cards as a standalone HTML page
    Html,
    /// Word document
    Docx,
    /// Slide deck
    Pptx,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Cards => "json",
            Self::Html => "html",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
        }
    }

    fn is_binary(self) -> bool {
        matches!(self, Self::Docx | Self::Pptx)
    }
}

#[derive(Parser)]
#[command(name = "mission")]
#[command(author, version, about = "Lesson plan outlines, exports and signal gauges", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sections of a plan as JSON
    Sections {
        /// Plan text file, or a lesson plan record (.json)
        input: PathBuf,
    },

    /// Print the classified lines of a plan as JSON
    Classify {
        /// Plan text file, or a lesson plan record (.json)
        input: PathBuf,

        /// Only this section (zero-based)
        #[arg(short, long)]
        section: Option<usize>,
    },

    /// Render a plan as cards, HTML, DOCX or PPTX
    Render {
        /// Plan text file, or a lesson plan record (.json)
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: RenderFormat,

        /// Output file (cards and html default to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Word template (.dotx/.docx) to render into
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Show what the plan page displays for a record
    Show {
        /// Lesson plan record (.json)
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the lesson plan records in a directory, newest first
    List {
        /// Directory of *.json records
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Compute a consensus gauge reading
    Gauge {
        /// Consensus score (0-100)
        #[arg(short, long)]
        score: f64,

        /// bullish, bearish, mixed or neutral
        #[arg(short, long, default_value = "neutral")]
        direction: String,

        /// Print an SVG drawing instead of JSON
        #[arg(long)]
        svg: bool,

        /// Dark gauge chrome for the SVG
        #[arg(long)]
        dark: bool,
    },
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the level
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI with process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Sections { input } => {
            sections_command(&input, &config, &mut out)?;
        }
        Commands::Classify { input, section } => {
            classify_command(&input, section, &config, &mut out)?;
        }
        Commands::Render {
            input,
            format,
            output,
            template,
        } => {
            render_command(
                &input,
                format,
                output.as_deref(),
                template.as_deref(),
                &config,
                &mut out,
            )?;
        }
        Commands::Show { input, format } => {
            show_command(&input, format, &config, &mut out)?;
        }
        Commands::List { dir, format } => {
            list_command(&dir, format, &mut out)?;
        }
        Commands::Gauge {
            score,
            direction,
            svg,
            dark,
        } => {
            gauge_command(score, &direction, svg, dark, &config, &mut out)?;
        }
    }

    Ok(())
}

/// Plan text plus the record header when the input was a record
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInput {
    pub text: String,
    pub meta: Option<PlanMeta>,
}

/// Read plan input: a `.json` lesson plan record or raw plan text
pub fn load_input(input: &Path) -> Result<PlanInput> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    if input.extension().is_some_and(|ext| ext == "json") {
        let plan = load_record(input)
            .with_context(|| format!("Failed to load plan record: {}", input.display()))?;
        if plan.generated_plan.is_none() {
            warn!(id = %plan.id, status = %plan.status, "record has no generated plan yet");
        }
        return Ok(PlanInput {
            meta: Some(plan.meta()),
            text: plan.generated_plan.unwrap_or_default(),
        });
    }

    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read plan text: {}", input.display()))?;
    Ok(PlanInput { text, meta: None })
}

fn parse_input(input: &Path, config: &AppConfig) -> Result<(PlanInput, Vec<Section>)> {
    let plan = load_input(input)?;
    let sections = parse_sections_with(&plan.text, &config.settings.outline.default_title);
    debug!(input = %input.display(), sections = sections.len(), "parsed plan");
    Ok((plan, sections))
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    writeln!(out, "{}", json).context("Failed to write output")?;
    Ok(())
}

/// Execute the sections command
pub fn sections_command<W: Write>(input: &Path, config: &AppConfig, out: &mut W) -> Result<()> {
    let (_, sections) = parse_input(input, config)?;
    write_json(out, &sections)
}

/// Classified lines of one section
#[derive(Debug, Serialize)]
struct ClassifiedSection<'a> {
    index: usize,
    title: &'a str,
    lines: Vec<Line>,
}

/// Execute the classify command
pub fn classify_command<W: Write>(
    input: &Path,
    section: Option<usize>,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let (_, sections) = parse_input(input, config)?;

    let selected: Vec<(usize, &Section)> = match section {
        Some(index) => {
            let found = sections.get(index).with_context(|| {
                format!(
                    "Section {} out of range: plan has {} section(s)",
                    index,
                    sections.len()
                )
            })?;
            vec![(index, found)]
        }
        None => sections.iter().enumerate().collect(),
    };

    let classified: Vec<ClassifiedSection> = selected
        .into_iter()
        .map(|(index, section)| ClassifiedSection {
            index,
            title: &section.title,
            lines: classify_lines(&section.content),
        })
        .collect();
    write_json(out, &classified)
}

/// Execute the render command.
///
/// Cards and HTML go to `out` unless an output path is given; DOCX and PPTX
/// are always written to a file, next to the input by default.
pub fn render_command<W: Write>(
    input: &Path,
    format: RenderFormat,
    output: Option<&Path>,
    template: Option<&Path>,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    if template.is_some() && format != RenderFormat::Docx {
        anyhow::bail!("--template is only supported with --format docx");
    }

    let (plan, sections) = parse_input(input, config)?;
    let settings = &config.settings;

    let bytes = match format {
        RenderFormat::Cards | RenderFormat::Html => {
            let cards = ScreenRenderer::new(&settings.styles, &settings.palette)
                .with_placeholder(settings.render.placeholder.clone())
                .render(&sections);
            let page = ScreenPage::new(plan.meta, cards);
            if format == RenderFormat::Html {
                page.to_html().into_bytes()
            } else {
                let mut json =
                    serde_json::to_vec_pretty(&page).context("Failed to serialize cards")?;
                json.push(b'\n');
                json
            }
        }
        RenderFormat::Docx => {
            let mut writer = DocxWriter::new(&settings.styles, &settings.palette)
                .with_placeholder(settings.render.placeholder.clone())
                .with_locale(settings.render.locale.clone());
            if let Some(meta) = plan.meta {
                writer = writer.with_meta(meta);
            }
            match template {
                Some(path) => {
                    let template_bytes = fs::read(path).with_context(|| {
                        format!("Failed to read template: {}", path.display())
                    })?;
                    writer
                        .generate_with_template(&sections, &template_bytes)
                        .with_context(|| {
                            format!("Failed to render into template: {}", path.display())
                        })?
                }
                None => writer
                    .generate(&sections)
                    .context("Failed to generate DOCX")?,
            }
        }
        RenderFormat::Pptx => {
            let mut builder =
                DeckBuilder::new(&config.deck, &settings.styles, &settings.palette);
            if let Some(meta) = plan.meta {
                builder = builder.with_meta(meta);
            }
            let deck = builder.build(&sections);
            PptxWriter::new(config.deck.clone())
                .generate(&deck)
                .context("Failed to generate PPTX")?
        }
    };

    let output_path = match output {
        Some(path) => Some(path.to_path_buf()),
        None if format.is_binary() => Some(input.with_extension(format.extension())),
        None => None,
    };

    match output_path {
        Some(path) => {
            fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(output = %path.display(), bytes = bytes.len(), "rendered plan");
            writeln!(out, "Created: {}", path.display()).context("Failed to write output")?;
        }
        None => out.write_all(&bytes).context("Failed to write output")?,
    }

    Ok(())
}

/// Execute the show command
pub fn show_command<W: Write>(
    input: &Path,
    format: OutputFormat,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let state = if input.exists() {
        let plan = load_record(input)
            .with_context(|| format!("Failed to load plan record: {}", input.display()))?;
        RecordState::Loaded(plan)
    } else {
        debug!(input = %input.display(), "no record at path");
        RecordState::NotFound
    };
    let view = PlanView::resolve(&state, &config.settings.outline.default_title);

    match format {
        OutputFormat::Json => write_json(out, &view),
        OutputFormat::Text => {
            write_view_text(out, &view).context("Failed to write output")?;
            Ok(())
        }
    }
}

fn write_view_text<W: Write>(out: &mut W, view: &PlanView) -> std::io::Result<()> {
    if let Some(meta) = view.meta() {
        writeln!(out, "{}", meta.title)?;
        let summary = meta.summary();
        if !summary.is_empty() {
            writeln!(out, "{}", summary)?;
        }
        writeln!(out)?;
    }

    match view {
        PlanView::Ready { sections, .. } if sections.is_empty() => {
            writeln!(out, "No content")?;
        }
        PlanView::Ready { sections, .. } => {
            for (index, section) in sections.iter().enumerate() {
                writeln!(
                    out,
                    "{:>2}. {} ({} lines)",
                    index + 1,
                    section.title,
                    classify_lines(&section.content).len()
                )?;
            }
        }
        PlanView::NotFound { back_link } => {
            writeln!(out, "{}", view.message().unwrap_or_default())?;
            writeln!(out, "{}", back_link)?;
        }
        _ => {
            if let Some(message) = view.message() {
                writeln!(out, "{}", message)?;
            }
            if let Some(hint) = view.hint() {
                writeln!(out, "{}", hint)?;
            }
            if view.can_retry() {
                writeln!(out, "Retry: regenerate the plan")?;
            }
        }
    }
    Ok(())
}

/// Execute the list command
pub fn list_command<W: Write>(dir: &Path, format: OutputFormat, out: &mut W) -> Result<()> {
    let mut store = PlanStore::new();
    let loaded = store
        .load_dir(dir)
        .with_context(|| format!("Failed to read plan directory: {}", dir.display()))?;
    info!(loaded, dir = %dir.display(), "listed plans");

    let plans = store.list();
    match format {
        OutputFormat::Json => write_json(out, &plans),
        OutputFormat::Text => {
            if plans.is_empty() {
                writeln!(out, "No lesson plans in {}", dir.display())
                    .context("Failed to write output")?;
            }
            for plan in plans {
                writeln!(
                    out,
                    "{}  {:<10}  {}  {}",
                    plan.created_at.format("%Y-%m-%d %H:%M"),
                    plan.status.badge(),
                    plan.id,
                    plan.title
                )
                .context("Failed to write output")?;
            }
            Ok(())
        }
    }
}

/// Execute the gauge command
pub fn gauge_command<W: Write>(
    score: f64,
    direction: &str,
    svg: bool,
    dark: bool,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let parsed = Direction::parse_lenient(direction);
    if parsed.as_str() != direction.trim().to_ascii_lowercase() {
        warn!(direction, "unknown direction, reading as neutral");
    }

    let theme = if dark { GaugeTheme::Dark } else { GaugeTheme::Light };
    let reading = GaugeReading::with(
        score,
        parsed,
        config.settings.gauge,
        &config.settings.directions,
    )
    .with_theme(theme);

    if svg {
        out.write_all(reading.to_svg().as_bytes())
            .context("Failed to write output")?;
        Ok(())
    } else {
        write_json(out, &reading)
    }
}
