//! CLI binary for resume-insight.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AnalyzerConfig`, runs one analysis per invocation, and prints results.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use resume_insight::{
    validate, AnalysisMode, Analyzer, AnalyzerConfig, ChatContext, ChatHistory, Report,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # ATS match analysis (report to stdout)
  resume-insight analyze --mode ats resume.pdf --job-file posting.txt

  # HR evaluation, saved under a timestamped report filename
  resume-insight analyze --mode hr resume.pdf --job "Senior Rust engineer..." --save

  # Compare two candidates
  resume-insight compare a.pdf b.pdf --job-file posting.txt -o comparison.txt

  # Interactive chat about a resume (/clear resets, empty line exits)
  resume-insight chat resume.pdf --job-file posting.txt

  # Validate a PDF and show extraction stats (no API key needed)
  resume-insight inspect resume.pdf

  # Structured JSON output for scripting
  resume-insight analyze --mode ats resume.pdf --job-file posting.txt --json

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY       Gemini API key (preferred)
  GOOGLE_API_KEY       Legacy alias, checked second
  RESUME_INSIGHT_MODEL Override model ID

SETUP:
  1. Set API key:  export GEMINI_API_KEY=...
  2. Analyze:      resume-insight analyze --mode ats resume.pdf --job-file posting.txt
"#;

/// Analyze resumes against job descriptions using the Gemini API.
#[derive(Parser, Debug)]
#[command(
    name = "resume-insight",
    version,
    about = "Analyze resumes against job descriptions using the Gemini API",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Gemini model ID.
    #[arg(long, global = true, env = "RESUME_INSIGHT_MODEL")]
    model: Option<String>,

    /// Per-call HTTP timeout in seconds.
    #[arg(long, global = true, env = "RESUME_INSIGHT_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "RESUME_INSIGHT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the report itself.
    #[arg(short, long, global = true, env = "RESUME_INSIGHT_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single-resume analysis (HR evaluation, skill enhancement, ATS match).
    Analyze {
        /// Resume PDF path.
        resume: PathBuf,

        /// Analysis mode: hr, skills, or ats.
        #[arg(long, value_enum)]
        mode: ModeArg,

        /// Job description as inline text.
        #[arg(long, conflicts_with = "job_file")]
        job: Option<String>,

        /// Read the job description from a text file.
        #[arg(long)]
        job_file: Option<PathBuf>,

        /// Write the report to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the report to the suggested `<Label>_<timestamp>.txt` filename.
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// Print the structured Report as JSON instead of the report text.
        #[arg(long)]
        json: bool,
    },

    /// Compare two resumes against one job description.
    Compare {
        /// First resume PDF path.
        resume_a: PathBuf,

        /// Second resume PDF path.
        resume_b: PathBuf,

        /// Job description as inline text.
        #[arg(long, conflicts_with = "job_file")]
        job: Option<String>,

        /// Read the job description from a text file.
        #[arg(long)]
        job_file: Option<PathBuf>,

        /// Write the report to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the report to the suggested `<Label>_<timestamp>.txt` filename.
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// Print the structured Report as JSON instead of the report text.
        #[arg(long)]
        json: bool,
    },

    /// Chat interactively about a resume (or general career advice).
    Chat {
        /// Resume PDF path. Optional: without it the assistant gives
        /// general career advice.
        resume: Option<PathBuf>,

        /// Job description as inline text.
        #[arg(long, conflicts_with = "job_file")]
        job: Option<String>,

        /// Read the job description from a text file.
        #[arg(long)]
        job_file: Option<PathBuf>,
    },

    /// Validate a PDF and print extraction stats. No API key needed.
    Inspect {
        /// Resume PDF path.
        resume: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Hr,
    Skills,
    Ats,
}

impl From<ModeArg> for AnalysisMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Hr => AnalysisMode::HrEvaluation,
            ModeArg::Skills => AnalysisMode::SkillEnhancement,
            ModeArg::Ats => AnalysisMode::AtsMatch,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    match &cli.command {
        Command::Inspect { resume } => run_inspect(resume),
        Command::Analyze {
            resume,
            mode,
            job,
            job_file,
            output,
            save,
            json,
        } => {
            let mut analyzer = make_analyzer(&cli)?;
            let bytes = read_pdf(resume)?;
            let job_text = read_job(job.as_deref(), job_file.as_deref())?;
            let report = analyzer
                .analyze((*mode).into(), &bytes, &job_text)
                .await
                .context("Analysis failed")?;
            emit_report(&report, output.as_deref(), *save, *json, cli.quiet)
        }
        Command::Compare {
            resume_a,
            resume_b,
            job,
            job_file,
            output,
            save,
            json,
        } => {
            let mut analyzer = make_analyzer(&cli)?;
            let bytes_a = read_pdf(resume_a)?;
            let bytes_b = read_pdf(resume_b)?;
            let job_text = read_job(job.as_deref(), job_file.as_deref())?;
            let report = analyzer
                .compare(&bytes_a, &bytes_b, &job_text)
                .await
                .context("Comparison failed")?;
            emit_report(&report, output.as_deref(), *save, *json, cli.quiet)
        }
        Command::Chat {
            resume,
            job,
            job_file,
        } => {
            let mut analyzer = make_analyzer(&cli)?;
            run_chat(
                &mut analyzer,
                resume.as_deref(),
                job.as_deref(),
                job_file.as_deref(),
            )
            .await
        }
    }
}

/// Map CLI args to a ready `Analyzer`.
fn make_analyzer(cli: &Cli) -> Result<Analyzer> {
    let mut builder = AnalyzerConfig::builder().api_timeout_secs(cli.api_timeout);
    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    let config = builder.build().context("Invalid configuration")?;
    Analyzer::new(config).context("Failed to initialise analyzer")
}

fn read_pdf(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read resume {}", path.display()))?;
    Ok(bytes)
}

fn read_job(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job description {}", path.display())),
        (None, None) => bail!("Provide a job description with --job or --job-file"),
    }
}

/// Print or save the report, plus a score summary on stderr.
fn emit_report(
    report: &Report,
    output: Option<&Path>,
    save: bool,
    json: bool,
    quiet: bool,
) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialise report")?
        );
        return Ok(());
    }

    let destination = if save {
        Some(PathBuf::from(report.suggested_filename()))
    } else {
        output.map(Path::to_path_buf)
    };

    match destination {
        Some(path) => {
            std::fs::write(&path, &report.text)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                eprintln!("{} report written to {}", green("✔"), bold(&path.display().to_string()));
            }
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(report.text.as_bytes())
                .context("Failed to write to stdout")?;
            if !report.text.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }
    }

    if !quiet {
        if report.provider_failed {
            eprintln!("{} the model call failed; the output above is the error message", red("✘"));
        }
        if let Some(score) = report.match_score {
            let band = report
                .band
                .map(|b| b.verdict())
                .unwrap_or_default();
            eprintln!("   {} {}", bold(&format!("{score}% match")), dim(band));
            for (kind, value) in &report.component_scores {
                eprintln!("   {}", dim(&format!("{kind}: {value}%")));
            }
        }
    }

    Ok(())
}

fn run_inspect(path: &Path) -> Result<()> {
    let bytes = read_pdf(path)?;

    if !validate(&bytes) {
        eprintln!("{} {} is not a readable PDF", red("✘"), path.display());
        std::process::exit(1);
    }

    let extraction = resume_insight::extract_report(&bytes).context("Extraction failed")?;
    println!("File:           {}", path.display());
    println!("Pages:          {}", extraction.page_count);
    println!("Text length:    {} chars", extraction.text.len());
    println!("Skipped pages:  {}", extraction.skipped_pages.len());
    for skip in &extraction.skipped_pages {
        println!("  - {skip}");
    }
    Ok(())
}

/// Interactive chat loop: reads questions from stdin until an empty line.
async fn run_chat(
    analyzer: &mut Analyzer,
    resume: Option<&Path>,
    job: Option<&str>,
    job_file: Option<&Path>,
) -> Result<()> {
    // Context is optional for chat: resume + job description when both are
    // available, general career advice otherwise.
    let job_text = match (job, job_file) {
        (Some(text), _) => Some(text.to_string()),
        (None, Some(path)) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read job description {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let context = match (resume, job_text) {
        (Some(path), Some(job_description)) => {
            let bytes = read_pdf(path)?;
            let extraction = analyzer.extract_text(&bytes).await.context("Extraction failed")?;
            eprintln!(
                "{} resume loaded ({} chars)",
                green("✔"),
                extraction.text.len()
            );
            Some(ChatContext {
                resume: extraction.text,
                job_description,
            })
        }
        _ => {
            eprintln!("{}", dim("No resume/job context — general career advice mode."));
            None
        }
    };

    let mut history = ChatHistory::new();
    let stdin = io::stdin();

    eprintln!("{}", dim("Ask a question (/clear resets, empty line exits):"));
    loop {
        eprint!("{} ", bold(">"));
        io::stderr().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();

        if question.is_empty() {
            break;
        }
        if question == "/clear" {
            history.clear();
            eprintln!("{}", dim("history cleared"));
            continue;
        }

        let turn = analyzer
            .chat(&mut history, question, context.clone())
            .await
            .context("Chat failed")?;
        println!("{}\n", turn.content.trim_end());
    }

    Ok(())
}
