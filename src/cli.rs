use crate::engine::HttpBackend;
use crate::model::{Draft, GenerationConfig, GenerationOutcome, GenerationRequest, Tone};
use crate::orchestrator::RequestOrchestrator;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default generation service.
pub const DEFAULT_ENDPOINT: &str = "https://email-writer-backend-uii5.onrender.com/api/email/generate";

#[derive(Debug, Parser, Clone)]
#[command(
    name = "email-reply",
    version,
    about = "Draft email replies in a chosen tone with a remote AI service"
)]
pub struct Cli {
    /// URL of the reply generation endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Give up on a generation request after this long (e.g. 30s). No limit by default
    #[arg(long)]
    pub timeout: Option<humantime::Duration>,

    /// Reply tone
    #[arg(long, value_enum, default_value_t = Tone::Unspecified)]
    pub tone: Tone,

    /// Email to reply to
    #[arg(long, conflicts_with = "email_file")]
    pub email: Option<String>,

    /// Read the email to reply to from a file ("-" for stdin)
    #[arg(long)]
    pub email_file: Option<std::path::PathBuf>,

    /// Generate once, print the reply and exit (no TUI)
    #[arg(long, conflicts_with = "json")]
    pub text: bool,

    /// Generate once, print a JSON report and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log file for interactive sessions
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,
}

impl Cli {
    pub fn is_one_shot(&self) -> bool {
        self.text || self.json
    }
}

/// Build a `GenerationConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> GenerationConfig {
    GenerationConfig {
        endpoint: args.endpoint.clone(),
        timeout: args.timeout.map(Duration::from),
        user_agent: format!("email-reply-cli/{}", env!("CARGO_PKG_VERSION")),
    }
}

/// Build the request orchestrator backed by the HTTP endpoint.
pub fn build_orchestrator(cfg: &GenerationConfig) -> Result<RequestOrchestrator> {
    let backend = HttpBackend::new(cfg).context("configure generation endpoint")?;
    tracing::debug!(endpoint = %backend.endpoint(), timeout = ?cfg.timeout, "endpoint configured");
    Ok(RequestOrchestrator::new(Arc::new(backend), cfg.timeout))
}

/// Initial draft assembled from `--email`/`--email-file` and `--tone`.
pub fn initial_draft(args: &Cli) -> Result<Draft> {
    let content = match (&args.email, &args.email_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read email from stdin")?;
            buf
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read email from {}", path.display()))?,
        (None, None) => String::new(),
    };
    Ok(Draft::new(content, args.tone))
}

pub async fn run(args: Cli) -> Result<()> {
    if args.is_one_shot() {
        return run_once(args).await;
    }

    #[cfg(feature = "tui")]
    {
        crate::tui::run(args).await
    }
    #[cfg(not(feature = "tui"))]
    {
        // Fallback when built without TUI support.
        run_once(Cli { text: true, ..args }).await
    }
}

/// Report printed by `--json`.
#[derive(Debug, Serialize)]
struct OneShotReport<'a> {
    generated_at: String,
    config: &'a GenerationConfig,
    tone: Tone,
    #[serde(flatten)]
    outcome: &'a GenerationOutcome,
    elapsed_ms: u64,
}

/// Submit a single request outside the TUI.
async fn run_once(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let draft = initial_draft(&args)?;
    let request = GenerationRequest::from_draft(&draft, 1).ok_or_else(|| {
        anyhow::anyhow!("no email content: pass --email, --email-file, or pipe via --email-file -")
    })?;
    let orchestrator = build_orchestrator(&cfg)?;

    let started = Instant::now();
    let outcome = orchestrator.submit(&request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if args.json {
        let report = OneShotReport {
            generated_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "now".into()),
            config: &cfg,
            tone: request.tone(),
            outcome: &outcome,
            elapsed_ms,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    match outcome {
        GenerationOutcome::Success { reply } => {
            if args.text {
                println!("{reply}");
            }
            Ok(())
        }
        GenerationOutcome::Failure { message } => Err(anyhow::anyhow!(message)),
    }
}
