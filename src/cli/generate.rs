//! `twigg generate`: stream a course draft and print progress.

use std::fmt;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::client::{generate_course, DraftsApi, DraftsClient};
use crate::config::ClientConfig;
use crate::generation::{
    CancelToken, EventKind, FrameOutcome, GenerationSession, GenerationStatus, RunOptions,
    SessionObserver,
};

use super::args::GenerateArgs;
use super::publish::publish_with;

/// Prints step changes, the outline and each module as they arrive.
pub struct ProgressPrinter<W: Write> {
    out: W,
    last_step: Option<String>,
    /// Streamed modules already printed; replacements are not reprinted
    modules_printed: usize,
    /// Set after the first failed write; nothing more is printed
    broken: bool,
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_step: None,
            modules_printed: 0,
            broken: false,
        }
    }

    /// Whether a write to the output has failed.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, line: fmt::Arguments<'_>) {
        if self.broken {
            return;
        }
        if let Err(e) = self.out.write_fmt(format_args!("{}\n", line)) {
            tracing::warn!("Progress output failed, no further progress will be shown: {}", e);
            self.broken = true;
        }
    }

    fn print_step(&mut self, session: &GenerationSession) {
        let step = session.step_message();
        if self.last_step.as_deref() != Some(step) {
            self.print(format_args!("{}", step));
            self.last_step = Some(step.to_string());
        }
    }
}

impl<W: Write> SessionObserver for ProgressPrinter<W> {
    fn on_frame(&mut self, session: &GenerationSession, outcome: &FrameOutcome) {
        match outcome {
            FrameOutcome::Applied(EventKind::Outline) => {
                self.modules_printed = 0;
                if let Some(outline) = session.outline() {
                    self.print(format_args!(
                        "Outline: {} ({}, {} weeks, {} modules)",
                        outline.course_title,
                        outline.level,
                        outline.duration_weeks,
                        outline.modules.len()
                    ));
                }
            }
            FrameOutcome::Applied(EventKind::Module) => {
                let modules = session.modules();
                for module in modules.iter().skip(self.modules_printed) {
                    self.print(format_args!(
                        "  Module {}: {} ({} lessons)",
                        module.module_number,
                        module.module_title,
                        module.lesson_count()
                    ));
                }
                self.modules_printed = modules.len();
            }
            FrameOutcome::Discarded(err) => {
                tracing::warn!("Skipped malformed frame: {}", err);
            }
            _ => {}
        }
        self.print_step(session);
    }

    fn on_stream_end(&mut self, session: &GenerationSession) {
        self.print_step(session);
    }
}

/// Final report once the stream is over.
pub fn write_summary<W: Write>(
    out: &mut W,
    session: &GenerationSession,
    started: DateTime<Utc>,
    finished: DateTime<Utc>,
) -> io::Result<()> {
    let elapsed = (finished - started).num_seconds();
    match session.status() {
        GenerationStatus::Completed => {
            writeln!(
                out,
                "Draft {} ready in {}s",
                session.draft_id().unwrap_or("<unknown>"),
                elapsed
            )?;
            for module in session.display_modules() {
                writeln!(
                    out,
                    "  {}. {} ({} topics, {} lessons)",
                    module.module_number,
                    module.module_title,
                    module.topics.len(),
                    module.lesson_count()
                )?;
            }
        }
        status => {
            writeln!(
                out,
                "Generation stopped after {}s with status {} ({} modules received)",
                elapsed,
                status,
                session.modules().len()
            )?;
        }
    }
    Ok(())
}

/// Handle `twigg generate`.
pub async fn handle_generate_command(args: GenerateArgs, config: ClientConfig) -> Result<()> {
    let client = DraftsClient::new(config.clone())?;
    run_generate(&client, &args, RunOptions::from(&config)).await
}

pub(crate) async fn run_generate<A>(api: &A, args: &GenerateArgs, options: RunOptions) -> Result<()>
where
    A: DraftsApi + ?Sized,
{
    let cancel = CancelToken::new();
    // Ctrl-C handling stays installed until publishing is done as well
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let result = generate_and_publish(api, args, options, &cancel).await;
    ctrl_c.abort();
    result
}

async fn generate_and_publish<A>(
    api: &A,
    args: &GenerateArgs,
    options: RunOptions,
    cancel: &CancelToken,
) -> Result<()>
where
    A: DraftsApi + ?Sized,
{
    let request = args.to_request();
    let mut session = GenerationSession::new();
    let mut printer = ProgressPrinter::new(io::stdout());
    let started = Utc::now();

    generate_course(api, &request, options, &mut session, &mut printer, cancel)
        .await
        .map_err(|err| eyre!("{} ({})", err.user_message(), err.recovery_hint()))?;

    write_summary(&mut io::stdout(), &session, started, Utc::now())?;

    if args.publish {
        if session.status() != GenerationStatus::Completed {
            return Err(eyre!("Draft was not completed; not publishing"));
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(eyre!("Publishing was cancelled")),
            published = publish_with(api, session.draft_id()) => published?,
        }
    }

    Ok(())
}
