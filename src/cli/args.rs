//! Command-line argument parsing for the Twigg CLI.

use thiserror::Error;

use crate::models::GenerationRequest;

/// Options of `twigg generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateArgs {
    pub title: String,
    pub prompt: String,
    pub level: Option<String>,
    pub weeks: Option<u32>,
    pub language: Option<String>,
    /// Publish the draft once generation completes
    pub publish: bool,
}

impl GenerateArgs {
    /// Build the request body; unset options fall back to request defaults.
    pub fn to_request(&self) -> GenerationRequest {
        let mut request = GenerationRequest::new(self.title.clone(), self.prompt.clone());
        if let Some(level) = &self.level {
            request = request.with_level(level);
        }
        if let Some(weeks) = self.weeks {
            request = request.with_duration_weeks(weeks);
        }
        if let Some(language) = &self.language {
            request = request.with_language(language.clone());
        }
        request
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Generate a course draft
    Generate(GenerateArgs),
    /// Publish an existing draft
    Publish { draft_id: Option<String> },
    /// Show version information
    Version,
    /// Show usage
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidNumber { flag: String, value: String },

    #[error("unexpected argument '{0}'")]
    Unexpected(String),
}

pub const USAGE: &str = "\
Usage:
  twigg generate --title <TITLE> --prompt <PROMPT> [--level <LEVEL>]
                 [--weeks <N>] [--language <CODE>] [--publish]
  twigg publish <DRAFT_ID>
  twigg --version
  twigg --help

Environment:
  TWIGG_API_URL             Base URL of the drafts API
  TWIGG_TOKEN               Bearer token
  TWIGG_IDLE_TIMEOUT_SECS   Max seconds to wait for the next frame (0 = none)
  TWIGG_END_OF_STREAM       fail | ignore";

/// Parse command-line arguments (program name first).
///
/// # Examples
///
/// ```
/// use twigg::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["twigg".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);

    let Some(first) = args.next() else {
        return Ok(CliCommand::Help);
    };

    match first.as_str() {
        "--version" | "-V" => Ok(CliCommand::Version),
        "--help" | "-h" | "help" => Ok(CliCommand::Help),
        "generate" => parse_generate(args).map(CliCommand::Generate),
        "publish" => {
            let draft_id = args.next();
            if let Some(extra) = args.next() {
                return Err(ArgsError::Unexpected(extra));
            }
            Ok(CliCommand::Publish { draft_id })
        }
        _ => Err(ArgsError::Unexpected(first)),
    }
}

fn parse_generate<I>(mut args: I) -> Result<GenerateArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut parsed = GenerateArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--publish" => parsed.publish = true,
            "--title" | "-t" => parsed.title = value_for(&arg, &mut args)?,
            "--prompt" | "-p" => parsed.prompt = value_for(&arg, &mut args)?,
            "--level" => parsed.level = Some(value_for(&arg, &mut args)?),
            "--language" | "--lang" => parsed.language = Some(value_for(&arg, &mut args)?),
            "--weeks" => {
                let value = value_for(&arg, &mut args)?;
                let weeks = value.parse().map_err(|_| ArgsError::InvalidNumber {
                    flag: arg.clone(),
                    value,
                })?;
                parsed.weeks = Some(weeks);
            }
            _ => return Err(ArgsError::Unexpected(arg)),
        }
    }

    Ok(parsed)
}

fn value_for<I>(flag: &str, args: &mut I) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}
