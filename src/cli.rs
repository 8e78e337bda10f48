//! Command-line front end.
//!
//! ```text
//! ts-catalog check     [ROOT] [--json]
//! ts-catalog report    [ROOT] [--json]
//! ts-catalog tr        FILE|ROOT CONTEXT SOURCE [-n|--count N] [--disambiguation D]
//!                      [--language L] [--unfinished] [ARGS...]
//! ts-catalog normalize FILE [--output FILE]
//! ```
//!
//! Every command accepts `--log-file FILE`.

use std::ffi::OsString;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::{
    ConfigError,
    ConfigManager,
    Severity,
};
use crate::format::{
    self,
    FormatError,
};
use crate::indexer::{
    IndexerError,
    LoadFailure,
    WorkspaceIndexer,
};
use crate::language::resolve_language;
use crate::report::CompletenessReport;
use crate::runtime::{
    self,
    LookupOptions,
};
use crate::validation::{
    self,
    Diagnostic,
};

pub const USAGE: &str = "\
Usage:
    ts-catalog check     [ROOT] [--json]
    ts-catalog report    [ROOT] [--json]
    ts-catalog tr        FILE|ROOT CONTEXT SOURCE [-n|--count N] [--disambiguation D]
                         [--language L] [--unfinished] [ARGS...]
    ts-catalog normalize FILE [--output FILE]

Options:
    --log-file FILE    Write logs to FILE instead of stderr
    -h, --help         Print this help
";

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Args(#[from] pico_args::Error),

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Unexpected arguments: {0:?}")]
    UnexpectedArguments(Vec<OsString>),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Indexer(#[from] IndexerError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub command: Command,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Check { root: PathBuf, json: bool },
    Report { root: PathBuf, json: bool },
    Tr(TrArgs),
    Normalize { file: PathBuf, output: Option<PathBuf> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrArgs {
    /// A `.ts` file, or a workspace directory to pick a catalog from.
    pub target: PathBuf,
    pub context: String,
    pub source: String,
    pub count: Option<i64>,
    pub disambiguation: Option<String>,
    pub language: Option<String>,
    pub include_unfinished: bool,
    pub args: Vec<String>,
}

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The command ran, but found errors (e.g. `check`).
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Failure => Self::FAILURE,
        }
    }
}

impl Cli {
    /// Parses arguments (without the program name).
    ///
    /// # Errors
    /// Returns an error for unknown commands, missing or malformed values and
    /// leftover arguments.
    pub fn parse(args: Vec<OsString>) -> Result<Self, CliError> {
        let mut args = pico_args::Arguments::from_vec(args);
        let subcommand = args.subcommand()?;
        let help = args.contains(["-h", "--help"]);
        let log_file: Option<PathBuf> = args.opt_value_from_str("--log-file")?;

        if help {
            return Ok(Self { command: Command::Help, log_file });
        }

        let command = match subcommand.as_deref() {
            None | Some("help") => Command::Help,
            Some("check") => {
                let json = args.contains("--json");
                Command::Check { root: root_argument(args)?, json }
            }
            Some("report") => {
                let json = args.contains("--json");
                Command::Report { root: root_argument(args)?, json }
            }
            Some("tr") => Command::Tr(TrArgs {
                count: args.opt_value_from_str(["-n", "--count"])?,
                disambiguation: args.opt_value_from_str("--disambiguation")?,
                language: args.opt_value_from_str("--language")?,
                include_unfinished: args.contains("--unfinished"),
                target: args.free_from_str()?,
                context: args.free_from_str()?,
                source: args.free_from_str()?,
                args: args
                    .finish()
                    .into_iter()
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect(),
            }),
            Some("normalize") => {
                let output = args.opt_value_from_str("--output")?;
                let file = args.free_from_str()?;
                reject_remaining(args)?;
                Command::Normalize { file, output }
            }
            Some(other) => return Err(CliError::UnknownCommand(other.to_string())),
        };

        Ok(Self { command, log_file })
    }
}

/// Message shown for a command line that could not be parsed.
#[must_use]
pub fn usage_error(error: &CliError) -> String {
    format!("{error}\n\n{}", USAGE.trim_end())
}

fn root_argument(mut args: pico_args::Arguments) -> Result<PathBuf, CliError> {
    let root = args.opt_free_from_str()?.unwrap_or_else(|| PathBuf::from("."));
    reject_remaining(args)?;
    Ok(root)
}

fn reject_remaining(args: pico_args::Arguments) -> Result<(), CliError> {
    let remaining = args.finish();
    if remaining.is_empty() { Ok(()) } else { Err(CliError::UnexpectedArguments(remaining)) }
}

/// Runs a command, writing its report to `out`.
///
/// # Errors
/// Returns an error when the command cannot run at all (bad config,
/// unreadable input, output failure).
pub async fn run(command: Command, out: &mut impl Write) -> Result<Outcome, CliError> {
    match command {
        Command::Help => {
            out.write_all(USAGE.as_bytes())?;
            Ok(Outcome::Success)
        }
        Command::Check { root, json } => check(&root, json, out).await,
        Command::Report { root, json } => report(&root, json, out).await,
        Command::Tr(args) => translate(args, out).await,
        Command::Normalize { file, output } => normalize(&file, output.as_deref(), out),
    }
}

async fn load_workspace(root: &Path) -> Result<(ConfigManager, WorkspaceIndexer), CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(root.to_path_buf()))?;
    let indexer = WorkspaceIndexer::new();
    indexer.index_workspace(root, &config_manager).await?;
    Ok((config_manager, indexer))
}

/// Diagnostics of one catalog file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileDiagnostics {
    path: PathBuf,
    diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    files: Vec<FileDiagnostics>,
    failures: Vec<LoadFailure>,
}

async fn check(root: &Path, json: bool, out: &mut impl Write) -> Result<Outcome, CliError> {
    let (config_manager, indexer) = load_workspace(root).await?;
    let config = &config_manager.get_settings().validation;

    let files: Vec<_> = indexer
        .documents()
        .await
        .into_iter()
        .map(|(path, document)| FileDiagnostics {
            diagnostics: validation::validate(&document, config),
            path,
        })
        .collect();
    let failures = indexer.failures().await;

    let failed = !failures.is_empty()
        || files.iter().any(|file| validation::has_errors(&file.diagnostics));

    if json {
        serde_json::to_writer_pretty(&mut *out, &CheckOutput { files, failures })?;
        writeln!(out)?;
    } else {
        let mut errors = failures.len();
        let mut warnings = 0;
        for failure in &failures {
            writeln!(out, "{}: error: {}", failure.path.display(), failure.message)?;
        }
        for file in &files {
            for diagnostic in &file.diagnostics {
                writeln!(out, "{}: {}", file.path.display(), diagnostic)?;
                match diagnostic.severity {
                    Severity::Error => errors += 1,
                    Severity::Warning => warnings += 1,
                    Severity::Info | Severity::Off => {}
                }
            }
        }
        writeln!(
            out,
            "Checked {} catalog(s): {} error(s), {} warning(s)",
            files.len() + failures.len(),
            errors,
            warnings
        )?;
    }

    Ok(if failed { Outcome::Failure } else { Outcome::Success })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileReport {
    path: PathBuf,
    report: CompletenessReport,
}

async fn report(root: &Path, json: bool, out: &mut impl Write) -> Result<Outcome, CliError> {
    let (_, indexer) = load_workspace(root).await?;

    let reports: Vec<_> = indexer
        .documents()
        .await
        .into_iter()
        .map(|(path, document)| FileReport {
            report: CompletenessReport::from_document(&document),
            path,
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    } else {
        for file in &reports {
            write!(out, "{}\n{}", file.path.display(), file.report)?;
        }
    }
    Ok(Outcome::Success)
}

async fn translate(args: TrArgs, out: &mut impl Write) -> Result<Outcome, CliError> {
    let active = runtime::global();

    let options = if args.target.is_dir() {
        let (config_manager, indexer) = load_workspace(&args.target).await?;
        let settings = config_manager.get_settings();
        let catalogs = indexer.catalog_set().await;
        match resolve_language(
            args.language.as_deref(),
            settings.default_language.as_deref(),
            &settings.source_language,
            &catalogs,
        ) {
            Some(language) => {
                active.switch_language(&catalogs, &language);
            }
            None => {
                tracing::info!("Rendering source text");
                active.clear();
            }
        }
        settings.lookup
    } else {
        active.load_file(&args.target)?;
        LookupOptions::default()
    };
    active.set_options(LookupOptions {
        include_unfinished: args.include_unfinished || options.include_unfinished,
    });

    let values: Vec<&str> = args.args.iter().map(String::as_str).collect();
    let text = match (args.count, args.disambiguation.as_deref()) {
        (Some(n), None) => runtime::tr_n(&args.context, &args.source, n, &values),
        (None, None) => runtime::tr(&args.context, &args.source, &values),
        (count, disambiguation) => {
            let translator = active.translator();
            match count {
                Some(n) => translator.lookup_plural_with(
                    &args.context,
                    &args.source,
                    disambiguation,
                    n,
                    &values,
                ),
                None => translator.lookup_with(&args.context, &args.source, disambiguation, &values),
            }
        }
    };
    writeln!(out, "{text}")?;
    Ok(Outcome::Success)
}

fn normalize(file: &Path, output: Option<&Path>, out: &mut impl Write) -> Result<Outcome, CliError> {
    let document = format::read_file(file)?;
    match output {
        Some(path) => format::write_file(&document, path)?,
        None => out.write_all(format::write_string(&document)?.as_bytes())?,
    }
    Ok(Outcome::Success)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, CliError> {
        Cli::parse(args.iter().map(OsString::from).collect())
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::help_command(&["help"])]
    #[case::help_flag(&["check", "--help"])]
    fn test_parse_help(#[case] args: &[&str]) {
        assert_that!(parse(args).unwrap().command, eq(&Command::Help));
    }

    #[rstest]
    fn test_parse_check() {
        let cli = parse(&["check", "project", "--json", "--log-file", "check.log"]).unwrap();

        assert_eq!(cli.command, Command::Check { root: PathBuf::from("project"), json: true });
        assert_eq!(cli.log_file, Some(PathBuf::from("check.log")));
    }

    #[rstest]
    fn test_parse_report_defaults_to_current_directory() {
        let cli = parse(&["report"]).unwrap();

        assert_eq!(cli.command, Command::Report { root: PathBuf::from("."), json: false });
        assert_eq!(cli.log_file, None);
    }

    #[rstest]
    fn test_parse_tr() {
        let cli = parse(&[
            "tr",
            "translations/ru.ts",
            "FindResults",
            "%n object(s)",
            "-n",
            "5",
            "--unfinished",
            "extra",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Tr(TrArgs {
                target: PathBuf::from("translations/ru.ts"),
                context: "FindResults".to_string(),
                source: "%n object(s)".to_string(),
                count: Some(5),
                disambiguation: None,
                language: None,
                include_unfinished: true,
                args: vec!["extra".to_string()],
            })
        );
    }

    #[rstest]
    fn test_parse_normalize() {
        let cli = parse(&["normalize", "ru.ts", "--output", "out.ts"]).unwrap();

        assert_eq!(
            cli.command,
            Command::Normalize {
                file: PathBuf::from("ru.ts"),
                output: Some(PathBuf::from("out.ts"))
            }
        );
    }

    #[rstest]
    fn test_usage_error() {
        let error = parse(&["translate"]).unwrap_err();

        let message = usage_error(&error);

        assert!(message.starts_with("Unknown command 'translate'\n\nUsage:\n"));
        assert!(message.ends_with(USAGE.trim_end()));
    }

    #[rstest]
    fn test_parse_errors() {
        assert!(matches!(parse(&["translate"]), Err(CliError::UnknownCommand(ref c)) if c == "translate"));
        assert!(matches!(parse(&["check", "a", "b"]), Err(CliError::UnexpectedArguments(_))));
        assert!(matches!(parse(&["tr", "ru.ts"]), Err(CliError::Args(_))));
        assert!(matches!(parse(&["tr", "ru.ts", "C", "S", "-n", "many"]), Err(CliError::Args(_))));
    }

    #[tokio::test]
    async fn test_run_help() {
        let mut out = Vec::new();

        let outcome = run(Command::Help, &mut out).await.unwrap();

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(String::from_utf8(out).unwrap(), USAGE);
    }
}
