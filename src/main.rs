// SPDX-License-Identifier: PMPL-1.0-or-later

//! lingo-bootstrap: one-shot environment setup for the subtitle web app
//!
//! Running the binary with no arguments performs the full install from the
//! current directory and then starts the application.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use lingo_bootstrap::config::{ConfigStore, DISPLAY_LANGUAGE_KEY};
use lingo_bootstrap::console::{Console, Tone};
use lingo_bootstrap::i18n::{tf, Lang, DEFAULT_LANGUAGE};
use lingo_bootstrap::install::{InstallOptions, Installer};
use lingo_bootstrap::platform::HostContext;
use lingo_bootstrap::runner::{CommandRunner, DryRunRunner, SystemRunner};
use lingo_bootstrap::report::SummaryFormat;
use lingo_bootstrap::types::{InstallSummary, MediaPolicy};
use lingo_bootstrap::{diagnostics, report};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lingo-bootstrap")]
#[command(version)]
#[command(about = "Install the ML runtime, fonts and project, then start the web app")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    install: InstallArgs,

    /// Project directory holding config.yaml and st.py
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Python interpreter (default: installer.python from config, then python3/python on PATH)
    #[arg(long, global = true)]
    python: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full installation (the default)
    Install(InstallArgs),

    /// Report what an install would find, without changing anything
    Check,

    /// Show or set the persisted display language
    Lang {
        /// Language code (en, zh-CN, es, fr, ja)
        #[arg(value_name = "CODE")]
        code: Option<String>,
    },
}

#[derive(Args, Clone, Default)]
struct InstallArgs {
    /// Abort when ffmpeg is missing instead of warning
    #[arg(long)]
    require_ffmpeg: bool,

    /// Do not start the application afterwards
    #[arg(long)]
    no_launch: bool,

    /// Print install commands instead of running them (probes still run)
    #[arg(long)]
    dry_run: bool,

    /// Write an install summary (.json, .yaml or .yml)
    #[arg(long, value_name = "FILE", value_parser = parse_summary_path)]
    summary: Option<PathBuf>,
}

/// Reject summary paths with an unknown extension before anything is installed.
fn parse_summary_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    SummaryFormat::from_path(&path).map_err(|err| err.to_string())?;
    Ok(path)
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("lingo_bootstrap=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => install(cli.install, cli.project_dir, cli.python, cli.verbose),
        Some(Commands::Install(args)) => {
            install(args, cli.project_dir, cli.python, cli.verbose)
        }
        Some(Commands::Check) => diagnostics::run_self_diagnostics(
            &SystemRunner,
            &HostContext::current(),
            &cli.project_dir,
            cli.python.as_deref(),
        ),
        Some(Commands::Lang { code }) => language(&cli.project_dir, code.as_deref()),
    }
}

fn install(
    args: InstallArgs,
    project_dir: PathBuf,
    python: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let options = InstallOptions {
        project_dir,
        python,
        media_policy: args.require_ffmpeg.then_some(MediaPolicy::Strict),
        no_launch: args.no_launch,
        dry_run: args.dry_run,
    };
    let host = HostContext::current();

    let summary = args.summary.as_deref();
    if args.dry_run {
        run_installer(DryRunRunner::new(SystemRunner), host, options, summary, verbose)
    } else {
        run_installer(SystemRunner, host, options, summary, verbose)
    }
}

fn run_installer<R: CommandRunner>(
    runner: R,
    host: HostContext,
    options: InstallOptions,
    summary_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut installer = Installer::new(runner, host, options)?;
    let result = installer.run();

    if verbose {
        report::print_steps(installer.summary());
    }
    match summary_path {
        Some(path) => persist_summary(result, installer.summary(), path),
        None => result,
    }
}

/// Save the summary after a run. A save failure never hides the install
/// error; it is only logged when the run itself failed.
fn persist_summary(run: Result<()>, summary: &InstallSummary, path: &Path) -> Result<()> {
    match (report::save_summary(summary, path), run) {
        (Ok(()), run) => {
            println!("Summary saved to: {}", path.display());
            run
        }
        (Err(save_err), Ok(())) => Err(save_err),
        (Err(save_err), Err(run_err)) => {
            let reason = format!("{:#}", save_err);
            warn!(error = %reason, path = %path.display(), "summary not saved");
            Err(run_err)
        }
    }
}

fn language(project_dir: &Path, code: Option<&str>) -> Result<()> {
    let store = ConfigStore::in_project(project_dir);
    let current = store
        .load_string(DISPLAY_LANGUAGE_KEY)?
        .unwrap_or_else(|| DEFAULT_LANGUAGE.code().to_string());
    let current_lang = Lang::from_code(&current).unwrap_or_default();

    let Some(code) = code else {
        let console = Console::new(current_lang);
        console.note(&console.tf("lang.current", &[current.as_str()]), Tone::Cyan);
        return Ok(());
    };

    let Some(lang) = Lang::from_code(code) else {
        let supported: Vec<&str> = Lang::all().iter().map(Lang::code).collect();
        bail!(
            "unsupported display language {} (supported: {})",
            code,
            supported.join(", ")
        );
    };
    store.update_key(DISPLAY_LANGUAGE_KEY, lang.code())?;
    println!("{}", tf(lang, "lang.updated", &[lang.native_name()]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use lingo_bootstrap::types::HostOs;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unknown_summary_extension_is_rejected_at_parse_time() {
        let parsed = Cli::try_parse_from(["lingo-bootstrap", "--summary", "out.txt"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["lingo-bootstrap", "install", "--summary", "out.txt"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from(["lingo-bootstrap", "--summary", "out.yml"]).unwrap();
        assert_eq!(cli.install.summary, Some(PathBuf::from("out.yml")));
    }

    #[test]
    fn install_error_wins_over_summary_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blocker"), "").unwrap();
        let unwritable = dir.path().join("blocker/summary.json");
        let summary = InstallSummary::new(HostOs::Linux, false);

        let err = persist_summary(Err(anyhow!("pip exploded")), &summary, &unwritable).unwrap_err();
        assert_eq!(err.to_string(), "pip exploded");

        assert!(persist_summary(Ok(()), &summary, &unwritable).is_err());
    }

    #[test]
    fn summary_is_written_even_when_install_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let summary = InstallSummary::new(HostOs::Windows, true);

        assert!(persist_summary(Err(anyhow!("no python")), &summary, &path).is_err());
        assert!(report::load_summary(&path).unwrap().dry_run);
    }
}
