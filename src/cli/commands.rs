use std::fs;
use std::io;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::{build_store, load_feed_or_builtin, QuizSession};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::play::run_quiz;
use crate::cli::{output, CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{OrderedEntryStore, Question};
use crate::tree_traits::TreeDisplay;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::List) => _list(cli),
        Some(Commands::Tree) => _tree(cli),
        Some(Commands::Play) => _play(cli),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::io("print help", e)),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

/// The `--feed` flag wins over the configured feed.
#[instrument(level = "debug", skip_all)]
fn load_store(cli: &Cli, settings: &Settings) -> CliResult<OrderedEntryStore<Question>> {
    let feed = cli.feed.as_ref().or(settings.feed.as_ref());
    debug!(?feed, "loading question feed");
    let questions = load_feed_or_builtin(feed.map(|p| p.as_path()))?;
    if questions.is_empty() {
        output::warning("question feed is empty");
    }
    Ok(build_store(questions)?)
}

#[instrument(skip(cli))]
fn _list(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    let store = load_store(cli, &settings)?;
    output::header(&format!("{} questions", store.len()));
    for (i, question) in store.iter().enumerate() {
        output::info(&format!("{:>3}. {}", i + 1, question.text()));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    let store = load_store(cli, &settings)?;
    output::info(&store.to_tree_string());
    output::detail(&format!("nodes: {}, height: {}", store.len(), store.height()));
    Ok(())
}

#[instrument(skip(cli))]
fn _play(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    let store = load_store(cli, &settings)?;
    let mut session = QuizSession::from_store(&store, settings.points_per_correct);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = run_quiz(
        &mut session,
        &mut stdin.lock(),
        &mut stdout.lock(),
        settings.show_media,
    )?;
    if summary.is_none() {
        output::warning(&format!(
            "quiz aborted after {} of {} questions, score {}",
            session.cursor(),
            session.len(),
            session.score()
        ));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "" } else { " (not found)" };
                    output::detail(&format!("global: {}{}", path.display(), state));
                }
                None => output::detail("global: <no config directory>"),
            }
            if let Some(path) = &cli.config {
                output::detail(&format!("explicit: {}", path.display()));
            }
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::InvalidArgs("cannot determine config directory".to_string())
            })?;
            if path.exists() && !force {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .map_err(|e| CliError::io(format!("create {}", dir.display()), e))?;
            }
            fs::write(&path, Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}
