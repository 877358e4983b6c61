use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{Command, Outcome, HELP};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, RenderStyle, Settings, LOCAL_CONFIG_FILE};
use crate::domain::TreeView;
use crate::infrastructure::render::render_view;
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Completion { shell } => _completion(*shell),
        Commands::Config { command } => _config(cli, command),
        Commands::Build { values, delete } => _build(load_settings(cli)?, values, delete),
        Commands::Run { file } => _run(load_settings(cli)?, file),
        Commands::Repl => _repl(load_settings(cli)?),
    }
}

/// Layered settings with command line flags applied last.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(render) = cli.render {
        settings.render = render;
    }
    if cli.heights {
        settings.show_height = true;
    }
    if cli.redraw_noops {
        settings.redraw_noops = true;
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

#[instrument(skip(settings))]
fn _build(settings: Settings, values: &[i64], delete: &[i64]) -> CliResult<()> {
    let container = ServiceContainer::new(settings);
    let mut session = container.quiet_session();

    session.execute(Command::Insert(values.to_vec()))?;
    if !delete.is_empty() {
        session.execute(Command::Delete(delete.to_vec()))?;
    }

    let settings = &container.settings;
    match render_view(session.view(), settings.render, settings.show_height) {
        Some(rendered) => output::raw(&rendered),
        None => output::info(&session.stats().summary()),
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _run(settings: Settings, file: &Path) -> CliResult<()> {
    let source = if file == Path::new("-") {
        io::read_to_string(io::stdin()).map_err(|e| InfraError::io("read script from stdin", e))?
    } else {
        if !file.exists() {
            return Err(CliError::NoInput(file.to_path_buf()));
        }
        fs::read_to_string(file)
            .map_err(|e| InfraError::io(format!("read script {}", file.display()), e))?
    };

    let container = ServiceContainer::new(settings);
    let mut session = container.session(io::stdout());
    let settings = &container.settings;
    let executed = session.run_script(&source, |outcome, view| report(outcome, view, settings))?;
    debug!(executed, "script done");
    Ok(())
}

#[instrument(skip(settings))]
fn _repl(settings: Settings) -> CliResult<()> {
    let container = ServiceContainer::new(settings);
    let mut session = container.session(io::stdout());
    let settings = &container.settings;

    output::header("avltree: type 'help' for commands, 'quit' to leave");
    if !settings.seed.is_empty() {
        report(&Outcome::Shown, session.view(), settings);
    }

    let mut lines = io::stdin().lock().lines();
    loop {
        output::prompt(&settings.prompt);
        let Some(line) = lines.next() else {
            // EOF
            println!();
            break;
        };
        let line = line.map_err(|e| InfraError::io("read stdin", e))?;

        match session.execute_line(&line) {
            Ok(Some(Outcome::Quit)) => break,
            Ok(Some(outcome)) => report(&outcome, session.view(), settings),
            Ok(None) => {}
            Err(e) if e.is_input_error() => output::error(&e),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::raw(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::raw(&Settings::template()),
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no config directory available on this platform"),
            }
            let local = cli
                .config
                .clone()
                .unwrap_or_else(|| LOCAL_CONFIG_FILE.into());
            output::action("local", &local.display());
        }
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

/// Prints what a command did. Mutations are already drawn by the renderer unless
/// rendering is off.
fn report(outcome: &Outcome, view: TreeView<'_, i64>, settings: &Settings) {
    let rendering = settings.render != RenderStyle::Quiet;
    match outcome {
        Outcome::Inserted(changes) | Outcome::Deleted(changes) if !rendering => {
            let verb = match outcome {
                Outcome::Inserted(_) => "inserted",
                _ => "deleted",
            };
            for change in changes {
                if change.changed {
                    output::success(&format!("{} {}", verb, change.value));
                } else {
                    output::unchanged(&format!("{} (no change)", change.value));
                }
            }
        }
        Outcome::Inserted(_) | Outcome::Deleted(_) => {}
        Outcome::Cleared if !rendering => output::success("cleared"),
        Outcome::Cleared => {}
        Outcome::Contains { value, found } => {
            let state = if *found { "present" } else { "absent" };
            output::info(&format!("{}: {}", value, state));
        }
        Outcome::Shown => {
            // `show` always draws, falling back to the diagram when rendering is off
            let style = if rendering { settings.render } else { RenderStyle::Tree };
            if let Some(rendered) = render_view(view, style, settings.show_height) {
                output::raw(&rendered);
            }
        }
        Outcome::Listed(values) => output::info(&format!("[{}]", values.iter().join(", "))),
        Outcome::Valid => output::success("tree invariants hold"),
        Outcome::Stats(stats) => output::info(&stats.summary()),
        Outcome::Help => output::info(HELP),
        Outcome::Quit => {}
    }
}
