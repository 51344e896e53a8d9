use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use snip_core::{check_url_input, EntryId, SubmissionStatus, UrlInput};
use snip_engine::EngineHandle;
use snip_logging::{snip_info, snip_warn};

use super::cli::{AppConfig, Cli, Command};
use super::clipboard::SystemClipboard;
use super::commands::{parse_line, ReplCommand, HELP};
use super::controller::{AppEvent, SubmissionController};
use super::effects::{spawn_event_forwarder, EffectRunner};
use super::logging;
use super::persistence::HistoryStore;
use super::ui::render::{render_history, render_notice, render_status};

const INVALID_INPUT_EXIT: u8 = 2;

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::from_cli(&cli)?;
    logging::initialize(&config.log_destination, config.log_level);
    snip_info!(
        "snip starting endpoint={} history={:?}",
        config.endpoint,
        config.history_path
    );

    let (engine, engine_events) =
        EngineHandle::new(config.shorten_settings()).context("failed to start request engine")?;
    let (event_tx, event_rx) = mpsc::channel();
    spawn_event_forwarder(engine_events, event_tx.clone())
        .context("failed to start event forwarder")?;
    let runner = EffectRunner::new(
        engine,
        HistoryStore::new(config.history_path.clone()),
        Box::new(SystemClipboard::new()),
    );
    let mut controller = SubmissionController::new(runner);

    let Some(command) = cli.command else {
        return run_interactive(&mut controller, event_tx, &event_rx);
    };
    // Only the forwarder may keep the channel open from here on.
    drop(event_tx);

    match command {
        Command::Shorten { url } => shorten_once(&mut controller, &event_rx, &url),
        Command::History => {
            print_lines(&render_history(&controller.view().history));
            Ok(ExitCode::SUCCESS)
        }
        Command::Copy { id } => {
            if controller.copy_entry(EntryId(id)) {
                show_notice(&mut controller);
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("No entry with id {id}.");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Delete { id } => {
            if controller.delete(EntryId(id)) {
                show_notice(&mut controller);
                println!("{} entries left.", controller.history().len());
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("No entry with id {id}.");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn shorten_once(
    controller: &mut SubmissionController,
    events: &mpsc::Receiver<AppEvent>,
    url: &str,
) -> anyhow::Result<ExitCode> {
    match check_url_input(url) {
        UrlInput::Empty => {
            eprintln!("Nothing to shorten.");
            return Ok(ExitCode::from(INVALID_INPUT_EXIT));
        }
        UrlInput::Invalid(reason) => {
            eprintln!("Please enter a valid URL ({reason}).");
            return Ok(ExitCode::from(INVALID_INPUT_EXIT));
        }
        UrlInput::Valid => {}
    }

    controller.submit(url);
    wait_until_settled(controller, events)?;

    let view = controller.view();
    let status_line = render_status(&view).unwrap_or_default();
    if view.status == SubmissionStatus::Succeeded {
        println!("{status_line}");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{status_line}");
        Ok(ExitCode::FAILURE)
    }
}

/// Blocks until the in-flight submission resolves. There is no timeout: an
/// unresponsive service keeps the session waiting.
fn wait_until_settled(
    controller: &mut SubmissionController,
    events: &mpsc::Receiver<AppEvent>,
) -> anyhow::Result<()> {
    while controller.is_submitting() {
        match events.recv() {
            Ok(AppEvent::Core(msg)) => {
                controller.dispatch(msg);
            }
            Ok(_) => {}
            Err(_) => bail!("request engine stopped before the submission completed"),
        }
    }
    Ok(())
}

fn run_interactive(
    controller: &mut SubmissionController,
    event_tx: mpsc::Sender<AppEvent>,
    events: &mpsc::Receiver<AppEvent>,
) -> anyhow::Result<ExitCode> {
    spawn_stdin_reader(event_tx).context("failed to start input reader")?;

    println!("{HELP}");
    println!();
    print_lines(&render_history(&controller.view().history));
    prompt();

    while let Ok(event) = events.recv() {
        match event {
            AppEvent::Core(msg) => {
                if controller.dispatch(msg) {
                    println!();
                    show_notice(controller);
                    prompt();
                }
            }
            AppEvent::Line(line) => {
                if !handle_line(controller, &line) {
                    break;
                }
                prompt();
            }
            AppEvent::InputClosed => break,
        }
    }

    if controller.is_submitting() {
        snip_warn!("session ended with a submission still in flight");
    }
    Ok(ExitCode::SUCCESS)
}

/// Returns `false` when the session should end.
fn handle_line(controller: &mut SubmissionController, line: &str) -> bool {
    match parse_line(line) {
        ReplCommand::Shorten(url) => match check_url_input(&url) {
            UrlInput::Empty => {}
            UrlInput::Invalid(reason) => println!("Please enter a valid URL ({reason})."),
            UrlInput::Valid => {
                if controller.submit(&url) {
                    if let Some(status) = render_status(&controller.view()) {
                        println!("{status}");
                    }
                } else {
                    println!("Still working on the previous link; ignored.");
                }
            }
        },
        ReplCommand::List => print_lines(&render_history(&controller.view().history)),
        ReplCommand::Copy(None) => match controller.last_result().map(ToOwned::to_owned) {
            Some(url) => {
                controller.copy(&url);
                show_notice(controller);
            }
            None => println!("Nothing to copy yet."),
        },
        ReplCommand::Copy(Some(id)) => {
            if controller.copy_entry(id) {
                show_notice(controller);
            } else {
                println!("No entry with id {id}.");
            }
        }
        ReplCommand::Delete(id) => {
            if controller.delete(id) {
                show_notice(controller);
            } else {
                println!("No entry with id {id}.");
            }
        }
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Quit => return false,
        ReplCommand::Empty => {}
        ReplCommand::Invalid(msg) => println!("{msg}"),
    }
    true
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("snip-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(AppEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        snip_warn!("stdin read failed: {}", err);
                        break;
                    }
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        })
}

fn show_notice(controller: &mut SubmissionController) {
    if let Some(notice) = controller.take_notice() {
        println!("{}", render_notice(&notice));
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
