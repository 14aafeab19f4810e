//! Line-oriented interactive session over a [`CubeController`].

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use client_core::{ControllerEvent, CubeController, SolverTransport};
use shared::domain::Facelet;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::debug;

use crate::render;

pub const HELP: &str = "\
commands:
  set [CUBE]        replace the cube (empty resets to the default)
  color <W|B|R|G|Y|O|none>
                    pick the paint color
  paint <INDEX>     paint cell 0..53 with the selected color
  solve             send the cube to the solver
  cancel            abandon the running solve
  show              print the current state
  help              print this help
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set(String),
    Color(Option<Facelet>),
    Paint(usize),
    Solve,
    Cancel,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<SessionCommand> {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "set" => SessionCommand::Set(arg.to_string()),
        "color" => {
            if arg.eq_ignore_ascii_case("none") {
                SessionCommand::Color(None)
            } else {
                let mut chars = arg.chars();
                let color = match (chars.next(), chars.next()) {
                    (Some(c), None) => Facelet::from_char(c.to_ascii_uppercase()),
                    _ => None,
                };
                SessionCommand::Color(Some(
                    color.ok_or_else(|| anyhow!("unknown color '{arg}'"))?,
                ))
            }
        }
        "paint" => SessionCommand::Paint(
            arg.parse()
                .map_err(|_| anyhow!("paint expects a cell index, got '{arg}'"))?,
        ),
        "solve" => SessionCommand::Solve,
        "cancel" => SessionCommand::Cancel,
        "show" => SessionCommand::Show,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        "" => bail!("empty command"),
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(command)
}

pub fn describe_event(event: &ControllerEvent) -> Option<String> {
    match event {
        ControllerEvent::SolveStarted { cube } => Some(format!("Solving {cube}...")),
        ControllerEvent::Solved {
            prior,
            cube,
            result,
        } => Some(format!(
            "{}{}",
            render::solve_result(Some(prior), result),
            render::cube_net(cube)
        )),
        ControllerEvent::SolveFailed { message } | ControllerEvent::AlertRaised(message) => {
            Some(format!("Alert: {message}"))
        }
        ControllerEvent::SolveCancelled => Some("Solve cancelled.".to_string()),
        ControllerEvent::CubeChanged(_) | ControllerEvent::ColorSelected(_) => None,
    }
}

/// Applies one command. Returns false when the session should end.
pub async fn execute<T: SolverTransport + 'static>(
    controller: &Arc<CubeController<T>>,
    command: SessionCommand,
) -> bool {
    match command {
        SessionCommand::Set(candidate) => {
            if let Ok(cube) = controller.validate(&candidate).await {
                println!("{}", render::cube_net(&cube));
            }
        }
        SessionCommand::Color(color) => controller.select_color(color).await,
        SessionCommand::Paint(index) => match controller.paint_facelet(index).await {
            Ok(cube) => println!("{}", render::cube_net(&cube)),
            // Validation failures already surfaced through the alert event.
            Err(client_core::PaintError::Invalid(_)) => {}
            Err(err) => println!("{err}"),
        },
        SessionCommand::Solve => {
            if controller.solve().await.is_none() {
                let snapshot = controller.snapshot().await;
                match snapshot.alert.message() {
                    Some(message) => println!("Fix the cube first: {message}"),
                    None => println!("A solve is already running."),
                }
            }
        }
        SessionCommand::Cancel => {
            if !controller.cancel_solve().await {
                println!("Nothing to cancel.");
            }
        }
        SessionCommand::Show => print!("{}", render::snapshot(&controller.snapshot().await)),
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => return false,
    }
    true
}

pub async fn run<T: SolverTransport + 'static>(controller: Arc<CubeController<T>>) -> Result<()> {
    let mut events = controller.subscribe_events();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(text) = describe_event(&event) {
                        println!("{text}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "event printer lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if !execute(&controller, command).await {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    controller.cancel_solve().await;
    printer.abort();
    Ok(())
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
