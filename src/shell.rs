//! Line-oriented interactive session.
//!
//! Reads one command per line from stdin and prints results as JSON on
//! stdout. Prompts and errors go to stderr so output stays pipeable.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use portal::Session;
use portal::net::transport::Transport;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{CliError, print_json};

const HELP: &str = "\
commands:
  login <username> <password>   sign in
  logout                        sign out
  whoami                        re-fetch the signed-in profile
  refresh                       rotate the session cookie
  projects                      list joined and available projects
  join <code>                   join a project
  access <code>                 get the launch URL of a joined project
  help                          show this text
  quit                          leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Empty,
    Login { username: String, password: String },
    Logout,
    Whoami,
    Refresh,
    Projects,
    Join(String),
    Access(String),
    Help,
    Quit,
}

/// Parse one input line. Errors carry the usage text to show.
pub(crate) fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("login", [username, password]) => ShellCommand::Login {
            username: (*username).to_owned(),
            password: (*password).to_owned(),
        },
        ("login", _) => return Err("usage: login <username> <password>".to_owned()),
        ("logout", []) => ShellCommand::Logout,
        ("whoami", []) => ShellCommand::Whoami,
        ("refresh", []) => ShellCommand::Refresh,
        ("projects", []) => ShellCommand::Projects,
        ("join", [code]) => ShellCommand::Join((*code).to_owned()),
        ("join", _) => return Err("usage: join <code>".to_owned()),
        ("access", [code]) => ShellCommand::Access((*code).to_owned()),
        ("access", _) => return Err("usage: access <code>".to_owned()),
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit", _) => ShellCommand::Quit,
        ("logout" | "whoami" | "refresh" | "projects", _) => return Err(format!("usage: {verb}")),
        _ => return Err(format!("unknown command {verb:?}; try `help`")),
    };
    Ok(command)
}

pub(crate) async fn run<T: Transport>(session: &Session<T>) -> Result<(), CliError> {
    match session.restore().await {
        Some(profile) => eprintln!("signed in as {}", profile.display_name()),
        None => eprintln!("not signed in; use `login <username> <password>`"),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => command,
            Err(usage) => {
                eprintln!("{usage}");
                continue;
            }
        };
        if let Err(e) = execute(session, command).await {
            eprintln!("error: {e}");
        }
    }
    Ok(())
}

async fn execute<T: Transport>(session: &Session<T>, command: ShellCommand) -> Result<(), CliError> {
    match command {
        ShellCommand::Empty | ShellCommand::Quit => Ok(()),
        ShellCommand::Help => {
            eprintln!("{HELP}");
            Ok(())
        }
        ShellCommand::Login { username, password } => {
            let profile = session.login(&username, &password).await?;
            eprintln!("welcome, {}", profile.display_name());
            print_json(&profile)
        }
        ShellCommand::Logout => {
            session.logout().await?;
            print_json(&session.store().snapshot())
        }
        ShellCommand::Whoami => {
            let profile = session.refresh_user().await?;
            print_json(&profile)
        }
        ShellCommand::Refresh => {
            session.refresh_session().await?;
            eprintln!("session refreshed");
            Ok(())
        }
        ShellCommand::Projects => {
            let board = session.dashboard().await?;
            print_json(&board)
        }
        ShellCommand::Join(code) => {
            let envelope = session.join(&code).await?;
            print_json(&envelope)
        }
        ShellCommand::Access(code) => {
            let access = session.access(&code).await?;
            print_json(&access)
        }
    }
}
