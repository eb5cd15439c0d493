//! Interactive shell: the two-list screen in a terminal.
//!
//! A plain line is submitted as a new item. Lines starting with `/` are
//! commands acting on the lists.

use crate::cli::output;
use crate::core::controller::App;
use crate::core::error::{Result, TodoError};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// Shown instead of the input prompt when nothing can be stored.
pub const UNSUPPORTED_MESSAGE: &str = "Persistent storage is not supported on this platform!";

const HELP: &str = "\
Type text and press enter to add an item.
  /done <id>    complete a todo item
  /delete <id>  clear a completed item
  /list         show both lists
  /help         show this help
  /quit         leave the shell";

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Submit(String),
    Done(i64),
    Delete(i64),
    List,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(ShellCommand::Submit(line.to_string()));
        };

        let mut parts = rest.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        let invalid = || TodoError::InvalidCommand(line.to_string());
        let id = || -> Result<i64> {
            match args[..] {
                [arg] => arg.parse().map_err(|_| invalid()),
                _ => Err(invalid()),
            }
        };
        let bare = |command: ShellCommand| -> Result<ShellCommand> {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(invalid())
            }
        };

        match cmd {
            "done" => Ok(ShellCommand::Done(id()?)),
            "delete" => Ok(ShellCommand::Delete(id()?)),
            "list" => bare(ShellCommand::List),
            "help" => bare(ShellCommand::Help),
            "quit" | "exit" => bare(ShellCommand::Quit),
            _ => Err(invalid()),
        }
    }
}

/// Run the shell until `/quit` or end of input.
pub async fn run_shell<R, W>(app: &mut App, persists: bool, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if !persists {
        writeln!(out, "{}", UNSUPPORTED_MESSAGE)?;
        return Ok(());
    }

    app.sync().await;
    writeln!(out, "what do you need to do? (/help for commands)")?;
    render(app, out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match ShellCommand::parse(&line) {
            Ok(c) => c,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                continue;
            }
        };

        let result = match command {
            ShellCommand::Submit(text) => {
                app.set_text(text);
                app.submit().await.map(|_| ())
            }
            ShellCommand::Done(id) => app.tap_todo(id).await.map(|_| ()),
            ShellCommand::Delete(id) => app.tap_done(id).await.map(|_| ()),
            ShellCommand::List => {
                app.sync().await;
                Ok(())
            }
            ShellCommand::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            ShellCommand::Quit => break,
        };

        if let Err(e) = result {
            warn!(error = %e, "shell action failed");
            writeln!(out, "Error: {}", e)?;
        }
        render(app, out)?;
    }

    out.flush()?;
    Ok(())
}

fn render<W: Write>(app: &App, out: &mut W) -> Result<()> {
    let text = output::format_views(&app.render());
    if !text.is_empty() {
        writeln!(out, "{}", text.trim_end())?;
    }
    out.flush()?;
    Ok(())
}
