//! Line-oriented host for the panel
//!
//! Reads one command per line from stdin, turns it into a [`UiEvent`] and
//! prints the resulting document to stdout.

use crate::app::{KitPanel, Page};
use crate::components::modals::CloseTrigger;
use crate::events::{Action, UiEvent};
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const HELP_TEMPLATE: &str = "{about}\n\n{usage-heading} {usage}\n\n{all-args}";

#[derive(Parser, Debug)]
#[command(name = "kit-panel")]
#[command(about = "Kit panel shell: one command per line")]
#[command(no_binary_name = true, disable_version_flag = true)]
#[command(help_template = HELP_TEMPLATE)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Switch to a page (dashboard, stock, employees)
    Page {
        #[arg(value_parser = parse_page)]
        page: Page,
    },
    /// Type into the employee search box
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Click an element, e.g. `click update-stock pen`
    Click {
        action: String,
        target: Option<String>,
        arg: Option<String>,
    },
    /// Edit a field of the open modal
    Input {
        field: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Commit the in-place danger level editor
    Danger {
        item: String,
        #[arg(default_value = "", allow_hyphen_values = true)]
        level: String,
    },
    /// Submit the open modal
    Submit,
    /// Close the open modal (icon, cancel, backdrop)
    Close {
        #[arg(default_value = "icon", value_parser = parse_trigger)]
        trigger: CloseTrigger,
    },
    /// Answer the confirmation prompt (yes, no)
    Confirm {
        #[arg(value_parser = parse_answer, action = clap::ArgAction::Set)]
        accepted: bool,
    },
    /// Let timers run for the given milliseconds
    Wait { ms: u64 },
    /// Print the document again
    Show,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

fn parse_page(name: &str) -> Result<Page, String> {
    Page::from_name(name).ok_or_else(|| format!("unknown page: {name}"))
}

fn parse_trigger(name: &str) -> Result<CloseTrigger, String> {
    CloseTrigger::from_attr(name).ok_or_else(|| format!("unknown close trigger: {name}"))
}

fn parse_answer(answer: &str) -> Result<bool, String> {
    match Action::from_attrs("confirm", None, Some(answer)) {
        Some(Action::Confirm(accepted)) => Ok(accepted),
        _ => Err(format!("expected yes or no, got {answer}")),
    }
}

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    /// Let timers run (debounce, toast expiry)
    Wait(Duration),
    Show,
    /// Rendered help text
    Help(String),
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Usage error as rendered by the parser
    #[error("{0}")]
    Invalid(String),

    #[error("error: unrecognised action: {0}")]
    UnknownAction(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Command::Empty);
    }
    let parsed = match Line::try_parse_from(words.iter().copied()) {
        Ok(parsed) => parsed,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            return Ok(Command::Help(err.render().to_string()))
        }
        Err(err) => return Err(CommandError::Invalid(err.render().to_string())),
    };

    let command = match parsed.command {
        ShellCommand::Page { page } => Command::Event(UiEvent::Click(Action::Navigate(page))),
        ShellCommand::Search { text } => Command::Event(UiEvent::SearchInput(text.join(" "))),
        ShellCommand::Click {
            action,
            target,
            arg,
        } => {
            let target = target.as_deref();
            // Steppers and adjusters take only a direction
            let action = Action::from_attrs(&action, target, arg.as_deref())
                .or_else(|| Action::from_attrs(&action, None, target))
                .ok_or_else(|| CommandError::UnknownAction(words[1..].join(" ")))?;
            Command::Event(UiEvent::Click(action))
        }
        ShellCommand::Input { field, value } => Command::Event(UiEvent::Input {
            field,
            value: value.join(" "),
        }),
        ShellCommand::Danger { item, level } => {
            Command::Event(UiEvent::CommitDangerLevel { item, value: level })
        }
        ShellCommand::Submit => Command::Event(UiEvent::Submit),
        ShellCommand::Close { trigger } => {
            Command::Event(UiEvent::Click(Action::CloseModal(trigger)))
        }
        ShellCommand::Confirm { accepted } => {
            Command::Event(UiEvent::Click(Action::Confirm(accepted)))
        }
        ShellCommand::Wait { ms } => Command::Wait(Duration::from_millis(ms)),
        ShellCommand::Show => Command::Show,
        ShellCommand::Quit => Command::Quit,
    };
    Ok(command)
}

/// Drive the panel from stdin until EOF or `quit`
pub async fn run(panel: KitPanel) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    panel.start().await;
    print_document(&mut stdout, &panel).await?;

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Empty) => continue,
            Ok(Command::Quit) => break,
            Ok(Command::Help(text)) => {
                stdout.write_all(format!("{text}\n").as_bytes()).await?;
            }
            Ok(Command::Show) => print_document(&mut stdout, &panel).await?,
            Ok(Command::Wait(duration)) => {
                tokio::time::sleep(duration).await;
                print_document(&mut stdout, &panel).await?;
            }
            Ok(Command::Event(event)) => {
                panel.dispatch(event).await;
                print_document(&mut stdout, &panel).await?;
            }
            Err(err) => {
                let message = err.to_string();
                stdout.write_all(format!("{}\n", message.trim_end()).as_bytes()).await?;
            }
        }
        stdout.flush().await?;
    }
    Ok(())
}

async fn print_document(stdout: &mut tokio::io::Stdout, panel: &KitPanel) -> Result<()> {
    let snapshot = panel.document().snapshot();
    stdout.write_all(snapshot.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
