//! Line-oriented command shell.
//!
//! Reads one command per line and writes one JSON document per line. Logs go
//! to stderr, so stdout can be consumed by another program.

use crate::commands;
use crate::error::{ErrorResponse, Result};
use crate::state::AppState;
use clap::{Parser, Subcommand, ValueEnum};
use exercise_core::AudioTrack;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(no_binary_name = true, name = "player", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// List units in the index
    Units,
    /// Open a unit from the index
    Load { unit_id: String },
    /// Validate a local unit file and open it
    Upload { path: PathBuf },
    /// Describe the current unit
    Current,
    /// Drop an option onto a target slot
    Place {
        exercise: String,
        slot: usize,
        option: String,
    },
    /// Take back the last placement
    Undo { exercise: String },
    /// Type an answer into a fill-in slot (no text clears it)
    Fill {
        exercise: String,
        slot: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Answer a reading question
    Select { question: usize, option: String },
    /// Grade an exercise
    Check { exercise: String },
    /// Clear an exercise
    Reset { exercise: String },
    /// Show the board or answer sheet of an exercise
    Status { exercise: String },
    /// Start or stop audio for a paragraph, implication or word
    Play { kind: TrackKind, number: u32 },
    /// Stop audio
    Stop,
    /// Leave the shell
    Quit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TrackKind {
    Paragraph,
    Implication,
    Vocab,
}

impl TrackKind {
    fn track(self, number: u32) -> AudioTrack {
        match self {
            Self::Paragraph => AudioTrack::Paragraph(number),
            Self::Implication => AudioTrack::Implication(number),
            Self::Vocab => AudioTrack::Vocabulary(number),
        }
    }
}

/// Run commands from `input` until it ends or `quit` is read.
pub fn run_shell<R: BufRead, W: Write>(
    state: &mut AppState,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let response = match ShellLine::try_parse_from(split_line(line)) {
            Ok(ShellLine {
                command: ShellCommand::Quit,
            }) => break,
            Ok(parsed) => match dispatch(state, parsed.command) {
                Ok(value) => value,
                Err(e) => {
                    tracing::debug!("Command failed: {}", e);
                    serde_json::to_value(ErrorResponse::from(&e))?
                }
            },
            Err(e) => json!({ "error": "usage", "message": e.to_string().trim_end() }),
        };

        writeln!(output, "{}", serde_json::to_string(&response)?)?;
        output.flush()?;
    }
    Ok(())
}

fn dispatch(state: &mut AppState, command: ShellCommand) -> Result<Value> {
    let value = match command {
        ShellCommand::Units => serde_json::to_value(commands::list_units(state))?,
        ShellCommand::Load { unit_id } => {
            serde_json::to_value(commands::load_unit(state, &unit_id)?)?
        }
        ShellCommand::Upload { path } => {
            serde_json::to_value(commands::upload_unit(state, &path)?)?
        }
        ShellCommand::Current => serde_json::to_value(commands::current_unit(state)?)?,
        ShellCommand::Place {
            exercise,
            slot,
            option,
        } => {
            let exercise = commands::parse_exercise(&exercise)?;
            serde_json::to_value(commands::place(state, exercise, slot, &option)?)?
        }
        ShellCommand::Undo { exercise } => {
            let exercise = commands::parse_exercise(&exercise)?;
            serde_json::to_value(commands::undo(state, exercise)?)?
        }
        ShellCommand::Fill {
            exercise,
            slot,
            text,
        } => {
            let exercise = commands::parse_exercise(&exercise)?;
            serde_json::to_value(commands::fill(state, exercise, slot, &text.join(" "))?)?
        }
        ShellCommand::Select { question, option } => {
            serde_json::to_value(commands::select(state, question, &option)?)?
        }
        ShellCommand::Check { exercise } => {
            let exercise = commands::parse_exercise(&exercise)?;
            serde_json::to_value(commands::check(state, exercise)?)?
        }
        ShellCommand::Reset { exercise } => {
            let exercise = commands::parse_exercise(&exercise)?;
            serde_json::to_value(commands::reset(state, exercise)?)?
        }
        ShellCommand::Status { exercise } => {
            let exercise = commands::parse_exercise(&exercise)?;
            serde_json::to_value(commands::status(state, exercise)?)?
        }
        ShellCommand::Play { kind, number } => {
            serde_json::to_value(commands::play(state, kind.track(number))?)?
        }
        ShellCommand::Stop => serde_json::to_value(commands::stop(state))?,
        ShellCommand::Quit => Value::Null,
    };
    Ok(value)
}

/// Split a line on whitespace, keeping double-quoted runs together.
fn split_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                has_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_line_honours_quotes() {
        assert_eq!(
            split_line(r#"place vocab 2 "set fire to""#),
            vec!["place", "vocab", "2", "set fire to"]
        );
        assert_eq!(split_line("  undo   vocab "), vec!["undo", "vocab"]);
        assert_eq!(split_line(r#"fill cloze 1 """#), vec!["fill", "cloze", "1", ""]);
    }

    #[test]
    fn parses_play_command() {
        let parsed = ShellLine::try_parse_from(["play", "implication", "3"]).unwrap();
        match parsed.command {
            ShellCommand::Play { kind, number } => {
                assert_eq!(kind.track(number), AudioTrack::Implication(3))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn fill_collects_remaining_words() {
        let parsed = ShellLine::try_parse_from(["fill", "cloze", "2", "burnt", "down"]).unwrap();
        match parsed.command {
            ShellCommand::Fill { text, .. } => assert_eq!(text.join(" "), "burnt down"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
