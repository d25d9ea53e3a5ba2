use crate::audio::AudioSink;
use crate::event_log::LogSink;
use crate::flow::{NavAction, Screen, ScreenFlowController};
use crate::game_state::{MAX_TRIES, RoundStatus};
use crate::selector::CategoryChoice;
use crate::wordbank::Difficulty;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_FPS: u32 = 30;

/// Hangman: guess the word or solve the riddle before the gallows are complete
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Words document: category -> difficulty -> list of words
    #[arg(long = "words", requires = "riddles_path")]
    pub words_path: Option<PathBuf>,

    /// Riddles document: difficulty -> list of [clue, answer] pairs
    #[arg(long = "riddles", requires = "words_path")]
    pub riddles_path: Option<PathBuf>,

    /// Game log file (appended to)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Start with sound off
    #[arg(long)]
    pub mute: bool,

    /// Line-based play on stdin/stdout instead of the full-screen UI
    #[arg(long)]
    pub plain: bool,

    /// Frames per second of the full-screen UI
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=120))]
    pub fps: u32,

    /// Write diagnostic logs to this file
    #[arg(long = "trace-file")]
    pub trace_file: Option<PathBuf>,
}

impl Cli {
    /// Both corpus documents, when overridden on the command line.
    #[must_use]
    pub fn corpus_paths(&self) -> Option<(&Path, &Path)> {
        match (&self.words_path, &self.riddles_path) {
            (Some(words), Some(riddles)) => Some((words.as_path(), riddles.as_path())),
            _ => None,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Plain (line-based) frontend

#[derive(Debug, PartialEq, Eq)]
pub enum PlainInput {
    Action(NavAction),
    Quit,
    Empty,
    Invalid,
}

pub fn parse_command(screen: Screen, line: &str) -> PlainInput {
    let input = line.trim().to_lowercase();
    match input.as_str() {
        "" => return PlainInput::Empty,
        "quit" | "exit" => return PlainInput::Quit,
        "sound" => return PlainInput::Action(NavAction::ToggleSound),
        "back" if screen != Screen::Menu => return PlainInput::Action(NavAction::Back),
        _ => {}
    }

    let action = match screen {
        Screen::Menu => match input.as_str() {
            "start" | "s" => Some(NavAction::Start),
            _ => None,
        },
        Screen::Categories => match input.as_str() {
            "riddle" | "riddles" | "r" => Some(NavAction::ChooseCategory(CategoryChoice::Riddle)),
            "words" | "w" => Some(NavAction::ChooseCategory(CategoryChoice::Words)),
            _ => None,
        },
        Screen::Difficulty => match input.as_str() {
            "easy" | "e" => Some(NavAction::ChooseDifficulty(Difficulty::Easy)),
            "medium" | "m" => Some(NavAction::ChooseDifficulty(Difficulty::Medium)),
            "hard" | "h" => Some(NavAction::ChooseDifficulty(Difficulty::Hard)),
            _ => None,
        },
        Screen::Game => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => Some(NavAction::Guess(c)),
                _ if input == "restart" || input == "next" => Some(NavAction::Restart),
                _ => None,
            }
        }
    };
    action.map_or(PlainInput::Invalid, PlainInput::Action)
}

fn join_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn display_screen<W: Write, L: LogSink>(
    out: &mut W,
    controller: &ScreenFlowController<'_, L>,
) -> io::Result<()> {
    match controller.screen() {
        Screen::Menu => {
            writeln!(out, "\n== Hangman Game ==")?;
            writeln!(out, "Commands: start, sound, quit")?;
        }
        Screen::Categories => {
            writeln!(out, "\n== Categories ==")?;
            writeln!(out, "Commands: riddles, words, back")?;
        }
        Screen::Difficulty => {
            writeln!(out, "\n== Difficulty Level ==")?;
            writeln!(out, "Commands: easy, medium, hard, back")?;
        }
        Screen::Game => {
            if let Some(round) = controller.round() {
                writeln!(out, "\nHint: {}", round.hint())?;
                writeln!(out, "Word: {}", round.display_word())?;
                writeln!(out, "Correct guesses: {}", join_letters(&round.correct_letters()))?;
                writeln!(out, "Incorrect guesses: {}", join_letters(&round.incorrect_letters()))?;
                writeln!(out, "Attempts left: {}/{MAX_TRIES}", round.remaining_tries())?;
            }
            writeln!(out, "Type a letter, or: restart, back, quit")?;
        }
    }
    if let Some(e) = controller.last_error() {
        writeln!(out, "Cannot start a round: {e}")?;
    }
    Ok(())
}

fn display_result<W: Write, L: LogSink>(
    out: &mut W,
    controller: &ScreenFlowController<'_, L>,
    status: RoundStatus,
) -> io::Result<()> {
    let Some(round) = controller.round() else {
        return Ok(());
    };
    match status {
        RoundStatus::Won => writeln!(out, "You Won! Word: {}", round.answer()),
        RoundStatus::Lost => writeln!(out, "You Lost! Word: {}", round.answer()),
        RoundStatus::InProgress => Ok(()),
    }
}

/// Drive the controller from text commands until `quit` or end of input.
pub fn run_plain<R: BufRead, W: Write, L: LogSink>(
    controller: &mut ScreenFlowController<'_, L>,
    mut reader: R,
    mut out: W,
    audio: &mut dyn AudioSink,
) -> io::Result<()> {
    loop {
        display_screen(&mut out, controller)?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            writeln!(out, "\nExiting.")?;
            return Ok(());
        }

        match parse_command(controller.screen(), &line) {
            PlainInput::Quit => {
                writeln!(out, "Exiting.")?;
                return Ok(());
            }
            PlainInput::Empty => continue,
            PlainInput::Invalid => {
                writeln!(out, "Unknown command: {}", line.trim())?;
            }
            PlainInput::Action(action) => {
                // The error is kept by the controller and shown with the screen.
                let _ = controller.dispatch(action);
            }
        }

        if let Some(status) = controller.update() {
            display_result(&mut out, controller, status)?;
        }
        for sound in controller.take_sounds() {
            audio.play(sound);
        }
    }
}
