//! Line-oriented quiz loop over any reader/writer pair.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{Completion, QuizSession};
use crate::cli::{CliError, CliResult};
use crate::domain::Choice;

fn io_err(e: io::Error) -> CliError {
    CliError::io("quiz terminal", e)
}

/// What the player typed at the answer prompt.
enum Reply {
    Answer(Choice),
    Quit,
}

fn read_reply<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> CliResult<Reply> {
    let letters = Choice::ALL.iter().join("/");
    loop {
        write!(out, "Answer [{}] or q to quit: ", letters).map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            debug!("input closed");
            return Ok(Reply::Quit);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(Reply::Quit);
        }
        match line.parse::<Choice>() {
            Ok(choice) => return Ok(Reply::Answer(choice)),
            Err(e) => writeln!(out, "{}", e.to_string().yellow()).map_err(io_err)?,
        }
    }
}

/// Runs the session to completion.
///
/// Returns `None` when the player quits or input ends before the last question.
#[instrument(level = "debug", skip_all, fields(questions = session.len()))]
pub fn run_quiz<R: BufRead, W: Write>(
    session: &mut QuizSession<'_>,
    input: &mut R,
    out: &mut W,
    show_media: bool,
) -> CliResult<Option<Completion>> {
    while let (Some(question), Some(progress)) = (session.current(), session.progress()) {
        writeln!(out).map_err(io_err)?;
        writeln!(out, "{}", progress.to_string().cyan().bold()).map_err(io_err)?;
        writeln!(out, "{}", question.text().bold()).map_err(io_err)?;
        if show_media {
            if let Some(img) = &question.img {
                writeln!(out, "  [{}]", img.dimmed()).map_err(io_err)?;
            }
        }
        for (choice, text) in question.choices() {
            writeln!(out, "  {}) {}", choice, text).map_err(io_err)?;
        }

        let choice = match read_reply(input, out)? {
            Reply::Answer(choice) => choice,
            Reply::Quit => return Ok(None),
        };

        let outcome = session.answer(choice)?;
        if outcome.correct {
            writeln!(out, "{}", "Correct!".green()).map_err(io_err)?;
        } else {
            let expected = format!(
                "Wrong, the answer was {}: {}",
                outcome.expected,
                question.choice_text(outcome.expected)
            );
            writeln!(out, "{}", expected.red()).map_err(io_err)?;
        }
    }

    let summary = session.summary();
    if let Some(completion) = &summary {
        writeln!(out).map_err(io_err)?;
        writeln!(out, "{}", completion.to_string().bold()).map_err(io_err)?;
        writeln!(out, "Test completed").map_err(io_err)?;
    }
    Ok(summary)
}
