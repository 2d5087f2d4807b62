//! Interactive command shell
//!
//! Every input line goes through the same stages:
//!
//! 1. **validate**: tokenize and parse the line into a [Statement]
//! 2. **confirm**: ask the user before `drop_table` and `delete`
//! 3. **execute**: run the statement against the [Database]
//! 4. **time/log**: measure and log the execution, optionally print the time
//!
//! Errors from any stage are reported and the shell keeps reading.

use std::io::Write;
use std::time::{Duration, Instant};

use colored::Colorize;
use rustyline::error::ReadlineError;

use crate::ast::Statement;
use crate::config::ShellConfig;
use crate::database::{Database, Outcome};
use crate::error::{Error, ShellError};
use crate::formatter::OutputFormatter;
use crate::parser::Parser;

pub const HELP: &str = "\
***Data operations***

CRUD commands:
  insert into <table> values (<v1>, <v2>, ...)       - create a row
  select from <table>                                - read all rows
  select from <table> where <col> = <val>            - read matching rows
  update <table> set <col> = <val> where <col> = <val> - update matching rows
  delete from <table> where <col> = <val>            - delete matching rows
  info <table>                                       - describe a table

Table management:
  create_table <table> <col:type> ...                - create a table (types: int, str, bool)
  list_tables                                        - list tables
  drop_table <table>                                 - drop a table

General:
  help                                               - show this help
  exit                                               - quit";

/// Source of input lines for the shell.
pub trait LineReader {
    /// Reads one line, returning `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;

    /// Records a line in the reader's history, if it keeps one.
    fn add_history(&mut self, _line: &str) {}
}

impl LineReader for rustyline::DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.add_history_entry(line) {
            log::warn!("failed to record history: {e}");
        }
    }
}

/// Result of handling one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Text to show the user.
    Output(String),
    /// The user declined a confirmation; nothing was executed.
    Cancelled,
    /// Blank line.
    Empty,
    Exit,
}

pub struct Shell<R, W> {
    db: Database,
    reader: R,
    out: W,
    config: ShellConfig,
    formatter: OutputFormatter,
}

impl<R: LineReader, W: Write> Shell<R, W> {
    pub fn new(db: Database, reader: R, out: W, config: ShellConfig) -> Self {
        let formatter = OutputFormatter::new(config.color);
        Self {
            db,
            reader,
            out,
            config,
            formatter,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs the read-eval-print loop until `exit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        writeln!(self.out, "{HELP}\n")?;
        loop {
            let prompt = self.config.prompt.clone();
            let Some(line) = self.reader.read_line(&prompt)? else {
                break;
            };
            if !line.trim().is_empty() {
                self.reader.add_history(&line);
            }
            if !self.process(&line)? {
                break;
            }
        }
        Ok(())
    }

    /// Runs each line in order, reporting failures without stopping.
    ///
    /// Returns the number of lines that failed. Stops early on `exit`.
    pub fn run_lines<'a, I>(&mut self, lines: I) -> Result<usize, ShellError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut failed = 0;
        for line in lines {
            match self.handle_line(line) {
                Err(ShellError::Db(err)) => {
                    failed += 1;
                    self.report(&err)?;
                }
                other => {
                    if !self.emit(other?)? {
                        break;
                    }
                }
            }
        }
        Ok(failed)
    }

    /// Handles one line and prints the result. Returns false on `exit`.
    fn process(&mut self, line: &str) -> Result<bool, ShellError> {
        match self.handle_line(line) {
            Err(ShellError::Db(err)) => {
                self.report(&err)?;
                Ok(true)
            }
            other => self.emit(other?),
        }
    }

    fn emit(&mut self, reply: Reply) -> Result<bool, ShellError> {
        match reply {
            Reply::Output(text) => writeln!(self.out, "{text}")?,
            Reply::Cancelled => writeln!(self.out, "Operation cancelled.")?,
            Reply::Empty => {}
            Reply::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn report(&mut self, err: &Error) -> Result<(), ShellError> {
        log::warn!("command failed: {err}");
        let message = match err {
            Error::UnknownCommand(_) => err.to_string(),
            _ => format!("Error: {err}"),
        };
        if self.config.color {
            writeln!(self.out, "{}", message.red())?;
        } else {
            writeln!(self.out, "{message}")?;
        }
        Ok(())
    }

    /// Runs one line through the validate, confirm, execute and time/log
    /// stages.
    pub fn handle_line(&mut self, line: &str) -> Result<Reply, ShellError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Reply::Empty);
        }
        match line.to_lowercase().as_str() {
            "exit" => return Ok(Reply::Exit),
            "help" => return Ok(Reply::Output(HELP.to_string())),
            _ => {}
        }

        let statement = validate(line)?;

        if let Some(action) = statement.destructive_action() {
            if !self.confirm(action)? {
                log::info!("{} cancelled by user", statement.name());
                return Ok(Reply::Cancelled);
            }
        }

        let name = statement.name();
        let (outcome, elapsed) = timed(|| self.db.execute_statement(statement));
        log::info!("{name} finished in {:.3}s", elapsed.as_secs_f64());
        let outcome = outcome?;

        Ok(Reply::Output(self.render(name, &outcome, elapsed)))
    }

    fn confirm(&mut self, action: &str) -> Result<bool, ShellError> {
        if !self.config.confirm {
            return Ok(true);
        }
        let prompt = format!("Are you sure you want to perform \"{action}\"? [y/n]: ");
        let answer = self.reader.read_line(&prompt)?.unwrap_or_default();
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    fn render(&self, name: &str, outcome: &Outcome, elapsed: Duration) -> String {
        let mut text = self.formatter.format_outcome(outcome);
        if self.config.timing {
            text.push_str(&format!(
                "\nFunction {name} took {:.3} seconds.",
                elapsed.as_secs_f64()
            ));
        }
        text
    }
}

fn validate(line: &str) -> Result<Statement, Error> {
    Parser::parse_line(line)
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
