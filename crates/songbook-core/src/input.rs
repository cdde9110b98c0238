//! Read-validate-retry loop that turns one line of terminal input into one
//! typed property value.
//!
//! The loop is an explicit state machine:
//!
//! ```text
//! Prompting --line--> Validating --ok--> Accepted
//!     ^                   |
//!     +---- invalid ------+ (no previous value)
//!                         |
//!                         +-- invalid, previous value --> Validating(previous)
//! ```
//!
//! It terminates because a previous value is substituted at most once, and
//! end of input with nothing to fall back on is [`Error::InputClosed`].

use std::fmt;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::{Error, Result};
use crate::validation::{self, PropertyValue};

type CustomValidator<'a> = Box<dyn Fn(Option<&str>) -> bool + 'a>;

/// One request for a property value, with optional overrides for the
/// registry's prompt, error message and validator.
pub struct Ask<'a, T> {
    property: &'a str,
    old: Option<T>,
    validator: Option<CustomValidator<'a>>,
    prompt: Option<String>,
    error: Option<String>,
}

impl<'a, T: PropertyValue> Ask<'a, T> {
    #[must_use]
    pub fn new(property: &'a str) -> Self {
        Self {
            property,
            old: None,
            validator: None,
            prompt: None,
            error: None,
        }
    }

    /// Previous value: shown as a hint and used when the input is invalid.
    #[must_use]
    pub fn old(mut self, old: Option<T>) -> Self {
        self.old = old;
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: impl Fn(Option<&str>) -> bool + 'a) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl<T> fmt::Debug for Ask<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ask")
            .field("property", &self.property)
            .field("has_old", &self.old.is_some())
            .field("custom_validator", &self.validator.is_some())
            .field("prompt", &self.prompt)
            .field("error", &self.error)
            .finish()
    }
}

enum State {
    Prompting,
    Validating(Option<String>),
    Accepted(String),
}

/// Line-oriented prompt/response over any reader and writer.
#[derive(Debug)]
pub struct InputPipeline<R, W> {
    reader: R,
    writer: W,
}

impl InputPipeline<StdinLock<'static>, Stdout> {
    /// A pipeline over the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InputPipeline<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Read one line without its terminator; `None` at end of input.
    ///
    /// A line that is not valid UTF-8 reads as empty, which no validator
    /// accepts, so it is handled like any other invalid reply.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        while matches!(bytes.last(), Some(b'\n' | b'\r')) {
            bytes.pop();
        }
        match String::from_utf8(bytes) {
            Ok(line) => Ok(Some(line)),
            Err(e) => {
                log::warn!("Discarding input line that is not UTF-8: {e}");
                Ok(Some(String::new()))
            }
        }
    }

    /// Print `prompt` without a newline and read the reply.
    pub fn prompt_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        self.read_line()
    }

    /// Shorthand for a registry-driven [`Ask`] with an optional previous value.
    pub fn read<T: PropertyValue>(&mut self, property: &str, old: Option<T>) -> Result<T> {
        self.ask(Ask::new(property).old(old))
    }

    /// Acquire one validated, typed value.
    pub fn ask<T: PropertyValue>(&mut self, ask: Ask<'_, T>) -> Result<T> {
        let entry = validation::lookup(ask.property)?;
        if entry.kind != T::KIND {
            return Err(Error::InvariantViolation(format!(
                "property {} holds {:?} values, not {:?}",
                entry.name,
                entry.kind,
                T::KIND
            )));
        }

        let registered = entry.validator;
        let is_valid: &dyn Fn(Option<&str>) -> bool = match (&ask.validator, &registered) {
            (Some(custom), _) => custom.as_ref(),
            (None, Some(registered)) => registered,
            (None, None) => {
                return Err(Error::InvariantViolation(format!(
                    "property {} needs a caller-supplied validator",
                    entry.name
                )))
            }
        };

        let previous = ask.old.as_ref().map(PropertyValue::to_input);
        let prompt = ask
            .prompt
            .clone()
            .unwrap_or_else(|| entry.prompt(previous.as_deref()));
        let error = ask.error.as_deref().unwrap_or(entry.error);

        let mut substituted = false;
        let mut state = State::Prompting;
        let accepted = loop {
            state = match state {
                State::Prompting => State::Validating(self.prompt_line(&prompt)?),
                State::Validating(line) if is_valid(line.as_deref()) => {
                    State::Accepted(line.unwrap_or_default())
                }
                State::Validating(line) => match &previous {
                    Some(_) if substituted => {
                        return Err(Error::InvariantViolation(format!(
                            "previous value for {} fails its own validator",
                            entry.name
                        )))
                    }
                    Some(previous) => {
                        log::debug!(
                            "Keeping previous {} after input {:?}",
                            entry.name,
                            line.as_deref().unwrap_or_default()
                        );
                        substituted = true;
                        State::Validating(Some(previous.clone()))
                    }
                    None if line.is_none() => return Err(Error::InputClosed),
                    None => {
                        writeln!(self.writer, "{error}")?;
                        State::Prompting
                    }
                },
                State::Accepted(input) => break input,
            };
        };

        T::coerce(&accepted).ok_or_else(|| {
            Error::InvariantViolation(format!(
                "{} accepted {accepted:?} but it could not be converted",
                entry.name
            ))
        })
    }
}
