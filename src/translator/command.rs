//! Command definitions and the command text buffer.
//!
//! ## Wire Format
//!
//! Every produced command is a single printable line:
//!
//! ```text
//! <VERB> <arg1> <arg2> ... <argN>
//! ```
//!
//! Arguments are separated by one space. No quoting is applied; keys are
//! already printable thanks to [`KeyString`](crate::keys::KeyString).

use std::fmt;

/// Marks a command that accepts any number of optional arguments.
pub const INFINITE_ARGS: usize = usize::MAX;

/// How a command is handled by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Sent to the backend as is
    Native,
    /// Handled by the client itself, never sent
    Extended,
}

/// One wire verb known to a translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub params: &'static str,
    pub summary: &'static str,
    pub since: &'static str,
    pub example: &'static str,
    pub required_args: usize,
    pub optional_args: usize,
    pub kind: CommandKind,
}

impl CommandInfo {
    /// Returns true if `name` names this command (ASCII case-insensitive).
    pub fn is_equal_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the maximum argument count, or `None` if unbounded.
    pub fn max_args(&self) -> Option<usize> {
        if self.optional_args == INFINITE_ARGS {
            None
        } else {
            Some(self.required_args + self.optional_args)
        }
    }

    /// Returns true if `argc` arguments (verb excluded) are acceptable.
    pub fn accepts_args(&self, argc: usize) -> bool {
        argc >= self.required_args && self.max_args().map_or(true, |max| argc <= max)
    }

    /// Human readable description of the accepted argument count.
    pub fn expected_args(&self) -> String {
        match self.max_args() {
            None => format!("at least {}", self.required_args),
            Some(max) if max == self.required_args => max.to_string(),
            Some(max) => format!("{}..{}", self.required_args, max),
        }
    }
}

impl fmt::Display for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.params)
        }
    }
}

/// The text of one produced wire command.
///
/// Always printable; built only by translators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CommandBuffer(String);

impl CommandBuffer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the verb (first word) of the command.
    pub fn verb(&self) -> &str {
        self.0.split(' ').next().unwrap_or("")
    }
}

impl AsRef<str> for CommandBuffer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds a [`CommandBuffer`] one argument at a time.
#[derive(Debug)]
pub(crate) struct CommandWriter {
    buf: String,
}

impl CommandWriter {
    pub(crate) fn new(verb: &str) -> Self {
        let mut buf = String::with_capacity(64);
        buf.push_str(verb);
        Self { buf }
    }

    /// Appends one argument.
    pub(crate) fn arg(mut self, arg: impl fmt::Display) -> Self {
        use std::fmt::Write;
        self.buf.push(' ');
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{}", arg);
        self
    }

    /// Appends an already rendered argument fragment, skipping it if empty.
    pub(crate) fn args(mut self, fragment: &str) -> Self {
        if !fragment.is_empty() {
            self.buf.push(' ');
            self.buf.push_str(fragment);
        }
        self
    }

    pub(crate) fn finish(self) -> CommandBuffer {
        CommandBuffer(self.buf)
    }
}
