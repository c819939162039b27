//! Command Translator Module
//!
//! Translators turn backend-agnostic key/value operations into the exact
//! command text a specific store understands. There is one implementation per
//! backend family; all of them share the [`CommandTranslator`] contract.
//!
//! ## Architecture
//!
//! ```text
//!  NKey / NDbKValue / ValueType
//!             │
//!             ▼
//! ┌────────────────────────┐      ┌──────────────────────┐
//! │   CommandTranslator    │─────>│ &'static [CommandInfo]│
//! │  (e.g. RedisTranslator)│      │  (read-only table)    │
//! └───────────┬────────────┘      └──────────────────────┘
//!             │
//!             ▼
//!      CommandBuffer  ──────>  transport (not part of this crate)
//! ```
//!
//! Translation is pure string formatting: no I/O, no locks, no state other
//! than the immutable command table. A translator can be shared across
//! threads behind an `Arc` and called concurrently.

pub mod command;
pub mod error;
pub mod redis;

// Re-export commonly used types
pub use command::{CommandBuffer, CommandInfo, CommandKind, INFINITE_ARGS};
pub use error::{TranslateError, TranslateResult};
pub use redis::{RedisTranslator, REDIS_COMMANDS};

use crate::keys::{is_binary_key, KeyString, NKey, Ttl};
use crate::values::{NDbKValue, NDbPSChannel, Value, ValueType};
use tracing::trace;

/// The contract every backend translator implements.
pub trait CommandTranslator: Send + Sync {
    /// Display name of the backend family.
    fn db_name(&self) -> &'static str;

    /// The command table this translator was built with.
    fn commands(&self) -> &[CommandInfo];

    /// Builds the command that stores `key` with its value.
    fn create_key_command(&self, key: &NDbKValue) -> TranslateResult<CommandBuffer>;

    /// Builds the command that reads `key`, expecting a value of type `ty`.
    fn load_key_command(&self, key: &NKey, ty: ValueType) -> TranslateResult<CommandBuffer>;

    fn delete_key_command(&self, key: &NKey) -> TranslateResult<CommandBuffer>;

    fn rename_key_command(&self, key: &NKey, new_name: &KeyString)
        -> TranslateResult<CommandBuffer>;

    /// Builds the command that sets (or clears, for `NO_TTL`) a key's expiry.
    fn change_key_ttl_command(&self, key: &NKey, ttl: Ttl) -> TranslateResult<CommandBuffer>;

    fn load_key_ttl_command(&self, key: &NKey) -> TranslateResult<CommandBuffer>;

    fn publish_command(
        &self,
        channel: &NDbPSChannel,
        message: &str,
    ) -> TranslateResult<CommandBuffer>;

    fn subscribe_command(&self, channel: &NDbPSChannel) -> TranslateResult<CommandBuffer>;

    /// Returns true if `cmd` (a verb or a full command line) is one of the
    /// verbs `load_key_command` can produce.
    fn is_load_key_command(&self, cmd: &str) -> bool;

    /// Looks up a command by name, ignoring ASCII case.
    fn find_command(&self, name: &str) -> Option<&CommandInfo> {
        self.commands().iter().find(|c| c.is_equal_name(name))
    }

    /// Checks that `argc` arguments (verb excluded) suit `cmd`.
    fn test_command_args(&self, cmd: &CommandInfo, argc: usize) -> TranslateResult<()> {
        if cmd.accepts_args(argc) {
            Ok(())
        } else {
            Err(TranslateError::WrongArgumentCount {
                command: cmd.name,
                got: argc,
                expected: cmd.expected_args(),
            })
        }
    }

    /// Tokenizes a command line, finds its verb and checks its arity.
    fn test_command_line(&self, line: &str) -> TranslateResult<&CommandInfo> {
        let mut tokens = line.split_whitespace();
        let verb = tokens
            .next()
            .ok_or_else(|| TranslateError::invalid("empty command line"))?;

        let cmd = self
            .find_command(verb)
            .ok_or_else(|| TranslateError::UnknownCommand(verb.to_string()))?;

        let argc = tokens.count();
        trace!(command = cmd.name, argc, "Checking command line");
        self.test_command_args(cmd, argc)?;
        Ok(cmd)
    }
}

/// Returns the first word of a command line.
pub(crate) fn command_name(cmd: &str) -> &str {
    cmd.split_whitespace().next().unwrap_or("")
}

/// Returns the printable key text, rejecting empty keys.
pub(crate) fn key_text(key: &NKey) -> TranslateResult<&str> {
    let text = key.key().key_data();
    if text.is_empty() {
        return Err(TranslateError::invalid("key is empty"));
    }
    Ok(text)
}

/// Returns `text` unchanged if it holds only printable bytes.
///
/// A line break inside an argument would start a second command on the wire.
pub(crate) fn printable_arg<'a>(what: &str, text: &'a str) -> TranslateResult<&'a str> {
    if is_binary_key(text.as_bytes()) {
        return Err(TranslateError::invalid(format!(
            "{} contains non-printable bytes",
            what
        )));
    }
    Ok(text)
}

/// Renders the value of `key` as printable trailing arguments.
pub(crate) fn value_text(key: &NDbKValue) -> TranslateResult<String> {
    if let Some(Value::ZSet(members)) = key.value().map(|v| &**v) {
        if let Some((member, score)) = members.iter().find(|(_, score)| !score.is_finite()) {
            return Err(TranslateError::invalid(format!(
                "score of '{}' must be a finite number, got {}",
                member, score
            )));
        }
    }

    let text = key.value_string();
    printable_arg("value", &text)?;
    Ok(text)
}

/// Returns the channel name, rejecting empty or non-printable names.
pub(crate) fn channel_text(channel: &NDbPSChannel) -> TranslateResult<&str> {
    if channel.name().is_empty() {
        return Err(TranslateError::invalid("channel name is empty"));
    }
    printable_arg("channel name", channel.name())
}
