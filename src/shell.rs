//! Interactive Shell
//!
//! A small line-oriented front end over the translator. Each input line
//! names an operation; the output is the wire command the translator builds
//! (or a description, for the introspection commands).
//!
//! ## Grammar
//!
//! ```text
//! create <key> <type> [value ...]     ttl <key> <seconds|none>
//! load <key> <type>                   getttl <key>
//! delete <key>                        publish <channel> <message ...>
//! rename <key> <newkey>               subscribe <channel>
//! ns <key>                            isload <command ...>
//! check <command ...>                 types | info | help | quit
//! ```
//!
//! Keys may contain `\xHH` escapes to enter arbitrary bytes, e.g. `a\x00b`.

use crate::capabilities::{info_fields, supported_types, ConnectionType};
use crate::keys::{KeyString, NKey, StringKey, Ttl, NO_TTL};
use crate::translator::{CommandTranslator, RedisTranslator, TranslateError};
use crate::values::{NDbKValue, NDbPSChannel, Value, ValueType};
use bytes::{Bytes, BytesMut};
use std::fmt::Write;
use thiserror::Error;
use tracing::debug;

/// Errors produced while parsing or executing a shell line.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShellError {
    #[error("unknown shell command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invalid key escape: {0}")]
    InvalidEscape(String),

    #[error("invalid UTF-8")]
    InvalidUtf8,

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Create { key: StringKey, value: Option<Value> },
    Load { key: StringKey, ty: ValueType },
    Delete { key: StringKey },
    Rename { key: StringKey, new_name: StringKey },
    Ttl { key: StringKey, ttl: Ttl },
    GetTtl { key: StringKey },
    Publish { channel: String, message: String },
    Subscribe { channel: String },
    Namespace { key: StringKey },
    IsLoad(String),
    Check(String),
    Types,
    Info,
    Help,
    Quit,
}

const HELP: &str = "\
create <key> <type> [value ...]   build the command that stores a key
load <key> <type>                 build the command that reads a key
delete <key>                      build the delete command
rename <key> <newkey>             build the rename command
ttl <key> <seconds|none>          build the expire/persist command
getttl <key>                      build the get-ttl command
publish <channel> <message ...>   build a publish command
subscribe <channel>               build a subscribe command
ns <key>                          show the namespace breakdown of a key
isload <command ...>              tell whether a command reads a key
check <command ...>               check a command against the command table
types                             list value types the backend stores
info                              list the backend's info fields
help                              show this help
quit                              leave the shell";

/// Splits the next complete line (including its `\n`) off the front of `buf`.
///
/// Returns `None` if `buf` holds no newline yet.
pub fn split_line(buf: &mut BytesMut) -> Option<Bytes> {
    let end = buf.iter().position(|&b| b == b'\n')?;
    Some(buf.split_to(end + 1).freeze())
}

/// Strips the line terminator and checks that the rest is UTF-8.
pub fn decode_line(line: &[u8]) -> ShellResult<&str> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    std::str::from_utf8(line).map_err(|_| ShellError::InvalidUtf8)
}

/// Decodes `\xHH` escapes into raw bytes.
pub fn unescape_key(input: &str) -> ShellResult<StringKey> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            let hex_digits = bytes
                .get(i + 2..i + 4)
                .ok_or_else(|| ShellError::InvalidEscape(input.to_string()))?;
            let mut decoded = [0u8; 1];
            hex::decode_to_slice(hex_digits, &mut decoded)
                .map_err(|e| ShellError::InvalidEscape(format!("{}: {}", input, e)))?;
            out.push(decoded[0]);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    Ok(StringKey::from(out))
}

fn parse_type(name: &str) -> ShellResult<ValueType> {
    ValueType::from_name(name).ok_or_else(|| ShellError::UnknownType(name.to_string()))
}

fn parse_number<T: std::str::FromStr>(word: &str) -> ShellResult<T> {
    word.parse()
        .map_err(|_| ShellError::InvalidValue(format!("'{}' is not a number", word)))
}

fn single<'a>(ty: ValueType, words: &[&'a str]) -> ShellResult<&'a str> {
    match words {
        [word] => Ok(*word),
        _ => Err(ShellError::InvalidValue(format!(
            "{} takes exactly one value",
            ty
        ))),
    }
}

fn parse_value(ty: ValueType, words: &[&str]) -> ShellResult<Option<Value>> {
    let value = match ty {
        ValueType::Null => return Ok(None),
        ValueType::String => Value::string(words.join(" ")),
        ValueType::Boolean => Value::Boolean(parse_bool(single(ty, words)?)?),
        ValueType::Integer => Value::Integer(parse_number(single(ty, words)?)?),
        ValueType::UInteger => Value::UInteger(parse_number(single(ty, words)?)?),
        ValueType::Float => Value::Float(parse_number(single(ty, words)?)?),
        ValueType::Array => Value::array(words.iter().copied()),
        ValueType::Set => Value::set(words.iter().copied()),
        ValueType::ZSet => {
            let pairs = pairs(ty, words)?;
            let mut members = Vec::with_capacity(pairs.len());
            for (member, score) in pairs {
                members.push((member, parse_number::<f64>(score)?));
            }
            Value::zset(members)
        }
        ValueType::Hash => Value::hash(pairs(ty, words)?),
    };
    Ok(Some(value))
}

fn parse_bool(word: &str) -> ShellResult<bool> {
    match word.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ShellError::InvalidValue(format!("'{}' is not a boolean", word))),
    }
}

fn pairs<'a>(ty: ValueType, words: &[&'a str]) -> ShellResult<Vec<(&'a str, &'a str)>> {
    if words.len() % 2 != 0 {
        return Err(ShellError::InvalidValue(format!(
            "{} needs an even number of words",
            ty
        )));
    }
    Ok(words.chunks(2).map(|c| (c[0], c[1])).collect())
}

/// Parses one input line. Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> ShellResult<Option<ShellCommand>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };

    let cmd = match (name.to_ascii_lowercase().as_str(), args) {
        ("create", [key, ty, rest @ ..]) => {
            let ty = parse_type(ty)?;
            ShellCommand::Create {
                key: unescape_key(key)?,
                value: parse_value(ty, rest)?,
            }
        }
        ("create", _) => return Err(ShellError::Usage("create <key> <type> [value ...]")),
        ("load", [key, ty]) => ShellCommand::Load {
            key: unescape_key(key)?,
            ty: parse_type(ty)?,
        },
        ("load", _) => return Err(ShellError::Usage("load <key> <type>")),
        ("delete" | "del", [key]) => ShellCommand::Delete {
            key: unescape_key(key)?,
        },
        ("delete" | "del", _) => return Err(ShellError::Usage("delete <key>")),
        ("rename", [key, new_name]) => ShellCommand::Rename {
            key: unescape_key(key)?,
            new_name: unescape_key(new_name)?,
        },
        ("rename", _) => return Err(ShellError::Usage("rename <key> <newkey>")),
        ("ttl", [key, ttl]) => {
            let ttl = if ttl.eq_ignore_ascii_case("none") {
                NO_TTL
            } else {
                parse_number(ttl)?
            };
            ShellCommand::Ttl {
                key: unescape_key(key)?,
                ttl,
            }
        }
        ("ttl", _) => return Err(ShellError::Usage("ttl <key> <seconds|none>")),
        ("getttl", [key]) => ShellCommand::GetTtl {
            key: unescape_key(key)?,
        },
        ("getttl", _) => return Err(ShellError::Usage("getttl <key>")),
        ("publish", [channel, message @ ..]) if !message.is_empty() => ShellCommand::Publish {
            channel: channel.to_string(),
            message: message.join(" "),
        },
        ("publish", _) => return Err(ShellError::Usage("publish <channel> <message ...>")),
        ("subscribe", [channel]) => ShellCommand::Subscribe {
            channel: channel.to_string(),
        },
        ("subscribe", _) => return Err(ShellError::Usage("subscribe <channel>")),
        ("ns", [key]) => ShellCommand::Namespace {
            key: unescape_key(key)?,
        },
        ("ns", _) => return Err(ShellError::Usage("ns <key>")),
        ("isload", [_, ..]) => ShellCommand::IsLoad(args.join(" ")),
        ("isload", _) => return Err(ShellError::Usage("isload <command ...>")),
        ("check", [_, ..]) => ShellCommand::Check(args.join(" ")),
        ("check", _) => return Err(ShellError::Usage("check <command ...>")),
        ("types", []) => ShellCommand::Types,
        ("info", []) => ShellCommand::Info,
        ("help", _) => ShellCommand::Help,
        ("quit" | "exit", _) => ShellCommand::Quit,
        _ => return Err(ShellError::UnknownCommand(name.to_string())),
    };

    Ok(Some(cmd))
}

/// Executes shell commands against a Redis translator.
#[derive(Debug, Clone)]
pub struct Shell {
    translator: RedisTranslator,
    separator: String,
}

impl Shell {
    pub fn new(translator: RedisTranslator, separator: impl Into<String>) -> Self {
        Self {
            translator,
            separator: separator.into(),
        }
    }

    /// Runs one command and returns the text to print.
    pub fn execute(&self, cmd: &ShellCommand) -> ShellResult<String> {
        let t = &self.translator;
        debug!(command = ?cmd, "Executing shell command");

        let out = match cmd {
            ShellCommand::Create { key, value } => {
                let nkey = NKey::persistent(KeyString::new(key.clone()));
                let record = match value {
                    Some(value) => NDbKValue::new(nkey, value.clone()),
                    None => NDbKValue::without_value(nkey),
                };
                t.create_key_command(&record)?.into_string()
            }
            ShellCommand::Load { key, ty } => t
                .load_key_command(&NKey::persistent(KeyString::new(key.clone())), *ty)?
                .into_string(),
            ShellCommand::Delete { key } => t
                .delete_key_command(&NKey::persistent(KeyString::new(key.clone())))?
                .into_string(),
            ShellCommand::Rename { key, new_name } => t
                .rename_key_command(
                    &NKey::persistent(KeyString::new(key.clone())),
                    &KeyString::new(new_name.clone()),
                )?
                .into_string(),
            ShellCommand::Ttl { key, ttl } => t
                .change_key_ttl_command(&NKey::persistent(KeyString::new(key.clone())), *ttl)?
                .into_string(),
            ShellCommand::GetTtl { key } => t
                .load_key_ttl_command(&NKey::persistent(KeyString::new(key.clone())))?
                .into_string(),
            ShellCommand::Publish { channel, message } => t
                .publish_command(&NDbPSChannel::from(channel.as_str()), message)?
                .into_string(),
            ShellCommand::Subscribe { channel } => t
                .subscribe_command(&NDbPSChannel::from(channel.as_str()))?
                .into_string(),
            ShellCommand::Namespace { key } => {
                let info = NKey::persistent(KeyString::new(key.clone())).info(&self.separator);
                format!(
                    "namespace: {}\nleaf: {}\ndepth: {}",
                    info.nspace(),
                    info.leaf().unwrap_or(""),
                    info.nspace_size()
                )
            }
            ShellCommand::IsLoad(line) => t.is_load_key_command(line).to_string(),
            ShellCommand::Check(line) => {
                let info = t.test_command_line(line)?;
                format!("OK ({})", info)
            }
            ShellCommand::Types => supported_types(ConnectionType::Redis)
                .iter()
                .map(|ty| ty.name())
                .collect::<Vec<_>>()
                .join(" "),
            ShellCommand::Info => {
                let mut out = String::new();
                for category in info_fields(ConnectionType::Redis) {
                    let _ = writeln!(out, "# {}", category.name);
                    for field in &category.fields {
                        let _ = writeln!(out, "{} ({})", field.name, field.value_type);
                    }
                }
                out.trim_end().to_string()
            }
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => String::new(),
        };

        Ok(out)
    }

    /// Parses and executes one line. Returns `Ok(None)` for blank lines.
    pub fn run_line(&self, line: &str) -> ShellResult<Option<String>> {
        match parse_line(line)? {
            Some(cmd) => self.execute(&cmd).map(Some),
            None => Ok(None),
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(RedisTranslator::default(), crate::keys::DEFAULT_NS_SEPARATOR)
    }
}
