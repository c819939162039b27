//! Redis Command Translator
//!
//! Maps key/value operations onto Redis verbs.
//!
//! ## Dispatch
//!
//! | Value type | Create   | Load                          |
//! |------------|----------|-------------------------------|
//! | Array      | `LPUSH`  | `LRANGE key 0 -1`             |
//! | Set        | `SADD`   | `SMEMBERS key`                |
//! | ZSet       | `ZADD`   | `ZRANGE key 0 -1 WITHSCORES`  |
//! | Hash       | `HMSET`  | `HGETALL key`                 |
//! | *other*    | `SET`    | `GET key`                     |
//!
//! Any type without a dedicated verb uses the generic `SET`/`GET` pair, so
//! an operation is never refused because of its value type.
//!
//! ## TTL
//!
//! - `change_key_ttl_command(key, NO_TTL)` -> `PERSIST key`
//! - `change_key_ttl_command(key, 60)` -> `EXPIRE key 60`

use super::command::{CommandInfo, CommandKind, CommandWriter, INFINITE_ARGS};
use super::{
    channel_text, command_name, key_text, printable_arg, value_text, CommandBuffer,
    CommandTranslator, TranslateError, TranslateResult,
};
use crate::keys::{KeyString, NKey, Ttl, NO_TTL};
use crate::values::{NDbKValue, NDbPSChannel, ValueType};
use tracing::{debug, trace};

/// Redis wire verbs.
pub mod verbs {
    pub const SET: &str = "SET";
    pub const GET: &str = "GET";
    pub const DEL: &str = "DEL";
    pub const RENAME: &str = "RENAME";
    pub const EXPIRE: &str = "EXPIRE";
    pub const PERSIST: &str = "PERSIST";
    pub const TTL: &str = "TTL";
    pub const PUBLISH: &str = "PUBLISH";
    pub const SUBSCRIBE: &str = "SUBSCRIBE";

    pub const LPUSH: &str = "LPUSH";
    pub const SADD: &str = "SADD";
    pub const ZADD: &str = "ZADD";
    pub const HMSET: &str = "HMSET";

    pub const LRANGE: &str = "LRANGE";
    pub const SMEMBERS: &str = "SMEMBERS";
    pub const ZRANGE: &str = "ZRANGE";
    pub const HGETALL: &str = "HGETALL";

    pub const SETEX: &str = "SETEX";
    pub const SETNX: &str = "SETNX";

    pub const INCR: &str = "INCR";
    pub const INCRBY: &str = "INCRBY";
    pub const INCRBYFLOAT: &str = "INCRBYFLOAT";
    pub const DECR: &str = "DECR";
    pub const DECRBY: &str = "DECRBY";

    /// Modifier that makes `ZRANGE` return scores.
    pub const WITHSCORES: &str = "WITHSCORES";
}

/// Verbs produced by `load_key_command`.
const LOAD_KEY_VERBS: [&str; 5] = [
    verbs::GET,
    verbs::LRANGE,
    verbs::SMEMBERS,
    verbs::ZRANGE,
    verbs::HGETALL,
];

const fn native(
    name: &'static str,
    params: &'static str,
    summary: &'static str,
    since: &'static str,
    example: &'static str,
    required_args: usize,
    optional_args: usize,
) -> CommandInfo {
    CommandInfo {
        name,
        params,
        summary,
        since,
        example,
        required_args,
        optional_args,
        kind: CommandKind::Native,
    }
}

/// Every Redis verb this translator can emit.
#[rustfmt::skip]
pub static REDIS_COMMANDS: &[CommandInfo] = &[
    native(verbs::SET, "<key> <value> [EX seconds] [PX milliseconds] [NX|XX]",
        "Set the string value of a key", "1.0.0", "SET mykey Hello", 2, 3),
    native(verbs::GET, "<key>", "Get the value of a key", "1.0.0", "GET mykey", 1, 0),
    native(verbs::DEL, "<key> [key ...]", "Delete a key", "1.0.0", "DEL key1 key2", 1, INFINITE_ARGS),
    native(verbs::RENAME, "<key> <newkey>", "Rename a key", "1.0.0", "RENAME mykey myotherkey", 2, 0),
    native(verbs::EXPIRE, "<key> <seconds>", "Set a key's time to live in seconds", "1.0.0",
        "EXPIRE mykey 10", 2, 0),
    native(verbs::PERSIST, "<key>", "Remove the expiration from a key", "2.2.0", "PERSIST mykey", 1, 0),
    native(verbs::TTL, "<key>", "Get the time to live for a key", "1.0.0", "TTL mykey", 1, 0),
    native(verbs::PUBLISH, "<channel> <message>", "Post a message to a channel", "2.0.0",
        "PUBLISH news hello", 2, 0),
    native(verbs::SUBSCRIBE, "<channel> [channel ...]", "Listen for messages published to the given channels",
        "2.0.0", "SUBSCRIBE news", 1, INFINITE_ARGS),
    native(verbs::LPUSH, "<key> <value> [value ...]", "Prepend one or multiple values to a list", "1.0.0",
        "LPUSH mylist world hello", 2, INFINITE_ARGS),
    native(verbs::SADD, "<key> <member> [member ...]", "Add one or more members to a set", "1.0.0",
        "SADD myset Hello World", 2, INFINITE_ARGS),
    native(verbs::ZADD, "<key> <score> <member> [score member ...]",
        "Add one or more members to a sorted set, or update its score if it already exists", "1.2.0",
        "ZADD myzset 1 one 2 two", 3, INFINITE_ARGS),
    native(verbs::HMSET, "<key> <field> <value> [field value ...]", "Set multiple hash fields to multiple values",
        "2.0.0", "HMSET myhash field1 Hello field2 World", 3, INFINITE_ARGS),
    native(verbs::LRANGE, "<key> <start> <stop>", "Get a range of elements from a list", "1.0.0",
        "LRANGE mylist 0 -1", 3, 0),
    native(verbs::SMEMBERS, "<key>", "Get all the members in a set", "1.0.0", "SMEMBERS myset", 1, 0),
    native(verbs::ZRANGE, "<key> <start> <stop> [WITHSCORES]", "Return a range of members in a sorted set, by index",
        "1.2.0", "ZRANGE myzset 0 -1 WITHSCORES", 3, 1),
    native(verbs::HGETALL, "<key>", "Get all the fields and values in a hash", "2.0.0", "HGETALL myhash", 1, 0),
    native(verbs::SETEX, "<key> <seconds> <value>", "Set the value and expiration of a key", "2.0.0",
        "SETEX mykey 10 Hello", 3, 0),
    native(verbs::SETNX, "<key> <value>", "Set the value of a key, only if the key does not exist", "1.0.0",
        "SETNX mykey Hello", 2, 0),
    native(verbs::INCR, "<key>", "Increment the integer value of a key by one", "1.0.0", "INCR mykey", 1, 0),
    native(verbs::INCRBY, "<key> <increment>", "Increment the integer value of a key by the given amount",
        "1.0.0", "INCRBY mykey 5", 2, 0),
    native(verbs::INCRBYFLOAT, "<key> <increment>", "Increment the float value of a key by the given amount",
        "2.6.0", "INCRBYFLOAT mykey 0.1", 2, 0),
    native(verbs::DECR, "<key>", "Decrement the integer value of a key by one", "1.0.0", "DECR mykey", 1, 0),
    native(verbs::DECRBY, "<key> <decrement>", "Decrement the integer value of a key by the given number",
        "1.0.0", "DECRBY mykey 3", 2, 0),
];

/// Translator for the Redis command family.
///
/// Holds nothing but a reference to an immutable command table, so it is
/// cheap to clone and safe to share between threads.
#[derive(Debug, Clone, Copy)]
pub struct RedisTranslator {
    commands: &'static [CommandInfo],
}

impl RedisTranslator {
    /// Creates a translator bound to `commands`.
    pub fn new(commands: &'static [CommandInfo]) -> Self {
        Self { commands }
    }

    /// `ZRANGE key start stop [WITHSCORES]`
    pub fn zrange(
        &self,
        key: &NKey,
        start: i64,
        stop: i64,
        withscores: bool,
    ) -> TranslateResult<CommandBuffer> {
        let mut wr = CommandWriter::new(verbs::ZRANGE)
            .arg(key_text(key)?)
            .arg(start)
            .arg(stop);
        if withscores {
            wr = wr.arg(verbs::WITHSCORES);
        }
        Ok(wr.finish())
    }

    /// `HGETALL key`
    pub fn hgetall(&self, key: &NKey) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::HGETALL).arg(key_text(key)?).finish())
    }

    /// `SMEMBERS key`
    pub fn smembers(&self, key: &NKey) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::SMEMBERS).arg(key_text(key)?).finish())
    }

    /// `LRANGE key start stop`
    pub fn lrange(&self, key: &NKey, start: i64, stop: i64) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::LRANGE)
            .arg(key_text(key)?)
            .arg(start)
            .arg(stop)
            .finish())
    }

    /// `SETEX key ttl value`
    pub fn setex(&self, key: &NDbKValue, ttl: Ttl) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::SETEX)
            .arg(key_text(key.key())?)
            .arg(ttl)
            .args(&value_text(key)?)
            .finish())
    }

    /// `SETNX key value`
    pub fn setnx(&self, key: &NDbKValue) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::SETNX)
            .arg(key_text(key.key())?)
            .args(&value_text(key)?)
            .finish())
    }

    /// `INCR key`
    pub fn incr(&self, key: &NKey) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::INCR).arg(key_text(key)?).finish())
    }

    /// `INCRBY key n`
    pub fn incrby(&self, key: &NKey, n: i64) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::INCRBY)
            .arg(key_text(key)?)
            .arg(n)
            .finish())
    }

    /// `INCRBYFLOAT key n`
    ///
    /// NaN and infinities have no wire form and are rejected.
    pub fn incrbyfloat(&self, key: &NKey, n: f64) -> TranslateResult<CommandBuffer> {
        if !n.is_finite() {
            return Err(TranslateError::invalid(format!(
                "increment must be a finite number, got {}",
                n
            )));
        }

        Ok(CommandWriter::new(verbs::INCRBYFLOAT)
            .arg(key_text(key)?)
            .arg(n)
            .finish())
    }

    /// `DECR key`
    pub fn decr(&self, key: &NKey) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::DECR).arg(key_text(key)?).finish())
    }

    /// `DECRBY key n`
    pub fn decrby(&self, key: &NKey, n: i64) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::DECRBY)
            .arg(key_text(key)?)
            .arg(n)
            .finish())
    }
}

impl Default for RedisTranslator {
    fn default() -> Self {
        Self::new(REDIS_COMMANDS)
    }
}

impl CommandTranslator for RedisTranslator {
    fn db_name(&self) -> &'static str {
        "Redis"
    }

    fn commands(&self) -> &[CommandInfo] {
        self.commands
    }

    fn create_key_command(&self, key: &NDbKValue) -> TranslateResult<CommandBuffer> {
        let key_str = key_text(key.key())?;
        let value = value_text(key)?;
        let ty = key.value_type();
        let verb = match ty {
            ValueType::Array => verbs::LPUSH,
            ValueType::Set => verbs::SADD,
            ValueType::ZSet => verbs::ZADD,
            ValueType::Hash => verbs::HMSET,
            ValueType::String => verbs::SET,
            _ => {
                debug!(value_type = %ty, "No dedicated create verb, using SET");
                verbs::SET
            }
        };

        let cmd = CommandWriter::new(verb)
            .arg(key_str)
            .args(&value)
            .finish();
        trace!(command = %cmd, "Built create command");
        Ok(cmd)
    }

    fn load_key_command(&self, key: &NKey, ty: ValueType) -> TranslateResult<CommandBuffer> {
        let key_str = key_text(key)?;
        let cmd = match ty {
            ValueType::Array => CommandWriter::new(verbs::LRANGE).arg(key_str).arg(0).arg(-1),
            ValueType::Set => CommandWriter::new(verbs::SMEMBERS).arg(key_str),
            ValueType::ZSet => CommandWriter::new(verbs::ZRANGE)
                .arg(key_str)
                .arg(0)
                .arg(-1)
                .arg(verbs::WITHSCORES),
            ValueType::Hash => CommandWriter::new(verbs::HGETALL).arg(key_str),
            ValueType::String => CommandWriter::new(verbs::GET).arg(key_str),
            _ => {
                debug!(value_type = %ty, "No dedicated load verb, using GET");
                CommandWriter::new(verbs::GET).arg(key_str)
            }
        }
        .finish();

        trace!(command = %cmd, "Built load command");
        Ok(cmd)
    }

    fn delete_key_command(&self, key: &NKey) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::DEL).arg(key_text(key)?).finish())
    }

    fn rename_key_command(
        &self,
        key: &NKey,
        new_name: &KeyString,
    ) -> TranslateResult<CommandBuffer> {
        if new_name.is_empty() {
            return Err(TranslateError::invalid("new key name is empty"));
        }

        Ok(CommandWriter::new(verbs::RENAME)
            .arg(key_text(key)?)
            .arg(new_name.key_data())
            .finish())
    }

    fn change_key_ttl_command(&self, key: &NKey, ttl: Ttl) -> TranslateResult<CommandBuffer> {
        let key_str = key_text(key)?;
        let cmd = if ttl == NO_TTL {
            CommandWriter::new(verbs::PERSIST).arg(key_str)
        } else {
            CommandWriter::new(verbs::EXPIRE).arg(key_str).arg(ttl)
        };
        Ok(cmd.finish())
    }

    fn load_key_ttl_command(&self, key: &NKey) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::TTL).arg(key_text(key)?).finish())
    }

    fn publish_command(
        &self,
        channel: &NDbPSChannel,
        message: &str,
    ) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::PUBLISH)
            .arg(channel_text(channel)?)
            .args(printable_arg("message", message)?)
            .finish())
    }

    fn subscribe_command(&self, channel: &NDbPSChannel) -> TranslateResult<CommandBuffer> {
        Ok(CommandWriter::new(verbs::SUBSCRIBE)
            .arg(channel_text(channel)?)
            .finish())
    }

    fn is_load_key_command(&self, cmd: &str) -> bool {
        let name = command_name(cmd);
        LOAD_KEY_VERBS.iter().any(|v| v.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::EXPIRED_TTL;
    use crate::values::Value;
    use std::sync::Arc;

    fn translator() -> RedisTranslator {
        RedisTranslator::default()
    }

    fn kv(key: &str, value: Value) -> NDbKValue {
        NDbKValue::new(NKey::persistent(key), value)
    }

    #[test]
    fn test_create_key_dispatch() {
        let t = translator();
        let cases = [
            (Value::array(["a", "b"]), "LPUSH k a b"),
            (Value::set(["x", "y"]), "SADD k x y"),
            (Value::zset([("m", 1.5)]), "ZADD k 1.5 m"),
            (Value::hash([("f", "v")]), "HMSET k f v"),
            (Value::string("hello"), "SET k hello"),
        ];

        for (value, expected) in cases {
            let cmd = t.create_key_command(&kv("k", value)).unwrap();
            assert_eq!(cmd.as_str(), expected);
        }
    }

    #[test]
    fn test_create_key_fallback_uses_set() {
        let t = translator();
        for value in [
            Value::Integer(42),
            Value::UInteger(7),
            Value::Float(0.5),
            Value::Boolean(true),
        ] {
            let cmd = t.create_key_command(&kv("k", value)).unwrap();
            assert_eq!(cmd.verb(), "SET");
        }

        let cmd = t.create_key_command(&kv("k", Value::Integer(42))).unwrap();
        assert_eq!(cmd.as_str(), "SET k 42");
    }

    #[test]
    fn test_create_key_without_value() {
        let t = translator();
        let cmd = t
            .create_key_command(&NDbKValue::without_value(NKey::persistent("k")))
            .unwrap();
        assert_eq!(cmd.as_str(), "SET k");
    }

    #[test]
    fn test_load_key_dispatch() {
        let t = translator();
        let key = NKey::persistent("k");
        let cases = [
            (ValueType::Array, "LRANGE k 0 -1"),
            (ValueType::Set, "SMEMBERS k"),
            (ValueType::ZSet, "ZRANGE k 0 -1 WITHSCORES"),
            (ValueType::Hash, "HGETALL k"),
            (ValueType::String, "GET k"),
            (ValueType::Integer, "GET k"),
            (ValueType::Null, "GET k"),
        ];

        for (ty, expected) in cases {
            assert_eq!(t.load_key_command(&key, ty).unwrap().as_str(), expected);
        }
    }

    #[test]
    fn test_create_and_load_pairs_are_consistent() {
        let t = translator();
        let values = [
            Value::array(["a"]),
            Value::set(["a"]),
            Value::zset([("a", 1.0)]),
            Value::hash([("a", "b")]),
            Value::string("a"),
        ];

        for value in values {
            let ty = value.value_type();
            let record = kv("k", value);
            let create = t.create_key_command(&record).unwrap();
            let load = t.load_key_command(record.key(), ty).unwrap();

            assert!(t.find_command(create.verb()).is_some());
            assert!(t.is_load_key_command(load.as_str()));
            assert!(!t.is_load_key_command(create.as_str()));
        }
    }

    #[test]
    fn test_hash_end_to_end() {
        let t = translator();
        let record = NDbKValue::new(
            NKey::new("user:1", NO_TTL),
            Value::hash([("field1", "v1"), ("field2", "v2")]),
        );

        let create = t.create_key_command(&record).unwrap();
        assert_eq!(create.as_str(), "HMSET user:1 field1 v1 field2 v2");

        let load = t.load_key_command(record.key(), ValueType::Hash).unwrap();
        assert_eq!(load.as_str(), "HGETALL user:1");
    }

    #[test]
    fn test_binary_key_end_to_end() {
        let t = translator();
        let key = NKey::persistent(KeyString::new(&b"\x00"[..]));

        let commands = [
            t.load_key_command(&key, ValueType::String).unwrap(),
            t.delete_key_command(&key).unwrap(),
            t.load_key_ttl_command(&key).unwrap(),
            t.create_key_command(&NDbKValue::new(key.clone(), Value::string("v")))
                .unwrap(),
        ];

        for cmd in commands {
            assert!(cmd.as_str().contains("\\x00"));
            assert!(!cmd.as_str().as_bytes().contains(&0));
        }
        assert_eq!(t.delete_key_command(&key).unwrap().as_str(), "DEL \\x00");
    }

    #[test]
    fn test_change_ttl() {
        let t = translator();
        let key = NKey::persistent("session");

        assert_eq!(
            t.change_key_ttl_command(&key, NO_TTL).unwrap().as_str(),
            "PERSIST session"
        );
        assert_eq!(
            t.change_key_ttl_command(&key, 60).unwrap().as_str(),
            "EXPIRE session 60"
        );
        assert_eq!(
            t.load_key_ttl_command(&key).unwrap().as_str(),
            "TTL session"
        );

        // Only NO_TTL is special; other sentinels are passed through.
        assert_eq!(
            t.change_key_ttl_command(&key, EXPIRED_TTL).unwrap().as_str(),
            "EXPIRE session -2"
        );
    }

    #[test]
    fn test_delete_and_rename() {
        let t = translator();
        let key = NKey::persistent("old");

        assert_eq!(t.delete_key_command(&key).unwrap().as_str(), "DEL old");
        assert_eq!(
            t.rename_key_command(&key, &KeyString::new("new"))
                .unwrap()
                .as_str(),
            "RENAME old new"
        );
        assert!(matches!(
            t.rename_key_command(&key, &KeyString::default()),
            Err(TranslateError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_pubsub() {
        let t = translator();
        let channel = NDbPSChannel::from("news");

        assert_eq!(
            t.publish_command(&channel, "hello").unwrap().as_str(),
            "PUBLISH news hello"
        );
        assert_eq!(
            t.subscribe_command(&channel).unwrap().as_str(),
            "SUBSCRIBE news"
        );
        assert!(t.subscribe_command(&NDbPSChannel::default()).is_err());
        assert!(t.publish_command(&NDbPSChannel::default(), "x").is_err());
    }

    #[test]
    fn test_line_breaks_in_values_are_rejected() {
        let t = translator();
        let record = kv("k", Value::string("v\r\nFLUSHALL"));

        assert!(matches!(
            t.create_key_command(&record),
            Err(TranslateError::InvalidArgument(_))
        ));
        assert!(t.setex(&record, 10).is_err());
        assert!(t.setnx(&record).is_err());

        let hash = kv("h", Value::hash([("f", "a\nDEL x")]));
        assert!(t.create_key_command(&hash).is_err());

        let list = kv("l", Value::array(["ok", "tab\there"]));
        assert!(t.create_key_command(&list).is_err());
    }

    #[test]
    fn test_line_breaks_in_pubsub_are_rejected() {
        let t = translator();
        let bad_channel = NDbPSChannel::from("ch\nDEL x");

        assert!(matches!(
            t.publish_command(&bad_channel, "m"),
            Err(TranslateError::InvalidArgument(_))
        ));
        assert!(t.subscribe_command(&bad_channel).is_err());
        assert!(matches!(
            t.publish_command(&NDbPSChannel::from("news"), "m\r\nFLUSHALL"),
            Err(TranslateError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_non_finite_zset_score_is_rejected() {
        let t = translator();

        for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let record = kv("z", Value::zset([("a", 1.0), ("b", score)]));
            assert!(matches!(
                t.create_key_command(&record),
                Err(TranslateError::InvalidArgument(_))
            ));
        }

        let record = kv("z", Value::zset([("a", -0.5)]));
        assert_eq!(t.create_key_command(&record).unwrap().as_str(), "ZADD z -0.5 a");
    }

    #[test]
    fn test_produced_commands_are_printable() {
        let t = translator();
        let key = NKey::persistent(KeyString::new(&b"bin\x00\xff"[..]));
        let commands = [
            t.create_key_command(&NDbKValue::new(key.clone(), Value::hash([("f", "v w")])))
                .unwrap(),
            t.publish_command(&NDbPSChannel::from("news"), "hello there").unwrap(),
            t.delete_key_command(&key).unwrap(),
        ];

        for cmd in commands {
            assert!(!crate::keys::is_binary_key(cmd.as_str().as_bytes()), "{}", cmd);
        }
    }

    #[test]
    fn test_zrange_withscores() {
        let t = translator();
        let key = NKey::persistent("board");

        assert_eq!(
            t.zrange(&key, 0, -1, true).unwrap().as_str(),
            "ZRANGE board 0 -1 WITHSCORES"
        );
        assert_eq!(
            t.zrange(&key, 0, -1, false).unwrap().as_str(),
            "ZRANGE board 0 -1"
        );
    }

    #[test]
    fn test_read_helpers() {
        let t = translator();
        let key = NKey::persistent("k");

        assert_eq!(t.hgetall(&key).unwrap().as_str(), "HGETALL k");
        assert_eq!(t.smembers(&key).unwrap().as_str(), "SMEMBERS k");
        assert_eq!(t.lrange(&key, 2, 5).unwrap().as_str(), "LRANGE k 2 5");
    }

    #[test]
    fn test_set_helpers() {
        let t = translator();
        let record = kv("k", Value::string("v"));

        assert_eq!(t.setex(&record, 10).unwrap().as_str(), "SETEX k 10 v");
        assert_eq!(t.setnx(&record).unwrap().as_str(), "SETNX k v");
    }

    #[test]
    fn test_counters() {
        let t = translator();
        let key = NKey::persistent("hits");

        assert_eq!(t.incr(&key).unwrap().as_str(), "INCR hits");
        assert_eq!(t.incrby(&key, 5).unwrap().as_str(), "INCRBY hits 5");
        assert_eq!(
            t.incrbyfloat(&key, 0.25).unwrap().as_str(),
            "INCRBYFLOAT hits 0.25"
        );
        assert_eq!(t.decr(&key).unwrap().as_str(), "DECR hits");
        assert_eq!(t.decrby(&key, 3).unwrap().as_str(), "DECRBY hits 3");
    }

    #[test]
    fn test_non_finite_float_increment() {
        let t = translator();
        let key = NKey::persistent("hits");
        assert!(t.incrbyfloat(&key, f64::NAN).is_err());
        assert!(t.incrbyfloat(&key, f64::INFINITY).is_err());
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let t = translator();
        let key = NKey::default();

        assert!(matches!(
            t.delete_key_command(&key),
            Err(TranslateError::InvalidArgument(_))
        ));
        assert!(t.load_key_command(&key, ValueType::Hash).is_err());
        assert!(t.incr(&key).is_err());
    }

    #[test]
    fn test_is_load_key_command() {
        let t = translator();

        for verb in ["GET", "LRANGE", "SMEMBERS", "ZRANGE", "HGETALL"] {
            assert!(t.is_load_key_command(verb), "{} should be a load verb", verb);
        }
        assert!(t.is_load_key_command("get mykey"));
        assert!(t.is_load_key_command("ZRANGE k 0 -1 WITHSCORES"));

        for verb in [
            "SET", "LPUSH", "SADD", "ZADD", "HMSET", "DEL", "RENAME", "EXPIRE", "PERSIST",
            "TTL", "INCR", "INCRBY", "INCRBYFLOAT", "DECR", "DECRBY", "PUBLISH", "SUBSCRIBE",
            "SETEX", "SETNX", "", "GETSET",
        ] {
            assert!(!t.is_load_key_command(verb), "{} should not be a load verb", verb);
        }
    }

    #[test]
    fn test_every_produced_verb_is_in_table() {
        let t = translator();
        let key = NKey::persistent("k");
        let record = kv("k", Value::string("v"));

        let produced = [
            t.create_key_command(&record).unwrap(),
            t.delete_key_command(&key).unwrap(),
            t.rename_key_command(&key, &KeyString::new("n")).unwrap(),
            t.change_key_ttl_command(&key, NO_TTL).unwrap(),
            t.change_key_ttl_command(&key, 5).unwrap(),
            t.load_key_ttl_command(&key).unwrap(),
            t.publish_command(&NDbPSChannel::from("c"), "m").unwrap(),
            t.subscribe_command(&NDbPSChannel::from("c")).unwrap(),
            t.zrange(&key, 0, 1, true).unwrap(),
            t.hgetall(&key).unwrap(),
            t.smembers(&key).unwrap(),
            t.lrange(&key, 0, 1).unwrap(),
            t.setex(&record, 1).unwrap(),
            t.setnx(&record).unwrap(),
            t.incr(&key).unwrap(),
            t.incrby(&key, 1).unwrap(),
            t.incrbyfloat(&key, 1.5).unwrap(),
            t.decr(&key).unwrap(),
            t.decrby(&key, 1).unwrap(),
        ];

        for cmd in produced {
            let info = t
                .test_command_line(cmd.as_str())
                .unwrap_or_else(|e| panic!("{}: {}", cmd, e));
            assert_eq!(info.kind, CommandKind::Native);
        }
    }

    #[test]
    fn test_command_line_checks() {
        let t = translator();

        assert!(matches!(
            t.test_command_line("FLUSHALL"),
            Err(TranslateError::UnknownCommand(name)) if name == "FLUSHALL"
        ));
        assert!(matches!(
            t.test_command_line("   "),
            Err(TranslateError::InvalidArgument(_))
        ));
        assert!(matches!(
            t.test_command_line("GET a b"),
            Err(TranslateError::WrongArgumentCount { command: "GET", got: 2, .. })
        ));
        assert_eq!(t.test_command_line("zrange k 0 -1").unwrap().name, "ZRANGE");
        assert!(t.test_command_line("DEL a b c d").is_ok());
    }

    #[test]
    fn test_find_command_ignores_case() {
        let t = translator();
        assert_eq!(t.find_command("hgetall").unwrap().name, "HGETALL");
        assert!(t.find_command("NOPE").is_none());
        assert_eq!(t.db_name(), "Redis");
        assert_eq!(t.commands().len(), REDIS_COMMANDS.len());
    }

    #[test]
    fn test_command_table_has_unique_names() {
        let mut names: Vec<&str> = REDIS_COMMANDS.iter().map(|c| c.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[tokio::test]
    async fn test_concurrent_translation() {
        let t: Arc<dyn CommandTranslator> = Arc::new(translator());
        let mut handles = Vec::new();

        for i in 0..32 {
            let t = Arc::clone(&t);
            handles.push(tokio::spawn(async move {
                let key = NKey::persistent(format!("key:{}", i).as_str());
                let create = t
                    .create_key_command(&NDbKValue::new(key.clone(), Value::Integer(i)))
                    .unwrap();
                let load = t.load_key_command(&key, ValueType::Integer).unwrap();
                (create, load)
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            let (create, load) = handle.await.unwrap();
            assert_eq!(create.as_str(), format!("SET key:{} {}", i, i));
            assert_eq!(load.as_str(), format!("GET key:{}", i));
        }
    }

    #[test]
    fn test_translator_is_shareable_across_threads() {
        let t = Arc::new(translator());
        let threads: Vec<_> = (0..4)
            .map(|i| {
                let t = Arc::clone(&t);
                std::thread::spawn(move || {
                    t.change_key_ttl_command(&NKey::persistent("k"), i).unwrap()
                })
            })
            .collect();

        for (i, th) in threads.into_iter().enumerate() {
            assert_eq!(th.join().unwrap().as_str(), format!("EXPIRE k {}", i));
        }
    }
}
