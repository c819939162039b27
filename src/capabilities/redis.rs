//! Redis capability values.
//!
//! The info schema mirrors the sections of the `INFO` reply.

use super::registry::{CapabilityDescriptor, ConnectionType, Field, InfoCategory};
use crate::values::ValueType;

const STRING: ValueType = ValueType::String;
const INT: ValueType = ValueType::Integer;
const UINT: ValueType = ValueType::UInteger;
const FLOAT: ValueType = ValueType::Float;

const SERVER_FIELDS: &[Field] = &[
    Field::new("redis_version", STRING),
    Field::new("redis_git_sha1", STRING),
    Field::new("redis_git_dirty", STRING),
    Field::new("redis_build_id", STRING),
    Field::new("redis_mode", STRING),
    Field::new("os", STRING),
    Field::new("arch_bits", UINT),
    Field::new("multiplexing_api", STRING),
    Field::new("gcc_version", STRING),
    Field::new("process_id", UINT),
    Field::new("run_id", STRING),
    Field::new("tcp_port", UINT),
    Field::new("uptime_in_seconds", UINT),
    Field::new("uptime_in_days", UINT),
    Field::new("hz", UINT),
    Field::new("lru_clock", UINT),
];

const CLIENTS_FIELDS: &[Field] = &[
    Field::new("connected_clients", UINT),
    Field::new("client_longest_output_list", UINT),
    Field::new("client_biggest_input_buf", UINT),
    Field::new("blocked_clients", UINT),
];

const MEMORY_FIELDS: &[Field] = &[
    Field::new("used_memory", UINT),
    Field::new("used_memory_human", STRING),
    Field::new("used_memory_rss", UINT),
    Field::new("used_memory_peak", UINT),
    Field::new("used_memory_peak_human", STRING),
    Field::new("used_memory_lua", UINT),
    Field::new("mem_fragmentation_ratio", FLOAT),
    Field::new("mem_allocator", STRING),
];

const PERSISTENCE_FIELDS: &[Field] = &[
    Field::new("loading", UINT),
    Field::new("rdb_changes_since_last_save", UINT),
    Field::new("rdb_bgsave_in_progress", UINT),
    Field::new("rdb_last_save_time", UINT),
    Field::new("rdb_last_bgsave_status", STRING),
    Field::new("rdb_last_bgsave_time_sec", INT),
    Field::new("rdb_current_bgsave_time_sec", INT),
    Field::new("aof_enabled", UINT),
    Field::new("aof_rewrite_in_progress", UINT),
    Field::new("aof_rewrite_scheduled", UINT),
    Field::new("aof_last_rewrite_time_sec", INT),
    Field::new("aof_current_rewrite_time_sec", INT),
    Field::new("aof_last_bgrewrite_status", STRING),
    Field::new("aof_last_write_status", STRING),
];

const STATS_FIELDS: &[Field] = &[
    Field::new("total_connections_received", UINT),
    Field::new("total_commands_processed", UINT),
    Field::new("instantaneous_ops_per_sec", UINT),
    Field::new("rejected_connections", UINT),
    Field::new("sync_full", UINT),
    Field::new("sync_partial_ok", UINT),
    Field::new("sync_partial_err", UINT),
    Field::new("expired_keys", UINT),
    Field::new("evicted_keys", UINT),
    Field::new("keyspace_hits", UINT),
    Field::new("keyspace_misses", UINT),
    Field::new("pubsub_channels", UINT),
    Field::new("pubsub_patterns", UINT),
    Field::new("latest_fork_usec", UINT),
];

const REPLICATION_FIELDS: &[Field] = &[
    Field::new("role", STRING),
    Field::new("connected_slaves", UINT),
    Field::new("master_repl_offset", UINT),
    Field::new("repl_backlog_active", UINT),
    Field::new("repl_backlog_size", UINT),
    Field::new("repl_backlog_first_byte_offset", UINT),
    Field::new("repl_backlog_histlen", UINT),
];

const CPU_FIELDS: &[Field] = &[
    Field::new("used_cpu_sys", FLOAT),
    Field::new("used_cpu_user", FLOAT),
    Field::new("used_cpu_sys_children", FLOAT),
    Field::new("used_cpu_user_children", FLOAT),
];

// Keyspace lines are free-form (`db0:keys=1,expires=0`).
const KEYSPACE_FIELDS: &[Field] = &[];

/// Builds the Redis descriptor.
pub(crate) fn descriptor() -> CapabilityDescriptor {
    let sections: [(&'static str, &[Field]); 8] = [
        ("Server", SERVER_FIELDS),
        ("Clients", CLIENTS_FIELDS),
        ("Memory", MEMORY_FIELDS),
        ("Persistence", PERSISTENCE_FIELDS),
        ("Stats", STATS_FIELDS),
        ("Replication", REPLICATION_FIELDS),
        ("CPU", CPU_FIELDS),
        ("Keyspace", KEYSPACE_FIELDS),
    ];

    CapabilityDescriptor {
        connection_type: ConnectionType::Redis,
        supported_types: vec![
            ValueType::String,
            ValueType::Array,
            ValueType::Set,
            ValueType::ZSet,
            ValueType::Hash,
        ],
        info_fields: sections
            .into_iter()
            .map(|(name, fields)| InfoCategory::new(name, fields.to_vec()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_unique() {
        let desc = descriptor();
        let mut seen = std::collections::HashSet::new();
        for category in &desc.info_fields {
            for field in &category.fields {
                assert!(seen.insert(field.name), "duplicate field {}", field.name);
            }
        }
    }

    #[test]
    fn test_memory_fields() {
        let desc = descriptor();
        let memory = &desc.info_fields[2];
        assert_eq!(memory.name, "Memory");
        assert!(memory.field("used_memory").unwrap().is_integral());
        assert!(!memory.field("mem_fragmentation_ratio").unwrap().is_integral());
        assert!(memory.field("no_such_field").is_none());
    }
}
