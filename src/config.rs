/// Address the server binds to when `SPIDER_BIND_ADDR` is not set
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9000";
pub const BIND_ADDR_ENV: &str = "SPIDER_BIND_ADDR";

/// Seconds of silence before a session is dropped
pub const SESSION_TIMEOUT_SECONDS: u64 = 30;
pub const CLEANUP_INTERVAL_SECONDS: u64 = 5;

/// Largest datagram the server accepts
pub const RECV_BUFFER_SIZE: usize = 1024;

/// Default log directive, extended by `RUST_LOG`
pub const LOG_DIRECTIVE: &str = "spider_arena=debug";

pub fn bind_addr() -> String {
    resolve_bind_addr(std::env::var(BIND_ADDR_ENV).ok())
}

fn resolve_bind_addr(from_env: Option<String>) -> String {
    match from_env {
        Some(addr) if !addr.trim().is_empty() => addr.trim().to_string(),
        _ => DEFAULT_BIND_ADDR.to_string(),
    }
}
