pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 3000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 10;
pub const DEFAULT_DB_MIN_IDLE: i64 = 2;
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: i64 = 5;
pub const DEFAULT_VERIFY_TIMEOUT_SECS: i64 = 5;
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const DEFAULT_MAX_PAGE_LIMIT: i64 = 20;
