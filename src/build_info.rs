//! Compile-time build metadata
//!
//! The build script stamps each compilation with a sequential build number
//! and a UTC timestamp; the cargo package facts also feed the catalog
//! client's user agent.

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sequential build number stamped by the build script
pub const BUILD_NUMBER: &str = match option_env!("DRA_BUILD_NUMBER") {
    Some(n) => n,
    None => "0",
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("DRA_BUILD_TIMESTAMP") {
    Some(ts) => ts,
    None => "unknown",
};

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!(
        "{} {} (build {}, compiled {})",
        NAME, VERSION, BUILD_NUMBER, BUILD_TIMESTAMP
    );
}
