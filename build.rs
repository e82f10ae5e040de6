//! Build script
//!
//! Stamps each compilation with a sequential build number (persisted in
//! build_number.txt next to the manifest) and the UTC build timestamp.

use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let counter = Path::new("build_number.txt");
    let build = fs::read_to_string(counter)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0)
        + 1;
    if let Err(e) = fs::write(counter, build.to_string()) {
        println!("cargo:warning=could not persist build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    println!("cargo:rustc-env=DRA_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=DRA_BUILD_TIMESTAMP={}", timestamp);
}
