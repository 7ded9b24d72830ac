//! Output helpers for CLI results.

use serde::Serialize;

/// Print `data` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
