//! `uploadmock config show` — print the resolved configuration.

use ums_domain::config::Config;

pub fn show(config: &Config) {
    match serde_json::to_string_pretty(config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize config: {e}"),
    }
}
