pub mod oracle;
pub mod refresh;
pub mod server;
pub mod sources;

use std::path::Path;

use qsplit_core::{Oracle, SplitterConfig};

/// Load the config file (or defaults), applying the `--store` override.
/// Exits on unreadable or invalid configuration.
pub fn load_config(path: Option<&Path>, store: Option<&Path>) -> SplitterConfig {
    let mut config = match path {
        Some(p) => match SplitterConfig::from_file(p) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Invalid config {}: {e}", p.display());
                std::process::exit(2);
            }
        },
        None => SplitterConfig::default(),
    };
    if let Some(store) = store {
        config.store.path = store.to_path_buf();
    }
    config
}

pub fn make_oracle(config: &SplitterConfig) -> Oracle {
    let oracle = Oracle::from_config(config);
    log::debug!(
        "{} sources enabled, store at {}",
        oracle.aggregator().source_count(),
        config.store.path.display()
    );
    oracle
}

/// Print `err` and exit non-zero.
pub fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}

pub fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(e),
    }
}
