use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::{Error, Result};

/// Default filter for a `-v` count. `RUST_LOG` still wins when set.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Sends log output to `path`.
///
/// The display owns the terminal, so without a file no logger is installed
/// and the `log` macros stay silent.
pub fn init(path: Option<&Path>, verbose: u8) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Log {
            path: path.to_path_buf(),
            source,
        })?;

    // A logger may already be installed (tests, embedding); keep that one.
    let _ = Builder::from_env(Env::default().default_filter_or(level_for(verbose)))
        .target(Target::Pipe(Box::new(file)))
        .try_init();

    Ok(())
}
