//! Termination signal handling
//!
//! The first SIGINT/SIGTERM cancels the run: workers finish the file they
//! are on and stop claiming new ones. A second signal exits immediately.

use crate::sync::CancellationToken;
use pagewarm_core::{Error, Result};

/// Route SIGINT and SIGTERM into `token`
#[cfg(unix)]
pub fn install_cancel_handler(token: CancellationToken) -> Result<()> {
    use signal_hook::{consts::SIGINT, consts::SIGTERM, iterator::Signals};
    use std::thread;

    let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(|e| {
        Error::configuration(format!("failed to register signal handlers: {e}"))
    })?;

    thread::Builder::new()
        .name("pagewarm-signals".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                if token.is_cancelled() {
                    tracing::warn!(signal = sig, "second signal, exiting immediately");
                    std::process::exit(128 + sig);
                }
                tracing::info!(signal = sig, "received signal, stopping after in-flight files");
                token.cancel();
            }
        })
        .map_err(|e| Error::configuration(format!("failed to spawn signal thread: {e}")))?;

    Ok(())
}

#[cfg(not(unix))]
pub fn install_cancel_handler(_token: CancellationToken) -> Result<()> {
    Ok(())
}
