//! Post-run idle state for sidecar deployments

use crate::sync::CancellationToken;

/// Park the calling thread until `token` is cancelled.
///
/// Entered only after all workers have been joined. The thread sleeps on a
/// condition variable; the signal handler releases it on SIGINT/SIGTERM.
pub fn hibernate(token: &CancellationToken) {
    tracing::info!("warming finished, hibernating until terminated");
    token.wait();
    tracing::info!("leaving hibernation");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_hibernate_returns_once_cancelled() {
        let token = CancellationToken::new();
        let canceller = {
            let token = token.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(30));
                token.cancel();
            })
        };
        let start = Instant::now();
        hibernate(&token);
        assert!(start.elapsed() >= Duration::from_millis(25));
        canceller.join().unwrap();
    }

    #[test]
    fn test_hibernate_on_cancelled_token_returns_immediately() {
        let token = CancellationToken::new();
        token.cancel();
        hibernate(&token);
    }
}
