//! Concurrent page cache warming
//!
//! A fixed pool of worker threads drains a pre-loaded, closed work queue in
//! disk order. Each worker pushes whole files through the kernel into a
//! discard sink so their pages land in the page cache without being copied
//! into process memory.

pub mod loader;
pub mod pool;
pub mod queue;

pub use loader::{default_loader, CopyLoader, DefaultLoader, PageLoader, Transfer};
#[cfg(target_os = "linux")]
pub use loader::SendfileLoader;
pub use pool::Warmer;
pub use queue::WorkQueue;
