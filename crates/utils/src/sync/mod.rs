mod cancel;

pub use cancel::CancellationToken;
