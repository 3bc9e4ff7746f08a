//! Helpers wrapping calls to the remote service.

mod rate_limit;
mod retry;

pub use rate_limit::{ApiRateLimitRunner, RateLimitRunner};
pub use retry::{RetryPolicy, Transient, retry_io};
