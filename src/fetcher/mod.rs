pub mod http;

use async_trait::async_trait;

use crate::app::FetchError;

pub use http::HttpFetcher;

/// One HTTP GET with a mandatory per-request timeout.
///
/// No retries at this layer; a failed fetch simply means "no data" to the
/// caller. Implementations may pool connections across calls but must not
/// leak them on any exit path.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
