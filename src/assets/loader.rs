use std::{future::Future, path::Path, time::Duration};

use base64::Engine as _;

use crate::{
    assets::decode::{PreparedImage, decode_avatar},
    foundation::error::LoadError,
};

/// Default avatar load budget.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(5000);

/// Source of raw avatar bytes.
///
/// Implementations only fetch; decoding and the timeout are applied by [`AssetLoader`].
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, src: &str) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

/// Fetches `data:` URIs in memory, `http(s)://` URLs over the network and anything else from
/// the local filesystem.
///
/// HTTP requests are anonymous: no cookie store and no credentials are attached.
#[derive(Clone, Debug, Default)]
pub struct SourceFetcher {
    client: reqwest::Client,
}

impl SourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LoadError::failed(format!("request failed: {e}")))?;
        let body = resp
            .bytes()
            .await
            .map_err(|e| LoadError::failed(format!("read body: {e}")))?;
        Ok(body.to_vec())
    }
}

impl ImageFetcher for SourceFetcher {
    async fn fetch(&self, src: &str) -> Result<Vec<u8>, LoadError> {
        if let Some(rest) = src.strip_prefix("data:") {
            return decode_data_uri(rest);
        }
        if src.starts_with("http://") || src.starts_with("https://") {
            return self.fetch_http(src).await;
        }
        let path = Path::new(src.strip_prefix("file://").unwrap_or(src));
        tokio::fs::read(path)
            .await
            .map_err(|e| LoadError::failed(format!("read '{}': {e}", path.display())))
    }
}

/// Payload of a `data:` URI, given everything after the `data:` scheme.
fn decode_data_uri(rest: &str) -> Result<Vec<u8>, LoadError> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::failed("data URI is missing ','"))?;
    if meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| LoadError::failed(format!("invalid base64 payload: {e}")))
    } else {
        Ok(percent_encoding::percent_decode_str(payload).collect())
    }
}

/// Result of one avatar load. Exactly one variant is produced per call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(PreparedImage),
    TimedOut { after_ms: u64 },
    Failed(String),
}

impl LoadOutcome {
    pub fn into_result(self) -> Result<PreparedImage, LoadError> {
        match self {
            Self::Loaded(img) => Ok(img),
            Self::TimedOut { after_ms } => Err(LoadError::Timeout { after_ms }),
            Self::Failed(reason) => Err(LoadError::Failed(reason)),
        }
    }
}

/// Loads avatars with a hard deadline. Nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct AssetLoader<F = SourceFetcher> {
    fetcher: F,
    timeout: Duration,
}

impl AssetLoader<SourceFetcher> {
    pub fn new(timeout: Duration) -> Self {
        Self::with_fetcher(SourceFetcher::new(), timeout)
    }
}

impl<F: ImageFetcher> AssetLoader<F> {
    pub fn with_fetcher(fetcher: F, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch and decode `src`, racing both against the timeout.
    ///
    /// On timeout the in-flight fetch is dropped, so a late response cannot run any code.
    /// Dropping the returned future cancels the load the same way.
    #[tracing::instrument(skip(self, src), fields(src = %abbreviate(src)))]
    pub async fn load(&self, src: &str) -> LoadOutcome {
        let fetch_and_decode = async {
            let bytes = self.fetcher.fetch(src).await?;
            decode_avatar(&bytes).map_err(|e| LoadError::failed(e.to_string()))
        };

        match tokio::time::timeout(self.timeout, fetch_and_decode).await {
            Ok(Ok(img)) => {
                tracing::debug!(width = img.width, height = img.height, "avatar loaded");
                LoadOutcome::Loaded(img)
            }
            Ok(Err(err)) => LoadOutcome::Failed(err.to_string()),
            Err(_) => LoadOutcome::TimedOut {
                after_ms: self.timeout.as_millis() as u64,
            },
        }
    }
}

/// Keep log lines short when the source is an inline data URI.
fn abbreviate(src: &str) -> &str {
    const MAX: usize = 64;
    if src.len() <= MAX {
        return src;
    }
    let mut end = MAX;
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    &src[..end]
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
