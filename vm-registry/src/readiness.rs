//! Waiting for the registry to come up.

use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::Result;

/// Returned when a probe keeps failing until the deadline passes.
#[derive(Debug)]
pub struct DeadlineExceeded<E> {
    pub elapsed: Duration,
    pub attempts: u32,
    pub last_error: E,
}

/// Run `probe` until it succeeds or `deadline` has passed since the first
/// attempt, sleeping `interval` between attempts.
///
/// The deadline is checked after each failed attempt, so time spent inside
/// a slow probe counts against the budget. A timeout is only reported once
/// the full window has elapsed.
pub async fn retry_with_deadline<F, Fut, T, E>(
    interval: Duration,
    deadline: Duration,
    mut probe: F,
) -> std::result::Result<T, DeadlineExceeded<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    let started = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;
        match probe().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let elapsed = started.elapsed();
                if elapsed >= deadline {
                    return Err(DeadlineExceeded {
                        elapsed,
                        attempts,
                        last_error: err,
                    });
                }
                debug!("Attempt {} not ready yet: {}", attempts, err);
                sleep(interval.min(deadline - elapsed)).await;
            }
        }
    }
}

/// HEAD probe against the registry root. Any HTTP response means the
/// listener is up; only transport failures count as "not ready".
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn attempt(
        &self,
    ) -> impl Future<Output = std::result::Result<StatusCode, reqwest::Error>> + Send + 'static
    {
        let request = self.client.head(&self.url);
        async move { request.send().await.map(|response| response.status()) }
    }
}
