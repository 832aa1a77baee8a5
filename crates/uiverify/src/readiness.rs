//! Wait for the application under test to start answering HTTP.

use std::time::Duration;

use crate::result::{VerifyError, VerifyResult};
use crate::wait::WaitOptions;

/// Poll `url` with GET until any HTTP response arrives.
///
/// The status code is irrelevant: a 404 still proves the server is up.
/// A zero timeout returns immediately without probing.
pub async fn wait_until_ready(url: &str, options: WaitOptions) -> VerifyResult<()> {
    if options.timeout_ms == 0 {
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(options.poll_interval().max(Duration::from_millis(500)))
        .build()
        .map_err(|e| VerifyError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let mut poller = options.start();
    let mut last_error = String::from("no attempt made");
    while poller.next_attempt().await {
        match client.get(url).send().await {
            Ok(response) => {
                tracing::debug!(
                    url,
                    status = response.status().as_u16(),
                    attempts = poller.attempts(),
                    "target is ready"
                );
                return Ok(());
            }
            Err(e) => {
                tracing::trace!(url, error = %e, "target not ready yet");
                last_error = e.to_string();
            }
        }
    }

    Err(VerifyError::Navigation {
        url: url.to_string(),
        message: format!(
            "not ready after {}ms ({} attempts): {last_error}",
            options.timeout_ms,
            poller.attempts()
        ),
    })
}
