//! The seam between the scenario runner and a browser page.
//!
//! Implement [`Session`] for your browser backend. The crate ships a
//! Chrome `DevTools` Protocol implementation behind the `browser` feature;
//! tests drive the runner with in-memory implementations.

use async_trait::async_trait;

use crate::locator::Locator;
use crate::result::VerifyResult;

/// One browser page/context, exclusively owned for a scenario's duration.
///
/// Every method suspends until the underlying browser operation completes.
/// Methods other than [`Session::close`] may assume the session is open.
#[async_trait]
pub trait Session: Send {
    /// Load `url` and wait for the page to respond.
    ///
    /// Fails with `VerifyError::Navigation` if the target is unreachable.
    async fn navigate(&mut self, url: &str) -> VerifyResult<()>;

    /// Set the value of the unique input matching `target`.
    ///
    /// Fails with `VerifyError::ElementNotFound` on zero or multiple matches.
    async fn fill(&mut self, target: &Locator, value: &str) -> VerifyResult<()>;

    /// Click the unique element matching `target`.
    ///
    /// Fails with `VerifyError::ElementNotFound` on zero or multiple matches.
    async fn click(&mut self, target: &Locator) -> VerifyResult<()>;

    /// Whether a visible element currently contains `text`. Does not wait.
    async fn is_text_visible(&mut self, text: &str) -> VerifyResult<bool>;

    /// Capture the viewport, or the box of the first `region` match, as PNG.
    async fn screenshot(&mut self, region: Option<&Locator>) -> VerifyResult<Vec<u8>>;

    /// Release the page and its browser. Called exactly once by the runner.
    async fn close(&mut self) -> VerifyResult<()>;

    /// URL of the last successful navigation
    fn current_url(&self) -> &str;
}

#[async_trait]
impl<S: Session + ?Sized> Session for Box<S> {
    async fn navigate(&mut self, url: &str) -> VerifyResult<()> {
        (**self).navigate(url).await
    }

    async fn fill(&mut self, target: &Locator, value: &str) -> VerifyResult<()> {
        (**self).fill(target, value).await
    }

    async fn click(&mut self, target: &Locator) -> VerifyResult<()> {
        (**self).click(target).await
    }

    async fn is_text_visible(&mut self, text: &str) -> VerifyResult<bool> {
        (**self).is_text_visible(text).await
    }

    async fn screenshot(&mut self, region: Option<&Locator>) -> VerifyResult<Vec<u8>> {
        (**self).screenshot(region).await
    }

    async fn close(&mut self) -> VerifyResult<()> {
        (**self).close().await
    }

    fn current_url(&self) -> &str {
        (**self).current_url()
    }
}
