//! Browser control for headless scenario runs.
//!
//! With the `browser` feature, sessions are real Chromium pages driven over
//! the Chrome `DevTools` Protocol via chromiumoxide. Without it,
//! [`open_session`] reports that browser support is not compiled in.

use serde::{Deserialize, Serialize};

use crate::result::VerifyResult;

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            user_agent: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::BrowserConfig;
    use crate::locator::{visible_text_script, BoundingBox, Locator};
    use crate::result::{VerifyError, VerifyResult};
    use crate::session::Session;
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser, BrowserConfig as CdpConfig};
    use chromiumoxide::handler::viewport::Viewport as PageViewport;
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams, Viewport,
    };
    use chromiumoxide::page::Page;
    use futures::StreamExt;

    /// A Chromium page plus the browser process that owns it
    #[derive(Debug)]
    pub struct CdpSession {
        browser: Option<Browser>,
        page: Option<Page>,
        handle: tokio::task::JoinHandle<()>,
        url: String,
    }

    impl CdpSession {
        /// Launch a browser and open one blank page
        pub async fn launch(config: &BrowserConfig) -> VerifyResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height)
                .viewport(page_viewport(config));

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            if let Some(ref ua) = config.user_agent {
                builder = builder.arg(format!("--user-agent={ua}"));
            }

            let cdp_config = builder
                .build()
                .map_err(|message| VerifyError::BrowserLaunch { message })?;

            let (browser, mut handler) =
                Browser::launch(cdp_config)
                    .await
                    .map_err(|e| VerifyError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = match browser.new_page("about:blank").await {
                Ok(page) => page,
                Err(e) => {
                    handle.abort();
                    return Err(VerifyError::BrowserLaunch {
                        message: e.to_string(),
                    });
                }
            };

            tracing::debug!(
                headless = config.headless,
                width = config.viewport_width,
                height = config.viewport_height,
                "browser launched"
            );

            Ok(Self {
                browser: Some(browser),
                page: Some(page),
                handle,
                url: String::from("about:blank"),
            })
        }

        fn page(&self) -> VerifyResult<&Page> {
            self.page
                .as_ref()
                .ok_or_else(|| VerifyError::page("session is closed"))
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, script: String) -> VerifyResult<T> {
            let result = self
                .page()?
                .evaluate(script)
                .await
                .map_err(|e| VerifyError::page(e.to_string()))?;
            result
                .into_value()
                .map_err(|e| VerifyError::page(e.to_string()))
        }

        async fn expect_unique(&self, target: &Locator, script: String) -> VerifyResult<()> {
            let matches: usize = self.eval(script).await?;
            if matches == 1 {
                Ok(())
            } else {
                Err(VerifyError::ElementNotFound {
                    query: target.to_string(),
                    matches,
                })
            }
        }
    }

    /// Emulated page viewport; without it chromiumoxide renders at 800x600
    /// whatever the window size.
    pub(super) fn page_viewport(config: &BrowserConfig) -> PageViewport {
        PageViewport {
            width: config.viewport_width,
            height: config.viewport_height,
            ..PageViewport::default()
        }
    }

    #[async_trait]
    impl Session for CdpSession {
        async fn navigate(&mut self, url: &str) -> VerifyResult<()> {
            self.page()?
                .goto(url)
                .await
                .map_err(|e| VerifyError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            self.url = url.to_string();
            Ok(())
        }

        async fn fill(&mut self, target: &Locator, value: &str) -> VerifyResult<()> {
            self.expect_unique(target, target.fill_script(value)).await
        }

        async fn click(&mut self, target: &Locator) -> VerifyResult<()> {
            self.expect_unique(target, target.click_script()).await
        }

        async fn is_text_visible(&mut self, text: &str) -> VerifyResult<bool> {
            self.eval(visible_text_script(text)).await
        }

        async fn screenshot(&mut self, region: Option<&Locator>) -> VerifyResult<Vec<u8>> {
            let mut params = CaptureScreenshotParams::builder().format(CaptureScreenshotFormat::Png);

            if let Some(region) = region {
                let bounds: BoundingBox = self.eval(region.bounding_box_script()).await?;
                if bounds.count == 0 || bounds.is_empty() {
                    return Err(VerifyError::ElementNotFound {
                        query: region.to_string(),
                        matches: bounds.count,
                    });
                }
                let clip = Viewport::builder()
                    .x(bounds.x)
                    .y(bounds.y)
                    .width(bounds.width)
                    .height(bounds.height)
                    .scale(1.0)
                    .build()
                    .map_err(|message| VerifyError::Screenshot { message })?;
                params = params.clip(clip).capture_beyond_viewport(true);
            }

            let screenshot = self
                .page()?
                .execute(params.build())
                .await
                .map_err(|e| VerifyError::Screenshot {
                    message: e.to_string(),
                })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| VerifyError::Screenshot {
                    message: e.to_string(),
                })
        }

        async fn close(&mut self) -> VerifyResult<()> {
            if let Some(page) = self.page.take() {
                if let Err(e) = page.close().await {
                    tracing::debug!(error = %e, "page close failed");
                }
            }
            let result = match self.browser.take() {
                Some(mut browser) => browser
                    .close()
                    .await
                    .map(|_| ())
                    .map_err(|e| VerifyError::BrowserLaunch {
                        message: format!("close: {e}"),
                    }),
                None => Ok(()),
            };
            self.handle.abort();
            result
        }

        fn current_url(&self) -> &str {
            &self.url
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpSession;

/// Launch a browser and open the page a scenario will run in
#[cfg(feature = "browser")]
pub async fn open_session(config: &BrowserConfig) -> VerifyResult<Box<dyn crate::Session>> {
    Ok(Box::new(CdpSession::launch(config).await?))
}

/// Launch a browser and open the page a scenario will run in
#[cfg(not(feature = "browser"))]
pub async fn open_session(_config: &BrowserConfig) -> VerifyResult<Box<dyn crate::Session>> {
    Err(crate::VerifyError::NotSupported {
        message: "Browser feature not enabled. Enable 'browser' feature for real CDP support."
            .to_string(),
    })
}
