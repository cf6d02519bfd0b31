//! Per-request headless browser session.
//!
//! Each scrape launches its own Chromium instance and tears it down before the
//! response is produced, on every exit path. The chromiumoxide event handler
//! runs on a spawned task that is aborted when the session closes, so the
//! Chrome process never outlives the request.

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{AppError, Result};

/// Fixed desktop user-agent sent with every page load.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120 Safari/537.36";

/// Navigation and required-element waits share the same ceiling.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
}

impl BrowserSession {
    /// Launch an isolated Chromium instance with anti-automation flags and
    /// open a blank page ready for navigation.
    pub async fn launch(headless: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(NAVIGATION_TIMEOUT)
            .arg(format!("--user-agent={}", USER_AGENT))
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        // with_head means NOT headless, confusingly
        if !headless {
            builder = builder.with_head();
        }

        let config = builder.build().map_err(AppError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AppError::Browser(format!("Failed to launch browser: {}", e)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(AppError::Browser(format!("Failed to open page: {}", e)));
            }
        };

        debug!(headless, "browser session launched");
        Ok(Self {
            browser,
            handler,
            page,
        })
    }

    /// Navigate to a URL and wait for the page lifecycle to settle.
    pub async fn goto(&self, url: &str) -> Result<()> {
        tokio::time::timeout(NAVIGATION_TIMEOUT, self.page.goto(url))
            .await
            .map_err(|_| {
                AppError::Browser(format!(
                    "Navigation timeout after {}s for URL: {}",
                    NAVIGATION_TIMEOUT.as_secs(),
                    url
                ))
            })?
            .map_err(|e| AppError::Browser(format!("Navigation failed for {}: {}", url, e)))?;

        self.wait_for_load().await
    }

    /// Wait for the current navigation to reach a loaded state. Used after
    /// the initial goto and again after clicking through an interstitial.
    pub async fn wait_for_load(&self) -> Result<()> {
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| AppError::Browser(format!("Page load wait failed: {}", e)))?;
        Ok(())
    }

    /// Poll for an element with exponential backoff until it appears or the
    /// timeout elapses. Timing out is fatal for the request: callers only use
    /// this for selectors the extraction cannot proceed without.
    pub async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<Element> {
        let start = std::time::Instant::now();
        let mut poll_interval = Duration::from_millis(100);
        let max_interval = Duration::from_secs(1);

        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }

            if start.elapsed() >= timeout {
                return Err(AppError::ExtractionTimeout(selector.to_string()));
            }

            tokio::time::sleep(poll_interval).await;
            poll_interval = (poll_interval * 2).min(max_interval);
        }
    }

    /// Locate a single element; absence is not an error.
    pub async fn find(&self, selector: &str) -> Option<Element> {
        self.page.find_element(selector).await.ok()
    }

    /// Locate all elements matching a selector; absence yields an empty list.
    pub async fn find_all(&self, selector: &str) -> Vec<Element> {
        self.page.find_elements(selector).await.unwrap_or_default()
    }

    /// Close the browser and stop the event handler. Consumes the session so
    /// no page access can outlive the underlying process.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed waiting for browser exit: {}", e);
        }
        self.handler.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Backstop for paths that skip close(); Browser::drop kills the
        // Chrome process once the handler task stops.
        self.handler.abort();
    }
}
