use std::path::Path;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::browser::js;
use crate::error::{Result, VerifyError};

/// Poll interval for selector waits.
const SELECTOR_POLL: Duration = Duration::from_millis(250);

/// Quiet window the network-idle heuristic requires: two consecutive polls
/// this far apart with an unchanged resource count.
const IDLE_QUIET_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
struct LoadSnapshot {
    ready: String,
    resources: u64,
}

/// Exclusively-owned browser/page pair for one verification run.
///
/// Holds the launched browser, the background task pumping its CDP event
/// stream, and the single page every step drives. `close` consumes the
/// session, so the browser is released exactly once per acquisition.
pub struct BrowserSession {
    browser: Browser,
    event_pump: JoinHandle<()>,
    page: Page,
}

impl BrowserSession {
    pub async fn launch(headed: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder().window_size(1280, 720).incognito();
        if headed {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(VerifyError::BrowserLaunch)?;

        debug!(target = "verify", headed, "launching browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| VerifyError::BrowserLaunch(e.to_string()))?;

        // The handler stream must be polled for the whole browser lifetime;
        // it ends when the browser process goes away.
        let event_pump = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            event_pump,
            page,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigates and waits for the load event.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(target = "verify", %url, "navigating");
        self.page
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|e| VerifyError::Navigation {
                url: url.to_string(),
                source: anyhow::Error::new(e),
            })
    }

    /// Waits until the page looks network idle: readyState `complete` and no
    /// new resource fetches recorded across the quiet window.
    pub async fn wait_for_network_idle(&self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        let mut previous: Option<LoadSnapshot> = None;

        loop {
            let snapshot = self
                .page
                .evaluate(js::load_snapshot_js())
                .await?
                .into_value::<LoadSnapshot>()
                .map_err(|e| VerifyError::JsEval(format!("load snapshot: {e}")))?;

            if snapshot.ready == "complete" {
                if let Some(prev) = &previous {
                    if prev.resources == snapshot.resources {
                        debug!(target = "verify", resources = snapshot.resources, "network idle");
                        return Ok(());
                    }
                }
                previous = Some(snapshot);
            } else {
                previous = None;
            }

            if tokio::time::Instant::now() + IDLE_QUIET_WINDOW > deadline {
                return Err(VerifyError::Timeout {
                    ms: timeout.as_millis() as u64,
                    condition: "network idle".to_string(),
                });
            }
            tokio::time::sleep(IDLE_QUIET_WINDOW).await;
        }
    }

    /// Polls until `selector` matches at least one element.
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let expr = js::selector_exists_js(selector);
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let found = self
                .page
                .evaluate(expr.as_str())
                .await?
                .into_value::<bool>()
                .unwrap_or(false);

            if found {
                debug!(target = "verify", %selector, "selector matched");
                return Ok(());
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(VerifyError::Timeout {
                    ms: timeout.as_millis() as u64,
                    condition: format!("selector {selector}"),
                });
            }
            tokio::time::sleep(SELECTOR_POLL).await;
        }
    }

    /// Full-page PNG screenshot, creating the parent directory on demand.
    pub async fn screenshot(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path).map_err(|e| VerifyError::Screenshot {
            path: path.to_path_buf(),
            source: anyhow::Error::new(e),
        })?;

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        self.page
            .save_screenshot(params, path)
            .await
            .map(|_| ())
            .map_err(|e| VerifyError::Screenshot {
                path: path.to_path_buf(),
                source: anyhow::Error::new(e),
            })?;

        info!(target = "verify", path = %path.display(), "screenshot saved");
        Ok(())
    }

    /// Shuts the browser down and reaps the process.
    pub async fn close(mut self) -> Result<()> {
        debug!(target = "verify", "closing browser");
        let closed = self.browser.close().await;
        let waited = self.browser.wait().await;
        self.event_pump.abort();
        closed?;
        waited?;
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
