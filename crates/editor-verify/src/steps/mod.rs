//! The fixed verification sequence.
//!
//! Each step is gated on the DOM state the previous one produced; any failure
//! aborts the remainder, captures the error screenshot and propagates. The
//! browser is released exactly once on every path.

mod drag;
mod links;
mod selection;
mod text_edit;

use std::time::Duration;

use chromiumoxide::page::Page;
use tracing::{info, warn};

use crate::browser::{BrowserSession, dom, input};
use crate::cli::Cli;
use crate::editor;
use crate::error::Result;

/// Bound for initial load, network idle and first-element appearance.
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn run(cli: &Cli) -> Result<()> {
    let session = BrowserSession::launch(cli.headed).await?;

    let outcome = match run_steps(&session, cli).await {
        Ok(()) => Ok(()),
        Err(err) => {
            println!("\nVerification failed: {err}");
            let path = cli.output_dir.join(editor::ERROR_SCREENSHOT);
            if let Err(shot_err) = session.screenshot(&path).await {
                // Diagnostic capture must never mask the step failure.
                warn!(target = "verify", error = %shot_err, "error screenshot failed");
            }
            Err(err)
        }
    };

    let closed = session.close().await;
    settle(outcome, closed)
}

/// Combines the step outcome with the close result. A step failure takes
/// precedence; a close error it shadows is logged rather than dropped. After
/// a clean run the close error is the one that surfaces.
fn settle(outcome: Result<()>, closed: Result<()>) -> Result<()> {
    if outcome.is_err() {
        if let Err(close_err) = &closed {
            warn!(target = "verify", error = %close_err, "browser close failed");
        }
    }
    outcome.and(closed)
}

async fn run_steps(session: &BrowserSession, cli: &Cli) -> Result<()> {
    setup(session, cli.url.as_str()).await?;
    drag::execute(session).await?;
    selection::execute(session).await?;
    text_edit::execute(session).await?;
    links::execute(session).await?;

    println!("\nAll verification steps passed successfully.");
    let path = cli.output_dir.join(editor::SUCCESS_SCREENSHOT);
    session.screenshot(&path).await
}

/// Loads the editor and blocks until it has rendered its first graph node.
async fn setup(session: &BrowserSession, url: &str) -> Result<()> {
    info!(target = "verify", %url, "loading editor");
    session.goto(url).await?;
    session.wait_for_network_idle(LOAD_TIMEOUT).await?;
    session
        .wait_for_selector(&format!("{} {}", editor::SURFACE, editor::NODE), LOAD_TIMEOUT)
        .await
}

/// Plain click on the drawing surface, the editor's deselect-everything
/// gesture.
pub(crate) async fn click_surface(page: &Page) -> Result<()> {
    let rect = dom::require_rect(page, editor::SURFACE, 0).await?;
    let (x, y) = rect.center();
    input::click(page, x, y).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerifyError;

    #[test]
    fn settle_prefers_the_step_error_over_a_close_error() {
        let step: Result<()> = Err(VerifyError::Assertion {
            check: "g.node[0] class == \"node selected\"".to_string(),
            detail: "last observed \"node\"".to_string(),
        });
        let closed: Result<()> = Err(VerifyError::Io(std::io::Error::other("pipe closed")));

        let err = settle(step, closed).unwrap_err();
        assert!(matches!(err, VerifyError::Assertion { .. }));
    }

    #[test]
    fn settle_surfaces_a_close_error_after_passing_steps() {
        let closed: Result<()> = Err(VerifyError::Io(std::io::Error::other("pipe closed")));

        let err = settle(Ok(()), closed).unwrap_err();
        assert!(matches!(err, VerifyError::Io(_)));
    }

    #[test]
    fn settle_is_quiet_when_both_paths_succeed() {
        assert!(settle(Ok(()), Ok(())).is_ok());
    }
}
