use tracing::info;

use crate::browser::{BrowserSession, dom, input};
use crate::editor;
use crate::error::Result;

/// Clicks the first link's invisible widened hit-region and checks selection
/// lands on the visible path element it overlays.
pub async fn execute(session: &BrowserSession) -> Result<()> {
    info!(target = "verify", "verifying link selection");
    let page = session.page();

    super::click_surface(page).await?;

    let hit_selector = format!("{} {}", editor::LINK_CONTAINER, editor::LINK_HIT_AREA);
    let hit = dom::require_rect(page, &hit_selector, 0).await?;
    let (x, y) = hit.center();
    input::click(page, x, y).await?;

    let path_selector = format!("{} {}", editor::LINK_CONTAINER, editor::LINK_PATH);
    dom::expect_attr(page, &path_selector, 0, "class", editor::LINK_SELECTED_CLASS).await?;

    println!("Link selection verified.");
    Ok(())
}
