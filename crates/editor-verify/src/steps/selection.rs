use chromiumoxide::page::Page;
use tracing::info;

use crate::browser::{BrowserSession, dom, input};
use crate::editor;
use crate::error::Result;

/// Exercises the selection semantics: plain click selects exactly one node,
/// a later plain click replaces the selection, a ctrl-click adds to it, and
/// a background click clears it.
pub async fn execute(session: &BrowserSession) -> Result<()> {
    info!(target = "verify", "verifying node selection");
    let page = session.page();

    click_node(page, 0, 0).await?;
    dom::expect_attr(page, editor::NODE, 0, "class", editor::NODE_SELECTED_CLASS).await?;
    dom::expect_attr(page, editor::NODE, 1, "class", editor::NODE_CLASS).await?;

    click_node(page, 1, 0).await?;
    dom::expect_attr(page, editor::NODE, 0, "class", editor::NODE_CLASS).await?;
    dom::expect_attr(page, editor::NODE, 1, "class", editor::NODE_SELECTED_CLASS).await?;

    click_node(page, 0, input::MODIFIER_CTRL).await?;
    dom::expect_attr(page, editor::NODE, 0, "class", editor::NODE_SELECTED_CLASS).await?;
    dom::expect_attr(page, editor::NODE, 1, "class", editor::NODE_SELECTED_CLASS).await?;

    super::click_surface(page).await?;
    dom::expect_attr(page, editor::NODE, 0, "class", editor::NODE_CLASS).await?;
    dom::expect_attr(page, editor::NODE, 1, "class", editor::NODE_CLASS).await?;

    println!("Node selection logic verified.");
    Ok(())
}

/// Click the center of the nth node, re-resolving its position first.
async fn click_node(page: &Page, nth: usize, modifiers: i64) -> Result<()> {
    let rect = dom::require_rect(page, editor::NODE, nth).await?;
    let (x, y) = rect.center();
    input::click_with_modifiers(page, x, y, modifiers).await
}
