use tracing::info;

use crate::browser::{BrowserSession, dom, input};
use crate::editor;
use crate::error::Result;

/// Creates a subgraph via the toolbar control and drags it to the surface
/// center; the positional transform must change, so a drag that silently
/// drops the element in place fails.
pub async fn execute(session: &BrowserSession) -> Result<()> {
    info!(target = "verify", "verifying subgraph dragging");
    let page = session.page();

    let button = dom::require_rect(page, editor::ADD_SUBGRAPH_BUTTON, 0).await?;
    let (x, y) = button.center();
    input::click(page, x, y).await?;

    dom::expect_visible(page, editor::SUBGRAPH, 0).await?;
    let initial = dom::attribute(page, editor::SUBGRAPH, 0, "transform").await?;

    let subgraph = dom::require_rect(page, editor::SUBGRAPH, 0).await?;
    let surface = dom::require_rect(page, editor::SURFACE, 0).await?;
    input::drag(page, subgraph.center(), surface.center()).await?;

    dom::expect_attr_changed(page, editor::SUBGRAPH, 0, "transform", initial.as_deref()).await?;

    println!("Subgraph dragging verified.");
    Ok(())
}
