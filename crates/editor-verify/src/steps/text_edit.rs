use tracing::info;

use crate::browser::{BrowserSession, dom, input};
use crate::editor;
use crate::error::{Result, VerifyError};

/// Double-clicks a node into inline editing and checks that Backspace edits
/// the text instead of firing the delete-node shortcut: the textarea value
/// must change and the node count must not.
pub async fn execute(session: &BrowserSession) -> Result<()> {
    info!(target = "verify", "verifying backspace while editing");
    let page = session.page();

    let node_count = dom::count(page, editor::NODE).await?;

    let node = dom::require_rect(page, editor::NODE, 1).await?;
    let (x, y) = node.center();
    input::double_click(page, x, y).await?;

    dom::expect_visible(page, editor::TEXT_EDITOR, 0).await?;
    let initial = dom::input_value(page, editor::TEXT_EDITOR)
        .await?
        .ok_or_else(|| VerifyError::ElementNotFound {
            selector: editor::TEXT_EDITOR.to_string(),
        })?;

    dom::focus(page, editor::TEXT_EDITOR).await?;
    input::press_backspace(page).await?;
    dom::expect_value_changed(page, editor::TEXT_EDITOR, &initial).await?;

    // Leaving edit mode must not have cost a node.
    super::click_surface(page).await?;
    dom::expect_count(page, editor::NODE, node_count).await?;

    println!("Backspace behavior verified.");
    Ok(())
}
