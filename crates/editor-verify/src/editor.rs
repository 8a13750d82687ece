//! DOM contract of the editor page under test.
//!
//! The editor renders graph nodes, subgraphs and links as SVG groups and
//! exposes selection state through the full `class` attribute, so the expected
//! values here are exact attribute strings rather than class-list memberships.

pub const DEFAULT_URL: &str = "http://localhost:8000/EditorMain.html";

/// The SVG drawing surface.
pub const SURFACE: &str = "#visual-editor-svg";

/// Graph node groups, in document order.
pub const NODE: &str = "g.node";

/// Subgraph container groups.
pub const SUBGRAPH: &str = "g.subgraph";

/// Toolbar control that creates a new subgraph.
pub const ADD_SUBGRAPH_BUTTON: &str = "#add-subgraph-btn";

/// Textarea of the inline text-edit overlay; present only while editing.
pub const TEXT_EDITOR: &str = ".text-editor-foreign-object textarea";

pub const LINK_CONTAINER: &str = ".link-container";

/// Invisible widened click target overlaying a link path.
pub const LINK_HIT_AREA: &str = ".link-hit-area";

/// The visibly rendered link path.
pub const LINK_PATH: &str = "path.link";

pub const NODE_CLASS: &str = "node";
pub const NODE_SELECTED_CLASS: &str = "node selected";
pub const LINK_SELECTED_CLASS: &str = "link selected";

/// Screenshot written after a fully successful run.
pub const SUCCESS_SCREENSHOT: &str = "bug_fixes_verified.png";

/// Screenshot written when a step fails.
pub const ERROR_SCREENSHOT: &str = "verification_error.png";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_markers_extend_the_base_class() {
        // Selection must add to the class attribute, not replace it; the
        // steps assert the exact attribute value.
        assert_eq!(NODE_SELECTED_CLASS, format!("{NODE_CLASS} selected"));
        assert!(LINK_SELECTED_CLASS.starts_with("link "));
    }

    #[test]
    fn artifacts_are_png_files() {
        assert!(SUCCESS_SCREENSHOT.ends_with(".png"));
        assert!(ERROR_SCREENSHOT.ends_with(".png"));
        assert_ne!(SUCCESS_SCREENSHOT, ERROR_SCREENSHOT);
    }
}
