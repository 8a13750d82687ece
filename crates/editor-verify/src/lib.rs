//! End-to-end verification driver for the visual graph editor.
//!
//! Launches a headless Chromium via CDP, loads the editor page and walks a
//! fixed sequence of user interactions, asserting the DOM state each one
//! must produce: subgraph drag-and-drop, single / multi node selection,
//! Backspace handling inside the inline text editor, and link selection
//! through the widened hit-area. Progress is printed to stdout, screenshots
//! land in the output directory, and the process exits non-zero when any
//! step fails.

pub mod browser;
pub mod cli;
pub mod editor;
pub mod error;
pub mod logging;
pub mod steps;
