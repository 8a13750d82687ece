//! Trusted gesture synthesis over the CDP `Input` domain.
//!
//! Coordinates are CSS pixels relative to the viewport, the space
//! `getBoundingClientRect` reports, so element centers from
//! [`dom`](super::dom) feed these directly.

use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams, DispatchMouseEventType,
    MouseButton,
};
use chromiumoxide::page::Page;
use tracing::debug;

use crate::error::{Result, VerifyError};

/// CDP modifier bitfield: Alt=1, Ctrl=2, Meta=4, Shift=8.
pub const MODIFIER_CTRL: i64 = 2;

/// `buttons` bitfield flag for the held left button during drag moves.
const LEFT_BUTTON_FLAG: i64 = 1;

/// Intermediate move events per drag, so drag handlers tracking deltas see a
/// continuous motion instead of a single jump.
const DRAG_STEPS: u32 = 8;

const BACKSPACE_VIRTUAL_KEY: i64 = 8;

fn mouse_moved(x: f64, y: f64, buttons: i64, modifiers: i64) -> Result<DispatchMouseEventParams> {
    DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseMoved)
        .x(x)
        .y(y)
        .buttons(buttons)
        .modifiers(modifiers)
        .build()
        .map_err(VerifyError::InputDispatch)
}

fn mouse_pressed(x: f64, y: f64, count: i64, modifiers: i64) -> Result<DispatchMouseEventParams> {
    DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MousePressed)
        .x(x)
        .y(y)
        .button(MouseButton::Left)
        .buttons(LEFT_BUTTON_FLAG)
        .click_count(count)
        .modifiers(modifiers)
        .build()
        .map_err(VerifyError::InputDispatch)
}

fn mouse_released(x: f64, y: f64, count: i64, modifiers: i64) -> Result<DispatchMouseEventParams> {
    DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseReleased)
        .x(x)
        .y(y)
        .button(MouseButton::Left)
        .click_count(count)
        .modifiers(modifiers)
        .build()
        .map_err(VerifyError::InputDispatch)
}

fn key_event(kind: DispatchKeyEventType) -> Result<DispatchKeyEventParams> {
    DispatchKeyEventParams::builder()
        .r#type(kind)
        .key("Backspace")
        .code("Backspace")
        .windows_virtual_key_code(BACKSPACE_VIRTUAL_KEY)
        .native_virtual_key_code(BACKSPACE_VIRTUAL_KEY)
        .build()
        .map_err(VerifyError::InputDispatch)
}

pub async fn click(page: &Page, x: f64, y: f64) -> Result<()> {
    click_with_modifiers(page, x, y, 0).await
}

/// Move, press, release at one point; `modifiers` is the CDP bitfield.
pub async fn click_with_modifiers(page: &Page, x: f64, y: f64, modifiers: i64) -> Result<()> {
    debug!(target = "verify", x, y, modifiers, "click");
    page.execute(mouse_moved(x, y, 0, modifiers)?).await?;
    page.execute(mouse_pressed(x, y, 1, modifiers)?).await?;
    page.execute(mouse_released(x, y, 1, modifiers)?).await?;
    Ok(())
}

/// Two press/release pairs with click counts 1 then 2; the second pair is
/// what makes the browser emit `dblclick`.
pub async fn double_click(page: &Page, x: f64, y: f64) -> Result<()> {
    debug!(target = "verify", x, y, "double click");
    for params in double_click_params(x, y)? {
        page.execute(params).await?;
    }
    Ok(())
}

/// The five events of a double click, in dispatch order: a move, then
/// press/release with click count 1, then press/release with click count 2.
fn double_click_params(x: f64, y: f64) -> Result<Vec<DispatchMouseEventParams>> {
    Ok(vec![
        mouse_moved(x, y, 0, 0)?,
        mouse_pressed(x, y, 1, 0)?,
        mouse_released(x, y, 1, 0)?,
        mouse_pressed(x, y, 2, 0)?,
        mouse_released(x, y, 2, 0)?,
    ])
}

/// Press at `from`, staged moves with the left button held, release at `to`.
pub async fn drag(page: &Page, from: (f64, f64), to: (f64, f64)) -> Result<()> {
    debug!(target = "verify", ?from, ?to, "drag");
    page.execute(mouse_moved(from.0, from.1, 0, 0)?).await?;
    page.execute(mouse_pressed(from.0, from.1, 1, 0)?).await?;
    for (x, y) in interpolate(from, to, DRAG_STEPS) {
        page.execute(mouse_moved(x, y, LEFT_BUTTON_FLAG, 0)?).await?;
    }
    page.execute(mouse_released(to.0, to.1, 1, 0)?).await?;
    Ok(())
}

/// Raw key down plus key up for Backspace, delivered to the focused element.
/// Callers focus the target first.
pub async fn press_backspace(page: &Page) -> Result<()> {
    debug!(target = "verify", "backspace");
    page.execute(key_event(DispatchKeyEventType::RawKeyDown)?)
        .await?;
    page.execute(key_event(DispatchKeyEventType::KeyUp)?).await?;
    Ok(())
}

/// Intermediate pointer positions from `from` (exclusive) to `to` (inclusive).
fn interpolate(from: (f64, f64), to: (f64, f64), steps: u32) -> Vec<(f64, f64)> {
    (1..=steps)
        .map(|i| {
            let t = f64::from(i) / f64::from(steps);
            (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_ends_exactly_at_target() {
        let path = interpolate((0.0, 0.0), (100.0, 50.0), 8);
        assert_eq!(path.len(), 8);
        assert_eq!(*path.last().unwrap(), (100.0, 50.0));
    }

    #[test]
    fn interpolate_moves_monotonically() {
        let path = interpolate((10.0, 200.0), (90.0, 40.0), 5);
        for pair in path.windows(2) {
            assert!(pair[1].0 > pair[0].0);
            assert!(pair[1].1 < pair[0].1);
        }
    }

    #[test]
    fn interpolate_excludes_the_start_point() {
        let path = interpolate((5.0, 5.0), (6.0, 6.0), 4);
        assert_ne!(path[0], (5.0, 5.0));
    }

    #[test]
    fn press_params_carry_click_count_and_modifiers() {
        let params = mouse_pressed(12.0, 34.0, 2, MODIFIER_CTRL).unwrap();
        assert_eq!(params.click_count, Some(2));
        assert_eq!(params.modifiers, Some(MODIFIER_CTRL));
        assert_eq!(params.x, 12.0);
        assert_eq!(params.y, 34.0);
    }

    #[test]
    fn drag_moves_keep_the_left_button_flag() {
        let params = mouse_moved(1.0, 2.0, LEFT_BUTTON_FLAG, 0).unwrap();
        assert_eq!(params.buttons, Some(LEFT_BUTTON_FLAG));
    }

    #[test]
    fn double_click_is_two_press_release_pairs_with_rising_counts() {
        let events = double_click_params(40.0, 60.0).unwrap();

        let kinds: Vec<_> = events.iter().map(|e| e.r#type.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DispatchMouseEventType::MouseMoved,
                DispatchMouseEventType::MousePressed,
                DispatchMouseEventType::MouseReleased,
                DispatchMouseEventType::MousePressed,
                DispatchMouseEventType::MouseReleased,
            ]
        );

        let counts: Vec<_> = events.iter().map(|e| e.click_count).collect();
        assert_eq!(counts, vec![None, Some(1), Some(1), Some(2), Some(2)]);
    }

    #[test]
    fn backspace_events_use_the_editing_key_code() {
        let down = key_event(DispatchKeyEventType::RawKeyDown).unwrap();
        assert_eq!(down.key.as_deref(), Some("Backspace"));
        assert_eq!(down.windows_virtual_key_code, Some(BACKSPACE_VIRTUAL_KEY));
    }
}
