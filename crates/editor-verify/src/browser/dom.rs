//! Page-state queries and polled expectations.
//!
//! Reads go through [`js`](super::js) expressions; expectations re-poll the
//! page until the asserted condition holds or the window closes, then fail
//! with the last observed state. Asserting only after awaiting the condition
//! keeps the steps robust against renders that complete asynchronously after
//! the triggering gesture.

use std::future::Future;
use std::time::Duration;

use chromiumoxide::page::Page;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::browser::js;
use crate::error::{Result, VerifyError};

/// How long a polled expectation keeps retrying before failing the run.
const EXPECT_TIMEOUT: Duration = Duration::from_secs(5);
const EXPECT_POLL: Duration = Duration::from_millis(100);

/// Viewport-relative bounding rectangle of an element.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

async fn eval<T: DeserializeOwned>(page: &Page, expr: &str) -> Result<T> {
    page.evaluate(expr)
        .await?
        .into_value::<T>()
        .map_err(|e| VerifyError::JsEval(format!("unexpected result shape: {e}")))
}

pub async fn count(page: &Page, selector: &str) -> Result<u64> {
    eval(page, &js::count_js(selector)).await
}

pub async fn attribute(
    page: &Page,
    selector: &str,
    nth: usize,
    name: &str,
) -> Result<Option<String>> {
    eval(page, &js::attribute_js(selector, nth, name)).await
}

pub async fn input_value(page: &Page, selector: &str) -> Result<Option<String>> {
    eval(page, &js::input_value_js(selector)).await
}

pub async fn element_rect(page: &Page, selector: &str, nth: usize) -> Result<Option<Rect>> {
    eval(page, &js::element_rect_js(selector, nth)).await
}

pub async fn is_visible(page: &Page, selector: &str, nth: usize) -> Result<bool> {
    eval(page, &js::visibility_js(selector, nth)).await
}

/// Rect of the nth match; the element must exist. Re-resolved on every call,
/// never cached across gestures.
pub async fn require_rect(page: &Page, selector: &str, nth: usize) -> Result<Rect> {
    element_rect(page, selector, nth)
        .await?
        .ok_or_else(|| VerifyError::ElementNotFound {
            selector: format!("{selector}[{nth}]"),
        })
}

pub async fn focus(page: &Page, selector: &str) -> Result<()> {
    if eval::<bool>(page, &js::focus_js(selector)).await? {
        Ok(())
    } else {
        Err(VerifyError::ElementNotFound {
            selector: selector.to_string(),
        })
    }
}

/// Polls `probe` until `accept` passes; on window exhaustion the last
/// observed state becomes the assertion diagnostic.
async fn await_condition<T, P, Fut>(
    check: String,
    mut probe: P,
    accept: impl Fn(&T) -> bool,
    describe: impl Fn(&T) -> String,
) -> Result<()>
where
    P: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let deadline = tokio::time::Instant::now() + EXPECT_TIMEOUT;

    loop {
        let observed = probe().await?;
        if accept(&observed) {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(VerifyError::Assertion {
                check,
                detail: describe(&observed),
            });
        }
        tokio::time::sleep(EXPECT_POLL).await;
    }
}

pub async fn expect_visible(page: &Page, selector: &str, nth: usize) -> Result<()> {
    await_condition(
        format!("{selector}[{nth}] visible"),
        || is_visible(page, selector, nth),
        |seen| *seen,
        |_| "element missing or hidden".to_string(),
    )
    .await
}

/// The nth match's attribute must equal `expected` exactly.
pub async fn expect_attr(
    page: &Page,
    selector: &str,
    nth: usize,
    name: &str,
    expected: &str,
) -> Result<()> {
    await_condition(
        format!("{selector}[{nth}] {name} == {expected:?}"),
        || attribute(page, selector, nth, name),
        |seen: &Option<String>| seen.as_deref() == Some(expected),
        |seen| match seen {
            Some(value) => format!("last observed {value:?}"),
            None => "attribute absent".to_string(),
        },
    )
    .await
}

/// The nth match's attribute must differ from the recorded pre-action value.
pub async fn expect_attr_changed(
    page: &Page,
    selector: &str,
    nth: usize,
    name: &str,
    initial: Option<&str>,
) -> Result<()> {
    await_condition(
        format!("{selector}[{nth}] {name} != {initial:?}"),
        || attribute(page, selector, nth, name),
        |seen: &Option<String>| seen.as_deref() != initial,
        |seen| format!("still {seen:?}"),
    )
    .await
}

/// The input's value must have moved away from `initial` while the element
/// is still present.
pub async fn expect_value_changed(page: &Page, selector: &str, initial: &str) -> Result<()> {
    await_condition(
        format!("{selector} value != {initial:?}"),
        || input_value(page, selector),
        |seen: &Option<String>| matches!(seen, Some(value) if value != initial),
        |seen| match seen {
            Some(value) => format!("still {value:?}"),
            None => "element missing".to_string(),
        },
    )
    .await
}

pub async fn expect_count(page: &Page, selector: &str, expected: u64) -> Result<()> {
    await_condition(
        format!("{selector} count == {expected}"),
        || count(page, selector),
        |seen: &u64| *seen == expected,
        |seen| format!("last observed {seen}"),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_center_is_the_midpoint() {
        let rect = Rect {
            x: 10.0,
            y: 20.0,
            width: 120.0,
            height: 60.0,
        };
        assert_eq!(rect.center(), (70.0, 50.0));
    }

    #[test]
    fn rect_deserializes_from_evaluation_payload() {
        let payload = r#"{"x":8.5,"y":16.0,"width":300.0,"height":250.0}"#;
        let rect: Rect = serde_json::from_str(payload).unwrap();
        assert_eq!(
            rect,
            Rect {
                x: 8.5,
                y: 16.0,
                width: 300.0,
                height: 250.0,
            }
        );
    }

    #[test]
    fn missing_rect_deserializes_to_none() {
        let rect: Option<Rect> = serde_json::from_str("null").unwrap();
        assert!(rect.is_none());
    }
}
