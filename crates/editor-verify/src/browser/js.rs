//! JavaScript expression builders for reading page state.
//!
//! Every query the driver performs goes through `document.querySelector`-based
//! expressions evaluated in the page, returning JSON values. Selectors are
//! embedded as single-quoted string literals, so they are escaped here.

pub fn escape_selector(selector: &str) -> String {
    selector.replace('\\', "\\\\").replace('\'', "\\'")
}

pub fn selector_exists_js(selector: &str) -> String {
    let escaped = escape_selector(selector);
    format!("document.querySelector('{escaped}') !== null")
}

pub fn count_js(selector: &str) -> String {
    let escaped = escape_selector(selector);
    format!("document.querySelectorAll('{escaped}').length")
}

/// Attribute value of the nth match, `null` when the element or the attribute
/// is absent.
pub fn attribute_js(selector: &str, nth: usize, name: &str) -> String {
    let escaped = escape_selector(selector);
    let name = escape_selector(name);
    format!(
        r#"(() => {{
            const el = document.querySelectorAll('{escaped}')[{nth}];
            return el ? el.getAttribute('{name}') : null;
        }})()"#
    )
}

pub fn input_value_js(selector: &str) -> String {
    let escaped = escape_selector(selector);
    format!(
        r#"(() => {{
            const el = document.querySelector('{escaped}');
            return el ? el.value : null;
        }})()"#
    )
}

/// Viewport-relative bounding rect of the nth match, `null` when unmatched.
/// The same coordinate space CDP input dispatch uses, so centers computed
/// from this feed gestures directly.
pub fn element_rect_js(selector: &str, nth: usize) -> String {
    let escaped = escape_selector(selector);
    format!(
        r#"(() => {{
            const el = document.querySelectorAll('{escaped}')[{nth}];
            if (!el) return null;
            const rect = el.getBoundingClientRect();
            return {{ x: rect.x, y: rect.y, width: rect.width, height: rect.height }};
        }})()"#
    )
}

/// An element counts as visible when it has a non-empty box and is not
/// hidden away by `display` or `visibility`.
pub fn visibility_js(selector: &str, nth: usize) -> String {
    let escaped = escape_selector(selector);
    format!(
        r#"(() => {{
            const el = document.querySelectorAll('{escaped}')[{nth}];
            if (!el) return false;
            const rect = el.getBoundingClientRect();
            if (rect.width <= 0 || rect.height <= 0) return false;
            const style = window.getComputedStyle(el);
            return style.display !== 'none' && style.visibility !== 'hidden';
        }})()"#
    )
}

pub fn focus_js(selector: &str) -> String {
    let escaped = escape_selector(selector);
    format!(
        r#"(() => {{
            const el = document.querySelector('{escaped}');
            if (!el) return false;
            el.focus();
            return true;
        }})()"#
    )
}

/// Load-progress snapshot for the network-idle wait: document readiness plus
/// the number of resource fetches recorded so far.
pub fn load_snapshot_js() -> &'static str {
    r#"(() => {
        return {
            ready: document.readyState,
            resources: performance.getEntriesByType('resource').length
        };
    })()"#
}
