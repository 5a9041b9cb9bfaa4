// Accessibility helpers

/// Id of the polite live region rendered by the app shell.
pub const STATUS_REGION_ID: &str = "wizard-status";

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Injected once by the app shell.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #2563eb;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Update the live region status for screen readers
///
/// Mirrors blocking alerts and submission outcomes so assistive technology
/// hears them even when the dialog is dismissed quickly.
pub fn set_status(msg: &str) {
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

/// Raise a blocking alert and announce it.
pub fn announce_alert(msg: &str) {
    set_status(msg);
    crate::dom::alert(msg);
}
