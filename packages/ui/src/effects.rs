//! Browser side effects driven through `document::eval`.

use dioxus::prelude::*;

const CONFETTI_JS: &str =
    "https://cdn.jsdelivr.net/npm/canvas-confetti@1.9.3/dist/confetti.browser.min.js";

/// Load canvas-confetti once per page.
pub(crate) fn use_confetti_script() {
    use_effect(|| {
        let js = format!(
            r#"(function() {{
                if (document.getElementById('canvas-confetti')) {{ return; }}
                var script = document.createElement('script');
                script.id = 'canvas-confetti';
                script.src = '{CONFETTI_JS}';
                document.head.appendChild(script);
            }})();"#,
        );
        document::eval(&js);
    });
}

/// Burst of confetti; silently skipped if the script has not loaded yet.
pub(crate) fn fire_confetti() {
    document::eval("if (window.confetti) { window.confetti(); }");
}

/// Copy `text` to the clipboard, then tell the user.
pub(crate) fn copy_to_clipboard(text: &str) {
    let literal = match serde_json::to_string(text) {
        Ok(literal) => literal,
        Err(e) => {
            tracing::error!("Failed to encode clipboard text: {}", e);
            return;
        }
    };
    let js = format!(
        r#"navigator.clipboard.writeText({literal})
            .then(function() {{ alert('Copied to clipboard!'); }})
            .catch(function(err) {{ console.error('Clipboard write failed:', err); }});"#
    );
    document::eval(&js);
}
