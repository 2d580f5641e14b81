//! In-page script payloads
//!
//! The settle choreography and the capture call are remote procedure calls
//! into the engine's scripting capability. The script text is an opaque
//! payload owned by this module; nothing outside it may assume anything
//! about the markup. Bump [`PAYLOAD_VERSION`] when the choreography changes
//! so engine-side logs can attribute behavior to a script revision.

use crate::RenderMode;

/// Revision marker embedded in the injected trusted-types policy name
pub const PAYLOAD_VERSION: &str = "v1";

// The settle sequence: hide scrollbar chrome, force lazily-loaded content to
// materialize by scrolling to the bottom and back, then give the page one
// settle delay plus a final frame before capture.
const SETTLE_TEMPLATE: &str = r#"new Promise(resolve => {
    const style = document.createElement('style')
    const policy = trustedTypes.createPolicy('svgpress-{{VERSION}}/scrollbar-css', { createHTML: x => x })

    style.innerHTML = policy.createHTML(`
        body::-webkit-scrollbar, body::-webkit-scrollbar-track, body::-webkit-scrollbar-thumb {
            display: none;
        }
    `)

    document.head.appendChild(style)
    scrollTo({ top: document.body.scrollHeight })

    requestAnimationFrame(() => {
        scrollTo({ top: 0 })

        setTimeout(() => {
            requestAnimationFrame(() => resolve(true))
        }, {{SETTLE_DELAY_MS}})
    })
})"#;

const CAPTURE_TEMPLATE: &str = "getPageContentsAsSVG({{MODE}}, document.title)";

/// Script driving the settle sequence; resolves once the page has had
/// `settle_delay_ms` plus two animation frames to stabilize.
pub fn settle_script(settle_delay_ms: u64) -> String {
    SETTLE_TEMPLATE
        .replace("{{VERSION}}", PAYLOAD_VERSION)
        .replace("{{SETTLE_DELAY_MS}}", &settle_delay_ms.to_string())
}

/// Script invoking the engine's capture primitive with the resolved mode and
/// the page's own title.
pub fn capture_script(mode: RenderMode) -> String {
    CAPTURE_TEMPLATE.replace("{{MODE}}", &mode.code().to_string())
}
