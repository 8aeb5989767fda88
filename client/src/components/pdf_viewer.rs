//! Inline PDF preview.

use leptos::prelude::*;

/// Embeds `url` in an iframe. Load failures are left to the browser.
#[component]
pub fn PdfViewer(#[prop(into)] url: String) -> impl IntoView {
    view! {
        <div class="pdf-viewer">
            <iframe class="pdf-viewer__frame" src=url title="PDF Preview"></iframe>
        </div>
    }
}
