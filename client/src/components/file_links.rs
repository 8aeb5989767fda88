//! Download links and the PDF preview section for produced files.

use leptos::prelude::*;

use crate::components::pdf_viewer::PdfViewer;
use crate::state::session::{FileLink, SessionState};
use crate::util::clock::now_millis;

fn download_name(link: &FileLink) -> String {
    contract::download_filename(link.kind, now_millis())
}

/// Renders whichever file slots the session has filled.
#[component]
pub fn FileLinks() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let ppt = move || session.get().ppt;
    let pdf = move || session.get().pdf;

    view! {
        {move || {
            ppt()
                .map(|link| {
                    let name = download_name(&link);
                    let label = if link.kind == contract::FileKind::Pptx { "Download PPTX" } else { "Download file" };
                    view! {
                        <div class="section">
                            <a class="link" href=link.url download=name>
                                {label}
                            </a>
                        </div>
                    }
                })
        }}
        {move || {
            pdf()
                .map(|link| {
                    let name = download_name(&link);
                    let url = link.url.clone();
                    view! {
                        <div class="section">
                            <h3>"Preview PDF"</h3>
                            <PdfViewer url=url.clone()/>
                            <div class="section__links">
                                <a class="link" href=url.clone() target="_blank" rel="noopener noreferrer">
                                    "Open PDF in new tab"
                                </a>
                                " · "
                                <a class="link" href=url download=name>
                                    "Download PDF"
                                </a>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
