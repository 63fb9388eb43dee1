use leptos::prelude::*;

use crate::state::{AppState, Page};

/// Page switcher grouped by section.
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();

    let mut sections: Vec<(&'static str, Vec<Page>)> = Vec::new();
    for page in Page::ALL {
        match sections.iter_mut().find(|(name, _)| *name == page.section()) {
            Some((_, pages)) => pages.push(page),
            None => sections.push((page.section(), vec![page])),
        }
    }

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2>"ERP-MCP"</h2>
            </div>
            <nav class="page-list">
                {sections
                    .into_iter()
                    .map(|(name, pages)| {
                        view! {
                            <div class="nav-section">
                                <div class="nav-section-title">{name}</div>
                                {pages
                                    .into_iter()
                                    .map(|page| {
                                        view! {
                                            <div
                                                class="page-item"
                                                class:active=move || state.page.get() == page
                                                on:click=move |_| state.open(page)
                                            >
                                                {page.title()}
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}
