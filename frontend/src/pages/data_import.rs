use leptos::prelude::*;

use crate::components::uploader::CsvUploader;

#[component]
pub fn DataImportPage() -> impl IntoView {
    view! {
        <section class="data-page">
            <header class="page-header">
                <h1>"Data import"</h1>
                <p class="page-subtitle">
                    "Upload a CSV export to load customers, products, orders and transactions"
                </p>
            </header>
            <CsvUploader />
        </section>
    }
}
