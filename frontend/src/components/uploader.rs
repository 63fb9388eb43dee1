use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::ImportOutcome;

const CLEAR_CONFIRMATION: &str =
    "Delete ALL imported data (customers, products, orders, transactions)? This cannot be undone.";

/// CSV import form plus the "clear all data" action.
#[component]
pub fn CsvUploader() -> impl IntoView {
    let file_input: NodeRef<html::Input> = NodeRef::new();
    let (busy, set_busy) = signal(false);
    let (outcome, set_outcome) = signal(None::<ImportOutcome>);

    let upload = move |_| {
        let file = file_input
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            set_outcome.set(Some(ImportOutcome {
                success: false,
                message: "Choose a CSV file first".to_string(),
                records_imported: None,
            }));
            return;
        };

        log::info!("Uploading {} ({} bytes)", file.name(), file.size());
        set_busy.set(true);
        set_outcome.set(None);
        spawn_local(async move {
            let result = api::upload_csv(&file).await;
            set_outcome.try_set(Some(result));
            set_busy.try_set(false);
        });
    };

    let clear = move |_| {
        let confirmed = window()
            .confirm_with_message(CLEAR_CONFIRMATION)
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            let result = api::clear_data().await;
            set_outcome.try_set(Some(result));
            set_busy.try_set(false);
        });
    };

    view! {
        <div class="uploader">
            <div class="upload-row">
                <input type="file" accept=".csv,text/csv" node_ref=file_input disabled=busy />
                <button class="upload-btn" on:click=upload disabled=busy>
                    {move || if busy.get() { "Working…" } else { "Upload CSV" }}
                </button>
            </div>

            {move || {
                outcome
                    .get()
                    .map(|outcome| {
                        let class = if outcome.success { "banner success" } else { "banner failure" };
                        view! {
                            <div class=class>
                                <span>{outcome.message}</span>
                                {outcome
                                    .records_imported
                                    .map(|n| view! { <span class="record-count">{format!("{n} records imported")}</span> })}
                            </div>
                        }
                    })
            }}

            <div class="danger-zone">
                <h3>"Danger zone"</h3>
                <p>"Remove every record imported so far."</p>
                <button class="danger-btn" on:click=clear disabled=busy>
                    "Clear all data"
                </button>
            </div>
        </div>
    }
}
