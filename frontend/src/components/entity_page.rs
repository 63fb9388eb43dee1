use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::resource::{Editable, Field, Resource, ResourceState, StatCard};

/// List, stats and edit form for one entity collection.
pub fn entity_page<T: Editable>() -> impl IntoView {
    let (state, set_state) = signal(ResourceState::<T>::new());
    let (stats, set_stats) = signal(T::Stats::default());
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        match api::fetch_list::<T>().await {
            Ok(items) => {
                set_state.try_update(|s| s.load(items));
            }
            Err(e) => log::error!("Failed to fetch {}: {e}", T::COLLECTION),
        }
        set_loading.try_set(false);
    });
    spawn_local(refresh_stats::<T>(set_stats));

    // Only re-render the form when a different record is opened.
    let open_id = Memo::new(move |_| state.with(|s| s.draft().map(|d| d.id())));

    view! {
        <section class="entity-page">
            <header class="page-header">
                <h1>{T::TITLE}</h1>
                <p class="page-subtitle">{T::SUBTITLE}</p>
            </header>

            <div class="stat-grid">
                {move || {
                    stats
                        .with(|s| T::stat_cards(s))
                        .into_iter()
                        .map(|card| view! { <StatCardView card=card /> })
                        .collect_view()
                }}
            </div>

            <div class="entity-body">
                <table class="data-table">
                    <thead>
                        <tr>{T::columns().iter().map(|c| view! { <th>{*c}</th> }).collect_view()}</tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = state.with(|s| {
                                s.items().iter().map(|item| (item.id(), item.cells())).collect::<Vec<_>>()
                            });
                            if rows.is_empty() {
                                let text = if loading.get() { "Loading…" } else { "No records" };
                                return view! {
                                    <tr>
                                        <td class="empty-row" colspan=T::columns().len().to_string()>
                                            {text}
                                        </td>
                                    </tr>
                                }
                                .into_any();
                            }
                            rows.into_iter()
                                .map(|(id, cells)| {
                                    view! {
                                        <tr
                                            class="clickable"
                                            class:selected=move || open_id.get() == Some(id)
                                            on:click=move |_| {
                                                set_state.update(|s| {
                                                    s.select(id);
                                                });
                                            }
                                        >
                                            {cells.into_iter().map(|c| view! { <td>{c}</td> }).collect_view()}
                                        </tr>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>

                {move || open_id.get().map(|_| edit_form::<T>(state, set_state, set_stats))}
            </div>
        </section>
    }
}

#[component]
fn StatCardView(card: StatCard) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-label">{card.label}</div>
            <div class="stat-value">{card.value}</div>
            {card.hint.map(|hint| view! { <div class="stat-hint">{hint}</div> })}
        </div>
    }
}

async fn refresh_stats<T: Resource>(set_stats: WriteSignal<T::Stats>) {
    match api::fetch_stats::<T>().await {
        Ok(stats) => {
            set_stats.try_set(stats);
        }
        Err(e) => log::error!("Failed to fetch {} stats: {e}", T::COLLECTION),
    }
}

fn save<T: Editable>(set_state: WriteSignal<ResourceState<T>>, set_stats: WriteSignal<T::Stats>) {
    let Some(request) = set_state.try_update(|s| s.begin_save()).flatten() else {
        return;
    };
    log::debug!("Saving {} #{}", T::COLLECTION, request.id);

    spawn_local(async move {
        match api::put_json::<_, T>(&request.path, &request.body).await {
            Ok(updated) => {
                set_state.try_update(|s| s.save_succeeded(updated));
                refresh_stats::<T>(set_stats).await;
            }
            Err(e) => {
                set_state.try_update(|s| s.save_failed(&e));
            }
        }
    });
}

fn edit_form<T: Editable>(
    state: ReadSignal<ResourceState<T>>,
    set_state: WriteSignal<ResourceState<T>>,
    set_stats: WriteSignal<T::Stats>,
) -> impl IntoView {
    let inputs = T::fields()
        .into_iter()
        .map(|field| field_input(field, state, set_state))
        .collect_view();

    let saving = move || state.with(|s| s.is_saving());
    let dirty = move || state.with(|s| s.is_dirty());

    view! {
        <aside class="edit-panel">
            <div class="edit-header">
                <h3>{format!("Edit {}", T::TITLE.to_lowercase())}</h3>
                <button class="close-btn" disabled=saving on:click=move |_| set_state.update(|s| s.close())>
                    "×"
                </button>
            </div>
            <form
                class="edit-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    save::<T>(set_state, set_stats);
                }
            >
                {inputs}
                {move || state.with(|s| s.error().map(|e| e.to_string())).map(|err| view! { <div class="error-banner">{err}</div> })}
                <button type="submit" class="save-btn" disabled=move || saving() || !dirty()>
                    {move || if saving() { "Saving…" } else { "Save changes" }}
                </button>
            </form>
        </aside>
    }
}

fn field_input<T: Editable>(
    field: Field<T>,
    state: ReadSignal<ResourceState<T>>,
    set_state: WriteSignal<ResourceState<T>>,
) -> impl IntoView {
    let value = move || state.with(|s| s.draft().map(|d| (field.get)(d)).unwrap_or_default());
    let kind = if field.numeric { "number" } else { "text" };

    view! {
        <label class="form-field">
            <span>{field.label}</span>
            <input
                type=kind
                prop:value=value
                disabled=move || state.with(|s| s.is_saving())
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    set_state.update(|s| s.edit(&field, &raw));
                }
            />
        </label>
    }
}
