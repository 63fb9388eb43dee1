use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{Project, ProjectStatus};
use crate::resource::decode_list;

fn status_class(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Planning => "status planning",
        ProjectStatus::InProgress => "status in-progress",
        ProjectStatus::Done => "status done",
        ProjectStatus::Blocked => "status blocked",
    }
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (query, set_query) = signal(String::new());

    spawn_local(async move {
        match api::get_value(api::PROJECTS_PATH).await {
            Ok(value) => {
                set_projects.try_set(decode_list(value, None));
            }
            Err(e) => log::error!("Failed to fetch projects: {e}"),
        }
    });

    let visible = move || {
        let q = query.get();
        projects.with(|all| all.iter().filter(|p| p.matches(&q)).cloned().collect::<Vec<_>>())
    };

    view! {
        <section class="projects-page">
            <header class="page-header">
                <h1>"Projects"</h1>
                <p class="page-subtitle">"Customer projects and their progress"</p>
            </header>

            <input
                class="search-box"
                type="search"
                placeholder="Search by code, name or customer"
                prop:value=query
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Code"</th>
                        <th>"Name"</th>
                        <th>"Customer"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For each=visible key=|p| p.id let:project>
                        <tr>
                            <td>{project.display_code()}</td>
                            <td>{project.name.clone()}</td>
                            <td>{project.display_customer().to_string()}</td>
                            <td>
                                <span class=status_class(project.status())>{project.status().label()}</span>
                            </td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </section>
    }
}
