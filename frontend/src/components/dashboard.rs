use crate::auth::use_auth;
use crate::components::layout::PageHeader;
use crate::components::notice::load_failure;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use workshop::{AppRoute, DashboardOverview};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let (overview, set_overview) = signal(DashboardOverview::default());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);

    let load = move || {
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            match api.dashboard_overview().await {
                Ok(data) => {
                    set_overview.try_set(data);
                    set_load_error.try_set(None);
                }
                Err(e) => {
                    set_load_error.try_set(Some(load_failure("the dashboard", &e)));
                }
            }
            set_loading.try_set(false);
        });
    };

    load();

    let greeting = move || {
        auth.identity_untracked()
            .map(|identity| format!("Welcome back, {}", identity.name))
            .unwrap_or_default()
    };
    let summary = move || overview.get().jobs;
    let is_manager = auth
        .identity_untracked()
        .is_some_and(|identity| identity.is_manager());

    view! {
        <PageHeader title="Dashboard" subtitle=greeting()>
            <Show when=move || is_manager>
                <Link route=AppRoute::Jobs class={"btn btn-primary btn-sm".to_string()}>
                    "New job"
                </Link>
            </Show>
            <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-sm">
                "Refresh"
            </button>
        </PageHeader>

        <Show when=move || load_error.with(Option::is_some)>
            <div role="alert" class="alert alert-error">
                <span>{move || load_error.get().unwrap_or_default()}</span>
            </div>
        </Show>

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"Total jobs"</div>
                <div class="stat-value text-primary">{move || summary().total}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Pending"</div>
                <div class="stat-value">{move || summary().pending}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"In progress"</div>
                <div class="stat-value text-info">{move || summary().in_progress}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Completed"</div>
                <div class="stat-value text-success">{move || summary().completed}</div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"Low stock"</h3>
                <Show
                    when=move || !overview.with(|o| o.low_stock.is_empty())
                    fallback=move || view! {
                        <p class="text-base-content/50">
                            {move || {
                                if loading.get() {
                                    "Loading..."
                                } else if load_error.with(Option::is_some) {
                                    "Stock levels are unavailable."
                                } else {
                                    "All materials are above their minimum level."
                                }
                            }}
                        </p>
                    }
                >
                    <ul class="space-y-1">
                        <For
                            each=move || overview.get().low_stock
                            key=|m| m.id
                            children=|m| view! {
                                <li class="flex justify-between">
                                    <span>{m.name.clone()}</span>
                                    <span class="badge badge-warning">
                                        {format!("{} / {} {}", m.quantity, m.minimum_level, m.unit)}
                                    </span>
                                </li>
                            }
                        />
                    </ul>
                </Show>
            </div>
        </div>
    }
}
