mod form_state;

use crate::auth::use_auth;
use crate::components::format::timestamp;
use crate::components::layout::PageHeader;
use crate::components::notice::{LoadErrorRow, NoticeToast, Notifier, confirm, load_failure};
use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use workshop_shared::{Material, MaterialUpdate};

fn parse_number(ev: &leptos::ev::Event) -> Option<i64> {
    event_target_value(ev).trim().parse().ok()
}

/// 物料库存
///
/// 所有人可查看；新建、修改和删除仅限经理。库存不高于最低水位时高亮。
#[component]
pub fn MaterialsPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = Notifier::new();
    let form = FormState::new();
    let materials = RwSignal::new(Vec::<Material>::new());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(Option::<String>::None);
    let is_manager = auth
        .identity_untracked()
        .is_some_and(|identity| identity.is_manager());

    let load = move || {
        let api = auth.api();
        loading.set(true);
        spawn_local(async move {
            match api.materials().list().await {
                Ok(data) => {
                    materials.try_set(data);
                    load_error.try_set(None);
                }
                Err(e) => {
                    load_error.try_set(Some(load_failure("materials", &e)));
                }
            }
            loading.try_set(false);
        });
    };

    load();

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = form.to_request();
        let api = auth.api();
        spawn_local(async move {
            match api.materials().create(&request).await {
                Ok(_) => {
                    notifier.success("Material added");
                    form.reset();
                    load();
                }
                Err(e) => notifier.error("Adding material", &e),
            }
        });
    };

    let update = move |id: i64, changes: MaterialUpdate| {
        let api = auth.api();
        spawn_local(async move {
            match api.materials().update(id, changes).await {
                Ok(()) => {
                    notifier.success("Material updated");
                    load();
                }
                Err(e) => notifier.error("Updating material", &e),
            }
        });
    };

    let delete = move |id: i64| {
        if !confirm("Delete this material?") {
            return;
        }
        let api = auth.api();
        spawn_local(async move {
            match api.materials().delete(id).await {
                Ok(()) => {
                    notifier.success("Material deleted");
                    load();
                }
                Err(e) => notifier.error("Deleting material", &e),
            }
        });
    };

    let low_count = move || materials.with(|list| list.iter().filter(|m| m.is_low_stock()).count());

    view! {
        <NoticeToast notifier=notifier />
        <PageHeader title="Materials" subtitle="Stock levels for consumables.">
            <Show when=move || { low_count() > 0 }>
                <span class="badge badge-warning">{move || format!("{} low", low_count())}</span>
            </Show>
            <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-sm">
                "Refresh"
            </button>
        </PageHeader>

        <Show when=move || is_manager>
            <form class="card bg-base-100 shadow p-4 grid grid-cols-1 md:grid-cols-5 gap-2" on:submit=on_create>
                <input
                    type="text"
                    placeholder="Material name"
                    class="input input-bordered md:col-span-2"
                    prop:value=form.name
                    on:input=move |ev| form.name.set(event_target_value(&ev))
                    required
                />
                <input
                    type="number"
                    min="0"
                    title="Quantity"
                    class="input input-bordered"
                    prop:value=move || form.quantity.get().to_string()
                    on:input=move |ev| form.quantity.set(parse_number(&ev).unwrap_or_default())
                />
                <input
                    type="number"
                    min="0"
                    title="Minimum level"
                    class="input input-bordered"
                    prop:value=move || form.minimum_level.get().to_string()
                    on:input=move |ev| form.minimum_level.set(parse_number(&ev).unwrap_or_default())
                />
                <div class="flex gap-2">
                    <input
                        type="text"
                        title="Unit"
                        class="input input-bordered w-20"
                        prop:value=form.unit
                        on:input=move |ev| form.unit.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary flex-1">"Add"</button>
                </div>
            </form>
        </Show>

        <div class="card bg-base-100 shadow-xl overflow-x-auto">
            <table class="table w-full">
                <thead>
                    <tr>
                        <th>"Material"</th>
                        <th>"Quantity"</th>
                        <th>"Minimum"</th>
                        <th class="hidden md:table-cell">"Updated"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <LoadErrorRow error=load_error colspan=5 />
                    <Show when=move || {
                        materials.with(|m| m.is_empty()) && !loading.get() && load_error.with(Option::is_none)
                    }>
                        <tr>
                            <td colspan="5" class="text-center py-8 text-base-content/50">"No materials recorded."</td>
                        </tr>
                    </Show>
                    <For
                        each=move || materials.get()
                        key=|m| (m.id, m.quantity, m.minimum_level, m.updated_at)
                        children=move |m| {
                            let id = m.id;
                            let low = m.is_low_stock();
                            view! {
                                <tr class=if low { "bg-warning/20" } else { "" }>
                                    <td class="font-semibold">
                                        {m.name.clone()}
                                        {low.then(|| view! { <span class="badge badge-warning badge-sm ml-2">"Low"</span> })}
                                    </td>
                                    <td>
                                        <div class="flex items-center gap-1">
                                            {if is_manager {
                                                view! {
                                                    <input
                                                        type="number"
                                                        min="0"
                                                        class="input input-bordered input-sm w-24"
                                                        prop:value=m.quantity.to_string()
                                                        on:change=move |ev| {
                                                            if let Some(quantity) = parse_number(&ev) {
                                                                update(id, MaterialUpdate {
                                                                    quantity: Some(quantity.max(0)),
                                                                    ..Default::default()
                                                                });
                                                            }
                                                        }
                                                    />
                                                }
                                                .into_any()
                                            } else {
                                                view! { <span>{m.quantity}</span> }.into_any()
                                            }}
                                            <span class="text-sm opacity-70">{m.unit.clone()}</span>
                                        </div>
                                    </td>
                                    <td>
                                        {if is_manager {
                                            view! {
                                                <input
                                                    type="number"
                                                    min="0"
                                                    class="input input-bordered input-sm w-20"
                                                    prop:value=m.minimum_level.to_string()
                                                    on:change=move |ev| {
                                                        if let Some(level) = parse_number(&ev) {
                                                            update(id, MaterialUpdate {
                                                                minimum_level: Some(level.max(0)),
                                                                ..Default::default()
                                                            });
                                                        }
                                                    }
                                                />
                                            }
                                            .into_any()
                                        } else {
                                            view! { <span>{m.minimum_level}</span> }.into_any()
                                        }}
                                    </td>
                                    <td class="hidden md:table-cell text-xs opacity-70">
                                        {m.updated_at.as_ref().map(timestamp).unwrap_or_default()}
                                    </td>
                                    <td>
                                        <Show when=move || is_manager>
                                            <button class="btn btn-ghost btn-sm text-error" on:click=move |_| delete(id)>
                                                "Delete"
                                            </button>
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
