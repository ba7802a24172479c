use crate::auth::use_auth;
use crate::components::format::date;
use crate::components::layout::PageHeader;
use crate::components::notice::{LoadErrorRow, NoticeToast, Notifier, confirm, load_failure};
use leptos::prelude::*;
use leptos::task::spawn_local;
use workshop_shared::{NewSparePartUsage, SparePartUsage};

/// 备件消耗记录
///
/// 任何人都可以登记消耗，使用人由服务端按当前会话填写；删除仅限经理。
#[component]
pub fn SparePartsPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = Notifier::new();
    let usages = RwSignal::new(Vec::<SparePartUsage>::new());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(Option::<String>::None);
    let part_name = RwSignal::new(String::new());
    let quantity = RwSignal::new(1i64);
    let is_manager = auth
        .identity_untracked()
        .is_some_and(|identity| identity.is_manager());

    let load = move || {
        let api = auth.api();
        loading.set(true);
        spawn_local(async move {
            match api.spare_parts().list().await {
                Ok(data) => {
                    usages.try_set(data);
                    load_error.try_set(None);
                }
                Err(e) => {
                    load_error.try_set(Some(load_failure("spare parts", &e)));
                }
            }
            loading.try_set(false);
        });
    };

    load();

    let on_record = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = NewSparePartUsage {
            part_name: part_name.get().trim().to_string(),
            quantity_used: quantity.get(),
        };
        let api = auth.api();
        spawn_local(async move {
            match api.spare_parts().record(&request).await {
                Ok(_) => {
                    notifier.success("Usage recorded");
                    part_name.try_set(String::new());
                    quantity.try_set(1);
                    load();
                }
                Err(e) => notifier.error("Recording usage", &e),
            }
        });
    };

    let delete = move |id: i64| {
        if !confirm("Delete this usage entry?") {
            return;
        }
        let api = auth.api();
        spawn_local(async move {
            match api.spare_parts().delete(id).await {
                Ok(()) => {
                    notifier.success("Entry deleted");
                    load();
                }
                Err(e) => notifier.error("Deleting entry", &e),
            }
        });
    };

    view! {
        <NoticeToast notifier=notifier />
        <PageHeader title="Spare Parts" subtitle="Parts taken from stock and who used them.">
            <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-sm">
                "Refresh"
            </button>
        </PageHeader>

        <form class="card bg-base-100 shadow p-4 flex flex-col md:flex-row gap-2" on:submit=on_record>
            <input
                type="text"
                placeholder="Part name"
                class="input input-bordered flex-1"
                prop:value=part_name
                on:input=move |ev| part_name.set(event_target_value(&ev))
                required
            />
            <input
                type="number"
                min="1"
                class="input input-bordered w-28"
                prop:value=move || quantity.get().to_string()
                on:input=move |ev| quantity.set(event_target_value(&ev).parse().unwrap_or(1))
            />
            <button class="btn btn-primary">"Record usage"</button>
        </form>

        <div class="card bg-base-100 shadow-xl overflow-x-auto">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Part"</th>
                        <th>"Quantity"</th>
                        <th>"Used by"</th>
                        <th>"Date"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <LoadErrorRow error=load_error colspan=5 />
                    <Show when=move || {
                        usages.with(|u| u.is_empty()) && !loading.get() && load_error.with(Option::is_none)
                    }>
                        <tr>
                            <td colspan="5" class="text-center py-8 text-base-content/50">"No usage recorded."</td>
                        </tr>
                    </Show>
                    <For
                        each=move || usages.get()
                        key=|u| u.id
                        children=move |u| {
                            let id = u.id;
                            view! {
                                <tr>
                                    <td class="font-semibold">{u.part_name.clone()}</td>
                                    <td>{u.quantity_used}</td>
                                    <td>{u.used_by_label()}</td>
                                    <td>{date(&u.used_date)}</td>
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
