use crate::auth::use_auth;
use crate::components::layout::PageHeader;
use crate::components::notice::{LoadErrorRow, load_failure};
use leptos::prelude::*;
use leptos::task::spawn_local;
use workshop_shared::MonthlyUsage;

/// 备件月度汇总（汇总由服务端计算）
#[component]
pub fn UsageSummaryPage() -> impl IntoView {
    let auth = use_auth();
    let rows = RwSignal::new(Vec::<MonthlyUsage>::new());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(Option::<String>::None);

    let load = move || {
        let api = auth.api();
        loading.set(true);
        spawn_local(async move {
            match api.spare_parts().monthly_summary().await {
                Ok(data) => {
                    rows.try_set(data);
                    load_error.try_set(None);
                }
                Err(e) => {
                    load_error.try_set(Some(load_failure("the usage summary", &e)));
                }
            }
            loading.try_set(false);
        });
    };

    load();

    view! {
        <PageHeader title="Usage Summary" subtitle="Spare parts consumed per month.">
            <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-sm">
                "Refresh"
            </button>
        </PageHeader>

        <div class="card bg-base-100 shadow-xl overflow-x-auto">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Month"</th>
                        <th>"Part"</th>
                        <th>"Total used"</th>
                    </tr>
                </thead>
                <tbody>
                    <LoadErrorRow error=load_error colspan=3 />
                    <Show when=move || {
                        rows.with(|r| r.is_empty()) && !loading.get() && load_error.with(Option::is_none)
                    }>
                        <tr>
                            <td colspan="3" class="text-center py-8 text-base-content/50">"No usage recorded yet."</td>
                        </tr>
                    </Show>
                    <For
                        each=move || rows.get()
                        key=|r| (r.month.clone(), r.part_name.clone())
                        children=|r| view! {
                            <tr>
                                <td class="font-mono">{r.month}</td>
                                <td>{r.part_name}</td>
                                <td>{r.total_used}</td>
                            </tr>
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
