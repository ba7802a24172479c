use crate::auth::use_auth;
use crate::components::job_tracker::{JobList, JobRow};
use crate::components::layout::PageHeader;
use crate::components::notice::{LoadErrorRow, NoticeToast, Notifier};
use leptos::prelude::*;
use workshop_shared::{Employee, JobUpdate};

/// 分配给当前员工的工单
#[component]
pub fn MyJobsPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = Notifier::new();
    let list = JobList::new(auth, notifier);
    let my_id = auth.identity_untracked().map(|i| i.id);

    list.load();

    let mine = move || {
        list.jobs
            .get()
            .into_iter()
            .filter(|job| my_id.is_some_and(|id| job.is_assigned_to(id)))
            .collect::<Vec<_>>()
    };
    let on_update = Callback::new(move |(id, changes): (i64, JobUpdate)| list.update(id, changes));
    let no_employees = Signal::derive(Vec::<Employee>::new);

    view! {
        <NoticeToast notifier=notifier />
        <PageHeader title="My Jobs" subtitle="Update status and progress of your assigned work.">
            <button on:click=move |_| list.load() disabled=move || list.loading.get() class="btn btn-ghost btn-sm">
                "Refresh"
            </button>
        </PageHeader>

        <div class="card bg-base-100 shadow-xl overflow-x-auto">
            <table class="table w-full">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Assigned to"</th>
                        <th>"Status"</th>
                        <th>"Progress"</th>
                        <th class="hidden md:table-cell">"Updated"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <LoadErrorRow error=list.load_error colspan=6 />
                    <Show when=move || {
                        mine().is_empty() && !list.loading.get() && list.load_error.with(Option::is_none)
                    }>
                        <tr>
                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                "Nothing assigned to you right now."
                            </td>
                        </tr>
                    </Show>
                    <For
                        each=mine
                        key=|job| (job.id, job.updated_at)
                        children=move |job| view! {
                            <JobRow job=job can_update=true can_manage=false employees=no_employees on_update=on_update />
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
