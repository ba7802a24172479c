mod form_state;
mod job_row;

use crate::auth::{AuthContext, use_auth};
use crate::components::layout::PageHeader;
use crate::components::notice::{LoadErrorRow, NoticeToast, Notifier, confirm, load_failure};
use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use workshop_shared::{Employee, Job, JobStatus, JobUpdate};

pub use job_row::JobRow;

/// 工单列表状态及其增删改操作，全部工单页和“我的工单”页共用
#[derive(Clone, Copy)]
pub struct JobList {
    pub jobs: RwSignal<Vec<Job>>,
    pub loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,
    auth: AuthContext,
    notifier: Notifier,
}

impl JobList {
    pub fn new(auth: AuthContext, notifier: Notifier) -> Self {
        Self {
            jobs: RwSignal::new(Vec::new()),
            loading: RwSignal::new(true),
            load_error: RwSignal::new(None),
            auth,
            notifier,
        }
    }

    pub fn load(&self) {
        let this = *self;
        let api = self.auth.api();
        self.loading.set(true);
        spawn_local(async move {
            match api.jobs().list().await {
                Ok(data) => {
                    this.jobs.try_set(data);
                    this.load_error.try_set(None);
                }
                Err(e) => {
                    this.load_error.try_set(Some(load_failure("jobs", &e)));
                }
            }
            this.loading.try_set(false);
        });
    }

    pub fn update(&self, id: i64, changes: JobUpdate) {
        let this = *self;
        let api = self.auth.api();
        spawn_local(async move {
            match api.jobs().update(id, changes).await {
                Ok(()) => {
                    this.notifier.success("Job updated");
                    this.load();
                }
                Err(e) => this.notifier.error("Updating job", &e),
            }
        });
    }

    /// 删除前先确认
    pub fn delete(&self, id: i64) {
        if !confirm("Delete this job?") {
            return;
        }
        let this = *self;
        let api = self.auth.api();
        spawn_local(async move {
            match api.jobs().delete(id).await {
                Ok(()) => {
                    this.notifier.success("Job deleted");
                    this.load();
                }
                Err(e) => this.notifier.error("Deleting job", &e),
            }
        });
    }
}

/// 全部工单
///
/// 经理可以新建、分配和删除；员工只能更新分配给自己的工单。
#[component]
pub fn JobTrackerPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = Notifier::new();
    let list = JobList::new(auth, notifier);
    let form = FormState::new();
    let (employees, set_employees) = signal(Vec::<Employee>::new());
    let (submitting, set_submitting) = signal(false);

    let identity = auth.identity_untracked();
    let is_manager = identity.as_ref().is_some_and(|i| i.is_manager());
    let my_id = identity.map(|i| i.id);

    list.load();
    if is_manager {
        let api = auth.api();
        spawn_local(async move {
            match api.jobs().employees().await {
                Ok(data) => {
                    set_employees.try_set(data);
                }
                Err(e) => notifier.error("Loading employees", &e),
            }
        });
    }

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = form.to_request();
        let api = auth.api();
        set_submitting.set(true);
        spawn_local(async move {
            match api.jobs().create(&request).await {
                Ok(_) => {
                    notifier.success("Job created");
                    form.reset();
                    list.load();
                }
                Err(e) => notifier.error("Creating job", &e),
            }
            set_submitting.try_set(false);
        });
    };

    let on_update = Callback::new(move |(id, changes): (i64, JobUpdate)| list.update(id, changes));
    let on_delete = Callback::new(move |id: i64| list.delete(id));

    view! {
        <NoticeToast notifier=notifier />
        <PageHeader title="Jobs" subtitle="Track work across the workshop.">
            <button on:click=move |_| list.load() disabled=move || list.loading.get() class="btn btn-ghost btn-sm">
                "Refresh"
            </button>
        </PageHeader>

        <Show when=move || is_manager>
            <form class="card bg-base-100 shadow p-4 flex flex-col md:flex-row gap-2" on:submit=on_create>
                <input
                    type="text"
                    placeholder="Job title"
                    class="input input-bordered flex-1"
                    prop:value=form.title
                    on:input=move |ev| form.title.set(event_target_value(&ev))
                    required
                />
                <select
                    class="select select-bordered"
                    prop:value=form.assignee
                    on:change=move |ev| form.assignee.set(event_target_value(&ev))
                >
                    <option value="">"Unassigned"</option>
                    <For
                        each=move || employees.get()
                        key=|e| e.id
                        children=|e| view! { <option value=e.id.to_string()>{e.name}</option> }
                    />
                </select>
                <select
                    class="select select-bordered"
                    on:change=move |ev| {
                        if let Ok(status) = event_target_value(&ev).parse::<JobStatus>() {
                            form.status.set(status);
                        }
                    }
                >
                    {JobStatus::ALL
                        .into_iter()
                        .map(|s| view! {
                            <option value=s.as_str() selected=move || form.status.get() == s>{s.label()}</option>
                        })
                        .collect_view()}
                </select>
                <input
                    type="number"
                    min="0"
                    max="100"
                    title="Progress (%)"
                    class="input input-bordered w-24"
                    prop:value=move || form.progress.get().to_string()
                    on:input=move |ev| form.progress.set(event_target_value(&ev).parse().unwrap_or_default())
                />
                <button class="btn btn-primary" disabled=move || submitting.get()>"Add job"</button>
            </form>
        </Show>

        <div class="card bg-base-100 shadow-xl overflow-x-auto">
            <table class="table table-zebra w-full">
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
                        list.jobs.with(|j| j.is_empty()) && !list.loading.get() && list.load_error.with(Option::is_none)
                    }>
                        <tr>
                            <td colspan="6" class="text-center py-8 text-base-content/50">"No jobs yet."</td>
                        </tr>
                    </Show>
                    <For
                        each=move || list.jobs.get()
                        // 更新后整行重建，保证控件显示服务端的最新值
                        key=|job| (job.id, job.updated_at)
                        children=move |job| {
                            let can_update = is_manager || my_id.is_some_and(|id| job.is_assigned_to(id));
                            view! {
                                <JobRow
                                    job=job
                                    can_update=can_update
                                    can_manage=is_manager
                                    employees=employees
                                    on_update=on_update
                                    on_delete=is_manager.then_some(on_delete)
                                />
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
