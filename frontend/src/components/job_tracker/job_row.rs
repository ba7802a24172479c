use crate::components::format::timestamp;
use leptos::ev::Event;
use leptos::prelude::*;
use workshop_shared::{Employee, Job, JobStatus, JobUpdate, clamp_progress};

/// 工单表格的一行
///
/// - `can_update`: 能否修改状态和进度（经理，或被分配的员工）
/// - `can_manage`: 能否修改标题和删除（经理）
/// - `employees`: 非空时显示分配下拉框（仅经理加载）
#[component]
pub fn JobRow(
    job: Job,
    can_update: bool,
    can_manage: bool,
    #[prop(into)] employees: Signal<Vec<Employee>>,
    #[prop(into)] on_update: Callback<(i64, JobUpdate)>,
    #[prop(optional_no_strip)] on_delete: Option<Callback<i64>>,
) -> impl IntoView {
    let id = job.id;
    let status = job.status;
    let assigned = job.assigned_to;

    let on_status = move |ev: Event| {
        if let Ok(next) = event_target_value(&ev).parse::<JobStatus>() {
            on_update.run((id, JobUpdate::status(next)));
        }
    };
    let on_progress = move |ev: Event| {
        if let Ok(value) = event_target_value(&ev).parse::<i64>() {
            on_update.run((id, JobUpdate::progress(clamp_progress(value))));
        }
    };
    let on_title = move |ev: Event| {
        let title = event_target_value(&ev).trim().to_string();
        if !title.is_empty() {
            let changes = JobUpdate {
                title: Some(title),
                ..Default::default()
            };
            on_update.run((id, changes));
        }
    };
    let on_assign = move |ev: Event| {
        let changes = JobUpdate {
            assigned_to: Some(event_target_value(&ev).parse().ok()),
            ..Default::default()
        };
        on_update.run((id, changes));
    };

    let assignee_cell = move || {
        if employees.with(|list| list.is_empty()) {
            view! { <span>{job.assigned_name.clone().unwrap_or_else(|| "Unassigned".to_string())}</span> }
                .into_any()
        } else {
            view! {
                <select class="select select-bordered select-sm" on:change=on_assign>
                    <option value="" selected=assigned.is_none()>"Unassigned"</option>
                    <For
                        each=move || employees.get()
                        key=|e| e.id
                        children=move |e| view! {
                            <option value=e.id.to_string() selected=assigned == Some(e.id)>{e.name}</option>
                        }
                    />
                </select>
            }
            .into_any()
        }
    };

    view! {
        <tr>
            <td class="font-semibold">
                {if can_manage {
                    view! {
                        <input
                            type="text"
                            class="input input-ghost input-sm font-semibold"
                            prop:value=job.title.clone()
                            on:change=on_title
                        />
                    }
                    .into_any()
                } else {
                    view! { <span>{job.title.clone()}</span> }.into_any()
                }}
            </td>
            <td>{assignee_cell}</td>
            <td>
                {if can_update {
                    view! {
                        <select class="select select-bordered select-sm" on:change=on_status>
                            {JobStatus::ALL
                                .into_iter()
                                .map(|s| view! {
                                    <option value=s.as_str() selected=s == status>{s.label()}</option>
                                })
                                .collect_view()}
                        </select>
                    }
                    .into_any()
                } else {
                    view! { <span class="badge badge-outline">{status.label()}</span> }.into_any()
                }}
            </td>
            <td>
                <div class="flex items-center gap-2">
                    <progress class="progress progress-primary w-24" value=job.progress max="100"></progress>
                    {if can_update {
                        view! {
                            <input
                                type="number"
                                min="0"
                                max="100"
                                class="input input-bordered input-sm w-20"
                                prop:value=job.progress.to_string()
                                on:change=on_progress
                            />
                        }
                        .into_any()
                    } else {
                        view! { <span class="text-sm">{format!("{}%", job.progress)}</span> }.into_any()
                    }}
                </div>
            </td>
            <td class="hidden md:table-cell text-xs opacity-70">{timestamp(&job.updated_at)}</td>
            <td>
                {on_delete.filter(|_| can_manage).map(|on_delete| view! {
                    <button class="btn btn-ghost btn-sm text-error" on:click=move |_| on_delete.run(id)>
                        "Delete"
                    </button>
                })}
            </td>
        </tr>
    }
}
