//! 新建工单表单状态
//!
//! 将零散的 signal 整合为 `FormState`，负责数据的持有、重置和到请求对象的转换。

use leptos::prelude::*;
use workshop_shared::{JobStatus, NewJob, clamp_progress};

/// 使用 `RwSignal` 因为它实现了 `Copy`，可以作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub title: RwSignal<String>,
    /// 下拉框的值；空字符串表示不分配
    pub assignee: RwSignal<String>,
    pub status: RwSignal<JobStatus>,
    pub progress: RwSignal<i64>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            assignee: RwSignal::new(String::new()),
            status: RwSignal::new(JobStatus::Pending),
            progress: RwSignal::new(0),
        }
    }

    pub fn reset(&self) {
        self.title.set(String::new());
        self.assignee.set(String::new());
        self.status.set(JobStatus::Pending);
        self.progress.set(0);
    }

    pub fn to_request(&self) -> NewJob {
        NewJob {
            title: self.title.get().trim().to_string(),
            assigned_to: self.assignee.get().parse().ok(),
            status: self.status.get(),
            progress: clamp_progress(self.progress.get()),
        }
    }
}
