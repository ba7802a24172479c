//! 派生统计
//!
//! 仪表盘上展示的数据都由列表即时计算，不做存储。

use crate::{Job, JobStatus, Material};

/// 按状态统计的工单数量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl JobSummary {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        jobs.iter().fold(Self::default(), |mut acc, job| {
            acc.total += 1;
            match job.status {
                JobStatus::Pending => acc.pending += 1,
                JobStatus::InProgress => acc.in_progress += 1,
                JobStatus::Completed => acc.completed += 1,
            }
            acc
        })
    }
}

/// 低库存物料（保持原顺序）
pub fn low_stock(materials: &[Material]) -> Vec<Material> {
    materials
        .iter()
        .filter(|m| m.is_low_stock())
        .cloned()
        .collect()
}
