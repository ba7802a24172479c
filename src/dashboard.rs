use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;
use workshop_shared::{JobSummary, Material, low_stock};

/// 仪表盘数据：工单统计 + 低库存物料
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardOverview {
    pub jobs: JobSummary,
    pub low_stock: Vec<Material>,
}

impl<C: HttpClient> ApiClient<C> {
    /// 并发拉取工单与物料，任一失败即整体失败
    pub async fn dashboard_overview(&self) -> ApiResult<DashboardOverview> {
        let jobs = self.jobs();
        let materials = self.materials();
        let (jobs, materials) = futures::try_join!(jobs.list(), materials.list())?;

        Ok(DashboardOverview {
            jobs: JobSummary::from_jobs(&jobs),
            low_stock: low_stock(&materials),
        })
    }
}
