use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;
use workshop_shared::protocol::{
    DeleteSparePartRequest, ListSparePartsRequest, MonthlySummaryRequest,
};
use workshop_shared::{Created, MonthlyUsage, NewSparePartUsage, SparePartUsage, Validate};

pub struct SpareParts<'a, C> {
    api: &'a ApiClient<C>,
}

impl<'a, C: HttpClient> SpareParts<'a, C> {
    pub(crate) fn new(api: &'a ApiClient<C>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResult<Vec<SparePartUsage>> {
        self.api.send(&ListSparePartsRequest).await
    }

    /// 记录一次消耗；使用人由服务端根据会话确定
    pub async fn record(&self, usage: &NewSparePartUsage) -> ApiResult<Created> {
        usage.validate()?;
        self.api.send(usage).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.api.send(&DeleteSparePartRequest { id }).await?;
        Ok(())
    }

    /// 服务端计算的月度汇总（仅经理可见）
    pub async fn monthly_summary(&self) -> ApiResult<Vec<MonthlyUsage>> {
        self.api.send(&MonthlySummaryRequest).await
    }
}
