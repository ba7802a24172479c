use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;
use workshop_shared::protocol::{
    DeleteJobRequest, ListEmployeesRequest, ListJobsRequest, UpdateJobRequest,
};
use workshop_shared::{Created, Employee, Job, JobUpdate, NewJob, Validate};

pub struct Jobs<'a, C> {
    api: &'a ApiClient<C>,
}

impl<'a, C: HttpClient> Jobs<'a, C> {
    pub(crate) fn new(api: &'a ApiClient<C>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResult<Vec<Job>> {
        self.api.send(&ListJobsRequest).await
    }

    pub async fn create(&self, job: &NewJob) -> ApiResult<Created> {
        job.validate()?;
        self.api.send(job).await
    }

    pub async fn update(&self, id: i64, changes: JobUpdate) -> ApiResult<()> {
        self.api.send(&UpdateJobRequest { id, changes }).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.api.send(&DeleteJobRequest { id }).await?;
        Ok(())
    }

    /// 可分配工单的员工
    pub async fn employees(&self) -> ApiResult<Vec<Employee>> {
        self.api.send(&ListEmployeesRequest).await
    }
}
