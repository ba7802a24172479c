use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;
use workshop_shared::protocol::{DeleteMaterialRequest, ListMaterialsRequest, UpdateMaterialRequest};
use workshop_shared::{Created, Material, MaterialUpdate, NewMaterial, Validate};

pub struct Materials<'a, C> {
    api: &'a ApiClient<C>,
}

impl<'a, C: HttpClient> Materials<'a, C> {
    pub(crate) fn new(api: &'a ApiClient<C>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResult<Vec<Material>> {
        self.api.send(&ListMaterialsRequest).await
    }

    pub async fn create(&self, material: &NewMaterial) -> ApiResult<Created> {
        material.validate()?;
        self.api.send(material).await
    }

    pub async fn update(&self, id: i64, changes: MaterialUpdate) -> ApiResult<()> {
        self.api.send(&UpdateMaterialRequest { id, changes }).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.api.send(&DeleteMaterialRequest { id }).await?;
        Ok(())
    }
}
