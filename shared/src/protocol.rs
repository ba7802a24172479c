use crate::{
    Created, Employee, Identity, Job, JobUpdate, LoginRequest, LoginResponse, Material,
    MaterialUpdate, MonthlyUsage, NewJob, NewMaterial, NewSparePartUsage, SparePartUsage,
};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Only POST and PUT carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// Replies whose body carries nothing we use (`{"message": ...}`, empty 204, ...).
pub type Ack = serde::de::IgnoredAny;

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token is attached (and a 401 counts against the session).
    const AUTHENTICATED: bool = true;
    /// The URL path relative to the API base.
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

/// Invalidate the session server-side
#[derive(Debug, Serialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/logout".to_string()
    }
}

/// Resolve the identity behind the current token
#[derive(Debug, Serialize)]
pub struct CurrentIdentityRequest;

impl ApiRequest for CurrentIdentityRequest {
    type Response = Identity;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/auth/me".to_string()
    }
}

// =========================================================
// Jobs
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListJobsRequest;

impl ApiRequest for ListJobsRequest {
    type Response = Vec<Job>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/jobs".to_string()
    }
}

impl ApiRequest for NewJob {
    type Response = Created;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/jobs".to_string()
    }
}

/// Partial update; only `changes` goes on the wire
#[derive(Debug, Serialize)]
pub struct UpdateJobRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub changes: JobUpdate,
}

impl ApiRequest for UpdateJobRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/jobs/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteJobRequest {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for DeleteJobRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/jobs/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct ListEmployeesRequest;

impl ApiRequest for ListEmployeesRequest {
    type Response = Vec<Employee>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/jobs/employees".to_string()
    }
}

// =========================================================
// Materials
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListMaterialsRequest;

impl ApiRequest for ListMaterialsRequest {
    type Response = Vec<Material>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/materials".to_string()
    }
}

impl ApiRequest for NewMaterial {
    type Response = Created;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/materials".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateMaterialRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub changes: MaterialUpdate,
}

impl ApiRequest for UpdateMaterialRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/materials/{}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteMaterialRequest {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for DeleteMaterialRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/materials/{}", self.id)
    }
}

// =========================================================
// Spare parts
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListSparePartsRequest;

impl ApiRequest for ListSparePartsRequest {
    type Response = Vec<SparePartUsage>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/spareparts".to_string()
    }
}

impl ApiRequest for NewSparePartUsage {
    type Response = Created;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/spareparts".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteSparePartRequest {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for DeleteSparePartRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/spareparts/{}", self.id)
    }
}

/// Server-side aggregation by month and part (managers only)
#[derive(Debug, Serialize)]
pub struct MonthlySummaryRequest;

impl ApiRequest for MonthlySummaryRequest {
    type Response = Vec<MonthlyUsage>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/spareparts/summary/monthly".to_string()
    }
}
