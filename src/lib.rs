//! 车间管理客户端核心
//!
//! 与浏览器无关的部分：会话、路由守卫、REST 资源客户端。
//! HTTP 传输和令牌持久化通过 trait 注入，浏览器实现见 `workshop-frontend`。

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod request;
pub mod resources;
pub mod route;
pub mod session;
pub mod storage;

#[cfg(test)]
mod testing;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use dashboard::DashboardOverview;
pub use error::{ApiError, ApiResult};
pub use guard::{RouteDecision, authorize, decide};
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use route::AppRoute;
pub use session::{SessionHandle, SessionState, SessionStore, Subscription};
pub use storage::{MemoryTokenStore, TokenStore};

pub use workshop_shared as shared;
