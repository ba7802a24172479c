//! 车间管理前端
//!
//! 采用 Context-Driven 架构：
//! - `web::router`: 路由服务（守卫逻辑在核心库 `workshop::guard`）
//! - `auth`: 会话状态到信号的桥接
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod dashboard;
    mod format;
    pub mod job_tracker;
    pub mod layout;
    pub mod login;
    pub mod materials;
    pub mod my_jobs;
    pub mod notice;
    pub mod spare_parts;
    pub mod usage_summary;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::job_tracker::JobTrackerPage;
use crate::components::layout::Shell;
use crate::components::login::LoginPage;
use crate::components::materials::MaterialsPage;
use crate::components::my_jobs::MyJobsPage;
use crate::components::spare_parts::SparePartsPage;
use crate::components::usage_summary::UsageSummaryPage;

use leptos::prelude::*;
use workshop::AppRoute;

// 浏览器 API 适配层：为核心库的 trait 提供 fetch / localStorage 实现
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::BrowserStorage;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 只在守卫放行后调用，因此这里不再检查权限。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <Shell><DashboardPage /></Shell> }.into_any(),
        AppRoute::Jobs => view! { <Shell><JobTrackerPage /></Shell> }.into_any(),
        AppRoute::MyJobs => view! { <Shell><MyJobsPage /></Shell> }.into_any(),
        AppRoute::Materials => view! { <Shell><MaterialsPage /></Shell> }.into_any(),
        AppRoute::SpareParts => view! { <Shell><SparePartsPage /></Shell> }.into_any(),
        AppRoute::UsageSummary => view! { <Shell><UsageSummaryPage /></Shell> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 用本地令牌恢复会话（异步，期间路由显示加载状态）
    init_auth(auth_ctx);

    view! {
        // 3. 路由器组件：注入会话信号实现守卫
        <Router session=auth_ctx.session_signal()>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
