//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM。定义应用的所有路由、路径以及各路由允许的角色。

use std::fmt::Display;
use workshop_shared::Role;

/// 应用路由枚举
///
/// 变体顺序即导航栏顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 控制面板（已认证用户的默认页）
    #[default]
    Dashboard,
    /// 全部工单
    Jobs,
    /// 分配给自己的工单（仅员工）
    MyJobs,
    Materials,
    SpareParts,
    /// 备件月度汇总（仅经理）
    UsageSummary,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 出现在导航栏中的路由
    const NAVIGABLE: [AppRoute; 6] = [
        AppRoute::Dashboard,
        AppRoute::Jobs,
        AppRoute::MyJobs,
        AppRoute::Materials,
        AppRoute::SpareParts,
        AppRoute::UsageSummary,
    ];

    /// 将 URL path 解析为路由枚举（忽略末尾斜杠、查询串和锚点）
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/login" => Self::Login,
            "/" | "/dashboard" => Self::Dashboard,
            "/jobs" => Self::Jobs,
            "/my-jobs" => Self::MyJobs,
            "/materials" => Self::Materials,
            "/spareparts" => Self::SpareParts,
            "/spareparts/summary" => Self::UsageSummary,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Jobs => "/jobs",
            Self::MyJobs => "/my-jobs",
            Self::Materials => "/materials",
            Self::SpareParts => "/spareparts",
            Self::UsageSummary => "/spareparts/summary",
            Self::NotFound => "/404",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Jobs => "Jobs",
            Self::MyJobs => "My Jobs",
            Self::Materials => "Materials",
            Self::SpareParts => "Spare Parts",
            Self::UsageSummary => "Usage Summary",
            Self::NotFound => "Not Found",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 允许访问的角色；`None` 表示任何已认证用户
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::MyJobs => Some(&[Role::Employee]),
            Self::UsageSummary => Some(&[Role::Manager]),
            _ => None,
        }
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 已认证用户的默认落地页
    pub fn default_authenticated() -> Self {
        Self::Dashboard
    }

    /// 该角色能否在导航中看到此路由
    pub fn is_visible_to(&self, role: Role) -> bool {
        Self::NAVIGABLE.contains(self)
            && self
                .allowed_roles()
                .is_none_or(|roles| roles.contains(&role))
    }

    /// 按固定顺序列出该角色可见的导航项
    pub fn navigation(role: Role) -> Vec<AppRoute> {
        Self::NAVIGABLE
            .into_iter()
            .filter(|route| route.is_visible_to(role))
            .collect()
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
