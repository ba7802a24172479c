//! 路由守卫
//!
//! 根据会话状态决定一个路由是渲染、等待还是重定向。只有一处做这个决定，
//! 前端路由出口和导航栏都调用这里。

use crate::route::AppRoute;
use crate::session::SessionState;
use workshop_shared::Role;

/// 守卫决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// 会话仍在加载，显示加载指示，不做任何决定
    Pending,
    Render,
    RedirectToLogin,
    /// 已认证但无权访问，回到默认页
    RedirectToDefault,
}

impl RouteDecision {
    /// 重定向目标
    pub fn redirect_target(&self) -> Option<AppRoute> {
        match self {
            RouteDecision::RedirectToLogin => Some(AppRoute::Login),
            RouteDecision::RedirectToDefault => Some(AppRoute::default_authenticated()),
            RouteDecision::Pending | RouteDecision::Render => None,
        }
    }
}

/// 角色授权检查
///
/// 扁平匹配：角色必须出现在允许列表中，不存在角色继承。`None` 表示不限角色。
pub fn authorize(state: &SessionState, allowed_roles: Option<&[Role]>) -> RouteDecision {
    match state {
        SessionState::Uninitialized | SessionState::Validating => RouteDecision::Pending,
        SessionState::Anonymous => RouteDecision::RedirectToLogin,
        SessionState::Authenticated(identity) => match allowed_roles {
            Some(roles) if !roles.contains(&identity.role) => RouteDecision::RedirectToDefault,
            _ => RouteDecision::Render,
        },
    }
}

/// 对某个路由做出决策
pub fn decide(state: &SessionState, route: AppRoute) -> RouteDecision {
    match route {
        AppRoute::Login => match state {
            SessionState::Authenticated(_) => RouteDecision::RedirectToDefault,
            _ => RouteDecision::Render,
        },
        // 未知路径：交给默认页处理（匿名用户随后会被送去登录）
        AppRoute::NotFound => match state {
            SessionState::Anonymous => RouteDecision::RedirectToLogin,
            SessionState::Authenticated(_) => RouteDecision::RedirectToDefault,
            _ => RouteDecision::Pending,
        },
        route => authorize(state, route.allowed_roles()),
    }
}
