//! 会话模块
//!
//! “当前谁已登录”的唯一数据源，生命周期：
//! `Uninitialized -> Validating -> {Authenticated(identity) | Anonymous}`。
//!
//! - `SessionHandle`: 共享的会话单元（状态 + 令牌 + 订阅者），API 客户端也持有一份
//! - `SessionStore`: 初始化 / 登录 / 注销三个操作
//!
//! 状态变化通过显式订阅 (`subscribe`) 通知，视图层把它桥接到自己的响应式系统。

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::storage::TokenStore;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use workshop_shared::protocol::{CurrentIdentityRequest, LogoutRequest};
use workshop_shared::{Identity, LoginRequest, Role};


// =========================================================
// 会话状态
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// 进程刚启动，尚未检查本地令牌
    #[default]
    Uninitialized,
    /// 正在向后端确认令牌
    Validating,
    Authenticated(Identity),
    Anonymous,
}

impl SessionState {
    /// 加载中：依赖会话的组件应推迟决策（避免闪跳到登录页）
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Uninitialized | SessionState::Validating)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role)
    }
}

// =========================================================
// 共享会话单元
// =========================================================

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

struct SessionCell {
    tokens: Box<dyn TokenStore>,
    state: Mutex<SessionState>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
}

/// 会话句柄
///
/// 克隆开销很小，所有克隆共享同一份状态。
#[derive(Clone)]
pub struct SessionHandle {
    cell: Arc<SessionCell>,
}

impl SessionHandle {
    pub fn new(tokens: impl TokenStore + 'static) -> Self {
        Self {
            cell: Arc::new(SessionCell {
                tokens: Box::new(tokens),
                state: Mutex::new(SessionState::Uninitialized),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// 当前状态快照
    pub fn state(&self) -> SessionState {
        self.cell.state.lock().clone()
    }

    /// 持久化的令牌
    pub fn token(&self) -> Option<String> {
        self.cell.tokens.load().filter(|token| !token.is_empty())
    }

    /// 订阅状态变化
    ///
    /// 回调在状态更新之后按注册顺序调用。返回的 `Subscription` 被 drop 时自动退订。
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let id = self.cell.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.cell
            .listeners
            .lock()
            .push((id, Arc::new(listener)));
        Subscription {
            cell: Arc::downgrade(&self.cell),
            id,
        }
    }

    /// 切换状态并通知订阅者（状态未变化时不通知）
    pub(crate) fn transition(&self, next: SessionState) {
        {
            let mut state = self.cell.state.lock();
            if *state == next {
                return;
            }
            *state = next.clone();
        }

        info!("[Session] -> {}", describe(&next));

        // 回调期间不持有任何锁，允许在回调里读取或订阅
        let listeners: Vec<Listener> = self
            .cell
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }

    /// 保存令牌并进入已认证状态
    pub(crate) fn establish(&self, token: &str, identity: Identity) {
        if !self.cell.tokens.save(token) {
            warn!("[Session] token could not be persisted; session lasts until reload");
        }
        self.transition(SessionState::Authenticated(identity));
    }

    /// 清除令牌并进入匿名状态
    pub(crate) fn clear(&self) {
        self.cell.tokens.clear();
        self.transition(SessionState::Anonymous);
    }

    /// 已认证会话收到 401 时调用；返回是否真的发生了过期
    ///
    /// `rejected` 是被拒请求携带的令牌。它已不是当前令牌时（期间重新登录过），不做任何事。
    pub(crate) fn expire(&self, rejected: &str) -> bool {
        if !self.state().is_authenticated() {
            return false;
        }
        if self.token().as_deref() != Some(rejected) {
            debug!("[Session] ignoring 401 for a superseded token");
            return false;
        }
        warn!("[Session] token rejected by the server; signing out");
        self.clear();
        true
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

fn describe(state: &SessionState) -> String {
    match state {
        SessionState::Uninitialized => "uninitialized".to_string(),
        SessionState::Validating => "validating".to_string(),
        SessionState::Authenticated(identity) => {
            format!("authenticated({}, {})", identity.name, identity.role)
        }
        SessionState::Anonymous => "anonymous".to_string(),
    }
}

/// 订阅凭证，drop 时退订
pub struct Subscription {
    cell: Weak<SessionCell>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cell) = self.cell.upgrade() {
            cell.listeners.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

// =========================================================
// 会话存储 (Session Store)
// =========================================================

/// 会话存储：初始化、登录、注销
pub struct SessionStore<C> {
    api: ApiClient<C>,
}

impl<C> Clone for SessionStore<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<C: HttpClient> SessionStore<C> {
    pub fn new(config: ClientConfig, http: C, tokens: impl TokenStore + 'static) -> Self {
        let session = SessionHandle::new(tokens);
        Self {
            api: ApiClient::new(config, http, session),
        }
    }

    /// 共享同一会话的 API 客户端
    pub fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    pub fn session(&self) -> &SessionHandle {
        self.api.session()
    }

    pub fn state(&self) -> SessionState {
        self.session().state()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        self.session().subscribe(listener)
    }

    /// 启动时恢复会话
    ///
    /// 有令牌则向后端确认身份；任何失败（网络错误、令牌被拒）都清除令牌并转为匿名。
    /// 只在 `Uninitialized` 状态下生效，重复调用直接返回当前状态。
    pub async fn initialize(&self) -> SessionState {
        let session = self.session();
        if session.state() != SessionState::Uninitialized {
            return session.state();
        }

        if session.token().is_none() {
            session.transition(SessionState::Anonymous);
            return session.state();
        }

        session.transition(SessionState::Validating);
        match self.api.send(&CurrentIdentityRequest).await {
            Ok(identity) => session.transition(SessionState::Authenticated(identity)),
            Err(e) => {
                warn!("[Session] stored token could not be validated: {}", e);
                session.clear();
            }
        }
        session.state()
    }

    /// 登录
    ///
    /// 失败时错误原样返回给调用方显示，会话状态和已保存的令牌都不变。
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Identity> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self.api.send(&request).await.inspect_err(|e| {
            warn!("[Session] login failed: {}", e);
        })?;

        if response.access_token.is_empty() {
            return Err(ApiError::Decode(
                "login response did not include a token".to_string(),
            ));
        }

        self.session()
            .establish(&response.access_token, response.user.clone());
        Ok(response.user)
    }

    /// 注销
    ///
    /// 服务端注销尽力而为；本地清除不依赖其结果。
    pub async fn logout(&self) {
        if self.session().token().is_some() {
            if let Err(e) = self.api.send(&LogoutRequest).await {
                warn!("[Session] server-side logout failed: {}", e);
            }
        }
        self.session().clear();
    }
}
