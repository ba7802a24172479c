//! 认证模块
//!
//! 把核心库的 `SessionStore` 接入 Leptos：会话状态通过订阅桥接为信号，
//! 路由服务和各页面只读取这个信号。

use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use leptos::task::spawn_local;
use workshop::shared::Identity;
use workshop::{ApiClient, ApiResult, ClientConfig, SessionState, SessionStore};

pub type Session = SessionStore<FetchHttpClient>;
pub type Api = ApiClient<FetchHttpClient>;

/// 认证上下文
///
/// `Copy`，可以直接移入事件闭包。
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: StoredValue<Session>,
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
}

impl AuthContext {
    /// 创建认证上下文，并把会话变化同步到信号
    pub fn new() -> Self {
        let config = ClientConfig::from_env();
        let tokens = BrowserStorage::new(config.token_key.clone());
        let store = SessionStore::new(config, FetchHttpClient, tokens);

        let (state, set_state) = signal(store.state());
        let subscription = store.subscribe(move |next| set_state.set(next.clone()));
        on_cleanup(move || drop(subscription));

        Self {
            store: StoredValue::new(store),
            state,
        }
    }

    /// 会话状态信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<SessionState> {
        self.state.into()
    }

    /// 与会话共享令牌的 API 客户端
    pub fn api(&self) -> Api {
        self.store.with_value(|store| store.api().clone())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.with(|state| state.identity().cloned())
    }

    /// 组件初始化时读取，不建立依赖
    pub fn identity_untracked(&self) -> Option<Identity> {
        self.state.with_untracked(|state| state.identity().cloned())
    }

    fn store(&self) -> Session {
        self.store.get_value()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 启动时恢复会话（校验本地保存的令牌）
pub fn init_auth(ctx: AuthContext) {
    let store = ctx.store();
    spawn_local(async move {
        store.initialize().await;
    });
}

/// 登录
///
/// 成功后的跳转由路由服务监听会话状态完成。
pub async fn login(ctx: AuthContext, email: String, password: String) -> ApiResult<Identity> {
    ctx.store().login(&email, &password).await
}

/// 注销：本地状态总会被清除
pub fn logout(ctx: AuthContext) {
    let store = ctx.store();
    spawn_local(async move {
        store.logout().await;
    });
}
