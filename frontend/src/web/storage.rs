//! 令牌持久化
//!
//! 使用 `web_sys::Storage` 实现核心库的 `TokenStore`。

use workshop::TokenStore;

/// 基于 `localStorage` 的令牌存储
///
/// 存储不可用（隐私模式、被禁用）时所有操作静默失败，会话只在当前页面内有效。
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    key: String,
}

impl BrowserStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl TokenStore for BrowserStorage {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok()?
    }

    fn save(&self, token: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(&self.key, token).ok())
            .is_some()
    }

    fn clear(&self) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(&self.key).ok())
            .is_some()
    }
}
