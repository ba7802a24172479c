//! 会话令牌持久化
//!
//! 浏览器中由 `localStorage` 实现（见前端 `web::storage`），
//! 这里只定义接口和一个内存实现。

use parking_lot::Mutex;
use std::sync::Arc;

/// 令牌存储
///
/// 同一时刻最多保存一个令牌。写入类操作返回是否成功，失败不视为错误。
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> bool;
    fn clear(&self) -> bool;
}

/// 内存令牌存储
///
/// 克隆后共享同一份数据，方便测试从外部观察。
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn save(&self, token: &str) -> bool {
        *self.token.lock() = Some(token.to_string());
        true
    }

    fn clear(&self) -> bool {
        self.token.lock().take();
        true
    }
}
