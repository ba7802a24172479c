use workshop_shared::DEFAULT_TOKEN_KEY;

// =========================================================
// 客户端配置 (Client Configuration)
// =========================================================

/// 构建时未指定 `WORKSHOP_API_BASE` 时使用的默认值
const DEFAULT_API_BASE: &str = "/api";

/// 客户端配置
///
/// 浏览器中没有运行时环境变量，因此在编译期通过 `option_env!` 读取，读不到就用默认值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST 后端根地址（不含末尾斜杠）
    pub base_url: String,
    /// 会话令牌在本地存储中的键
    pub token_key: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::new(option_env!("WORKSHOP_API_BASE").unwrap_or(DEFAULT_API_BASE));
        if let Some(key) = option_env!("WORKSHOP_TOKEN_KEY") {
            config.token_key = key.to_string();
        }
        config
    }

    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    /// 拼接完整 URL，保证恰好一个斜杠
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
