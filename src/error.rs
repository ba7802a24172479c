use serde_json::Value;
use thiserror::Error;
use workshop_shared::ValidationError;

// =========================================================
// 错误类型
// =========================================================

/// API 调用错误
///
/// 资源客户端不捕获任何错误，统一向上传递给发起调用的视图。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 请求未能到达服务端（断网、CORS、DNS 等）
    #[error("network error: {0}")]
    Network(String),
    /// 401: 令牌缺失、无效或过期；登录时表示凭据错误
    #[error("authentication failed: {0}")]
    Unauthorized(String),
    /// 403: 服务端拒绝当前角色
    #[error("permission denied: {0}")]
    Forbidden(String),
    /// 404: 资源未找到
    #[error("not found: {0}")]
    NotFound(String),
    /// 409: 资源冲突
    #[error("conflict: {0}")]
    Conflict(String),
    /// 其它非 2xx 响应
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// 提交前的必填校验失败（未发出请求）
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 响应无法解析或内容不完整
    #[error("invalid response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// 将非 2xx 响应映射为错误
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(status, body);
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Server { status, message },
        }
    }

    /// 对应的 HTTP 状态码（本地错误没有状态码）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Conflict(_) => Some(409),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Validation(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// 服务端错误信息位于 `error`（Flask）、`detail`（FastAPI）或 `message` 字段
fn extract_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {}", status);
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "detail", "message"] {
            if let Some(Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }

    body.to_string()
}
