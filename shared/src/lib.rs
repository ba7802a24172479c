//! Workshop Manager 共享模型
//!
//! 前端与核心客户端共用的线上数据结构：
//! - `model`: 身份、工单、物料、备件消耗等领域模型
//! - `protocol`: REST 端点定义（请求类型 -> 响应类型）
//! - `summary`: 由列表派生的统计数据
//! - `validate`: 表单提交前的必填校验

pub mod model;
pub mod protocol;
pub mod summary;
pub mod validate;

pub use model::*;
pub use summary::{JobSummary, low_stock};
pub use validate::{Validate, ValidationError};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 浏览器本地存储中保存会话令牌的默认键
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// 进度取值上限（百分比）
pub const MAX_PROGRESS: u8 = 100;

/// 物料默认最低库存
pub const DEFAULT_MINIMUM_LEVEL: i64 = 5;

/// 物料默认计量单位
pub const DEFAULT_UNIT: &str = "pcs";
