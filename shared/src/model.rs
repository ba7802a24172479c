use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{DEFAULT_MINIMUM_LEVEL, DEFAULT_UNIT, MAX_PROGRESS};

// =========================================================
// 身份 (Identity)
// =========================================================

/// 用户角色
///
/// 扁平模型：经理不会隐式满足仅限员工的检查。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Manager, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// 已认证用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    /// `/auth/me` 可能不返回邮箱
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

/// 可被分配工单的员工
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
}

// =========================================================
// 工单 (Job)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JobStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Pending, JobStatus::InProgress, JobStatus::Completed];

    /// 线上格式（同时用作 `<option value>`）
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in progress",
            JobStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::InProgress => "In Progress",
            JobStatus::Completed => "Completed",
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown job status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    #[serde(rename = "job_title")]
    pub title: String,
    pub assigned_to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_name: Option<String>,
    pub status: JobStatus,
    pub progress: u8,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Job {
    pub fn is_assigned_to(&self, user_id: i64) -> bool {
        self.assigned_to == Some(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewJob {
    #[serde(rename = "job_title")]
    pub title: String,
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub progress: u8,
}

/// 工单的部分更新
///
/// `assigned_to` 区分“不修改”（`None`）与“取消分配”（`Some(None)`，序列化为 `null`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct JobUpdate {
    #[serde(rename = "job_title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_some"
    )]
    pub assigned_to: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl JobUpdate {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn progress(progress: u8) -> Self {
        Self {
            progress: Some(clamp_progress(i64::from(progress))),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.assigned_to.is_none()
            && self.status.is_none()
            && self.progress.is_none()
    }
}

/// 将表单输入限制在 0..=100
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_PROGRESS)) as u8
}

// 字段存在（哪怕是 null）即为 Some
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// =========================================================
// 物料 (Material)
// =========================================================

fn default_minimum_level() -> i64 {
    DEFAULT_MINIMUM_LEVEL
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    #[serde(rename = "material_name")]
    pub name: String,
    pub quantity: i64,
    pub minimum_level: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Material {
    /// 低库存是派生属性（含边界）
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.minimum_level
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaterial {
    #[serde(rename = "material_name")]
    pub name: String,
    pub quantity: i64,
    #[serde(default = "default_minimum_level")]
    pub minimum_level: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

impl Default for NewMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: 0,
            minimum_level: DEFAULT_MINIMUM_LEVEL,
            unit: default_unit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MaterialUpdate {
    #[serde(rename = "material_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

// =========================================================
// 备件消耗 (Spare parts)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparePartUsage {
    pub id: i64,
    pub part_name: String,
    pub quantity_used: i64,
    pub used_by: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_by_name: Option<String>,
    pub used_date: NaiveDateTime,
}

impl SparePartUsage {
    /// 优先显示用户名，缺失时回退到用户 ID
    pub fn used_by_label(&self) -> String {
        self.used_by_name
            .clone()
            .unwrap_or_else(|| self.used_by.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSparePartUsage {
    pub part_name: String,
    pub quantity_used: i64,
}

impl Default for NewSparePartUsage {
    fn default() -> Self {
        Self {
            part_name: String::new(),
            quantity_used: 1,
        }
    }
}

/// 服务端按月份和备件聚合的消耗量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    pub month: String,
    pub part_name: String,
    pub total_used: i64,
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(alias = "identity")]
    pub user: Identity,
}

/// 所有创建接口的返回值（忽略多余字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub id: i64,
}
