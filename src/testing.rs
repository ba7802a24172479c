//! 测试用内存后端
//!
//! 实现 `HttpClient`，按 REST 约定路由请求并维护工单、物料、备件三张表，
//! 用于在不启动浏览器和服务端的情况下端到端地测试会话与资源客户端。

use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use workshop_shared::protocol::HttpMethod;
use workshop_shared::{
    Identity, Job, JobUpdate, LoginRequest, Material, MaterialUpdate, MonthlyUsage,
    NewJob, NewMaterial, NewSparePartUsage, Role, SparePartUsage,
};

pub const BASE: &str = "http://workshop.test/api";
pub const PASSWORD: &str = "secret";

struct Account {
    identity: Identity,
    password: String,
}

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    sessions: HashMap<String, i64>,
    jobs: Vec<Job>,
    materials: Vec<Material>,
    usages: Vec<SparePartUsage>,
    next_id: i64,
    issued_tokens: u64,
    ticks: i64,
    offline: bool,
    fail_logout: bool,
    requests: Vec<HttpRequest>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// 每次写操作前进一分钟
    fn now(&mut self) -> NaiveDateTime {
        self.ticks += 1;
        epoch() + Duration::minutes(self.ticks)
    }

    fn name_of(&self, user_id: i64) -> Option<String> {
        self.accounts
            .iter()
            .find(|a| a.identity.id == user_id)
            .map(|a| a.identity.name.clone())
    }
}

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap()
}

/// 内存后端，克隆后共享同一份数据
#[derive(Clone, Default)]
pub struct FakeBackend {
    tables: Rc<RefCell<Tables>>,
}

impl FakeBackend {
    /// 预置一名经理（id 1）和两名员工（id 2、3）
    pub fn new() -> Self {
        let backend = Self::default();
        backend.add_account("Kofi Mensah", "manager@shop.test", Role::Manager);
        backend.add_account("Ama Owusu", "ama@shop.test", Role::Employee);
        backend.add_account("Yaw Boateng", "yaw@shop.test", Role::Employee);
        backend
    }

    pub fn add_account(&self, name: &str, email: &str, role: Role) -> Identity {
        let mut t = self.tables.borrow_mut();
        let identity = Identity {
            id: t.next_id(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        };
        t.accounts.push(Account {
            identity: identity.clone(),
            password: PASSWORD.to_string(),
        });
        identity
    }

    /// 直接签发一个令牌（模拟上次会话留下的令牌）
    pub fn issue_token(&self, email: &str) -> String {
        let mut t = self.tables.borrow_mut();
        let id = t
            .accounts
            .iter()
            .find(|a| a.identity.email == email)
            .map(|a| a.identity.id)
            .unwrap();
        t.issued_tokens += 1;
        let token = format!("tok-{}-{}", id, t.issued_tokens);
        t.sessions.insert(token.clone(), id);
        token
    }

    /// 使所有令牌失效（模拟服务端过期）
    pub fn revoke_all(&self) {
        self.tables.borrow_mut().sessions.clear();
    }

    pub fn is_live(&self, token: &str) -> bool {
        self.tables.borrow().sessions.contains_key(token)
    }

    pub fn set_offline(&self, offline: bool) {
        self.tables.borrow_mut().offline = offline;
    }

    pub fn fail_logout(&self, fail: bool) {
        self.tables.borrow_mut().fail_logout = fail;
    }

    pub fn seed_material(&self, name: &str, quantity: i64, minimum_level: i64) -> i64 {
        let mut t = self.tables.borrow_mut();
        let id = t.next_id();
        let now = t.now();
        t.materials.push(Material {
            id,
            name: name.to_string(),
            quantity,
            minimum_level,
            unit: "pcs".to_string(),
            updated_at: Some(now),
        });
        id
    }

    pub fn seed_usage(&self, part_name: &str, quantity_used: i64, used_by: i64, used_date: NaiveDateTime) {
        let mut t = self.tables.borrow_mut();
        let id = t.next_id();
        let used_by_name = t.name_of(used_by);
        t.usages.push(SparePartUsage {
            id,
            part_name: part_name.to_string(),
            quantity_used,
            used_by,
            used_by_name,
            used_date,
        });
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.tables.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.tables.borrow().requests.len()
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.tables.borrow().jobs.clone()
    }
}

type Reply = Result<(u16, Value), (u16, &'static str)>;

fn body<T: DeserializeOwned>(req: &HttpRequest) -> Result<T, (u16, &'static str)> {
    req.body
        .as_deref()
        .and_then(|b| serde_json::from_str(b).ok())
        .ok_or((400, "Invalid request body"))
}

fn ok<T: serde::Serialize>(value: T) -> Reply {
    Ok((200, serde_json::to_value(value).unwrap()))
}

fn parse_id(segment: &str) -> Result<i64, (u16, &'static str)> {
    segment.parse().map_err(|_| (404, "Not Found"))
}

fn manager_only(caller: &Identity) -> Result<(), (u16, &'static str)> {
    if caller.role == Role::Manager {
        Ok(())
    } else {
        Err((403, "Forbidden"))
    }
}

impl FakeBackend {
    fn caller(&self, req: &HttpRequest) -> Result<Identity, (u16, &'static str)> {
        let t = self.tables.borrow();
        let token = req
            .header("Authorization")
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or((401, "Unauthorized"))?;
        let user_id = t.sessions.get(token).ok_or((401, "Token expired"))?;
        t.accounts
            .iter()
            .find(|a| a.identity.id == *user_id)
            .map(|a| a.identity.clone())
            .ok_or((401, "Unauthorized"))
    }

    fn route(&self, req: &HttpRequest) -> Reply {
        let path = req.url.strip_prefix(BASE).ok_or((404, "Not Found"))?;
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match (req.method, segments.as_slice()) {
            (HttpMethod::Post, ["auth", "login"]) => self.login(req),
            (HttpMethod::Post, ["auth", "logout"]) => {
                self.caller(req)?;
                if self.tables.borrow().fail_logout {
                    return Err((500, "Internal Server Error"));
                }
                if let Some(token) = req.header("Authorization").and_then(|h| h.strip_prefix("Bearer ")) {
                    self.tables.borrow_mut().sessions.remove(token);
                }
                ok(json!({"message": "Logged out"}))
            }
            (HttpMethod::Get, ["auth", "me"]) => ok(self.caller(req)?),

            (HttpMethod::Get, ["jobs"]) => {
                let caller = self.caller(req)?;
                let t = self.tables.borrow();
                let mut jobs: Vec<Job> = t
                    .jobs
                    .iter()
                    .filter(|j| caller.is_manager() || j.is_assigned_to(caller.id))
                    .cloned()
                    .collect();
                jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                ok(jobs)
            }
            (HttpMethod::Post, ["jobs"]) => {
                manager_only(&self.caller(req)?)?;
                let new: NewJob = body(req)?;
                let mut t = self.tables.borrow_mut();
                let id = t.next_id();
                let now = t.now();
                let assigned_name = new.assigned_to.and_then(|uid| t.name_of(uid));
                t.jobs.push(Job {
                    id,
                    title: new.title,
                    assigned_to: new.assigned_to,
                    assigned_name,
                    status: new.status,
                    progress: new.progress,
                    created_at: now,
                    updated_at: now,
                });
                ok(json!({"id": id, "message": "Job created"}))
            }
            (HttpMethod::Get, ["jobs", "employees"]) => {
                manager_only(&self.caller(req)?)?;
                let t = self.tables.borrow();
                let employees: Vec<Value> = t
                    .accounts
                    .iter()
                    .filter(|a| a.identity.role == Role::Employee)
                    .map(|a| json!({"id": a.identity.id, "name": a.identity.name}))
                    .collect();
                ok(employees)
            }
            (HttpMethod::Put, ["jobs", job_id]) => {
                let caller = self.caller(req)?;
                let job_id = parse_id(job_id)?;
                let mut changes: JobUpdate = body(req)?;
                let mut t = self.tables.borrow_mut();
                let now = t.now();
                let names: Option<Option<String>> =
                    changes.assigned_to.map(|a| a.and_then(|uid| t.name_of(uid)));
                let job = t
                    .jobs
                    .iter_mut()
                    .find(|j| j.id == job_id)
                    .ok_or((404, "Job not found"))?;
                if !caller.is_manager() {
                    if !job.is_assigned_to(caller.id) {
                        return Err((403, "You can only update your own jobs"));
                    }
                    changes.title = None;
                    changes.assigned_to = None;
                }
                if changes.is_empty() {
                    return Err((400, "No valid fields to update"));
                }
                if let Some(title) = changes.title {
                    job.title = title;
                }
                if let Some(assigned) = changes.assigned_to {
                    job.assigned_to = assigned;
                    job.assigned_name = names.flatten();
                }
                if let Some(status) = changes.status {
                    job.status = status;
                }
                if let Some(progress) = changes.progress {
                    job.progress = progress;
                }
                job.updated_at = now;
                ok(json!({"message": "Job updated"}))
            }
            (HttpMethod::Delete, ["jobs", job_id]) => {
                manager_only(&self.caller(req)?)?;
                let job_id = parse_id(job_id)?;
                self.tables.borrow_mut().jobs.retain(|j| j.id != job_id);
                ok(json!({"message": "Job deleted"}))
            }

            (HttpMethod::Get, ["materials"]) => {
                self.caller(req)?;
                ok(self.tables.borrow().materials.clone())
            }
            (HttpMethod::Post, ["materials"]) => {
                manager_only(&self.caller(req)?)?;
                let new: NewMaterial = body(req)?;
                let mut t = self.tables.borrow_mut();
                let id = t.next_id();
                let now = t.now();
                t.materials.push(Material {
                    id,
                    name: new.name,
                    quantity: new.quantity,
                    minimum_level: new.minimum_level,
                    unit: new.unit,
                    updated_at: Some(now),
                });
                ok(json!({"id": id}))
            }
            (HttpMethod::Put, ["materials", material_id]) => {
                manager_only(&self.caller(req)?)?;
                let material_id = parse_id(material_id)?;
                let changes: MaterialUpdate = body(req)?;
                let mut t = self.tables.borrow_mut();
                let now = t.now();
                let material = t
                    .materials
                    .iter_mut()
                    .find(|m| m.id == material_id)
                    .ok_or((404, "Material not found"))?;
                if let Some(name) = changes.name {
                    material.name = name;
                }
                if let Some(quantity) = changes.quantity {
                    material.quantity = quantity;
                }
                if let Some(level) = changes.minimum_level {
                    material.minimum_level = level;
                }
                if let Some(unit) = changes.unit {
                    material.unit = unit;
                }
                material.updated_at = Some(now);
                ok(json!({"message": "Material updated"}))
            }
            (HttpMethod::Delete, ["materials", material_id]) => {
                manager_only(&self.caller(req)?)?;
                let material_id = parse_id(material_id)?;
                self.tables.borrow_mut().materials.retain(|m| m.id != material_id);
                ok(json!({"message": "Material deleted"}))
            }

            (HttpMethod::Get, ["spareparts"]) => {
                self.caller(req)?;
                let mut usages = self.tables.borrow().usages.clone();
                usages.sort_by(|a, b| b.used_date.cmp(&a.used_date));
                ok(usages)
            }
            (HttpMethod::Post, ["spareparts"]) => {
                let caller = self.caller(req)?;
                let new: NewSparePartUsage = body(req)?;
                let mut t = self.tables.borrow_mut();
                let id = t.next_id();
                let now = t.now();
                t.usages.push(SparePartUsage {
                    id,
                    part_name: new.part_name,
                    quantity_used: new.quantity_used,
                    used_by: caller.id,
                    used_by_name: Some(caller.name),
                    used_date: now,
                });
                ok(json!({"id": id, "message": "Usage recorded"}))
            }
            (HttpMethod::Delete, ["spareparts", usage_id]) => {
                manager_only(&self.caller(req)?)?;
                let usage_id = parse_id(usage_id)?;
                self.tables.borrow_mut().usages.retain(|u| u.id != usage_id);
                ok(json!({"message": "Entry deleted"}))
            }
            (HttpMethod::Get, ["spareparts", "summary", "monthly"]) => {
                self.caller(req)?;
                let t = self.tables.borrow();
                let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
                for usage in &t.usages {
                    let month = usage.used_date.format("%Y-%m").to_string();
                    *totals.entry((month, usage.part_name.clone())).or_default() +=
                        usage.quantity_used;
                }
                // 月份倒序，同月按零件名
                let mut rows: Vec<MonthlyUsage> = totals
                    .into_iter()
                    .map(|((month, part_name), total_used)| MonthlyUsage {
                        month,
                        part_name,
                        total_used,
                    })
                    .collect();
                rows.sort_by(|a, b| b.month.cmp(&a.month).then(a.part_name.cmp(&b.part_name)));
                ok(rows)
            }

            _ => Err((404, "Not Found")),
        }
    }

    fn login(&self, req: &HttpRequest) -> Reply {
        let credentials: LoginRequest = body(req)?;
        let identity = {
            let t = self.tables.borrow();
            t.accounts
                .iter()
                .find(|a| a.identity.email == credentials.email && a.password == credentials.password)
                .map(|a| a.identity.clone())
                .ok_or((401, "Invalid credentials"))?
        };
        let token = self.issue_token(&identity.email);
        ok(json!({
            "access_token": token,
            "token_type": "bearer",
            "user": identity,
        }))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FakeBackend {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        {
            let mut t = self.tables.borrow_mut();
            t.requests.push(req.clone());
            if t.offline {
                return Err(ApiError::Network("connection refused".to_string()));
            }
        }

        let (status, body) = match self.route(&req) {
            Ok((status, value)) => (status, value.to_string()),
            Err((status, message)) => (status, json!({ "error": message }).to_string()),
        };
        Ok(HttpResponse { status, body })
    }
}
