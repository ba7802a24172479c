use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest};
use crate::resources::{Jobs, Materials, SpareParts};
use crate::session::SessionHandle;
use log::{debug, warn};
use std::sync::Arc;
use workshop_shared::protocol::ApiRequest;
use workshop_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};

/// REST API 客户端
///
/// - 有令牌时为每个需认证的请求附加 `Authorization: Bearer <token>`
/// - 非 2xx 响应统一转为 `ApiError`
/// - 已认证会话收到 401 时强制转为匿名（令牌过期只能在此时被发现），
///   前提是被拒的仍是当前令牌
pub struct ApiClient<C> {
    config: Arc<ClientConfig>,
    http: Arc<C>,
    session: SessionHandle,
}

impl<C> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            http: self.http.clone(),
            session: self.session.clone(),
        }
    }
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(config: ClientConfig, http: C, session: SessionHandle) -> Self {
        Self {
            config: Arc::new(config),
            http: Arc::new(http),
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// 发送一个类型化请求
    pub async fn send<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let url = self.config.url(&request.path());
        let mut req = HttpRequest::new(&url, R::METHOD);

        if R::METHOD.has_body() {
            let body = serde_json::to_value(request)?;
            if !body.is_null() {
                req = req
                    .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                    .with_body(body);
            }
        }

        let token = if R::AUTHENTICATED {
            self.session.token()
        } else {
            None
        };
        if let Some(token) = &token {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        debug!("[Api] {} {}", R::METHOD.as_str(), url);
        let resp = self.http.send(req).await.inspect_err(|e| {
            warn!("[Api] {} {} failed: {}", R::METHOD.as_str(), url, e);
        })?;

        if !resp.is_success() {
            let err = ApiError::from_response(resp.status, &resp.body);
            warn!("[Api] {} {} -> {}", R::METHOD.as_str(), url, err);
            if let Some(token) = &token {
                if err.is_auth_failure() {
                    self.session.expire(token);
                }
            }
            return Err(err);
        }

        resp.json()
    }

    pub fn jobs(&self) -> Jobs<'_, C> {
        Jobs::new(self)
    }

    pub fn materials(&self) -> Materials<'_, C> {
        Materials::new(self)
    }

    pub fn spare_parts(&self) -> SpareParts<'_, C> {
        SpareParts::new(self)
    }
}
