//! Tabletalk API 客户端
//!
//! 每个后端端点一个类型化方法。bearer token 在每次请求时从
//! 会话存储现读（存储是唯一的跨组件共享可变资源，写入只发生
//! 在会话管理器里）。除洞察生成外的请求不设客户端超时。

use crate::config;
use crate::session::SessionStore;
use crate::web::http::{FetchClient, HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::web::storage::{LocalStorage, StorageAdapter};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tabletalk_shared::protocol::{
    AuthResponse, BusinessSummary, ErrorBody, LoginRequest, RatingBucket, RatingResponse,
    RefreshRequest, RefreshResponse, RegisterRequest, TopicFrequency,
};
use tabletalk_shared::{AiInsight, Review, UserProfile};

/// 洞察生成的客户端超时：服务端 LLM 调用可能长时间挂起
pub const INSIGHT_TIMEOUT_MS: u32 = 30_000;

// =========================================================
// 错误类型
// =========================================================

/// 端点层错误，Display 即可直接展示给用户
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 传输层失败（连接不上、CORS 等）
    Network(String),
    /// 客户端侧超时中止
    Timeout,
    /// 服务端返回非 2xx，message 取自响应体的 {"error": ...}
    Status { code: u16, message: String },
    /// 请求体序列化失败
    Encode(String),
    /// 响应体反序列化失败
    Decode(String),
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Timeout => ApiError::Timeout,
            HttpError::Build(msg) | HttpError::Network(msg) => ApiError::Network(msg),
            HttpError::Decode(msg) => ApiError::Decode(msg),
        }
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(_) => write!(f, "Could not reach the server. Check your connection."),
            ApiError::Timeout => write!(f, "The request timed out. Please try again."),
            ApiError::Status { message, .. } => write!(f, "{message}"),
            ApiError::Encode(_) | ApiError::Decode(_) => {
                write!(f, "Unexpected response from the server.")
            }
        }
    }
}

// =========================================================
// 客户端
// =========================================================

#[derive(Clone)]
pub struct TabletalkApi<C: HttpClient, S: StorageAdapter> {
    base_url: String,
    client: C,
    session: SessionStore<S>,
}

/// 浏览器环境下的具体类型
pub type BrowserApi = TabletalkApi<FetchClient, LocalStorage>;

impl BrowserApi {
    pub fn browser() -> Self {
        Self::new(
            config::api_base_url(),
            FetchClient,
            SessionStore::new(LocalStorage),
        )
    }
}

impl<C: HttpClient, S: StorageAdapter> TabletalkApi<C, S> {
    pub fn new(base_url: impl Into<String>, client: C, session: SessionStore<S>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
            session,
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 存储里有 token 就带上 Authorization 头
    fn authorized(&self, req: HttpRequest) -> HttpRequest {
        match self.session.access_token() {
            Some(token) => req.with_header("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }

    fn json_body<T: Serialize>(req: HttpRequest, body: &T) -> Result<HttpRequest, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(req.with_json_body(raw))
    }

    fn status_error(resp: &HttpResponse) -> ApiError {
        let message = resp
            .json::<ErrorBody>()
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("Request failed with status {}", resp.status));
        ApiError::Status {
            code: resp.status,
            message,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, req: HttpRequest) -> Result<T, ApiError> {
        let resp = self.client.send(self.authorized(req)).await?;
        if !resp.ok() {
            return Err(Self::status_error(&resp));
        }
        resp.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 只关心状态码的请求（响应体内容不约定）
    async fn execute_unit(&self, req: HttpRequest) -> Result<(), ApiError> {
        let resp = self.client.send(self.authorized(req)).await?;
        if !resp.ok() {
            return Err(Self::status_error(&resp));
        }
        Ok(())
    }

    // =====================================================
    // 认证端点
    // =====================================================

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let req = Self::json_body(HttpRequest::post(self.url("/api/auth/login")), &body)?;
        self.execute(req).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let req = Self::json_body(HttpRequest::post(self.url("/api/auth/register")), request)?;
        self.execute(req).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.execute_unit(HttpRequest::post(self.url("/api/auth/logout")))
            .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ApiError> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let req = Self::json_body(HttpRequest::post(self.url("/api/auth/refresh")), &body)?;
        self.execute(req).await
    }

    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.execute(HttpRequest::get(self.url("/api/auth/user")))
            .await
    }

    // =====================================================
    // 指标端点
    // =====================================================

    pub async fn get_rating(&self, business_id: i64) -> Result<RatingResponse, ApiError> {
        let path = format!("/api/business/{business_id}/rating");
        self.execute(HttpRequest::get(self.url(&path))).await
    }

    pub async fn get_summary(&self, business_id: i64) -> Result<BusinessSummary, ApiError> {
        let path = format!("/api/dashboard/business/{business_id}/summary");
        self.execute(HttpRequest::get(self.url(&path))).await
    }

    pub async fn get_recent_reviews(
        &self,
        business_id: i64,
        limit: u32,
    ) -> Result<Vec<Review>, ApiError> {
        let path = format!("/api/dashboard/business/{business_id}/reviews/recent?limit={limit}");
        self.execute(HttpRequest::get(self.url(&path))).await
    }

    pub async fn get_critical_reviews(
        &self,
        business_id: i64,
        limit: u32,
    ) -> Result<Vec<Review>, ApiError> {
        let path = format!("/api/dashboard/business/{business_id}/reviews/critical?limit={limit}");
        self.execute(HttpRequest::get(self.url(&path))).await
    }

    pub async fn get_ratings_distribution(
        &self,
        business_id: i64,
    ) -> Result<Vec<RatingBucket>, ApiError> {
        let path = format!("/api/dashboard/business/{business_id}/ratings/distribution");
        self.execute(HttpRequest::get(self.url(&path))).await
    }

    pub async fn get_topics_frequency(
        &self,
        business_id: i64,
    ) -> Result<Vec<TopicFrequency>, ApiError> {
        let path = format!("/api/dashboard/business/{business_id}/topics/frequency");
        self.execute(HttpRequest::get(self.url(&path))).await
    }

    pub async fn get_insights(&self, business_id: i64) -> Result<Vec<AiInsight>, ApiError> {
        let path = format!("/api/dashboard/business/{business_id}/insights");
        self.execute(HttpRequest::get(self.url(&path))).await
    }

    /// 触发一次洞察生成，带客户端超时；超时后中止请求，
    /// 服务端若仍在计算不会被另行通知
    pub async fn generate_insight(&self, business_id: i64) -> Result<AiInsight, ApiError> {
        let path = format!("/api/dashboard/business/{business_id}/insights/generate");
        let req = HttpRequest::post(self.url(&path)).with_timeout(INSIGHT_TIMEOUT_MS);
        self.execute(req).await
    }
}

// =========================================================
// 测试
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::tests::MockHttpClient;
    use crate::web::storage::tests::MockStorage;
    use serde_json::json;

    fn api(client: MockHttpClient, storage: MockStorage) -> TabletalkApi<MockHttpClient, MockStorage>
    {
        TabletalkApi::new("https://api.test", client, SessionStore::new(storage))
    }

    #[tokio::test]
    async fn bearer_header_attached_when_token_stored() {
        let client = MockHttpClient::new();
        let storage = MockStorage::new();
        storage.set(crate::session::KEY_TOKEN, "a.b.c");
        client.mock_response(
            "https://api.test/api/dashboard/business/1/summary",
            200,
            json!({
                "review_count": 10,
                "average_rating": 4.2,
                "sentiment_score": 0.6,
                "most_mentioned_topic": "Service"
            }),
        );

        let api = api(client.clone(), storage);
        let summary = api.get_summary(1).await.unwrap();
        assert_eq!(summary.review_count, 10);

        let requests = client.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("Authorization"), Some("Bearer a.b.c"));
    }

    #[tokio::test]
    async fn no_bearer_header_without_token() {
        let client = MockHttpClient::new();
        client.mock_response("https://api.test/api/auth/login", 200, json!({
            "token": "a.b.c",
            "refresh_token": "r1",
            "user": {
                "id": 1,
                "email": "x@y.z",
                "first_name": "A",
                "last_name": "B",
                "businesses": []
            }
        }));

        let api = api(client.clone(), MockStorage::new());
        api.login("x@y.z", "pw").await.unwrap();

        let requests = client.requests.borrow();
        assert_eq!(requests[0].header("Authorization"), None);
        assert_eq!(
            requests[0].header("Content-Type"),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn server_error_body_becomes_status_message() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.test/api/auth/login",
            401,
            json!({"error": "Invalid email or password"}),
        );

        let api = api(client, MockStorage::new());
        let err = api.login("x@y.z", "bad").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                code: 401,
                message: "Invalid email or password".to_string()
            }
        );
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn insight_generation_timeout_is_distinct_from_generic_failure() {
        let client = MockHttpClient::new();
        client.mock_failure(
            "https://api.test/api/dashboard/business/1/insights/generate",
            HttpError::Timeout,
        );

        let api = api(client.clone(), MockStorage::new());
        let err = api.generate_insight(1).await.unwrap_err();
        assert_eq!(err, ApiError::Timeout);
        assert_ne!(err.to_string(), ApiError::Network(String::new()).to_string());

        // 超时请求确实配置了客户端超时
        let requests = client.requests.borrow();
        assert_eq!(requests[0].timeout_ms, Some(INSIGHT_TIMEOUT_MS));
    }
}
