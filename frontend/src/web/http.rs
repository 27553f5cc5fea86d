//! HTTP 传输层
//!
//! `HttpClient` 抽象出「发请求、收响应」这一件事：浏览器里由
//! `FetchClient` 走 fetch，测试里由 `MockHttpClient` 回放脚本化
//! 的响应。超时通过 `AbortController` + 一次性定时器实现，只有
//! 显式设置了 `timeout_ms` 的请求才会被中止。

use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// 待发送的请求描述，纯数据，便于 Mock 记录与断言
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// 客户端侧超时（毫秒），None 表示不限制
    pub timeout_ms: Option<u32>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
            timeout_ms: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Post)
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体（调用方负责序列化）
    pub fn with_json_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self.with_header("Content-Type", "application/json")
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 响应快照：状态码 + 文本体
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

/// 传输层错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// 请求构建失败
    Build(String),
    /// 网络请求失败（连接失败、DNS、CORS 等）
    Network(String),
    /// 客户端侧超时中止
    Timeout,
    /// 响应体解析失败
    Decode(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::Build(msg) => write!(f, "failed to build request: {msg}"),
            HttpError::Network(msg) => write!(f, "network error: {msg}"),
            HttpError::Timeout => write!(f, "request timed out"),
            HttpError::Decode(msg) => write!(f, "failed to decode response: {msg}"),
        }
    }
}

#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: 浏览器 fetch 客户端
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        use gloo_net::http::Request;
        use std::cell::Cell;
        use std::rc::Rc;

        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
        };
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        // 超时：定时器到点后通过 AbortController 中止 fetch。
        // timed_out 用于把「主动中止」与普通网络错误区分开。
        let timed_out = Rc::new(Cell::new(false));
        let mut timer = None;
        if let Some(timeout_ms) = req.timeout_ms {
            let controller = web_sys::AbortController::new()
                .map_err(|e| HttpError::Build(format!("{e:?}")))?;
            builder = builder.abort_signal(Some(&controller.signal()));
            let flag = Rc::clone(&timed_out);
            timer = Some(gloo_timers::callback::Timeout::new(timeout_ms, move || {
                flag.set(true);
                controller.abort();
            }));
        }

        let request = match &req.body {
            Some(body) => builder
                .body(body.clone())
                .map_err(|e| HttpError::Build(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| HttpError::Build(e.to_string()))?,
        };

        let result = request.send().await;
        // 响应已经回来，定时器就此作废（drop 即取消）
        drop(timer);

        let response = match result {
            Ok(response) => response,
            Err(_) if timed_out.get() => return Err(HttpError::Timeout),
            Err(e) => return Err(HttpError::Network(e.to_string())),
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// 脚本化响应的回放客户端，同时记录每个发出的请求
    #[derive(Clone, Default)]
    pub struct MockHttpClient {
        responses: Rc<RefCell<HashMap<String, (u16, String)>>>,
        failures: Rc<RefCell<HashMap<String, HttpError>>>,
        pub requests: Rc<RefCell<Vec<HttpRequest>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// 为某个 URL 预置 (状态码, JSON 响应体)
        pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
            self.responses
                .borrow_mut()
                .insert(url.to_string(), (status, body.to_string()));
        }

        /// 为某个 URL 预置传输层失败（网络错误、超时）
        pub fn mock_failure(&self, url: &str, error: HttpError) {
            self.failures.borrow_mut().insert(url.to_string(), error);
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.borrow_mut().push(req.clone());

            if let Some(error) = self.failures.borrow().get(&req.url) {
                return Err(error.clone());
            }
            if let Some((status, body)) = self.responses.borrow().get(&req.url) {
                return Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                });
            }
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}
