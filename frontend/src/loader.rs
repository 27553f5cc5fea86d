//! 指标组的独立加载状态
//!
//! 面板上每个指标组持有一个自己的 `FetchState` 信号：慢的请求
//! 不挡快的，某一组失败只影响它自己的卡片。没有自动重试，
//! 重试永远是用户再点一次。

use crate::api::ApiError;
use crate::web::log::log_error;

#[cfg(test)]
mod tests;

/// 一个指标组的 {loading, error, data} 三元组
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// 把一次端点调用的结果折叠成展示状态
///
/// 错误在这里就地转成用户可读的文案，不再向上传播。
pub async fn load<T, F>(request: F) -> FetchState<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match request.await {
        Ok(data) => FetchState::Ready(data),
        Err(e) => {
            log_error!("[Loader] request failed: {e:?}");
            FetchState::Failed(e.to_string())
        }
    }
}
