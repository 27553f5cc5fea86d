//! 客户端与服务端之间的请求/响应定义
//!
//! 每个端点一对 Request/Response 类型，字段名与服务端的
//! snake_case 序列化保持一致。

use crate::UserProfile;
use serde::{Deserialize, Serialize};

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录 / 注册成功后的会话载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// 注册时随用户一并创建的业务信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRegistration {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub business: BusinessRegistration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// 服务端失败响应的统一包装: {"error": "..."}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// =========================================================
// 仪表盘指标 (Dashboard)
// =========================================================

/// GET /api/business/{id}/rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResponse {
    pub average_rating: f64,
}

/// GET /api/dashboard/business/{id}/summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSummary {
    pub review_count: u32,
    pub average_rating: f64,
    pub sentiment_score: f64,
    /// 为空表示尚无可统计的主题
    #[serde(default)]
    pub most_mentioned_topic: Option<String>,
}

/// 星级分布中的一个桶（1–5 星）
///
/// percentage 由服务端给定，客户端不重新计算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub rating: u8,
    pub count: u32,
    pub percentage: f64,
}

/// 主题被提及的频次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicFrequency {
    pub topic: String,
    pub count: u32,
}
