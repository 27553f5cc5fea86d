use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod filter;
pub mod protocol;
pub mod sizing;

// 供 frontend 复用同一版本的 chrono
pub use chrono;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 服务端给定的情感标签取值
pub const SENTIMENT_POSITIVE: &str = "positive";
pub const SENTIMENT_NEUTRAL: &str = "neutral";
pub const SENTIMENT_NEGATIVE: &str = "negative";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 一条来自外部平台（Google / Yelp / TripAdvisor）的评价
///
/// 由服务端抓取并完成情感/主题分析后下发，客户端只读不写。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub source: String,
    pub content: Option<String>,
    #[serde(default)]
    pub rating: f64,
    pub review_date: Option<DateTime<Utc>>,
    pub username: Option<String>,
    /// 逗号分隔的主题标签，如 "Service, Food"
    pub topics: Option<String>,
    #[serde(default)]
    pub sentiment_score: f64,
    /// 服务端给定的分类标签: positive / neutral / negative
    pub sentiment_description: String,
    #[serde(default)]
    pub is_suggestion: bool,
}

impl Review {
    /// 四舍五入（0.5 进位）到整数星级
    pub fn rounded_rating(&self) -> u8 {
        (self.rating + 0.5).floor().clamp(0.0, 5.0) as u8
    }

    /// 拆分逗号分隔的主题字符串，去除空白与空项
    pub fn topic_list(&self) -> Vec<String> {
        self.topics
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 情感标签是否为 positive（大小写不敏感）
    pub fn is_positive(&self) -> bool {
        self.sentiment_description
            .eq_ignore_ascii_case(SENTIMENT_POSITIVE)
    }
}

/// 用户管理的餐厅实体，所有评价/指标数据的归属
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub location: Option<String>,
    pub business_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

/// 当前登录用户的档案，每次会话校验都从服务端重新获取
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub businesses: Vec<Business>,
}

impl UserProfile {
    /// 当前生效的业务实体：列表中的第一家
    ///
    /// 返回 None 即「尚无业务」状态，由 UI 显式处理。
    pub fn active_business(&self) -> Option<&Business> {
        self.businesses.first()
    }
}

/// AI 生成的洞察条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsight {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// 该洞察关联到的评价数量
    #[serde(default)]
    pub related_reviews: u32,
    /// positive / negative / neutral / suggestion
    pub insight_type: String,
    pub created_at: Option<DateTime<Utc>>,
}
