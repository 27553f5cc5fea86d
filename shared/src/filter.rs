//! 评价列表的客户端过滤引擎
//!
//! 四个谓词（评价者类型 / 时间窗口 / 星级 / 情感标签）取 AND。
//! 纯函数：`now` 由调用方传入，同样的输入永远产生同样的输出，
//! 每次筛选控件变化或列表刷新都重新执行一遍。

use crate::Review;
use chrono::{DateTime, Months, Utc};

#[cfg(test)]
mod tests;

/// 评价者分类筛选
///
/// Trusted 按正面情感标签判定，Regular 为其余全部。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewerType {
    #[default]
    All,
    Trusted,
    Regular,
}

/// 时间窗口筛选：距今一个自然月 / 一个自然年
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    All,
    PastMonth,
    PastYear,
}

/// 组合筛选条件，Default 即「全不过滤」
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewFilters {
    pub reviewer_type: ReviewerType,
    pub date_window: DateWindow,
    /// Some(1..=5) 时按取整后的星级精确匹配
    pub star_rating: Option<u8>,
    /// Some(label) 时与 sentiment_description 大小写不敏感匹配
    pub sentiment: Option<String>,
}

/// 对评价列表执行组合筛选，保持原有顺序
pub fn filter_reviews(
    reviews: &[Review],
    filters: &ReviewFilters,
    now: DateTime<Utc>,
) -> Vec<Review> {
    reviews
        .iter()
        .filter(|r| matches_reviewer_type(r, filters.reviewer_type))
        .filter(|r| matches_date_window(r, filters.date_window, now))
        .filter(|r| matches_star_rating(r, filters.star_rating))
        .filter(|r| matches_sentiment(r, filters.sentiment.as_deref()))
        .cloned()
        .collect()
}

fn matches_reviewer_type(review: &Review, reviewer_type: ReviewerType) -> bool {
    match reviewer_type {
        ReviewerType::All => true,
        ReviewerType::Trusted => review.is_positive(),
        ReviewerType::Regular => !review.is_positive(),
    }
}

fn matches_date_window(review: &Review, window: DateWindow, now: DateTime<Utc>) -> bool {
    let months_back = match window {
        DateWindow::All => return true,
        DateWindow::PastMonth => 1,
        DateWindow::PastYear => 12,
    };
    // 无日期的评价无法证明落在窗口内，不显示
    let Some(review_date) = review.review_date else {
        return false;
    };
    match now.checked_sub_months(Months::new(months_back)) {
        Some(cutoff) => review_date >= cutoff,
        None => false,
    }
}

fn matches_star_rating(review: &Review, star_rating: Option<u8>) -> bool {
    match star_rating {
        None => true,
        Some(stars) => review.rounded_rating() == stars,
    }
}

fn matches_sentiment(review: &Review, sentiment: Option<&str>) -> bool {
    match sentiment {
        None => true,
        Some(label) => review.sentiment_description.eq_ignore_ascii_case(label),
    }
}
