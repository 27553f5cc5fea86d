use super::*;
use chrono::{Duration, TimeZone};

// =========================================================
// 辅助函数
// =========================================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn review(id: i64, rating: f64, sentiment: &str, review_date: Option<DateTime<Utc>>) -> Review {
    Review {
        id,
        source: "Google".to_string(),
        content: Some(format!("review #{id}")),
        rating,
        review_date,
        username: Some("diner".to_string()),
        topics: None,
        sentiment_score: 0.0,
        sentiment_description: sentiment.to_string(),
        is_suggestion: false,
    }
}

fn days_ago(days: i64) -> Option<DateTime<Utc>> {
    Some(now() - Duration::days(days))
}

fn sample_set() -> Vec<Review> {
    vec![
        review(1, 4.6, "positive", days_ago(3)),
        review(2, 3.0, "neutral", days_ago(40)),
        review(3, 2.4, "negative", days_ago(200)),
        review(4, 1.0, "negative", None),
    ]
}

// =========================================================
// 默认条件 / 幂等性
// =========================================================

#[test]
fn default_filters_return_input_unchanged() {
    let reviews = sample_set();
    let filtered = filter_reviews(&reviews, &ReviewFilters::default(), now());
    assert_eq!(filtered, reviews);
}

#[test]
fn filtering_is_idempotent() {
    let reviews = sample_set();
    let filters = ReviewFilters {
        reviewer_type: ReviewerType::Regular,
        date_window: DateWindow::PastYear,
        star_rating: None,
        sentiment: Some("negative".to_string()),
    };
    let once = filter_reviews(&reviews, &filters, now());
    let twice = filter_reviews(&once, &filters, now());
    assert_eq!(once, twice);
}

// =========================================================
// 星级取整
// =========================================================

#[test]
fn star_filter_uses_round_half_up() {
    // 4.6 → 5, 3.0 → 3, 2.4 → 2：筛选 3 星仅保留 3.0
    let reviews = vec![
        review(1, 4.6, "positive", days_ago(1)),
        review(2, 3.0, "neutral", days_ago(1)),
        review(3, 2.4, "negative", days_ago(1)),
    ];
    let filters = ReviewFilters {
        star_rating: Some(3),
        ..Default::default()
    };
    let filtered = filter_reviews(&reviews, &filters, now());
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, 2);
}

#[test]
fn half_ratings_round_upward() {
    let reviews = vec![
        review(1, 2.5, "neutral", days_ago(1)),
        review(2, 3.4, "neutral", days_ago(1)),
        review(3, 4.5, "positive", days_ago(1)),
    ];
    let three = filter_reviews(
        &reviews,
        &ReviewFilters {
            star_rating: Some(3),
            ..Default::default()
        },
        now(),
    );
    assert_eq!(
        three.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![1, 2],
        "2.5 进位到 3，4.5 进位到 5"
    );
    let five = filter_reviews(
        &reviews,
        &ReviewFilters {
            star_rating: Some(5),
            ..Default::default()
        },
        now(),
    );
    assert_eq!(five.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);
}

// =========================================================
// 评价者类型
// =========================================================

#[test]
fn trusted_matches_positive_sentiment_only() {
    let reviews = vec![
        review(1, 5.0, "positive", days_ago(1)),
        review(2, 5.0, "Positive", days_ago(1)),
        review(3, 3.0, "neutral", days_ago(1)),
        review(4, 1.0, "negative", days_ago(1)),
    ];
    let filters = ReviewFilters {
        reviewer_type: ReviewerType::Trusted,
        ..Default::default()
    };
    let filtered = filter_reviews(&reviews, &filters, now());
    assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn regular_matches_everything_not_positive() {
    let reviews = vec![
        review(1, 5.0, "positive", days_ago(1)),
        review(2, 3.0, "neutral", days_ago(1)),
        review(3, 1.0, "negative", days_ago(1)),
    ];
    let filters = ReviewFilters {
        reviewer_type: ReviewerType::Regular,
        ..Default::default()
    };
    let filtered = filter_reviews(&reviews, &filters, now());
    assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);
}

// =========================================================
// 时间窗口
// =========================================================

#[test]
fn past_month_keeps_reviews_on_or_after_cutoff() {
    let cutoff = now().checked_sub_months(Months::new(1)).unwrap();
    let reviews = vec![
        review(1, 4.0, "positive", Some(cutoff)),
        review(2, 4.0, "positive", Some(cutoff - Duration::seconds(1))),
        review(3, 4.0, "positive", days_ago(2)),
    ];
    let filters = ReviewFilters {
        date_window: DateWindow::PastMonth,
        ..Default::default()
    };
    let filtered = filter_reviews(&reviews, &filters, now());
    assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn past_year_window_spans_twelve_months() {
    let reviews = vec![
        review(1, 4.0, "positive", days_ago(200)),
        review(2, 4.0, "positive", days_ago(400)),
    ];
    let filters = ReviewFilters {
        date_window: DateWindow::PastYear,
        ..Default::default()
    };
    let filtered = filter_reviews(&reviews, &filters, now());
    assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
}

#[test]
fn dateless_reviews_only_pass_the_all_window() {
    let reviews = vec![review(1, 4.0, "positive", None)];
    let month = ReviewFilters {
        date_window: DateWindow::PastMonth,
        ..Default::default()
    };
    assert!(filter_reviews(&reviews, &month, now()).is_empty());
    assert_eq!(
        filter_reviews(&reviews, &ReviewFilters::default(), now()).len(),
        1
    );
}

// =========================================================
// 情感标签 / 组合条件
// =========================================================

#[test]
fn sentiment_filter_is_case_insensitive_exact_match() {
    let reviews = vec![
        review(1, 4.0, "Positive", days_ago(1)),
        review(2, 2.0, "negative", days_ago(1)),
    ];
    let filters = ReviewFilters {
        sentiment: Some("POSITIVE".to_string()),
        ..Default::default()
    };
    let filtered = filter_reviews(&reviews, &filters, now());
    assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
}

#[test]
fn all_predicates_are_anded() {
    let reviews = vec![
        // 全部条件命中
        review(1, 4.6, "positive", days_ago(5)),
        // 星级不符
        review(2, 3.0, "positive", days_ago(5)),
        // 窗口外
        review(3, 5.0, "positive", days_ago(100)),
        // 情感不符（也因此不是 Trusted）
        review(4, 5.0, "neutral", days_ago(5)),
    ];
    let filters = ReviewFilters {
        reviewer_type: ReviewerType::Trusted,
        date_window: DateWindow::PastMonth,
        star_rating: Some(5),
        sentiment: Some("positive".to_string()),
    };
    let filtered = filter_reviews(&reviews, &filters, now());
    assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
}
