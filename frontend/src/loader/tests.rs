use super::*;
use crate::api::TabletalkApi;
use crate::session::SessionStore;
use crate::web::http::tests::MockHttpClient;
use crate::web::storage::tests::MockStorage;
use serde_json::json;
use tabletalk_shared::protocol::BusinessSummary;
use tabletalk_shared::Review;

const BASE: &str = "https://api.test";

fn api(client: MockHttpClient) -> TabletalkApi<MockHttpClient, MockStorage> {
    TabletalkApi::new(BASE, client, SessionStore::new(MockStorage::new()))
}

#[tokio::test]
async fn one_failed_group_does_not_contaminate_another() {
    let client = MockHttpClient::new();
    // summary 挂了，recent reviews 正常
    client.mock_response(
        &format!("{BASE}/api/dashboard/business/1/summary"),
        500,
        json!({"error": "Something went wrong"}),
    );
    client.mock_response(
        &format!("{BASE}/api/dashboard/business/1/reviews/recent?limit=5"),
        200,
        json!([{
            "id": 1,
            "source": "Google",
            "content": "Great noodles",
            "rating": 4.5,
            "review_date": "2025-05-01T08:00:00Z",
            "username": "diner99",
            "topics": "Food, Service",
            "sentiment_score": 0.9,
            "sentiment_description": "positive",
            "is_suggestion": false
        }]),
    );

    let api = api(client);
    let summary: FetchState<BusinessSummary> = load(api.get_summary(1)).await;
    let recent: FetchState<Vec<Review>> = load(api.get_recent_reviews(1, 5)).await;

    assert_eq!(summary.error(), Some("Something went wrong"));
    let reviews = recent.data().expect("recent group must stay intact");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].topic_list(), vec!["Food", "Service"]);
}

#[tokio::test]
async fn ready_state_exposes_data_and_no_error() {
    let client = MockHttpClient::new();
    client.mock_response(
        &format!("{BASE}/api/dashboard/business/1/summary"),
        200,
        json!({
            "review_count": 42,
            "average_rating": 4.1,
            "sentiment_score": 0.55,
            "most_mentioned_topic": null
        }),
    );

    let api = api(client);
    let state = load(api.get_summary(1)).await;

    assert!(!state.is_loading());
    assert!(state.error().is_none());
    assert_eq!(state.data().unwrap().most_mentioned_topic, None);
}
