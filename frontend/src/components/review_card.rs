//! 单条评价的卡片渲染

use super::star_rating::StarRating;
use leptos::prelude::*;
use tabletalk_shared::Review;

fn sentiment_badge_class(label: &str) -> &'static str {
    if label.eq_ignore_ascii_case("positive") {
        "badge badge-success badge-outline badge-sm"
    } else if label.eq_ignore_ascii_case("negative") {
        "badge badge-error badge-outline badge-sm"
    } else {
        "badge badge-ghost badge-sm"
    }
}

#[component]
pub fn ReviewCard(review: Review) -> impl IntoView {
    let avatar_letter = review
        .username
        .as_deref()
        .and_then(|name| name.chars().next())
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());
    let author = review
        .username
        .clone()
        .unwrap_or_else(|| "Anonymous".to_string());
    let date_label = review
        .review_date
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "Date unknown".to_string());
    let topics = review.topic_list();
    let sentiment = review.sentiment_description.clone();

    view! {
        <div class="border-b border-base-200 py-4 last:border-b-0">
            <div class="flex justify-between items-start mb-2">
                <div class="flex items-center gap-3">
                    <div class="avatar avatar-placeholder">
                        <div class="bg-primary/10 text-primary rounded-full w-9">
                            <span class="text-sm font-semibold">{avatar_letter}</span>
                        </div>
                    </div>
                    <div>
                        <div class="font-medium">{author}</div>
                        <div class="text-xs text-base-content/60">
                            {date_label} " · " {review.source.clone()}
                        </div>
                    </div>
                </div>
                <StarRating rating=review.rating />
            </div>

            {review
                .content
                .clone()
                .map(|content| view! { <p class="text-sm text-base-content/80 mb-2">{content}</p> })}

            <div class="flex flex-wrap items-center gap-2">
                <span class=sentiment_badge_class(&sentiment)>{sentiment.clone()}</span>
                {review
                    .is_suggestion
                    .then(|| view! { <span class="badge badge-info badge-outline badge-sm">"Suggestion"</span> })}
                {topics
                    .into_iter()
                    .map(|topic| view! { <span class="badge badge-neutral badge-sm">{topic}</span> })
                    .collect_view()}
            </div>
        </div>
    }
}
