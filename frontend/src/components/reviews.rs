//! 评价列表页：客户端筛选
//!
//! 列表拉一次，筛选全在客户端：四个控件任何一个变化都重新
//! 跑一遍领域层的过滤引擎，列表刷新后也一样，不缓存旧结果。

use super::icons::RefreshCw;
use super::review_card::ReviewCard;
use super::shell::Shell;
use crate::api::BrowserApi;
use crate::auth::use_auth;
use crate::loader::{FetchState, load};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tabletalk_shared::Review;
use tabletalk_shared::chrono::Utc;
use tabletalk_shared::filter::{DateWindow, ReviewFilters, ReviewerType, filter_reviews};

const REVIEWS_LIMIT: u32 = 50;

fn parse_reviewer_type(value: &str) -> ReviewerType {
    match value {
        "trusted" => ReviewerType::Trusted,
        "regular" => ReviewerType::Regular,
        _ => ReviewerType::All,
    }
}

fn parse_date_window(value: &str) -> DateWindow {
    match value {
        "month" => DateWindow::PastMonth,
        "year" => DateWindow::PastYear,
        _ => DateWindow::All,
    }
}

#[component]
fn FilterSelect(
    label: &'static str,
    options: Vec<(&'static str, &'static str)>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="form-control">
            <span class="label-text text-xs">{label}</span>
            <select
                class="select select-bordered select-sm"
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(value, text)| view! { <option value=value>{text}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
pub fn ReviewsPage() -> impl IntoView {
    let auth = use_auth();
    let business = auth.state.get_untracked().active_business();

    view! {
        <Shell>
            {match business {
                Some(business) => view! { <ReviewList business_id=business.id /> }.into_any(),
                None => view! {
                    <div class="card bg-base-100 shadow-md max-w-lg mx-auto mt-12">
                        <div class="card-body items-center text-center">
                            <h2 class="card-title">"No business data yet"</h2>
                            <p class="text-base-content/70">
                                "There is no restaurant attached to this account, so no reviews to browse."
                            </p>
                        </div>
                    </div>
                }
                .into_any(),
            }}
        </Shell>
    }
}

#[component]
fn ReviewList(business_id: i64) -> impl IntoView {
    let reviews = RwSignal::new(FetchState::<Vec<Review>>::Loading);
    let filters = RwSignal::new(ReviewFilters::default());

    let load_reviews = move || {
        reviews.set(FetchState::Loading);
        spawn_local(async move {
            reviews.set(
                load(BrowserApi::browser().get_recent_reviews(business_id, REVIEWS_LIMIT)).await,
            );
        });
    };
    load_reviews();

    // 每次控件变化或列表刷新都重算，不留过期的筛选结果
    let filtered = move || match reviews.get() {
        FetchState::Ready(list) => {
            FetchState::Ready(filter_reviews(&list, &filters.get(), Utc::now()))
        }
        FetchState::Loading => FetchState::Loading,
        FetchState::Failed(message) => FetchState::Failed(message),
    };

    let set_reviewer = Callback::new(move |value: String| {
        filters.update(|f| f.reviewer_type = parse_reviewer_type(&value));
    });
    let set_window = Callback::new(move |value: String| {
        filters.update(|f| f.date_window = parse_date_window(&value));
    });
    let set_stars = Callback::new(move |value: String| {
        filters.update(|f| f.star_rating = value.parse::<u8>().ok());
    });
    let set_sentiment = Callback::new(move |value: String| {
        filters.update(|f| {
            f.sentiment = (value != "all").then(|| value.clone());
        });
    });

    view! {
        <div class="max-w-4xl mx-auto space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-medium">"Reviews"</h2>
                <button
                    on:click=move |_| load_reviews()
                    disabled=move || reviews.get().is_loading()
                    class="btn btn-ghost btn-sm gap-2"
                >
                    <RefreshCw attr:class="h-4 w-4" /> "Refresh"
                </button>
            </div>

            <div class="card bg-base-100 shadow-md">
                <div class="card-body py-4">
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                        <FilterSelect
                            label="Reviewer"
                            options=vec![
                                ("all", "All reviewers"),
                                ("trusted", "Trusted"),
                                ("regular", "Regular"),
                            ]
                            on_change=set_reviewer
                        />
                        <FilterSelect
                            label="Posted"
                            options=vec![
                                ("all", "Any time"),
                                ("month", "Past month"),
                                ("year", "Past year"),
                            ]
                            on_change=set_window
                        />
                        <FilterSelect
                            label="Star rating"
                            options=vec![
                                ("all", "Any rating"),
                                ("5", "5 stars"),
                                ("4", "4 stars"),
                                ("3", "3 stars"),
                                ("2", "2 stars"),
                                ("1", "1 star"),
                            ]
                            on_change=set_stars
                        />
                        <FilterSelect
                            label="Sentiment"
                            options=vec![
                                ("all", "Any sentiment"),
                                ("positive", "Positive"),
                                ("neutral", "Neutral"),
                                ("negative", "Negative"),
                            ]
                            on_change=set_sentiment
                        />
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    {move || match filtered() {
                        FetchState::Loading => view! {
                            <div class="flex justify-center py-8">
                                <span class="loading loading-spinner loading-md text-primary"></span>
                            </div>
                        }
                        .into_any(),
                        FetchState::Failed(message) => view! {
                            <div role="alert" class="alert alert-error text-sm">
                                <span>{message}</span>
                            </div>
                        }
                        .into_any(),
                        FetchState::Ready(list) => {
                            if list.is_empty() {
                                return view! {
                                    <p class="text-sm text-base-content/60 py-4">
                                        "No reviews match the current filters."
                                    </p>
                                }
                                .into_any();
                            }
                            view! {
                                <p class="text-xs text-base-content/50">
                                    {format!("{} reviews", list.len())}
                                </p>
                                <div class="divide-y divide-base-200">
                                    {list
                                        .into_iter()
                                        .map(|review| view! { <ReviewCard review /> })
                                        .collect_view()}
                                </div>
                            }
                            .into_any()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
