//! 指标面板
//!
//! 每个指标组独立请求、独立持有自己的 `FetchState`：慢的请求
//! 不挡快的，一组失败只影响自己的卡片。没有业务实体时渲染
//! 专门的空状态，一个请求都不发。

use super::icons::{AlertCircle, RefreshCw, Sparkles};
use super::review_card::ReviewCard;
use super::shell::Shell;
use crate::api::{ApiError, BrowserApi};
use crate::auth::use_auth;
use crate::loader::{FetchState, load};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tabletalk_shared::protocol::{BusinessSummary, RatingBucket, TopicFrequency};
use tabletalk_shared::sizing::bar_fraction;
use tabletalk_shared::{AiInsight, Review};

const RECENT_LIMIT: u32 = 5;
const CRITICAL_LIMIT: u32 = 3;
/// 分布条的最小可见宽度占比，非零计数不许缩成看不见
const MIN_BAR_FRACTION: f64 = 0.04;

fn spinner() -> AnyView {
    view! {
        <div class="flex justify-center py-8">
            <span class="loading loading-spinner loading-md text-primary"></span>
        </div>
    }
    .into_any()
}

/// 单个指标组的错误提示，重试只重发这一组
#[component]
fn GroupError(message: String, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div role="alert" class="alert alert-error text-sm">
            <AlertCircle attr:class="h-5 w-5" />
            <span>{message}</span>
            <button class="btn btn-ghost btn-xs" on:click=move |_| on_retry.run(())>
                "Retry"
            </button>
        </div>
    }
}

fn insight_badge_class(insight_type: &str) -> &'static str {
    match insight_type.to_ascii_lowercase().as_str() {
        "positive" => "badge badge-success badge-outline badge-sm",
        "negative" => "badge badge-error badge-outline badge-sm",
        "suggestion" => "badge badge-info badge-outline badge-sm",
        _ => "badge badge-ghost badge-sm",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let business = auth.state.get_untracked().active_business();

    view! {
        <Shell>
            {match business {
                Some(business) => view! { <DashboardContent business_id=business.id /> }.into_any(),
                None => view! {
                    <div class="card bg-base-100 shadow-md max-w-lg mx-auto mt-12">
                        <div class="card-body items-center text-center">
                            <h2 class="card-title">"No business data yet"</h2>
                            <p class="text-base-content/70">
                                "Your account has no restaurant attached, so there are no
                                metrics to show. Contact support to finish setting up."
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
fn DashboardContent(business_id: i64) -> impl IntoView {
    let summary = RwSignal::new(FetchState::<BusinessSummary>::Loading);
    let recent = RwSignal::new(FetchState::<Vec<Review>>::Loading);
    let critical = RwSignal::new(FetchState::<Vec<Review>>::Loading);
    let distribution = RwSignal::new(FetchState::<Vec<RatingBucket>>::Loading);
    let topics = RwSignal::new(FetchState::<Vec<TopicFrequency>>::Loading);
    let insights = RwSignal::new(FetchState::<Vec<AiInsight>>::Loading);

    let (is_generating, set_is_generating) = signal(false);
    let (generate_error, set_generate_error) = signal(Option::<String>::None);

    // 每组一个加载闭包：互不等待，各写各的槽位
    let load_summary = move || {
        summary.set(FetchState::Loading);
        spawn_local(async move {
            summary.set(load(BrowserApi::browser().get_summary(business_id)).await);
        });
    };
    let load_recent = move || {
        recent.set(FetchState::Loading);
        spawn_local(async move {
            recent.set(load(BrowserApi::browser().get_recent_reviews(business_id, RECENT_LIMIT)).await);
        });
    };
    let load_critical = move || {
        critical.set(FetchState::Loading);
        spawn_local(async move {
            critical.set(
                load(BrowserApi::browser().get_critical_reviews(business_id, CRITICAL_LIMIT)).await,
            );
        });
    };
    let load_distribution = move || {
        distribution.set(FetchState::Loading);
        spawn_local(async move {
            distribution.set(load(BrowserApi::browser().get_ratings_distribution(business_id)).await);
        });
    };
    let load_topics = move || {
        topics.set(FetchState::Loading);
        spawn_local(async move {
            topics.set(load(BrowserApi::browser().get_topics_frequency(business_id)).await);
        });
    };
    let load_insights = move || {
        insights.set(FetchState::Loading);
        spawn_local(async move {
            insights.set(load(BrowserApi::browser().get_insights(business_id)).await);
        });
    };

    let load_all = move || {
        load_summary();
        load_recent();
        load_critical();
        load_distribution();
        load_topics();
        load_insights();
    };

    // 初始加载
    load_all();

    let on_generate = move |_| {
        set_is_generating.set(true);
        set_generate_error.set(None);
        spawn_local(async move {
            match BrowserApi::browser().generate_insight(business_id).await {
                Ok(insight) => {
                    // 新洞察插到列表最前面
                    insights.update(|state| match state {
                        FetchState::Ready(list) => list.insert(0, insight),
                        other => *other = FetchState::Ready(vec![insight]),
                    });
                }
                Err(ApiError::Timeout) => {
                    set_generate_error.set(Some(
                        "Insight generation took longer than 30 seconds and was cancelled. \
                         Try again in a moment."
                            .to_string(),
                    ));
                }
                Err(e) => {
                    set_generate_error.set(Some(e.to_string()));
                }
            }
            set_is_generating.set(false);
        });
    };

    view! {
        <div class="max-w-6xl mx-auto space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-medium">"Overview"</h2>
                <button on:click=move |_| load_all() class="btn btn-ghost btn-sm gap-2">
                    <RefreshCw attr:class="h-4 w-4" /> "Refresh"
                </button>
            </div>

            // 汇总指标
            {move || match summary.get() {
                FetchState::Loading => spinner(),
                FetchState::Failed(message) => view! {
                    <GroupError message on_retry=Callback::new(move |_| load_summary()) />
                }
                .into_any(),
                FetchState::Ready(s) => {
                    let topic = s
                        .most_mentioned_topic
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| "No data".to_string());
                    view! {
                        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                            <div class="stat">
                                <div class="stat-title">"Total reviews"</div>
                                <div class="stat-value text-primary">{s.review_count}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"Average rating"</div>
                                <div class="stat-value">{format!("{:.1}", s.average_rating)}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"Sentiment score"</div>
                                <div class="stat-value text-secondary">
                                    {format!("{:.2}", s.sentiment_score)}
                                </div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"Most mentioned topic"</div>
                                <div class="stat-value text-accent text-2xl">{topic}</div>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}

            <div class="grid gap-6 lg:grid-cols-2">
                // 星级分布
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body">
                        <h3 class="card-title text-base">"Ratings distribution"</h3>
                        {move || match distribution.get() {
                            FetchState::Loading => spinner(),
                            FetchState::Failed(message) => view! {
                                <GroupError message on_retry=Callback::new(move |_| load_distribution()) />
                            }
                            .into_any(),
                            FetchState::Ready(buckets) => {
                                let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0);
                                view! {
                                    <div class="space-y-2">
                                        {buckets
                                            .into_iter()
                                            .map(|bucket| {
                                                let width = bar_fraction(
                                                    bucket.count,
                                                    max_count,
                                                    MIN_BAR_FRACTION,
                                                ) * 100.0;
                                                view! {
                                                    <div class="flex items-center gap-3 text-sm">
                                                        <span class="w-8 text-right">
                                                            {bucket.rating} "★"
                                                        </span>
                                                        <div class="h-2 bg-base-200 rounded-full flex-1">
                                                            <div
                                                                class="h-2 bg-primary rounded-full"
                                                                style=format!("width: {width:.1}%")
                                                            ></div>
                                                        </div>
                                                        <span class="w-10 text-right">{bucket.count}</span>
                                                        <span class="w-12 text-right text-base-content/60">
                                                            {format!("{:.0}%", bucket.percentage)}
                                                        </span>
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                }
                                .into_any()
                            }
                        }}
                    </div>
                </div>

                // 主题频次
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body">
                        <h3 class="card-title text-base">"What diners talk about"</h3>
                        {move || match topics.get() {
                            FetchState::Loading => spinner(),
                            FetchState::Failed(message) => view! {
                                <GroupError message on_retry=Callback::new(move |_| load_topics()) />
                            }
                            .into_any(),
                            FetchState::Ready(frequencies) => {
                                if frequencies.is_empty() {
                                    return view! {
                                        <p class="text-sm text-base-content/60 py-4">"No data"</p>
                                    }
                                    .into_any();
                                }
                                view! {
                                    <div class="flex flex-wrap gap-2 py-2">
                                        {frequencies
                                            .into_iter()
                                            .map(|f| view! {
                                                <span class="badge badge-outline badge-lg gap-1">
                                                    {f.topic}
                                                    <span class="text-xs opacity-60">{f.count}</span>
                                                </span>
                                            })
                                            .collect_view()}
                                    </div>
                                }
                                .into_any()
                            }
                        }}
                    </div>
                </div>
            </div>

            <div class="grid gap-6 lg:grid-cols-2">
                // 最新评价
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h3 class="card-title text-base">"Most recent reviews"</h3>
                            <button
                                on:click=move |_| load_recent()
                                disabled=move || recent.get().is_loading()
                                class="btn btn-ghost btn-circle btn-sm"
                            >
                                <RefreshCw attr:class="h-4 w-4" />
                            </button>
                        </div>
                        {move || match recent.get() {
                            FetchState::Loading => spinner(),
                            FetchState::Failed(message) => view! {
                                <GroupError message on_retry=Callback::new(move |_| load_recent()) />
                            }
                            .into_any(),
                            FetchState::Ready(reviews) => {
                                if reviews.is_empty() {
                                    return view! {
                                        <p class="text-sm text-base-content/60 py-4">"No reviews yet."</p>
                                    }
                                    .into_any();
                                }
                                view! {
                                    <div class="divide-y divide-base-200">
                                        {reviews
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

                // 差评关注
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body">
                        <div>
                            <h3 class="card-title text-base">"Critical reviews"</h3>
                            <p class="text-sm text-base-content/60">"Reviews that need your attention"</p>
                        </div>
                        {move || match critical.get() {
                            FetchState::Loading => spinner(),
                            FetchState::Failed(message) => view! {
                                <GroupError message on_retry=Callback::new(move |_| load_critical()) />
                            }
                            .into_any(),
                            FetchState::Ready(reviews) => {
                                if reviews.is_empty() {
                                    return view! {
                                        <p class="text-sm text-base-content/60 py-4">
                                            "Nothing critical right now."
                                        </p>
                                    }
                                    .into_any();
                                }
                                view! {
                                    <div class="divide-y divide-base-200">
                                        {reviews
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

            // AI 洞察
            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <div>
                            <h3 class="card-title text-base">"AI insights"</h3>
                            <p class="text-sm text-base-content/60">
                                "AI-powered analysis of your reviews"
                            </p>
                        </div>
                        <button
                            on:click=on_generate
                            disabled=move || is_generating.get()
                            class="btn btn-primary btn-sm gap-2"
                        >
                            {move || if is_generating.get() {
                                view! { <span class="loading loading-spinner loading-xs"></span> "Generating..." }
                                    .into_any()
                            } else {
                                view! { <Sparkles attr:class="h-4 w-4" /> "Generate new insight" }
                                    .into_any()
                            }}
                        </button>
                    </div>

                    <Show when=move || generate_error.get().is_some()>
                        <div role="alert" class="alert alert-warning text-sm py-2">
                            <AlertCircle attr:class="h-5 w-5" />
                            <span>{move || generate_error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    {move || match insights.get() {
                        FetchState::Loading => spinner(),
                        FetchState::Failed(message) => view! {
                            <GroupError message on_retry=Callback::new(move |_| load_insights()) />
                        }
                        .into_any(),
                        FetchState::Ready(list) => {
                            if list.is_empty() {
                                return view! {
                                    <p class="text-sm text-base-content/60 py-4">
                                        "No insights yet. Generate one to get started."
                                    </p>
                                }
                                .into_any();
                            }
                            view! {
                                <div class="divide-y divide-base-200">
                                    {list
                                        .into_iter()
                                        .map(|insight| {
                                            let date_label = insight
                                                .created_at
                                                .map(|d| d.format("%b %-d, %Y").to_string());
                                            view! {
                                                <div class="py-3">
                                                    <div class="flex items-center gap-2">
                                                        <span class=insight_badge_class(&insight.insight_type)>
                                                            {insight.insight_type.clone()}
                                                        </span>
                                                        <span class="font-medium">{insight.title.clone()}</span>
                                                    </div>
                                                    <p class="text-sm text-base-content/80 mt-1">
                                                        {insight.description.clone()}
                                                    </p>
                                                    <p class="text-xs text-base-content/50 mt-1">
                                                        {format!("Based on {} reviews", insight.related_reviews)}
                                                        {date_label.map(|d| format!(" · {d}"))}
                                                    </p>
                                                </div>
                                            }
                                        })
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
