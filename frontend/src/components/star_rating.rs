//! 星级渲染
//!
//! 评分拆解交给领域层的 `star_breakdown`，这里只负责画：
//! 部分填充的星用 linearGradient 在小数位置截断。

use leptos::prelude::*;
use tabletalk_shared::sizing::star_breakdown;

const STAR_PATH: &str = "M9 0L11.0206 6.21885H17.5595L12.2694 10.0623L14.2901 16.2812L9 12.4377L3.70993 16.2812L5.73056 10.0623L0.440492 6.21885H6.97937L9 0Z";
const FILL_COLOR: &str = "#EA580B";
const EMPTY_COLOR: &str = "#E5E7EB";

/// 单颗星，filled 为填充比例 0.0..=1.0
#[component]
fn Star(filled: f64) -> impl IntoView {
    let percent = (filled * 100.0).round() as u32;
    let gradient_id = format!("star-grad-{percent}");
    let fill = if percent >= 100 {
        FILL_COLOR.to_string()
    } else if percent == 0 {
        EMPTY_COLOR.to_string()
    } else {
        format!("url(#{gradient_id})")
    };
    let offset = format!("{percent}%");

    view! {
        <svg
            width="18"
            height="17"
            viewBox="0 0 18 17"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
            class="inline-block"
        >
            <defs>
                <linearGradient id=gradient_id>
                    <stop offset=offset.clone() stop-color=FILL_COLOR />
                    <stop offset=offset stop-color=EMPTY_COLOR />
                </linearGradient>
            </defs>
            <path d=STAR_PATH fill=fill />
        </svg>
    }
}

/// 星级条：full 颗实心 + 至多一颗部分填充 + 空心补齐
#[component]
pub fn StarRating(rating: f64, #[prop(default = 5)] max_stars: u8) -> impl IntoView {
    let breakdown = star_breakdown(rating, max_stars);

    view! {
        <div class="inline-flex gap-1">
            {(0..breakdown.full)
                .map(|_| view! { <Star filled=1.0 /> })
                .collect_view()}
            {breakdown
                .partial
                .map(|fraction| view! { <Star filled=fraction /> })}
            {(0..breakdown.empty)
                .map(|_| view! { <Star filled=0.0 /> })
                .collect_view()}
        </div>
    }
}
