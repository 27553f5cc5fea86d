//! 营销落地页（纯静态展示）

use super::icons::{LayoutDashboard, MessageSquare, Sparkles, Utensils};
use crate::web::router::use_router;
use leptos::prelude::*;

#[component]
fn FeatureCard(title: &'static str, blurb: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body items-center text-center">
                <div class="p-3 bg-primary/10 rounded-2xl text-primary">{children()}</div>
                <h3 class="card-title text-lg">{title}</h3>
                <p class="text-sm text-base-content/70">{blurb}</p>
            </div>
        </div>
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let router = use_router();
    let go_register = move |_| router.navigate("/register");
    let go_login = move |_| router.navigate("/login");

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm px-6">
                <div class="flex-1 gap-2 text-primary">
                    <Utensils attr:class="h-6 w-6" />
                    <span class="text-xl font-bold">"Tabletalk"</span>
                </div>
                <div class="flex-none gap-2">
                    <button on:click=go_login class="btn btn-ghost">"Log in"</button>
                    <button on:click=go_register class="btn btn-primary">"Get started"</button>
                </div>
            </div>

            <div class="hero py-20">
                <div class="hero-content text-center flex-col max-w-2xl">
                    <h1 class="text-5xl font-bold leading-tight">
                        "Know what your diners are really saying"
                    </h1>
                    <p class="py-4 text-lg text-base-content/70">
                        "Tabletalk pulls your reviews from Google, Yelp and TripAdvisor into one
                        dashboard, scores their sentiment and turns them into insights you can act on."
                    </p>
                    <button on:click=go_register class="btn btn-primary btn-lg">
                        "Start analyzing your reviews"
                    </button>
                </div>
            </div>

            <div class="max-w-5xl mx-auto grid gap-6 md:grid-cols-3 px-6 pb-20">
                <FeatureCard
                    title="AI insights"
                    blurb="Concrete, review-backed suggestions about what to fix first, generated on demand."
                >
                    <Sparkles attr:class="h-8 w-8" />
                </FeatureCard>
                <FeatureCard
                    title="Smart tagging"
                    blurb="Every review is tagged by topic — food, service, price, wait time — so patterns surface themselves."
                >
                    <MessageSquare attr:class="h-8 w-8" />
                </FeatureCard>
                <FeatureCard
                    title="Live metrics"
                    blurb="Average rating, sentiment trend and rating distribution, always up to date."
                >
                    <LayoutDashboard attr:class="h-8 w-8" />
                </FeatureCard>
            </div>
        </div>
    }
}
