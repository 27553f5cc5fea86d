//! 认证后的应用外壳：侧边栏 + 顶栏
//!
//! 只包在受保护页面外层。外壳存活期间维持一个周期定时器，
//! 定期用 refresh token 换新 access token；续期失败即结束会话，
//! 由路由守卫接手跳转。

use super::icons::{LayoutDashboard, LogOut, MessageSquare, Utensils};
use super::star_rating::StarRating;
use crate::auth::{BrowserSessionManager, TOKEN_REFRESH_INTERVAL, use_auth};
use crate::loader::{FetchState, load};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tabletalk_shared::protocol::RatingResponse;

#[component]
fn NavItem(route: AppRoute, label: &'static str, children: Children) -> impl IntoView {
    let router = use_router();
    let is_active = move || router.current_route().get() == route;

    view! {
        <li>
            <a
                class=move || {
                    if is_active() {
                        "active font-medium"
                    } else {
                        ""
                    }
                }
                on:click=move |_| router.navigate(route.to_path())
            >
                {children()}
                {label}
            </a>
        </li>
    }
}

/// 顶栏：业务名 + 平均评分（一位小数）+ 星级
#[component]
fn Header() -> impl IntoView {
    let auth = use_auth();
    let rating = RwSignal::new(FetchState::<RatingResponse>::Loading);

    let business = auth.state.get_untracked().active_business();
    let business_name = business
        .as_ref()
        .map(|b| b.name.clone())
        .unwrap_or_else(|| "No business yet".to_string());

    if let Some(business) = &business {
        let business_id = business.id;
        spawn_local(async move {
            let manager = BrowserSessionManager::browser();
            rating.set(load(manager.api().get_rating(business_id)).await);
        });
    }

    view! {
        <header class="navbar bg-base-100 shadow-sm px-6">
            <div class="flex-1">
                <h1 class="text-2xl font-medium">{business_name}</h1>
            </div>
            <div class="flex-none">
                {move || match rating.get() {
                    FetchState::Ready(r) => view! {
                        <div class="flex items-center gap-2">
                            <span class="text-2xl font-medium">
                                {format!("{:.1}", r.average_rating)}
                            </span>
                            <StarRating rating=r.average_rating />
                        </div>
                    }
                    .into_any(),
                    _ => ().into_any(),
                }}
            </div>
        </header>
    }
}

#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let auth = use_auth();

    let on_logout = move |_| {
        // 立即切到未认证，不等服务端响应；清理在后台完成
        auth.set_unauthenticated();
        spawn_local(async move {
            BrowserSessionManager::browser().logout().await;
        });
    };

    // 周期续期 access token；失败即结束会话
    let refresh_handle = set_interval_with_handle(
        move || {
            spawn_local(async move {
                let manager = BrowserSessionManager::browser();
                if manager.refresh_token().await.is_none() {
                    auth.set_unauthenticated();
                }
            });
        },
        TOKEN_REFRESH_INTERVAL,
    )
    .ok();
    on_cleanup(move || {
        if let Some(handle) = refresh_handle {
            handle.clear();
        }
    });

    view! {
        <div class="flex min-h-screen bg-base-200">
            <aside class="w-60 bg-base-100 shadow-lg flex flex-col">
                <div class="flex items-center gap-2 p-4 text-primary">
                    <Utensils attr:class="h-6 w-6" />
                    <span class="text-xl font-bold">"Tabletalk"</span>
                </div>
                <ul class="menu w-full flex-1">
                    <NavItem route=AppRoute::Dashboard label="Dashboard">
                        <LayoutDashboard attr:class="h-4 w-4" />
                    </NavItem>
                    <NavItem route=AppRoute::Reviews label="Reviews">
                        <MessageSquare attr:class="h-4 w-4" />
                    </NavItem>
                </ul>
                <div class="p-4">
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm w-full gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Log out"
                    </button>
                </div>
            </aside>
            <div class="flex-1 flex flex-col">
                <Header />
                <main class="flex-1 p-6">{children()}</main>
            </div>
        </div>
    }
}
