//! Tabletalk 前端应用
//!
//! Context-Driven 的高内聚低耦合架构：
//! - `web::route` / `web::router`: 路由定义与路由服务（守卫引擎）
//! - `auth`: 会话生命周期与认证状态管理
//! - `session`: 会话数据的存储门面
//! - `api`: 类型化的后端端点客户端
//! - `loader`: 指标组的独立加载状态
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    mod icons;
    pub mod landing;
    pub mod login;
    pub mod register;
    mod review_card;
    pub mod reviews;
    mod shell;
    mod star_rating;
}
mod config;
mod loader;
mod session;

// 原生 Web API 封装模块
// 对浏览器原生 API 的轻量级封装：fetch、LocalStorage、History、
// 定时器，外加测试用的 Mock 实现。
pub(crate) mod web {
    pub mod http;
    pub(crate) mod log;
    pub mod route;
    pub mod router;
    pub mod storage;
}

use crate::auth::{AuthContext, BrowserSessionManager};
use crate::components::dashboard::DashboardPage;
use crate::components::landing::LandingPage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::reviews::ReviewsPage;

use leptos::prelude::*;
use leptos::task::spawn_local;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Reviews => view! { <ReviewsPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文，初始阶段为 Checking
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 启动即做一次会话校验，决定落向哪个阶段
    spawn_local(async move {
        let manager = BrowserSessionManager::browser();
        match manager.check_auth_status().await {
            Some(profile) => auth_ctx.set_authenticated(profile),
            None => auth_ctx.set_unauthenticated(),
        }
    });

    // 3. 会话阶段信号注入路由服务实现守卫（解耦）
    let session_phase = auth_ctx.phase_signal();

    view! {
        <Router session_phase=session_phase>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
