//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API，所有对 window.history 的操作都
//! 集中在此模块。导航流程：请求 -> 守卫校验 -> 处理 -> 加载。
//! 守卫依赖注入的会话阶段信号：`Checking` 阶段不做任何重定向，
//! 等阶段落定后由 Effect 统一补判。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::log::log_info;
use super::route::AppRoute;
use crate::auth::SessionPhase;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；会话阶段信号由外部注入，
/// 路由系统与认证系统保持解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session_phase: Signal<SessionPhase>,
}

impl RouterService {
    fn new(session_phase: Signal<SessionPhase>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session_phase,
        }
    }

    /// 当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前会话阶段（出口组件用它决定是否先渲染占位）
    pub fn session_phase(&self) -> Signal<SessionPhase> {
        self.session_phase
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// use_push 为 true 时 pushState，否则 replaceState。
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let phase = self.session_phase.get_untracked();

        // --- Step 1: 守卫校验 ---
        // 校验中的会话不重定向：先落到目标路由，出口渲染占位，
        // 阶段落定后由 setup_session_redirect 的 Effect 补判。
        if phase == SessionPhase::Unauthenticated && target_route.requires_auth() {
            log_info!("[Router] access denied, redirecting to login");
            self.apply_route(AppRoute::auth_failure_redirect(), use_push);
            return;
        }

        if phase == SessionPhase::Authenticated && target_route.should_redirect_when_authenticated()
        {
            log_info!("[Router] already authenticated, redirecting to dashboard");
            self.apply_route(AppRoute::auth_success_redirect(), use_push);
            return;
        }

        // --- Step 2: 加载页面 ---
        self.apply_route(target_route, use_push);
    }

    fn apply_route(&self, route: AppRoute, use_push: bool) {
        if use_push {
            push_history_state(route.to_path());
        } else {
            replace_history_state(route.to_path());
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session_phase = self.session_phase;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let target_route = AppRoute::from_path(&path);
            let phase = session_phase.get_untracked();

            // popstate 时也执行守卫逻辑
            if phase == SessionPhase::Unauthenticated && target_route.requires_auth() {
                let redirect = AppRoute::auth_failure_redirect();
                replace_history_state(redirect.to_path());
                set_route.set(redirect);
            } else {
                set_route.set(target_route);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话阶段变化时的自动重定向
    ///
    /// 覆盖三种迁移：校验完成、登录成功、登出。
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session_phase = self.session_phase;

        Effect::new(move |_| {
            let phase = session_phase.get();
            let route = current_route.get_untracked();

            match phase {
                SessionPhase::Checking => {}
                SessionPhase::Authenticated => {
                    if route.should_redirect_when_authenticated() {
                        let redirect = AppRoute::auth_success_redirect();
                        push_history_state(redirect.to_path());
                        set_route.set(redirect);
                        log_info!("[Router] session established, redirecting to dashboard");
                    }
                }
                SessionPhase::Unauthenticated => {
                    if route.requires_auth() {
                        let redirect = AppRoute::auth_failure_redirect();
                        push_history_state(redirect.to_path());
                        set_route.set(redirect);
                        log_info!("[Router] session ended, redirecting to login");
                    }
                }
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session_phase: Signal<SessionPhase>) -> RouterService {
    let router = RouterService::new(session_phase);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 会话阶段信号
    session_phase: Signal<SessionPhase>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(session_phase);

    children()
}

/// 路由出口组件
///
/// 根据当前路由渲染对应的视图；受保护路由在会话校验完成前
/// 渲染加载占位，不触发任何跳转。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        let phase = router.session_phase().get();

        if current.requires_auth() && phase == SessionPhase::Checking {
            return view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any();
        }

        matcher(current)
    }
}
