//! 认证模块
//!
//! 管理会话的生命周期，与路由系统解耦：路由服务只拿到注入的
//! 会话阶段信号。对服务端的预期内失败（没有 token、token 被拒）
//! 一律以 None/false 返回，跳不跳转由调用方（路由守卫）决定。

use crate::api::{ApiError, BrowserApi, TabletalkApi};
use crate::session::SessionStore;
use crate::web::http::HttpClient;
use crate::web::log::{log_info, log_warn};
use crate::web::storage::StorageAdapter;
use leptos::prelude::*;
use tabletalk_shared::protocol::{AuthResponse, RegisterRequest};
use tabletalk_shared::{Business, UserProfile};

#[cfg(test)]
mod tests;

/// 周期续期间隔：每 10 分钟换一次新 access token
pub const TOKEN_REFRESH_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10 * 60);

// =========================================================
// 会话阶段与上下文
// =========================================================

/// 会话阶段状态机：Checking -> Authenticated | Unauthenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// 启动后的首次校验尚未完成
    #[default]
    Checking,
    Authenticated,
    Unauthenticated,
}

/// 会话状态
#[derive(Clone, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// 服务端确认过的用户档案（仅认证后存在）
    pub profile: Option<UserProfile>,
}

impl SessionState {
    /// 当前生效业务：档案里的第一家
    ///
    /// None 即「尚无业务」，由面板显式渲染空状态。
    pub fn active_business(&self) -> Option<Business> {
        self.profile.as_ref()?.active_business().cloned()
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<SessionState>,
    pub set_state: WriteSignal<SessionState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 会话阶段信号（用于路由服务注入）
    pub fn phase_signal(&self) -> Signal<SessionPhase> {
        let state = self.state;
        Signal::derive(move || state.get().phase)
    }

    pub fn set_authenticated(&self, profile: UserProfile) {
        self.set_state.update(|state| {
            state.phase = SessionPhase::Authenticated;
            state.profile = Some(profile);
        });
    }

    /// 登出迁移是同步的：不等服务端响应就切到未认证
    pub fn set_unauthenticated(&self) {
        self.set_state.update(|state| {
            state.phase = SessionPhase::Unauthenticated;
            state.profile = None;
        });
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

// =========================================================
// Token 结构校验
// =========================================================

/// token 是否为三段非空的点分结构
///
/// 不符合的 token 视同不存在，不会被发往服务端。
pub fn is_well_formed_token(raw: &str) -> bool {
    let segments: Vec<&str> = raw.split('.').collect();
    segments.len() == 3 && segments.iter().all(|s| !s.is_empty())
}

// =========================================================
// 会话管理器
// =========================================================

/// 会话生命周期的业务逻辑，面向适配器、可原生测试
///
/// C: HttpClient, S: StorageAdapter
pub struct SessionManager<C: HttpClient, S: StorageAdapter> {
    api: TabletalkApi<C, S>,
}

/// 浏览器环境下的具体类型
pub type BrowserSessionManager = SessionManager<
    crate::web::http::FetchClient,
    crate::web::storage::LocalStorage,
>;

impl BrowserSessionManager {
    pub fn browser() -> Self {
        Self::new(BrowserApi::browser())
    }
}

impl<C: HttpClient, S: StorageAdapter> SessionManager<C, S> {
    pub fn new(api: TabletalkApi<C, S>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &TabletalkApi<C, S> {
        &self.api
    }

    fn session(&self) -> &SessionStore<S> {
        self.api.session()
    }

    /// 校验当前会话并取回最新档案
    ///
    /// 存储中没有 token 或 token 结构非法时直接返回 None，
    /// 不发任何网络请求，同时清掉可能残留的旧会话。否则拉取
    /// 档案；任何失败（网络、401/422）都清会话并返回 None。
    pub async fn check_auth_status(&self) -> Option<UserProfile> {
        match self.session().access_token() {
            Some(token) if is_well_formed_token(&token) => {}
            _ => {
                self.session().clear();
                return None;
            }
        }

        match self.api.get_profile().await {
            Ok(profile) => {
                self.session().cache_user(&profile);
                Some(profile)
            }
            Err(e) => {
                log_info!("[Auth] session check failed: {e:?}");
                self.session().clear();
                None
            }
        }
    }

    /// 登录并持久化会话
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let auth = self.api.login(email, password).await?;
        self.store_session(&auth);
        Ok(auth.user)
    }

    /// 注册（连同业务一并创建）并持久化会话
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ApiError> {
        let auth = self.api.register(request).await?;
        self.store_session(&auth);
        Ok(auth.user)
    }

    /// 登出
    ///
    /// 无论服务端调用成功与否，本地会话数据都会被清除；
    /// 返回值只反映服务端调用本身是否成功。
    pub async fn logout(&self) -> bool {
        let server_ok = match self.api.logout().await {
            Ok(()) => true,
            Err(e) => {
                log_warn!("[Auth] server logout failed: {e:?}");
                false
            }
        };
        self.session().clear();
        server_ok
    }

    /// 用 refresh token 换新的 access token
    ///
    /// 没有 refresh token 时不发请求直接失败；换取失败时
    /// 整个会话作废。
    pub async fn refresh_token(&self) -> Option<String> {
        let refresh = self.session().refresh_token()?;

        match self.api.refresh(&refresh).await {
            Ok(resp) => {
                self.session().set_access_token(&resp.token);
                Some(resp.token)
            }
            Err(e) => {
                log_warn!("[Auth] token refresh failed: {e:?}");
                self.session().clear();
                None
            }
        }
    }

    fn store_session(&self, auth: &AuthResponse) {
        self.session()
            .save(&auth.token, &auth.refresh_token, &auth.user);
    }
}
