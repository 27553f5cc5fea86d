//! 会话存储（Token Store）
//!
//! LocalStorage 中三个固定键的类型化门面。读写只走这一层，
//! 三个键永远一起清除，不存在部分清除的状态。

use crate::web::log::log_warn;
use crate::web::storage::StorageAdapter;
use tabletalk_shared::UserProfile;

#[cfg(test)]
mod tests;

/// access token 存储键
pub const KEY_TOKEN: &str = "token";
/// refresh token 存储键
pub const KEY_REFRESH_TOKEN: &str = "refreshToken";
/// 序列化的用户档案存储键
pub const KEY_USER: &str = "user";

/// 会话数据的存储门面
///
/// Clone 共享同一底层存储（浏览器里是单例的 LocalStorage，
/// 测试里是 Rc 共享的 Mock）。
#[derive(Clone)]
pub struct SessionStore<S: StorageAdapter> {
    storage: S,
}

impl<S: StorageAdapter> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(KEY_TOKEN)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(KEY_REFRESH_TOKEN)
    }

    /// 本地缓存的用户档案
    ///
    /// 仅用于展示兜底；会话校验永远以服务端返回为准。
    pub fn cached_user(&self) -> Option<UserProfile> {
        let raw = self.storage.get(KEY_USER)?;
        serde_json::from_str(&raw).ok()
    }

    /// 登录/注册成功后写入完整会话
    pub fn save(&self, token: &str, refresh_token: &str, user: &UserProfile) {
        self.storage.set(KEY_TOKEN, token);
        self.storage.set(KEY_REFRESH_TOKEN, refresh_token);
        self.cache_user(user);
    }

    /// 续期后只替换 access token，refresh token 与档案保持不变
    pub fn set_access_token(&self, token: &str) {
        self.storage.set(KEY_TOKEN, token);
    }

    pub fn cache_user(&self, user: &UserProfile) {
        match serde_json::to_string(user) {
            Ok(raw) => {
                self.storage.set(KEY_USER, &raw);
            }
            Err(e) => {
                log_warn!("[Session] failed to serialize user profile: {e}");
            }
        }
    }

    /// 清除整个会话：三个键一起删除
    pub fn clear(&self) {
        self.storage.remove(KEY_TOKEN);
        self.storage.remove(KEY_REFRESH_TOKEN);
        self.storage.remove(KEY_USER);
    }
}
