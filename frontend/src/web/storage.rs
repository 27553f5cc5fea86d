//! 本地存储适配层
//!
//! 会话数据（token / 用户档案）通过 `StorageAdapter` 抽象读写：
//! 浏览器里走 `web_sys::Storage`，测试里换成内存 Mock。

/// 抽象存储接口：负责键值数据的持久化
pub trait StorageAdapter: Clone {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// 浏览器 LocalStorage 实现
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl StorageAdapter for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn remove(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// 内存存储：Clone 共享同一份底层数据，
    /// 方便在测试里让 API 客户端与断言方看到相同状态。
    #[derive(Debug, Clone, Default)]
    pub struct MockStorage {
        map: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MockStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.map.borrow().len()
        }

        pub fn is_empty(&self) -> bool {
            self.map.borrow().is_empty()
        }
    }

    impl StorageAdapter for MockStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.map
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            true
        }

        fn remove(&self, key: &str) -> bool {
            self.map.borrow_mut().remove(key).is_some()
        }
    }
}
