//! 运行配置
//!
//! API 基地址在构建时通过环境变量注入；默认空串即同源部署，
//! 请求路径直接落在当前站点上。

/// 后端 API 基地址（不带结尾斜杠）
pub fn api_base_url() -> String {
    option_env!("TABLETALK_API_URL")
        .unwrap_or("")
        .trim_end_matches('/')
        .to_string()
}
