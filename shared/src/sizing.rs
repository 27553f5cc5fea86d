//! 展示层的比例计算
//!
//! 星级拆解与分布条宽度都是纯算术，放在领域层以便原生测试，
//! 组件只负责把结果画出来。

#[cfg(test)]
mod tests;

/// 一个评分拆解成的星星构成
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarBreakdown {
    /// 实心星数量
    pub full: u8,
    /// 部分填充星的填充比例 (0, 1)，整数评分时为 None
    pub partial: Option<f64>,
    /// 空心星数量
    pub empty: u8,
}

/// 把小数评分拆成 full / partial / empty 三段，补齐到 max_stars
pub fn star_breakdown(rating: f64, max_stars: u8) -> StarBreakdown {
    let rating = rating.clamp(0.0, max_stars as f64);
    let full = rating.floor() as u8;
    let fraction = rating - rating.floor();
    let partial = if fraction > 0.0 { Some(fraction) } else { None };
    let empty = max_stars - full - u8::from(partial.is_some());
    StarBreakdown {
        full,
        partial,
        empty,
    }
}

/// 分布条相对于组内最大值的宽度比例
///
/// 非零计数被钳到 min_fraction 之上，保证与真正的零可区分；
/// 零计数严格返回 0。
pub fn bar_fraction(count: u32, max_count: u32, min_fraction: f64) -> f64 {
    if count == 0 || max_count == 0 {
        return 0.0;
    }
    (count as f64 / max_count as f64).max(min_fraction).min(1.0)
}
