//! 缓动函数

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// 场景动画统一使用的默认缓动
    #[default]
    EaseOutExpo,
}

impl Easing {
    /// 输入输出都在 [0, 1] 区间
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - (2.0_f64).powf(-10.0 * t)
                }
            }
        }
    }
}
