//! 动画驱动模块
//! - driver: 底层关键帧驱动，操作目标的透明度/旋转/缩放/位移
//! - lifecycle: 组件挂载到卸载的动画生命周期
//! - 没有后台定时器，由宿主渲染循环推进时钟，卸载即停

pub mod driver;
pub mod easing;
pub mod lifecycle;
pub mod target;

pub use driver::{
    animate, blink_animate, remove_animate, rotate_animate, scale_animate, slide_in_animate,
    translate_animate, AnimateOptions, Animation, DisplayChange, SlideDirection, TranslateOffset,
};
pub use easing::Easing;
pub use lifecycle::ComponentAnimation;
pub use target::{shared, AnimationTarget, BasicNode, SharedTarget, TransformFrame};
