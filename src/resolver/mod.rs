//! 视觉状态解析模块
//! 渲染组件在每次渲染时向它询问当前应显示的前景色

pub mod visual_state;
pub mod color;

pub use visual_state::resolve_fore_color;
