//! 动画目标接口
//! 驱动只负责算帧和回写，目标长什么样（画布节点、SVG 元素代理）由渲染器决定

use std::sync::{Arc, Mutex};

/// 一帧动画回写的全部变换量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformFrame {
    pub opacity: f64,
    /// 旋转角度（度）
    pub rotate: f64,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for TransformFrame {
    fn default() -> Self {
        TransformFrame {
            opacity: 1.0,
            rotate: 0.0,
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

/// 动画目标
/// 句柄由创建它的组件独占持有，不跨组件共享
pub trait AnimationTarget: Send {
    /// 回写一帧变换
    fn apply(&mut self, frame: &TransformFrame);

    /// 显示或隐藏目标
    fn set_visible(&mut self, visible: bool);

    /// 清除动画写入的变换和透明度覆盖，恢复动画前的视觉状态
    fn clear_overrides(&mut self);
}

pub type SharedTarget = Arc<Mutex<dyn AnimationTarget>>;

/// 把目标装进共享句柄
pub fn shared<T: AnimationTarget + 'static>(target: T) -> SharedTarget {
    Arc::new(Mutex::new(target))
}

/// 通用目标实现，保存最近一帧的变换状态
/// 渲染器没有自定义目标时直接用它，测试也用它观察驱动输出
#[derive(Debug)]
pub struct BasicNode {
    pub frame: TransformFrame,
    pub visible: bool,
    pub applied_frames: u64,
}

impl BasicNode {
    pub fn new() -> Self {
        BasicNode {
            frame: TransformFrame::default(),
            visible: true,
            applied_frames: 0,
        }
    }
}

impl Default for BasicNode {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationTarget for BasicNode {
    fn apply(&mut self, frame: &TransformFrame) {
        self.frame = *frame;
        self.applied_frames += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn clear_overrides(&mut self) {
        self.frame = TransformFrame::default();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_basic_node_records_applied_frame() {
        let mut node = BasicNode::new();
        let frame = TransformFrame {
            rotate: 90.0,
            ..Default::default()
        };
        node.apply(&frame);
        assert_eq!(node.frame.rotate, 90.0);
        assert_eq!(node.applied_frames, 1);
    }

    #[test]
    fn test_clear_overrides_restores_identity() {
        let mut node = BasicNode::new();
        node.apply(&TransformFrame {
            opacity: 0.2,
            scale: 2.0,
            ..Default::default()
        });
        node.clear_overrides();
        assert_eq!(node.frame, TransformFrame::default());
    }
}
