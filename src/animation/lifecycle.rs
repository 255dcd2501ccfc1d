//! 组件动画生命周期
//! 挂载时按组件声明式配置组装动画，卸载时同步暂停并释放句柄
//! 编辑态不跑动画，场景只在运行态动起来

use crate::debug;
use crate::entity::dto::component_dto::{ComponentDetailDto, DataActionDto, TranslateDirection};

use super::driver::{animate, AnimateOptions, Animation, DisplayChange, TranslateOffset};
use super::target::SharedTarget;

const LOG_TAG: &str = "animation";

/// 组件能力集合里声明了这一项才会组装动画
pub const CAPABILITY_ANIMATION: &str = "动画";

const DEFAULT_DURATION_MS: u64 = 1000;

/// 组件动画句柄
/// 组件挂载时创建，随组件一起销毁；句柄不跨组件共享
pub struct ComponentAnimation {
    handle: Option<Animation>,
    target: SharedTarget,
}

impl ComponentAnimation {
    /// 按声明式配置组装动画
    /// 能力集合不含动画、或场景处于编辑态时不组装，后续 play/pause 都是空操作
    pub fn init(detail: &ComponentDetailDto, edit_mode: bool, target: SharedTarget) -> Self {
        let animated = detail
            .component_show
            .iter()
            .any(|cap| cap == CAPABILITY_ANIMATION);
        if !animated || edit_mode {
            return ComponentAnimation {
                handle: None,
                target,
            };
        }

        let action = detail.data_action.clone().unwrap_or_default();

        let duration_ms = resolve_duration_ms(&action);
        let rotate = if action.rotation_enabled {
            vec![360.0]
        } else {
            vec![0.0]
        };
        let scale = if action.scale_enabled {
            vec![0.7, 1.0, 1.3, 1.0]
        } else {
            vec![1.0]
        };
        let translates = resolve_translates(&action);

        debug!(
            LOG_TAG,
            "init animation for component: {}, duration: {}ms", detail.identifier, duration_ms
        );

        let opts = AnimateOptions {
            display: Some(DisplayChange::Show),
            rotate: Some(rotate),
            scale: Some(scale),
            translates,
            duration_ms,
            // 无限循环，等调用方 play
            autoplay: false,
            looped: true,
            ..Default::default()
        };
        let handle = animate(target.clone(), opts);

        ComponentAnimation {
            handle: Some(handle),
            target,
        }
    }

    pub fn is_animated(&self) -> bool {
        self.handle.is_some()
    }

    pub fn play(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.play();
        }
    }

    pub fn pause(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        match &self.handle {
            Some(handle) => handle.is_paused(),
            None => true,
        }
    }

    /// 宿主渲染循环推进动画时钟
    pub fn tick(&mut self, delta_ms: f64) {
        if let Some(handle) = &mut self.handle {
            handle.tick(delta_ms);
        }
    }

    /// 直接显示目标，不走动画
    pub fn show(&self) {
        lock(&self.target).set_visible(true);
    }

    /// 直接隐藏目标，不走动画
    pub fn hide(&self) {
        lock(&self.target).set_visible(false);
    }

    /// 暂停并释放动画句柄，之后不会再有任何帧写到目标上
    pub fn release(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.pause();
        }
        self.handle = None;
    }
}

fn lock(
    target: &SharedTarget,
) -> std::sync::MutexGuard<'_, dyn super::target::AnimationTarget + 'static> {
    target.lock().expect("animation target lock poisoned")
}

// 组件卸载时兜底，保证没有句柄悬在已移除的目标上
impl Drop for ComponentAnimation {
    fn drop(&mut self) {
        self.release();
    }
}

/// 显式秒数优先，其次转速档位，兜底 1000ms
fn resolve_duration_ms(action: &DataActionDto) -> u64 {
    if let Some(seconds) = action.duration {
        if seconds > 0.0 {
            return (seconds * 1000.0) as u64;
        }
    }
    action
        .rotation_speed
        .map(|speed| speed.duration_ms())
        .unwrap_or(DEFAULT_DURATION_MS)
}

/// 位移步骤映射：竖直取负 Y 偏移，其余都算水平 X 偏移
/// 未启用位移或列表为空时给一条零位移轨道
fn resolve_translates(action: &DataActionDto) -> Vec<TranslateOffset> {
    let mut translates = Vec::new();
    if action.translation_enabled {
        for step in &action.translate_list {
            translates.push(match step.direction {
                TranslateDirection::Vertical => TranslateOffset {
                    x: 0.0,
                    y: -step.position,
                },
                TranslateDirection::Horizontal => TranslateOffset {
                    x: step.position,
                    y: 0.0,
                },
            });
        }
    }
    if translates.is_empty() {
        translates.push(TranslateOffset { x: 0.0, y: 0.0 });
    }
    translates
}
