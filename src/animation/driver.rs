//! 底层动画驱动
//! 单值参数表示从当前值动画到目标值，数组参数表示关键帧序列
//! 位移步骤拆成互相独立的 X/Y 两条轨道
//! 时钟由宿主渲染循环通过 tick 推进，play/pause 是同步控制信号

use std::sync::MutexGuard;

use crate::debug;

use super::easing::Easing;
use super::target::{AnimationTarget, SharedTarget, TransformFrame};

const LOG_TAG: &str = "animation";

/// 显隐变化
/// Hide 将透明度推到 0，完成时把目标置为不可见
/// Show 先把目标置为可见，再把透明度推到 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayChange {
    Show,
    Hide,
}

/// 单步位移量
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TranslateOffset {
    pub x: f64,
    pub y: f64,
}

/// 滑入方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone)]
pub struct AnimateOptions {
    pub display: Option<DisplayChange>,
    /// 显式透明度关键帧，display 未指定时生效
    pub opacity: Option<Vec<f64>>,
    pub rotate: Option<Vec<f64>>,
    pub scale: Option<Vec<f64>>,
    pub translates: Vec<TranslateOffset>,
    pub duration_ms: u64,
    pub autoplay: bool,
    pub looped: bool,
    pub easing: Easing,
}

impl Default for AnimateOptions {
    fn default() -> Self {
        AnimateOptions {
            display: None,
            opacity: None,
            rotate: None,
            scale: None,
            translates: Vec::new(),
            duration_ms: 1000,
            autoplay: true,
            looped: false,
            easing: Easing::default(),
        }
    }
}

/// 单条关键帧轨道
#[derive(Debug, Clone)]
struct Track {
    keys: Vec<f64>,
}

impl Track {
    fn constant(value: f64) -> Self {
        Track { keys: vec![value] }
    }

    /// 单值从当前值出发，数组原样作为关键帧
    fn from_keys(current: f64, values: &[f64]) -> Self {
        match values {
            [] => Track::constant(current),
            [single] => Track {
                keys: vec![current, *single],
            },
            many => Track {
                keys: many.to_vec(),
            },
        }
    }

    /// 按整体进度采样，缓动逐段施加
    fn sample(&self, progress: f64, easing: Easing) -> f64 {
        if self.keys.len() < 2 {
            return self.keys.first().copied().unwrap_or(0.0);
        }
        let segments = (self.keys.len() - 1) as f64;
        let position = progress.clamp(0.0, 1.0) * segments;
        let index = (position.floor() as usize).min(self.keys.len() - 2);
        let local = position - index as f64;
        let eased = easing.apply(local);
        let from = self.keys[index];
        let to = self.keys[index + 1];
        from + (to - from) * eased
    }
}

/// 动画句柄
/// 由创建它的组件独占持有，play/pause 同步生效，卸载时暂停并丢弃即可
pub struct Animation {
    target: SharedTarget,
    opacity: Track,
    rotate: Track,
    scale: Track,
    translate_x: Track,
    translate_y: Track,
    duration_ms: f64,
    easing: Easing,
    looped: bool,
    clock_ms: f64,
    playing: bool,
    finished: bool,
    hide_on_complete: bool,
}

/// 创建动画
/// 不开启 autoplay 时动画保持暂停，等调用方 play 后才会在 tick 中产出帧
pub fn animate(target: SharedTarget, opts: AnimateOptions) -> Animation {
    let mut hide_on_complete = false;
    let opacity = match opts.display {
        Some(DisplayChange::Hide) => {
            hide_on_complete = true;
            Track::from_keys(1.0, &[0.0])
        }
        Some(DisplayChange::Show) => {
            lock_target(&target).set_visible(true);
            Track::from_keys(0.0, &[1.0])
        }
        None => match &opts.opacity {
            Some(keys) => Track::from_keys(1.0, keys),
            None => Track::constant(1.0),
        },
    };

    let rotate = match &opts.rotate {
        Some(keys) => Track::from_keys(0.0, keys),
        None => Track::constant(0.0),
    };
    let scale = match &opts.scale {
        Some(keys) => Track::from_keys(1.0, keys),
        None => Track::constant(1.0),
    };

    let (translate_x, translate_y) = translate_tracks(&opts.translates);

    debug!(
        LOG_TAG,
        "animation created, duration: {}ms loop: {} autoplay: {}",
        opts.duration_ms, opts.looped, opts.autoplay
    );

    Animation {
        target,
        opacity,
        rotate,
        scale,
        translate_x,
        translate_y,
        duration_ms: opts.duration_ms as f64,
        easing: opts.easing,
        looped: opts.looped,
        clock_ms: 0.0,
        playing: opts.autoplay,
        finished: false,
        hide_on_complete,
    }
}

fn translate_tracks(translates: &[TranslateOffset]) -> (Track, Track) {
    if translates.is_empty() {
        return (Track::constant(0.0), Track::constant(0.0));
    }
    let xs: Vec<f64> = translates.iter().map(|t| t.x).collect();
    let ys: Vec<f64> = translates.iter().map(|t| t.y).collect();
    (Track::from_keys(0.0, &xs), Track::from_keys(0.0, &ys))
}

fn lock_target(target: &SharedTarget) -> MutexGuard<'_, dyn AnimationTarget + 'static> {
    target.lock().expect("animation target lock poisoned")
}

impl Animation {
    pub fn play(&mut self) {
        if !self.finished {
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_paused(&self) -> bool {
        !self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 推进时钟并把当前帧回写到目标
    /// 暂停或已完成时是空操作
    pub fn tick(&mut self, delta_ms: f64) {
        if !self.playing || self.finished {
            return;
        }
        self.clock_ms += delta_ms.max(0.0);

        let progress = self.progress();
        let frame = self.frame_at(progress);
        lock_target(&self.target).apply(&frame);

        if !self.looped && self.clock_ms >= self.duration_ms {
            self.playing = false;
            self.finished = true;
            if self.hide_on_complete {
                lock_target(&self.target).set_visible(false);
            }
        }
    }

    fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        if self.looped {
            (self.clock_ms % self.duration_ms) / self.duration_ms
        } else {
            (self.clock_ms / self.duration_ms).min(1.0)
        }
    }

    /// 按进度采样一帧，不动时钟
    pub fn frame_at(&self, progress: f64) -> TransformFrame {
        TransformFrame {
            opacity: self.opacity.sample(progress, self.easing),
            rotate: self.rotate.sample(progress, self.easing),
            scale: self.scale.sample(progress, self.easing),
            translate_x: self.translate_x.sample(progress, self.easing),
            translate_y: self.translate_y.sample(progress, self.easing),
        }
    }

    /// 当前时钟对应的帧
    pub fn current_frame(&self) -> TransformFrame {
        self.frame_at(self.progress())
    }

    /// 停止动画并清除写到目标上的覆盖，恢复动画前的视觉状态
    pub fn remove(&mut self) {
        self.playing = false;
        self.finished = true;
        lock_target(&self.target).clear_overrides();
    }
}

/* ==========================================================
 * 快捷方法：常用动画的固定参数版本
 * ========================================================== */

pub fn rotate_animate(target: SharedTarget, duration_ms: u64, looped: bool) -> Animation {
    animate(
        target,
        AnimateOptions {
            rotate: Some(vec![360.0]),
            duration_ms,
            looped,
            ..Default::default()
        },
    )
}

pub fn scale_animate(target: SharedTarget, duration_ms: u64, looped: bool) -> Animation {
    animate(
        target,
        AnimateOptions {
            scale: Some(vec![1.0, 1.2, 1.0]),
            duration_ms,
            looped,
            ..Default::default()
        },
    )
}

pub fn translate_animate(
    target: SharedTarget,
    translates: Vec<TranslateOffset>,
    duration_ms: u64,
    looped: bool,
) -> Animation {
    animate(
        target,
        AnimateOptions {
            translates,
            duration_ms,
            looped,
            ..Default::default()
        },
    )
}

/// 闪烁：透明度和缩放同时抖动
pub fn blink_animate(target: SharedTarget, duration_ms: u64, looped: bool) -> Animation {
    animate(
        target,
        AnimateOptions {
            opacity: Some(vec![1.0, 0.3, 1.0]),
            scale: Some(vec![1.0, 0.95, 1.0]),
            duration_ms,
            looped,
            ..Default::default()
        },
    )
}

/// 滑入：从指定方向进场并淡入，进场前先置为可见
pub fn slide_in_animate(
    target: SharedTarget,
    direction: SlideDirection,
    duration_ms: u64,
    looped: bool,
) -> Animation {
    let translates = match direction {
        SlideDirection::Left => vec![
            TranslateOffset { x: -100.0, y: 0.0 },
            TranslateOffset { x: 0.0, y: 0.0 },
        ],
        SlideDirection::Right => vec![
            TranslateOffset { x: 100.0, y: 0.0 },
            TranslateOffset { x: 0.0, y: 0.0 },
        ],
        SlideDirection::Top => vec![
            TranslateOffset { x: 0.0, y: -100.0 },
            TranslateOffset { x: 0.0, y: 0.0 },
        ],
        SlideDirection::Bottom => vec![
            TranslateOffset { x: 0.0, y: 100.0 },
            TranslateOffset { x: 0.0, y: 0.0 },
        ],
    };
    animate(
        target,
        AnimateOptions {
            display: Some(DisplayChange::Show),
            translates,
            duration_ms,
            looped,
            ..Default::default()
        },
    )
}

/// 停止动画并清空它写在目标上的样式覆盖
pub fn remove_animate(animation: &mut Animation) {
    animation.remove();
}
