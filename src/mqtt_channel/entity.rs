//! 通道状态对象

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// 通道连接状态机
/// Disconnected → Connecting → Connected → (Reconnecting | Disconnected)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChannelState {
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
    Reconnecting = 3,
}

impl ChannelState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ChannelState::Connecting,
            2 => ChannelState::Connected,
            3 => ChannelState::Reconnecting,
            _ => ChannelState::Disconnected,
        }
    }
}

/// 可观察的状态单元
/// 通道是唯一写入方，回调线程和调用方只读
#[derive(Debug, Clone)]
pub struct StateCell(Arc<AtomicU8>);

impl StateCell {
    pub fn new() -> Self {
        StateCell(Arc::new(AtomicU8::new(ChannelState::Disconnected as u8)))
    }

    pub fn set(&self, state: ChannelState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }

    pub fn get(&self) -> ChannelState {
        ChannelState::from_u8(self.0.load(Ordering::SeqCst))
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}

/// 重连单飞闸
/// 同一时刻只允许一个重连任务在排队，失败后由任务自己按固定间隔继续
#[derive(Debug, Default)]
pub struct ReconnectGate {
    pending: AtomicBool,
}

impl ReconnectGate {
    pub fn new() -> Self {
        ReconnectGate {
            pending: AtomicBool::new(false),
        }
    }

    /// 尝试占位，返回 true 表示由调用方负责调度这次重连
    pub fn try_arm(&self) -> bool {
        !self.pending.swap(true, Ordering::SeqCst)
    }

    /// 重连收尾（成功或放弃）后解除占位
    pub fn disarm(&self) {
        self.pending.store(false, Ordering::SeqCst);
    }

    pub fn is_armed(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }
}
