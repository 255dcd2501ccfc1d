//! 实时数据缓存
//! 整个可视化会话持有一份最新遥测批次，整体替换，绝不合并
//! 由运行时启动处显式构建并注入使用方，消息监听器是唯一写入方

use std::sync::RwLock;

use crate::entity::dto::telemetry_dto::TelemetrySampleDto;

pub struct LiveDataStore {
    batch: RwLock<Option<TelemetrySampleDto>>,
}

impl LiveDataStore {
    pub fn new() -> Self {
        LiveDataStore {
            batch: RwLock::new(None),
        }
    }

    /// 写入最新批次，后写覆盖先写
    pub fn set_batch(&self, batch: TelemetrySampleDto) {
        let mut guard = self.batch.write().expect("live data store lock poisoned");
        *guard = Some(batch);
    }

    /// 清空缓存，通道断开重建时使用
    pub fn clear(&self) {
        let mut guard = self.batch.write().expect("live data store lock poisoned");
        *guard = None;
    }

    /// 读取当前批次的快照
    pub fn snapshot(&self) -> Option<TelemetrySampleDto> {
        let guard = self.batch.read().expect("live data store lock poisoned");
        guard.clone()
    }
}

impl Default for LiveDataStore {
    fn default() -> Self {
        Self::new()
    }
}
