//! 实时数据通道模块
//! - 独占持有一个连接对象，所有通道流量都从这里过
//! - 心跳、重连、订阅、发布、拆除
//! - 上行遥测消息写入实时数据缓存

pub mod client;
pub mod connection;
pub mod entity;
pub mod message_listener;
pub mod protocol;

pub use client::MqttChannel;
pub use entity::{ChannelState, ReconnectGate, StateCell};
