//! 实时数据通道
//! 独占持有连接对象并主导全部通道流量：连接、心跳、重连、订阅、发布、拆除
//! 除 publish 的硬失败外，操作结果都以状态字符串返回，调用方按需轮询/响应

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use uuid::Uuid;

use crate::common::error::{RuntimeError, RuntimeErrorCode};
use crate::common::setting::Settings;
use crate::store::LiveDataStore;
use crate::{debug, error, info, warn};

use super::connection::MqttConnection;
use super::entity::{ChannelState, ReconnectGate, StateCell};
use super::message_listener::on_message;
use super::protocol::{heartbeat_payload, is_shadow_topic, topic_heartbeat};

const LOG_TAG: &str = "mqtt_channel";

/// 心跳间隔
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(30_000);
/// 重连间隔，固定节奏，不做退避
pub const RECONNECT_INTERVAL: Duration = Duration::from_millis(5_000);

/// 实时数据通道服务
/// 运行时启动处构建一个实例并注入消费方，连接对象不允许其他组件直接改动
pub struct MqttChannel {
    // mqtt connection
    con: Option<MqttConnection>,
    state: StateCell,
    gate: Arc<ReconnectGate>,
    store: Arc<LiveDataStore>,
    heartbeat_run: Option<Arc<AtomicBool>>,
    client_id: String,
}

impl MqttChannel {
    pub fn new(store: Arc<LiveDataStore>) -> Self {
        let setting = Settings::get();
        MqttChannel {
            con: None,
            state: StateCell::new(),
            gate: Arc::new(ReconnectGate::new()),
            store,
            heartbeat_run: None,
            client_id: make_client_id(&setting.mqtt.client_id_prefix),
        }
    }

    /// 当前连接状态，回调线程写，调用方读
    pub fn state(&self) -> ChannelState {
        self.state.get()
    }

    /// 建立连接
    /// 总是替换旧的连接引用，成功后开始心跳；传输层失败转入重连
    pub fn connect(&mut self) -> Result<(), RuntimeError> {
        let setting = Settings::get();
        let uri = resolve_endpoint(
            &setting.mqtt.endpoint,
            &setting.mqtt.host,
            setting.mqtt.port,
            setting.mqtt.secure,
        );
        info!(LOG_TAG, "mqtt地址: {}", uri);

        self.stop_heartbeat();
        self.state.set(ChannelState::Connecting);

        let mut con = MqttConnection::new(&uri, &self.client_id);
        con.create_client().map_err(|e| RuntimeError {
            code: RuntimeErrorCode::ChannelError,
            msg: format!("mqtt create client error: {e}"),
        })?;

        // 回调在连接前挂好，重连成功后上行消息才不会漏
        let store = self.store.clone();
        con.set_message_callback(move |_cli, msg| {
            if let Some(msg) = msg {
                if let Err(e) = on_message(&msg, &store) {
                    error!(LOG_TAG, "mqtt message callback on_message error, err: {e}");
                }
            } else {
                warn!(LOG_TAG, "mqtt message callback on none message");
            }
        });

        // 掉线转入重连，单飞闸保证只挂一个重连任务
        let state = self.state.clone();
        let gate = self.gate.clone();
        con.set_connection_lost_callback(move |cli| {
            error!(LOG_TAG, "*** mqtt Connection lost ***");
            state.set(ChannelState::Reconnecting);
            if gate.try_arm() {
                spawn_reconnect(cli.clone(), state.clone(), gate.clone());
            }
        });

        if let Err(e) = con.connect(&setting.mqtt.username, &setting.mqtt.password) {
            error!(LOG_TAG, "Mqtt客户端连接失败: {}", e);
            self.state.set(ChannelState::Reconnecting);
            self.schedule_reconnect(&con);
            self.con = Some(con);
            return Err(RuntimeError {
                code: RuntimeErrorCode::ChannelError,
                msg: format!("mqtt connect error: {e}"),
            });
        }

        self.state.set(ChannelState::Connected);
        info!(LOG_TAG, "mqtt连接成功");

        self.con = Some(con);
        self.start_heartbeat();

        Ok(())
    }

    /// 消息订阅
    pub fn subscribe(&self, topics: &[&str]) -> String {
        let con = match &self.con {
            Some(con) => con,
            None => {
                info!(LOG_TAG, "未连接");
                return String::from("未连接");
            }
        };
        for topic in topics {
            if let Err(e) = con.subscribe(topic) {
                info!(LOG_TAG, "订阅失败，主题可能已经订阅, err: {}", e);
                return String::from("订阅失败");
            }
        }
        info!(LOG_TAG, "订阅主题: {:?}", topics);
        String::from("订阅成功")
    }

    /// 取消订阅
    pub fn unsubscribe(&self, topics: &[&str]) -> String {
        let con = match &self.con {
            Some(con) => con,
            None => {
                info!(LOG_TAG, "未连接");
                return String::from("未连接");
            }
        };
        for topic in topics {
            if let Err(e) = con.unsubscribe(topic) {
                info!(LOG_TAG, "取消订阅失败, err: {}", e);
                return String::from("取消订阅失败");
            }
        }
        info!(LOG_TAG, "取消订阅成功: {:?}", topics);
        String::from("取消订阅成功")
    }

    /// 发布指令
    /// 影子主题返回影子确认文案；未连接是可观察结果而不是异常；发送失败才拒绝
    pub fn publish(&self, topic: &str, payload: &str, label: &str) -> Result<String, RuntimeError> {
        let con = match &self.con {
            Some(con) => con,
            None => {
                info!(LOG_TAG, "Mqtt客户端未连接");
                return Ok(String::from("Mqtt客户端未连接"));
            }
        };
        debug!(LOG_TAG, "发送主题: {}", topic);
        debug!(LOG_TAG, "发送内容: {}", payload);
        match con.publish(topic, payload) {
            Ok(()) => {
                let ack = publish_ack(topic, label);
                info!(LOG_TAG, "{}", ack);
                Ok(ack)
            }
            Err(e) => {
                error!(LOG_TAG, "[ {} ] 指令发送失败, err: {}", label, e);
                Err(RuntimeError {
                    code: RuntimeErrorCode::ChannelError,
                    msg: format!("[ {label} ] 指令发送失败"),
                })
            }
        }
    }

    /// 断开连接
    /// 幂等：未连接时直接返回，总是清掉连接对象，下次 connect 从干净状态开始
    pub fn disconnect(&mut self) -> String {
        self.stop_heartbeat();
        self.gate.disarm();
        match self.con.take() {
            None => {
                info!(LOG_TAG, "未连接");
                String::from("未连接")
            }
            Some(con) => {
                con.disconnect();
                self.state.set(ChannelState::Disconnected);
                info!(LOG_TAG, "Mqtt服务器已断开连接");
                String::from("连接终止")
            }
        }
    }

    /// 初次连接失败时和掉线回调走同一条重连路径
    fn schedule_reconnect(&self, con: &MqttConnection) {
        if self.gate.try_arm() {
            match con.client_handle() {
                Some(client) => {
                    spawn_reconnect(client, self.state.clone(), self.gate.clone());
                }
                None => self.gate.disarm(),
            }
        }
    }

    fn start_heartbeat(&mut self) {
        self.stop_heartbeat();

        let client = match self.con.as_ref().and_then(|c| c.client_handle()) {
            Some(client) => client,
            None => return,
        };
        let setting = Settings::get();
        let topic = topic_heartbeat(&setting.meta.application_name, &self.client_id);
        let run = Arc::new(AtomicBool::new(true));
        let run_flag = run.clone();
        let state = self.state.clone();

        thread::spawn(move || loop {
            thread::sleep(HEARTBEAT_INTERVAL);
            if !run_flag.load(Ordering::SeqCst) {
                break;
            }
            if client.is_connected() {
                let msg = paho_mqtt::Message::new(topic.as_str(), heartbeat_payload(), 1);
                if let Err(e) = client.publish(msg).wait() {
                    error!(LOG_TAG, "heartbeat publish error: {}", e);
                } else {
                    debug!(LOG_TAG, "heartbeat sent");
                }
            } else {
                // 定时器触发时通道不在打开状态，按失败拆除
                error!(LOG_TAG, "Heartbeat failed, closing connection");
                if let Err(e) = client.disconnect(None).wait() {
                    debug!(LOG_TAG, "teardown disconnect error: {}", e);
                }
                state.set(ChannelState::Disconnected);
                run_flag.store(false, Ordering::SeqCst);
                break;
            }
        });

        self.heartbeat_run = Some(run);
    }

    fn stop_heartbeat(&mut self) {
        if let Some(run) = self.heartbeat_run.take() {
            run.store(false, Ordering::SeqCst);
        }
    }
}

impl Drop for MqttChannel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// 重连任务：固定间隔反复尝试，成功或通道被主动断开才退出
fn spawn_reconnect(client: paho_mqtt::AsyncClient, state: StateCell, gate: Arc<ReconnectGate>) {
    thread::spawn(move || loop {
        thread::sleep(RECONNECT_INTERVAL);
        if !gate.is_armed() {
            // 通道已被主动断开，放弃重连
            break;
        }
        info!(LOG_TAG, "正在重连...");
        match client.reconnect().wait() {
            Ok(_) => {
                state.set(ChannelState::Connected);
                gate.disarm();
                info!(LOG_TAG, "mqtt重连成功");
                break;
            }
            Err(e) => {
                error!(
                    LOG_TAG,
                    "mqtt重连失败, {}ms 后重试: {}",
                    RECONNECT_INTERVAL.as_millis(),
                    e
                );
                state.set(ChannelState::Reconnecting);
            }
        }
    });
}

/// 通道地址：显式配置优先，否则按宿主传输安全性推导
pub fn resolve_endpoint(endpoint: &str, host: &str, port: u16, secure: bool) -> String {
    if !endpoint.is_empty() {
        return endpoint.to_string();
    }
    info!(LOG_TAG, "自动获取mqtt连接地址");
    if secure {
        format!("wss://{}/mqtt", host)
    } else {
        format!("ws://{}:{}/mqtt", host, port)
    }
}

fn make_client_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

fn publish_ack(topic: &str, label: &str) -> String {
    if is_shadow_topic(topic) {
        format!("[ {} ] 影子指令发送成功", label)
    } else {
        format!("[ {} ] 指令发送成功", label)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_endpoint_prefers_explicit_config() {
        let uri = resolve_endpoint("ws://broker:9001/mqtt", "ignored", 8083, false);
        assert_eq!(uri, "ws://broker:9001/mqtt");
    }

    #[test]
    fn test_endpoint_derivation_by_transport() {
        assert_eq!(
            resolve_endpoint("", "factory.local", 8083, false),
            "ws://factory.local:8083/mqtt"
        );
        assert_eq!(
            resolve_endpoint("", "factory.local", 8083, true),
            "wss://factory.local/mqtt"
        );
    }

    #[test]
    fn test_client_id_carries_prefix_and_is_unique() {
        let a = make_client_id("web");
        let b = make_client_id("web");
        assert!(a.starts_with("web-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_publish_ack_distinguishes_shadow_commands() {
        assert_eq!(publish_ack("cmd/dev1/set", "开阀"), "[ 开阀 ] 指令发送成功");
        assert_eq!(
            publish_ack("cmd/dev1/offline/set", "开阀"),
            "[ 开阀 ] 影子指令发送成功"
        );
    }

    #[test]
    fn test_operations_without_connection_resolve_with_status() {
        let store = Arc::new(LiveDataStore::new());
        let mut channel = MqttChannel::new(store);

        assert_eq!(channel.state(), ChannelState::Disconnected);
        assert_eq!(channel.subscribe(&["topic/a"]), "未连接");
        assert_eq!(channel.unsubscribe(&["topic/a"]), "未连接");
        // 未连接时 publish 以状态收尾而不是报错
        let ack = channel.publish("cmd/dev1/set", "{}", "开阀").unwrap();
        assert_eq!(ack, "Mqtt客户端未连接");
        // 断开是幂等的
        assert_eq!(channel.disconnect(), "未连接");
        assert_eq!(channel.disconnect(), "未连接");
    }

    #[test]
    fn test_reconnect_gate_suppresses_second_schedule() {
        // 模拟 error 事件：第一次占位调度，后续错误在尝试完成前都不再调度
        let gate = ReconnectGate::new();
        assert!(gate.try_arm());
        assert!(!gate.try_arm());

        // 尝试失败后闸仍占位（任务自己按固定间隔继续），直到成功才放开
        assert!(gate.is_armed());
        gate.disarm();
        assert!(gate.try_arm());
    }
}
