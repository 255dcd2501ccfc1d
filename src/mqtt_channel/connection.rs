//! MQTT 服务连接器
//! paho 客户端的薄封装，通道层不直接接触 paho 类型
//! 先 create_client 再挂回调再 connect，保证重连成功后回调已经就位

use std::time::Duration;

use paho_mqtt;

use crate::{error, info};

const LOG_TAG: &str = "mqtt_connection";

/// 订阅与发布统一走 QoS 1
const QOS: i32 = 1;

pub struct MqttConnection {
    /// 远程服务器地址，ws:// 或 wss:// 形式
    uri: String,

    // client_id
    client_id: String,

    /// 连接客户端对象
    client: Option<paho_mqtt::AsyncClient>,
}

impl MqttConnection {
    pub fn new(uri: &str, client_id: &str) -> Self {
        MqttConnection {
            uri: uri.to_string(),
            client_id: client_id.to_string(),
            client: None,
        }
    }

    /// 创建客户端对象，连接前先调用
    pub fn create_client(&mut self) -> Result<(), paho_mqtt::Error> {
        let create_opts = paho_mqtt::CreateOptionsBuilder::new()
            .server_uri(self.uri.as_str())
            .client_id(self.client_id.as_str())
            .finalize();

        let client = paho_mqtt::AsyncClient::new(create_opts)?;
        self.client = Some(client);
        Ok(())
    }

    /// 建立连接
    /// 失败时客户端对象保留，重连任务可以拿着句柄按原参数继续尝试
    pub fn connect(&mut self, username: &str, password: &str) -> Result<(), paho_mqtt::Error> {
        let client = match &self.client {
            Some(client) => client,
            None => return Err(paho_mqtt::Error::General("mqtt connect failed, client not created")),
        };

        let mut builder = paho_mqtt::ConnectOptionsBuilder::new();
        builder
            .keep_alive_interval(Duration::from_secs(30))
            .clean_session(true)
            .connect_timeout(Duration::from_secs(60));
        if !username.is_empty() {
            builder.user_name(username).password(password);
        }
        let conn_opts = builder.finalize();

        if let Err(e) = client.connect(conn_opts).wait() {
            error!(LOG_TAG, "cannot connect to mqtt server: {:?}", e);
            return Err(e);
        }

        info!(LOG_TAG, "mqtt connected, uri: {}", self.uri);
        Ok(())
    }

    /// 注册消息回调，客户端未创建时是空操作
    pub fn set_message_callback(
        &self,
        callback: impl FnMut(&paho_mqtt::AsyncClient, Option<paho_mqtt::Message>) + Send + 'static,
    ) {
        if let Some(client) = &self.client {
            client.set_message_callback(callback);
        }
    }

    /// 注册连接断开回调，客户端未创建时是空操作
    pub fn set_connection_lost_callback(
        &self,
        callback: impl FnMut(&paho_mqtt::AsyncClient) + Send + 'static,
    ) {
        if let Some(client) = &self.client {
            client.set_connection_lost_callback(callback);
        }
    }

    pub fn subscribe(&self, topic: &str) -> Result<(), paho_mqtt::Error> {
        match &self.client {
            Some(client) => {
                client.subscribe(topic, QOS).wait()?;
                Ok(())
            }
            None => Err(paho_mqtt::Error::General("mqtt subscribe failed, no connection")),
        }
    }

    pub fn unsubscribe(&self, topic: &str) -> Result<(), paho_mqtt::Error> {
        match &self.client {
            Some(client) => {
                client.unsubscribe(topic).wait()?;
                Ok(())
            }
            None => Err(paho_mqtt::Error::General("mqtt unsubscribe failed, no connection")),
        }
    }

    pub fn publish(&self, topic: &str, payload: &str) -> Result<(), paho_mqtt::Error> {
        match &self.client {
            Some(client) => {
                let msg = paho_mqtt::Message::new(topic, payload, QOS);
                client.publish(msg).wait()?;
                Ok(())
            }
            None => Err(paho_mqtt::Error::General("mqtt publish failed, no connection")),
        }
    }

    /// 断开连接并丢弃客户端对象
    pub fn disconnect(mut self) {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.disconnect(None).wait() {
                // 已经掉线时断开会报错，按诊断信息处理
                error!(LOG_TAG, "mqtt disconnect error: {:?}", e);
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        match &self.client {
            Some(client) => client.is_connected(),
            None => false,
        }
    }

    /// 给定时器线程用的客户端句柄
    pub fn client_handle(&self) -> Option<paho_mqtt::AsyncClient> {
        self.client.clone()
    }
}
