use std::error::Error;
use std::sync::mpsc;
use std::sync::Arc;

use dotenv::dotenv;
use log;

use topo_view_engine_rs::common::logger::init_logger;
use topo_view_engine_rs::common::setting::Settings;
use topo_view_engine_rs::mqtt_channel::MqttChannel;
use topo_view_engine_rs::store::LiveDataStore;

fn main() -> Result<(), Box<dyn Error>> {
    // 检查 env 文件
    dotenv().ok();

    // 加载 config
    let settings = Settings::get();

    // 设置 logger
    init_logger()?;
    log::info!("配置已加载，环境: {:?}", settings.env.env);

    // 组装运行时服务：缓存先建，通道注入缓存
    let store = Arc::new(LiveDataStore::new());
    let mut channel = MqttChannel::new(store.clone());
    channel.connect()?;

    let topics: Vec<&str> = settings.mqtt.topics.iter().map(String::as_str).collect();
    if !topics.is_empty() {
        let ack = channel.subscribe(&topics);
        log::info!("订阅结果: {}", ack);
    }

    // Ctrl-C 时拆除通道再退出
    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })?;
    rx.recv()?;

    log::info!("正在关闭: {}", channel.disconnect());
    Ok(())
}
