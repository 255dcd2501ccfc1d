//! 上行消息监听
//! 从通道收到遥测消息后解析并写入实时数据缓存，解析失败只记日志不向外抛

use paho_mqtt::Message;

use crate::common::error::RuntimeError;
use crate::debug;
use crate::store::LiveDataStore;

use super::protocol::parse_telemetry_payload;

const LOG_TAG: &str = "message_listener";

/// 处理一条上行消息
/// 缓存整体替换，上一台设备的数据不会残留
pub fn on_message(msg: &Message, store: &LiveDataStore) -> Result<(), RuntimeError> {
    let payload = msg.payload_str();
    let batch = parse_telemetry_payload(&payload)?;

    debug!(
        LOG_TAG,
        "telemetry received, topic: {}, serialNumber: {}",
        msg.topic(),
        batch.serial_number
    );

    store.set_batch(batch);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_telemetry_message_lands_in_store() {
        let store = LiveDataStore::new();
        let msg = Message::new(
            "telemetry/D8001",
            r#"{"serialNumber":"D8001","message":[{"id":"temp","value":21.5}]}"#,
            1,
        );
        on_message(&msg, &store).unwrap();

        let batch = store.snapshot().unwrap();
        assert_eq!(batch.serial_number, "D8001");
        assert!(batch.find_entry("temp").is_some());
    }

    #[test]
    fn test_malformed_payload_is_rejected_and_store_untouched() {
        let store = LiveDataStore::new();
        let msg = Message::new("telemetry/D8001", "garbage", 1);
        assert!(on_message(&msg, &store).is_err());
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_batches_replace_wholesale() {
        let store = LiveDataStore::new();
        let first = Message::new(
            "telemetry/D8001",
            r#"{"serialNumber":"D8001","message":[{"id":"temp","value":21.5}]}"#,
            1,
        );
        let second = Message::new(
            "telemetry/D8002",
            r#"{"serialNumber":"D8002","message":[{"id":"speed","value":10}]}"#,
            1,
        );
        on_message(&first, &store).unwrap();
        on_message(&second, &store).unwrap();

        let batch = store.snapshot().unwrap();
        assert_eq!(batch.serial_number, "D8002");
        assert!(batch.find_entry("temp").is_none());
    }
}
