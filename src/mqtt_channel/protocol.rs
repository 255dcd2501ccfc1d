//! 通道协议约定
//! 主题命名、心跳帧、遥测载荷解析集中在这里

use crate::common::error::{RuntimeError, RuntimeErrorCode};
use crate::entity::dto::telemetry_dto::TelemetrySampleDto;

/// 影子指令约定：主题名中段出现 offline 的是影子（离线排队）指令
/// 注意是严格大于 0 的位置，以 offline 开头的主题不算
pub fn is_shadow_topic(topic: &str) -> bool {
    match topic.find("offline") {
        Some(position) => position > 0,
        None => false,
    }
}

/// 心跳主题
pub fn topic_heartbeat(application_name: &str, client_id: &str) -> String {
    format!("status/{}/{}", application_name, client_id)
}

/// 心跳帧载荷
pub fn heartbeat_payload() -> String {
    serde_json::json!({ "type": "heartbeat" }).to_string()
}

/// 遥测载荷是原始字符串 JSON，解析失败归为载荷错误
pub fn parse_telemetry_payload(payload: &str) -> Result<TelemetrySampleDto, RuntimeError> {
    TelemetrySampleDto::from_json(payload).map_err(|e| RuntimeError {
        code: RuntimeErrorCode::PayloadError,
        msg: format!("parse telemetry payload error: {e}"),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shadow_topic_convention() {
        assert!(is_shadow_topic("cmd/device/offline/set"));
        assert!(is_shadow_topic("device-offline"));
        assert!(!is_shadow_topic("cmd/device/set"));
        // 位置必须严格大于 0
        assert!(!is_shadow_topic("offline/device/set"));
    }

    #[test]
    fn test_heartbeat_frame() {
        assert_eq!(topic_heartbeat("topo-view", "web-abc"), "status/topo-view/web-abc");
        let payload = heartbeat_payload();
        assert!(payload.contains("heartbeat"));
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["type"], "heartbeat");
    }

    #[test]
    fn test_parse_telemetry_payload() {
        let raw = r#"{"serialNumber":"D9","message":[{"id":"a","value":1}]}"#;
        let dto = parse_telemetry_payload(raw).unwrap();
        assert_eq!(dto.serial_number, "D9");

        let err = parse_telemetry_payload("not json").unwrap_err();
        assert_eq!(err.code, crate::common::error::RuntimeErrorCode::PayloadError);
    }
}
