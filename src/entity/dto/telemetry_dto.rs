//! telemetry data transmission object
//! 通道上行的遥测消息，一次消息携带一台设备的最新采样

use std::error::Error;

use serde::{Deserialize, Serialize};

/// 遥测采样批次
/// serial_number 是批次与组件绑定之间的关联键
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySampleDto {
    // 设备序列号
    pub serial_number: String,
    // 采样条目
    pub message: Vec<TelemetryEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEntryDto {
    // 遥测点标识
    pub id: String,
    pub value: TelemetryValue,
}

/// 遥测值，数值或字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TelemetryValue {
    Number(f64),
    Text(String),
}

impl TelemetrySampleDto {
    pub fn from_json(json_str: &str) -> Result<Self, Box<dyn Error>> {
        let dto = serde_json::from_str(json_str)?;
        Ok(dto)
    }

    pub fn to_json(&self) -> Result<String, Box<dyn Error>> {
        let json_str = serde_json::to_string(self)?;
        Ok(json_str)
    }
}

impl TelemetrySampleDto {
    /// 按遥测点标识查找条目
    pub fn find_entry(&self, id: &str) -> Option<&TelemetryEntryDto> {
        self.message.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_telemetry_payload() {
        let raw = r#"{"serialNumber":"D8001","message":[{"id":"temp","value":36.5},{"id":"mode","value":"auto"}]}"#;
        let dto = TelemetrySampleDto::from_json(raw).unwrap();
        assert_eq!(dto.serial_number, "D8001");
        assert_eq!(dto.message.len(), 2);
        assert_eq!(dto.find_entry("temp").unwrap().value, TelemetryValue::Number(36.5));
        assert_eq!(dto.find_entry("mode").unwrap().value, TelemetryValue::Text("auto".to_string()));
        assert!(dto.find_entry("missing").is_none());
    }

    #[test]
    fn test_telemetry_round_trip() {
        let dto = TelemetrySampleDto {
            serial_number: "D8002".to_string(),
            message: vec![TelemetryEntryDto {
                id: "pressure".to_string(),
                value: TelemetryValue::Number(1.25),
            }],
        };
        let json_str = dto.to_json().unwrap();
        assert!(json_str.contains("serialNumber"));
        let parsed = TelemetrySampleDto::from_json(&json_str).unwrap();
        assert_eq!(parsed.serial_number, dto.serial_number);
    }
}
