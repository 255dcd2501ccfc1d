//! component descriptor objects
//! 场景中每个可视组件携带的声明式配置：数据绑定、动画参数、静态样式

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::telemetry_dto::TelemetryValue;

/// 比较运算符，标签为本地化文案
/// 未识别的标签落入 Unrecognized，行为与 不等于 一致
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Greater,
    GreaterEq,
    Less,
    LessEq,
    Equal,
    NotEqual,
    Unrecognized,
}

impl CompareOp {
    pub fn from_label(label: &str) -> Self {
        match label {
            "大于" => CompareOp::Greater,
            "大于等于" => CompareOp::GreaterEq,
            "小于" => CompareOp::Less,
            "小于等于" => CompareOp::LessEq,
            "等于" => CompareOp::Equal,
            "不等于" => CompareOp::NotEqual,
            _ => CompareOp::Unrecognized,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            CompareOp::Greater => "大于",
            CompareOp::GreaterEq => "大于等于",
            CompareOp::Less => "小于",
            CompareOp::LessEq => "小于等于",
            CompareOp::Equal => "等于",
            CompareOp::NotEqual => "不等于",
            CompareOp::Unrecognized => "未知",
        }
    }
}

impl Serialize for CompareOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_label())
    }
}

impl<'de> Deserialize<'de> for CompareOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(CompareOp::from_label(&label))
    }
}

/// 状态规则，按声明顺序求值，第一条命中的规则生效
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRuleDto {
    pub param_condition: CompareOp,
    pub param_data: TelemetryValue,
    pub fore_color: String,
}

/// 数据绑定描述
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBindDto {
    // 绑定的遥测点标识
    #[serde(default)]
    pub identifier: String,
    // 绑定的设备序列号
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub state_list: Vec<StateRuleDto>,
}

/// 旋转速度档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationSpeed {
    Fast,
    Medium,
    Slow,
}

impl RotationSpeed {
    pub fn from_label(label: &str) -> Self {
        match label {
            "快" => RotationSpeed::Fast,
            "慢" => RotationSpeed::Slow,
            // 中档与未知档位都按默认时长处理
            _ => RotationSpeed::Medium,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            RotationSpeed::Fast => "快",
            RotationSpeed::Medium => "中",
            RotationSpeed::Slow => "慢",
        }
    }

    /// 档位对应的动画时长
    pub fn duration_ms(&self) -> u64 {
        match self {
            RotationSpeed::Fast => 500,
            RotationSpeed::Medium => 1000,
            RotationSpeed::Slow => 1500,
        }
    }
}

impl Serialize for RotationSpeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_label())
    }
}

impl<'de> Deserialize<'de> for RotationSpeed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(RotationSpeed::from_label(&label))
    }
}

/// 位移方向，竖直以外的值一律按水平处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateDirection {
    Vertical,
    Horizontal,
}

impl TranslateDirection {
    pub fn from_label(label: &str) -> Self {
        match label {
            "竖直" => TranslateDirection::Vertical,
            _ => TranslateDirection::Horizontal,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            TranslateDirection::Vertical => "竖直",
            TranslateDirection::Horizontal => "水平",
        }
    }
}

impl Serialize for TranslateDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_label())
    }
}

impl<'de> Deserialize<'de> for TranslateDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(TranslateDirection::from_label(&label))
    }
}

/// 位移步骤，按声明顺序构成关键帧序列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateStepDto {
    pub direction: TranslateDirection,
    pub position: f64,
}

/// 动画描述
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataActionDto {
    #[serde(default)]
    pub rotation_enabled: bool,
    #[serde(default)]
    pub scale_enabled: bool,
    #[serde(default)]
    pub translation_enabled: bool,
    // 显式时长（秒），优先于档位
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub rotation_speed: Option<RotationSpeed>,
    #[serde(default)]
    pub translate_list: Vec<TranslateStepDto>,
}

/// 静态样式，动态绑定未命中时的回退色来源
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStyleDto {
    #[serde(default)]
    pub fore_color: Option<String>,
}

/// 场景组件描述
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetailDto {
    // 组件标识，同时是动画目标的定位键
    #[serde(default)]
    pub identifier: String,
    // 组件类型标签，注册表按它做精确匹配
    #[serde(rename = "type", default)]
    pub component_type: String,
    // 组件声明的能力集合
    #[serde(default)]
    pub component_show: Vec<String>,
    #[serde(default)]
    pub style: ComponentStyleDto,
    #[serde(default)]
    pub data_bind: Option<DataBindDto>,
    #[serde(default)]
    pub data_action: Option<DataActionDto>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_compare_op_labels() {
        assert_eq!(CompareOp::from_label("大于"), CompareOp::Greater);
        assert_eq!(CompareOp::from_label("不等于"), CompareOp::NotEqual);
        assert_eq!(CompareOp::from_label("约等于"), CompareOp::Unrecognized);
        assert_eq!(CompareOp::Greater.as_label(), "大于");
    }

    #[test]
    fn test_rotation_speed_labels() {
        assert_eq!(RotationSpeed::from_label("快").duration_ms(), 500);
        assert_eq!(RotationSpeed::from_label("中").duration_ms(), 1000);
        assert_eq!(RotationSpeed::from_label("慢").duration_ms(), 1500);
        // 未知档位按中档处理
        assert_eq!(RotationSpeed::from_label("极快").duration_ms(), 1000);
    }

    #[test]
    fn test_parse_component_detail() {
        let raw = r##"{
            "identifier": "pump-01",
            "type": "circular",
            "componentShow": ["动画"],
            "style": { "foreColor": "#ff0000ff" },
            "dataBind": {
                "identifier": "temp",
                "serialNumber": "D8001",
                "stateList": [
                    { "paramCondition": "大于", "paramData": 50, "foreColor": "#ff0000ff" }
                ]
            },
            "dataAction": {
                "rotationEnabled": true,
                "rotationSpeed": "快",
                "translateList": [ { "direction": "竖直", "position": 20 } ]
            }
        }"##;
        let detail: ComponentDetailDto = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.component_type, "circular");
        let bind = detail.data_bind.unwrap();
        assert_eq!(bind.state_list[0].param_condition, CompareOp::Greater);
        let action = detail.data_action.unwrap();
        assert!(action.rotation_enabled);
        assert!(!action.scale_enabled);
        assert_eq!(action.rotation_speed, Some(RotationSpeed::Fast));
        assert_eq!(action.translate_list[0].direction, TranslateDirection::Vertical);
    }
}
