//! 比较运算符求值
//! 遥测值与规则阈值只做同类型比较，数值对数值、文本对文本，混合类型视为不相等

use std::cmp::Ordering;

use crate::entity::dto::component_dto::CompareOp;
use crate::entity::dto::telemetry_dto::TelemetryValue;

/// 判断两个值大小
/// 未识别的运算符走 不等于 分支
pub fn compare(op: CompareOp, left: &TelemetryValue, right: &TelemetryValue) -> bool {
    let ord = value_ordering(left, right);
    let eq = values_equal(left, right);
    match op {
        CompareOp::Greater => matches!(ord, Some(Ordering::Greater)),
        CompareOp::GreaterEq => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
        CompareOp::Less => matches!(ord, Some(Ordering::Less)),
        CompareOp::LessEq => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
        CompareOp::Equal => eq,
        CompareOp::NotEqual | CompareOp::Unrecognized => !eq,
    }
}

fn value_ordering(left: &TelemetryValue, right: &TelemetryValue) -> Option<Ordering> {
    match (left, right) {
        (TelemetryValue::Number(a), TelemetryValue::Number(b)) => a.partial_cmp(b),
        (TelemetryValue::Text(a), TelemetryValue::Text(b)) => Some(a.cmp(b)),
        // 混合类型不可排序
        _ => None,
    }
}

fn values_equal(left: &TelemetryValue, right: &TelemetryValue) -> bool {
    match (left, right) {
        (TelemetryValue::Number(a), TelemetryValue::Number(b)) => a == b,
        (TelemetryValue::Text(a), TelemetryValue::Text(b)) => a == b,
        _ => false,
    }
}
