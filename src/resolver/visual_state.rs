//! 根据实时数据计算组件应显示的前景色
//! 纯读取：只看一次缓存快照，不改任何共享状态，可以在每个渲染帧上廉价调用

use crate::entity::dto::component_dto::ComponentDetailDto;
use crate::evaluator::compare;
use crate::store::LiveDataStore;

use super::color::normalize_color;

/// 全部回退失败后的默认中性色
pub const DEFAULT_FORE_COLOR: &str = "grey";

/// 解析组件前景色
/// 回退链：绑定命中的规则色 → 静态样式色 → 默认色，最后做十六进制归一化
pub fn resolve_fore_color(detail: &ComponentDetailDto, store: &LiveDataStore) -> String {
    let resolved = color_from_telemetry(detail, store)
        .or_else(|| static_color(detail))
        .unwrap_or_else(|| DEFAULT_FORE_COLOR.to_string());
    normalize_color(&resolved)
}

/// 按绑定规则从最新遥测批次取色
/// 批次序列号与绑定不一致时视为无数据
fn color_from_telemetry(detail: &ComponentDetailDto, store: &LiveDataStore) -> Option<String> {
    let bind = detail.data_bind.as_ref()?;
    if bind.identifier.is_empty() {
        return None;
    }

    let batch = store.snapshot()?;
    if batch.serial_number != bind.serial_number {
        return None;
    }

    let entry = batch.find_entry(&bind.identifier)?;

    // 优先级列表：第一条命中的规则生效，而不是最优匹配
    bind.state_list
        .iter()
        .find(|rule| compare(rule.param_condition, &entry.value, &rule.param_data))
        .map(|rule| rule.fore_color.clone())
        .filter(|color| !color.is_empty())
}

fn static_color(detail: &ComponentDetailDto) -> Option<String> {
    detail
        .style
        .fore_color
        .clone()
        .filter(|color| !color.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::dto::component_dto::{
        CompareOp, ComponentStyleDto, DataBindDto, StateRuleDto,
    };
    use crate::entity::dto::telemetry_dto::{
        TelemetryEntryDto, TelemetrySampleDto, TelemetryValue,
    };

    fn rule(op: CompareOp, threshold: f64, color: &str) -> StateRuleDto {
        StateRuleDto {
            param_condition: op,
            param_data: TelemetryValue::Number(threshold),
            fore_color: color.to_string(),
        }
    }

    fn detail_with_rules(rules: Vec<StateRuleDto>) -> ComponentDetailDto {
        ComponentDetailDto {
            identifier: "comp-1".to_string(),
            style: ComponentStyleDto {
                fore_color: Some("#112233".to_string()),
            },
            data_bind: Some(DataBindDto {
                identifier: "temp".to_string(),
                serial_number: "D8001".to_string(),
                state_list: rules,
            }),
            ..Default::default()
        }
    }

    fn store_with(serial: &str, id: &str, value: f64) -> LiveDataStore {
        let store = LiveDataStore::new();
        store.set_batch(TelemetrySampleDto {
            serial_number: serial.to_string(),
            message: vec![TelemetryEntryDto {
                id: id.to_string(),
                value: TelemetryValue::Number(value),
            }],
        });
        store
    }

    #[test]
    fn test_first_matching_rule_wins_over_later_matches() {
        let detail = detail_with_rules(vec![
            rule(CompareOp::Greater, 50.0, "red"),
            // 后面这条同样命中，但不应生效
            rule(CompareOp::Greater, 10.0, "orange"),
        ]);
        let store = store_with("D8001", "temp", 80.0);
        assert_eq!(resolve_fore_color(&detail, &store), "red");
    }

    #[test]
    fn test_serial_mismatch_falls_back_to_static() {
        let detail = detail_with_rules(vec![rule(CompareOp::Greater, 0.0, "red")]);
        let store = store_with("OTHER", "temp", 80.0);
        assert_eq!(resolve_fore_color(&detail, &store), "#112233");
    }

    #[test]
    fn test_missing_entry_falls_back_to_static() {
        let detail = detail_with_rules(vec![rule(CompareOp::Greater, 0.0, "red")]);
        let store = store_with("D8001", "pressure", 80.0);
        assert_eq!(resolve_fore_color(&detail, &store), "#112233");
    }

    #[test]
    fn test_no_rule_match_falls_back_to_static() {
        let detail = detail_with_rules(vec![rule(CompareOp::Greater, 100.0, "red")]);
        let store = store_with("D8001", "temp", 80.0);
        assert_eq!(resolve_fore_color(&detail, &store), "#112233");
    }

    #[test]
    fn test_default_color_when_everything_absent() {
        let detail = ComponentDetailDto::default();
        let store = LiveDataStore::new();
        assert_eq!(resolve_fore_color(&detail, &store), DEFAULT_FORE_COLOR);
    }

    #[test]
    fn test_matched_rule_with_empty_color_falls_back_to_static() {
        let detail = detail_with_rules(vec![rule(CompareOp::Greater, 0.0, "")]);
        let store = store_with("D8001", "temp", 80.0);
        assert_eq!(resolve_fore_color(&detail, &store), "#112233");
    }

    #[test]
    fn test_hex_with_alpha_is_converted_to_rgba() {
        let detail = detail_with_rules(vec![rule(CompareOp::Greater, 0.0, "#ff0000ff")]);
        let store = store_with("D8001", "temp", 80.0);
        assert_eq!(resolve_fore_color(&detail, &store), "rgba(255,0,0,1)");
    }

    #[test]
    fn test_resolution_does_not_mutate_store() {
        let detail = detail_with_rules(vec![rule(CompareOp::Greater, 0.0, "red")]);
        let store = store_with("D8001", "temp", 80.0);
        let before = store.snapshot().unwrap().to_json().unwrap();
        let _ = resolve_fore_color(&detail, &store);
        let _ = resolve_fore_color(&detail, &store);
        let after = store.snapshot().unwrap().to_json().unwrap();
        assert_eq!(before, after);
    }
}
