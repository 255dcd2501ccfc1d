//! 场景组件注册表
//! - type 标签到渲染器加载器的映射，精确匹配，不做继承式回退
//! - 渲染器本身是可替换的叶子，运行时只负责查找

use std::collections::HashMap;

use crate::warn;

const LOG_TAG: &str = "component_registry";

/// 渲染器模块由外部协作方实现，注册表只认这个最小接口
pub trait RendererModule: Send {
    /// 视图名称，例如 "view-rect"
    fn view_name(&self) -> &'static str;
}

/// 延迟加载渲染器的入口
pub type RendererLoader = fn() -> Box<dyn RendererModule>;

/// 注册一般发生在启动阶段，之后条目不再变化
/// 重复注册静默后写覆盖，但会打一条告警便于排查两个扩展源抢同一个标签
pub struct ComponentRegistry {
    entries: HashMap<String, RendererLoader>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        ComponentRegistry {
            entries: HashMap::new(),
        }
    }

    pub fn register(&mut self, type_tag: &str, loader: RendererLoader) {
        if self.entries.contains_key(type_tag) {
            warn!(LOG_TAG, "重复注册组件类型: {}，后写覆盖先写", type_tag);
        }
        self.entries.insert(type_tag.to_string(), loader);
    }

    /// 精确匹配查找，未注册的标签返回 None，由调用方自行兜底
    pub fn resolve(&self, type_tag: &str) -> Option<RendererLoader> {
        self.entries.get(type_tag).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// 如果需要手动映射 type 和视图的关系，在这里配置
// 没配置的类型按 view-{type} 自动匹配
pub fn parse_view_name(component_type: &str) -> String {
    let mapped = match component_type {
        "triangle" => Some("view-triangle"),
        "rect" => Some("view-rect"),
        "circular" => Some("view-circular"),
        "line" => Some("view-line"),
        "line-arrow" => Some("view-line-arrow"),
        "chart-line" => Some("view-chart"),
        "chart-line-step" => Some("view-chart"),
        "chart-bar" => Some("view-chart"),
        "chart-pie" => Some("view-chart-pie"),
        "chart-gauge" => Some("view-chart-gauge"),
        "chart-water" => Some("view-chart-water"),
        "dashed" => Some("view-dashed"),
        "map" => Some("view-map"),
        _ => None,
    };
    match mapped {
        Some(name) => name.to_string(),
        None => format!("view-{}", component_type),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct DummyRenderer(&'static str);

    impl RendererModule for DummyRenderer {
        fn view_name(&self) -> &'static str {
            self.0
        }
    }

    fn load_rect() -> Box<dyn RendererModule> {
        Box::new(DummyRenderer("view-rect"))
    }

    fn load_rect_override() -> Box<dyn RendererModule> {
        Box::new(DummyRenderer("view-rect-v2"))
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ComponentRegistry::new();
        registry.register("rect", load_rect);

        let loader = registry.resolve("rect").unwrap();
        assert_eq!(loader().view_name(), "view-rect");
        assert!(registry.resolve("unknown").is_none());
    }

    #[test]
    fn test_duplicate_registration_last_write_wins() {
        let mut registry = ComponentRegistry::new();
        registry.register("rect", load_rect);
        registry.register("rect", load_rect_override);

        assert_eq!(registry.len(), 1);
        let loader = registry.resolve("rect").unwrap();
        assert_eq!(loader().view_name(), "view-rect-v2");
    }

    #[test]
    fn test_parse_view_name_manual_map() {
        assert_eq!(parse_view_name("chart-bar"), "view-chart");
        assert_eq!(parse_view_name("chart-line-step"), "view-chart");
        assert_eq!(parse_view_name("triangle"), "view-triangle");
    }

    #[test]
    fn test_parse_view_name_auto_fallback() {
        assert_eq!(parse_view_name("weather"), "view-weather");
        assert_eq!(parse_view_name("flow-bar"), "view-flow-bar");
    }
}
