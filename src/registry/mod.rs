pub mod component_registry;

pub use component_registry::{parse_view_name, ComponentRegistry, RendererLoader, RendererModule};
