pub mod telemetry_dto;
pub mod component_dto;
