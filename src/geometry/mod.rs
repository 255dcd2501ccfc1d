
pub use hit_test::point_in_polygon;
