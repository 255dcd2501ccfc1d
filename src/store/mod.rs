pub mod live_data_store;

pub use live_data_store::LiveDataStore;
