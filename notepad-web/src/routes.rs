mod api_v1;
mod index;

pub use api_v1::config as api_v1_config;
pub use api_v1::unknown_operation;
pub use index::config as index_config;
