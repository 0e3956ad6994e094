pub mod environment;
pub mod paths;

pub use environment::{INDEX_ENV_VAR, index_file_path};
pub use paths::{file_url_to_path, path_to_file_url, search_key};
