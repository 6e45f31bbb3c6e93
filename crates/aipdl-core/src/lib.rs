pub mod config;
pub mod logging;

pub mod batch;
pub mod checksum;
pub mod control;
pub mod fetch;
pub mod freshness;
pub mod index_page;
pub mod merge;
pub mod model;
pub mod orchestrator;
pub mod pool;
pub mod progress;
pub mod retry;
pub mod source;
pub mod storage;
pub mod summary;
pub mod tracker;
pub mod url_model;
