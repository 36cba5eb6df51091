// crates/spark-cli/src/services/mod.rs - Service layer modules
pub mod pager;

pub use pager::PagerService;
