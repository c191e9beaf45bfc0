pub mod create;
pub mod query;
pub mod sample;
pub mod upload;
