pub mod fetch;
pub mod record;
pub mod render;
pub mod report;
pub mod resolve;
