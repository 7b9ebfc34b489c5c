pub mod client;
pub mod common;
pub mod pool;

#[cfg(test)]
pub(crate) mod tests;

pub type Error = crate::common::error::PoolqError;
pub type Result<T> = std::result::Result<T, Error>;

pub const POOLQ_VERSION: &str = {
    match option_env!("POOLQ_BUILD_VERSION") {
        Some(version) => version,
        None => const_format::concatcp!(env!("CARGO_PKG_VERSION"), "-dev"),
    }
};
