pub mod backend;
pub mod bench;
pub mod conf;
pub mod core;
pub mod dataset;
pub mod record;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
