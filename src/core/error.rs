use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BenchError {
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Dataset error: {0}")]
    DatasetError(String),
    #[error("Backend error: {0}")]
    BackendError(String),
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::IoError(err.to_string())
    }
}

impl From<redis::RedisError> for BenchError {
    fn from(err: redis::RedisError) -> Self {
        BenchError::BackendError(err.to_string())
    }
}

impl From<memcache::MemcacheError> for BenchError {
    fn from(err: memcache::MemcacheError) -> Self {
        BenchError::BackendError(err.to_string())
    }
}
