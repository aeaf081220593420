use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RedisConfig {
    #[serde(default = "RedisConfig::default_host")]
    pub host: String,
    #[serde(default = "RedisConfig::default_port")]
    pub port: u16,
}

impl RedisConfig {
    fn default_host() -> String {
        String::from("localhost")
    }

    fn default_port() -> u16 {
        6379
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MemcachedConfig {
    #[serde(default = "MemcachedConfig::default_host")]
    pub host: String,
    #[serde(default = "MemcachedConfig::default_port")]
    pub port: u16,
}

impl MemcachedConfig {
    fn default_host() -> String {
        String::from("localhost")
    }

    fn default_port() -> u16 {
        11211
    }
}

impl Default for MemcachedConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_defaults() {
        let redis = RedisConfig::default();
        assert_eq!(redis.host, "localhost");
        assert_eq!(redis.port, 6379);

        let memcached = MemcachedConfig::default();
        assert_eq!(memcached.host, "localhost");
        assert_eq!(memcached.port, 11211);
    }
}
