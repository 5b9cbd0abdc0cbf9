//! Connection settings for the broker and the schema registry.

use rdkafka::ClientConfig;
use std::fmt;

/// Default topic when none is configured.
pub const DEFAULT_TOPIC: &str = "orders_topic";

/// Broker connection and topic.
#[derive(Clone)]
pub struct KafkaSettings {
    pub bootstrap_servers: String,
    pub api_key: String,
    pub api_secret: String,
    pub topic: String,
}

impl KafkaSettings {
    /// Producer client configuration: SASL/PLAIN over TLS plus buffering knobs.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.bootstrap_servers)
            .set("security.protocol", "SASL_SSL")
            .set("sasl.mechanisms", "PLAIN")
            .set("sasl.username", &self.api_key)
            .set("sasl.password", &self.api_secret)
            .set("message.timeout.ms", "30000")
            .set("queue.buffering.max.messages", "100000")
            .set("queue.buffering.max.kbytes", "1048576")
            .set("linger.ms", "5");
        config
    }
}

impl fmt::Debug for KafkaSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KafkaSettings")
            .field("bootstrap_servers", &self.bootstrap_servers)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .field("topic", &self.topic)
            .finish()
    }
}

/// Schema registry endpoint and basic-auth credentials.
#[derive(Clone)]
pub struct RegistrySettings {
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for RegistrySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySettings")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kafka_settings() -> KafkaSettings {
        KafkaSettings {
            bootstrap_servers: "broker-1:9092".to_string(),
            api_key: "key".to_string(),
            api_secret: "s3cret".to_string(),
            topic: DEFAULT_TOPIC.to_string(),
        }
    }

    #[test]
    fn test_client_config_uses_sasl_ssl() {
        let config = kafka_settings().client_config();

        assert_eq!(config.get("bootstrap.servers"), Some("broker-1:9092"));
        assert_eq!(config.get("security.protocol"), Some("SASL_SSL"));
        assert_eq!(config.get("sasl.mechanisms"), Some("PLAIN"));
        assert_eq!(config.get("sasl.username"), Some("key"));
        assert_eq!(config.get("sasl.password"), Some("s3cret"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let kafka = format!("{:?}", kafka_settings());
        assert!(!kafka.contains("s3cret"));

        let registry = format!(
            "{:?}",
            RegistrySettings {
                url: "https://registry".to_string(),
                api_key: "sr-key".to_string(),
                api_secret: "sr-s3cret".to_string(),
            }
        );
        assert!(!registry.contains("sr-s3cret"));
        assert!(registry.contains("https://registry"));
    }
}
