//! Load generator configuration.
//!
//! Every setting is a CLI flag backed by an environment variable. The six
//! connection settings are required but parsed as optional, so that all of
//! the missing ones can be reported together before anything connects.

use clap::Args;
use order_generator::{OrderGenerator, DEFAULT_PRIVILEGED_RATIO};
use order_producer::{KafkaSettings, RegistrySettings};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const BOOTSTRAP_SERVERS: &str = "BOOTSTRAP_SERVERS";
pub const SCHEMA_REGISTRY_URL: &str = "SCHEMA_REGISTRY_URL";
pub const KAFKA_API_KEY: &str = "KAFKA_API_KEY";
pub const KAFKA_API_SECRET: &str = "KAFKA_API_SECRET";
pub const SR_API_KEY: &str = "SR_API_KEY";
pub const SR_API_SECRET: &str = "SR_API_SECRET";

/// Required environment variables, in reporting order.
pub const REQUIRED_VARS: [&str; 6] = [
    BOOTSTRAP_SERVERS,
    SCHEMA_REGISTRY_URL,
    KAFKA_API_KEY,
    KAFKA_API_SECRET,
    SR_API_KEY,
    SR_API_SECRET,
];

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Broker and schema registry connection arguments.
#[derive(Args, Clone, Default)]
pub struct ConnectionArgs {
    /// Kafka bootstrap servers
    #[arg(long, env = "BOOTSTRAP_SERVERS")]
    pub bootstrap_servers: Option<String>,

    /// Schema registry URL
    #[arg(long, env = "SCHEMA_REGISTRY_URL")]
    pub schema_registry_url: Option<String>,

    /// Kafka API key (SASL username)
    #[arg(long, env = "KAFKA_API_KEY")]
    pub kafka_api_key: Option<String>,

    /// Kafka API secret (SASL password)
    #[arg(long, env = "KAFKA_API_SECRET", hide_env_values = true)]
    pub kafka_api_secret: Option<String>,

    /// Schema registry API key
    #[arg(long, env = "SR_API_KEY")]
    pub sr_api_key: Option<String>,

    /// Schema registry API secret
    #[arg(long, env = "SR_API_SECRET", hide_env_values = true)]
    pub sr_api_secret: Option<String>,
}

/// Arguments of the load generator.
#[derive(Args, Clone)]
pub struct LoadgenArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Topic to publish to
    #[arg(long, env = "KAFKA_TOPIC", default_value = "orders_topic")]
    pub topic: String,

    /// Target mean publish rate in messages per minute
    #[arg(long, env = "TARGET_MESSAGES_PER_MINUTE", default_value = "20000")]
    pub target_messages_per_minute: u32,

    /// Avro value schema file
    #[arg(long, env = "VALUE_SCHEMA_PATH", default_value = "source_topic_value.avsc")]
    pub value_schema: PathBuf,

    /// Share of records carrying the privileged filter constants (0.0 - 1.0)
    #[arg(long, env = "PRIVILEGED_RATIO", default_value_t = DEFAULT_PRIVILEGED_RATIO)]
    pub privileged_ratio: f64,

    /// Random seed; omit for a different stream on every run
    #[arg(long, env = "LOADGEN_SEED")]
    pub seed: Option<u64>,

    /// Seconds to wait for buffered messages on shutdown
    #[arg(long, env = "FLUSH_TIMEOUT_SECS", default_value = "10")]
    pub flush_timeout_secs: u64,

    /// Throughput reporting window in seconds
    #[arg(long, env = "REPORT_WINDOW_SECS", default_value = "60")]
    pub report_window_secs: u64,
}

/// Validated, immutable configuration handed to the producer loop.
#[derive(Debug, Clone)]
pub struct LoadgenConfig {
    pub kafka: KafkaSettings,
    pub registry: RegistrySettings,
    pub target_messages_per_minute: NonZeroU32,
    pub value_schema_path: PathBuf,
    pub privileged_ratio: f64,
    pub seed: Option<u64>,
    pub flush_timeout: Duration,
    pub report_window: Duration,
}

impl LoadgenConfig {
    /// Record generator configured with this seed and privileged ratio.
    pub fn generator(&self) -> OrderGenerator {
        let generator = match self.seed {
            Some(seed) => OrderGenerator::new(seed),
            None => OrderGenerator::from_entropy(),
        };
        generator.with_privileged_ratio(self.privileged_ratio)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn positive_secs(name: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

impl LoadgenArgs {
    /// Validate the arguments into a [`LoadgenConfig`].
    pub fn resolve(self) -> Result<LoadgenConfig, ConfigError> {
        let connection = self.connection;
        let values = [
            present(connection.bootstrap_servers),
            present(connection.schema_registry_url),
            present(connection.kafka_api_key),
            present(connection.kafka_api_secret),
            present(connection.sr_api_key),
            present(connection.sr_api_secret),
        ];

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        let [
            Some(bootstrap_servers),
            Some(registry_url),
            Some(kafka_api_key),
            Some(kafka_api_secret),
            Some(sr_api_key),
            Some(sr_api_secret),
        ] = values
        else {
            return Err(ConfigError::Missing(missing));
        };

        let target_messages_per_minute =
            NonZeroU32::new(self.target_messages_per_minute).ok_or_else(|| {
                ConfigError::Invalid {
                    name: "TARGET_MESSAGES_PER_MINUTE",
                    reason: "must be greater than zero".to_string(),
                }
            })?;

        if !(0.0..=1.0).contains(&self.privileged_ratio) {
            return Err(ConfigError::Invalid {
                name: "PRIVILEGED_RATIO",
                reason: format!("{} is outside 0.0..=1.0", self.privileged_ratio),
            });
        }

        Ok(LoadgenConfig {
            kafka: KafkaSettings {
                bootstrap_servers,
                api_key: kafka_api_key,
                api_secret: kafka_api_secret,
                topic: self.topic,
            },
            registry: RegistrySettings {
                url: registry_url,
                api_key: sr_api_key,
                api_secret: sr_api_secret,
            },
            target_messages_per_minute,
            value_schema_path: self.value_schema,
            privileged_ratio: self.privileged_ratio,
            seed: self.seed,
            flush_timeout: positive_secs("FLUSH_TIMEOUT_SECS", self.flush_timeout_secs)?,
            report_window: positive_secs("REPORT_WINDOW_SECS", self.report_window_secs)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_producer::DEFAULT_TOPIC;

    fn args(connection: ConnectionArgs) -> LoadgenArgs {
        LoadgenArgs {
            connection,
            topic: DEFAULT_TOPIC.to_string(),
            target_messages_per_minute: 20_000,
            value_schema: PathBuf::from("source_topic_value.avsc"),
            privileged_ratio: DEFAULT_PRIVILEGED_RATIO,
            seed: None,
            flush_timeout_secs: 10,
            report_window_secs: 60,
        }
    }

    fn full_connection() -> ConnectionArgs {
        ConnectionArgs {
            bootstrap_servers: Some("broker:9092".to_string()),
            schema_registry_url: Some("https://registry".to_string()),
            kafka_api_key: Some("key".to_string()),
            kafka_api_secret: Some("secret".to_string()),
            sr_api_key: Some("sr-key".to_string()),
            sr_api_secret: Some("sr-secret".to_string()),
        }
    }

    #[test]
    fn test_all_required_missing() {
        let err = args(ConnectionArgs::default()).resolve().unwrap_err();

        assert_eq!(err, ConfigError::Missing(REQUIRED_VARS.to_vec()));
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: BOOTSTRAP_SERVERS, SCHEMA_REGISTRY_URL, \
             KAFKA_API_KEY, KAFKA_API_SECRET, SR_API_KEY, SR_API_SECRET"
        );
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let mut connection = full_connection();
        connection.kafka_api_secret = Some(String::new());
        connection.sr_api_key = Some("   ".to_string());

        let err = args(connection).resolve().unwrap_err();

        assert_eq!(err, ConfigError::Missing(vec![KAFKA_API_SECRET, SR_API_KEY]));
    }

    #[test]
    fn test_resolve_defaults() {
        let config = args(full_connection()).resolve().unwrap();

        assert_eq!(config.kafka.topic, "orders_topic");
        assert_eq!(config.kafka.bootstrap_servers, "broker:9092");
        assert_eq!(config.registry.url, "https://registry");
        assert_eq!(config.target_messages_per_minute.get(), 20_000);
        assert_eq!(config.flush_timeout, Duration::from_secs(10));
        assert_eq!(config.report_window, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let mut args = args(full_connection());
        args.target_messages_per_minute = 0;

        assert!(matches!(
            args.resolve(),
            Err(ConfigError::Invalid {
                name: "TARGET_MESSAGES_PER_MINUTE",
                ..
            })
        ));
    }

    #[test]
    fn test_ratio_out_of_range_rejected() {
        let mut args = args(full_connection());
        args.privileged_ratio = 1.5;

        assert!(matches!(
            args.resolve(),
            Err(ConfigError::Invalid {
                name: "PRIVILEGED_RATIO",
                ..
            })
        ));
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let mut args = args(full_connection());
        args.seed = Some(42);
        let config = args.resolve().unwrap();

        assert_eq!(
            config.generator().next_record(),
            config.generator().next_record()
        );
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let config = args(full_connection()).resolve().unwrap();
        let debug = format!("{config:?}");

        assert!(!debug.contains("sr-secret"));
        assert!(debug.contains("broker:9092"));
    }
}
