//! Minimal schema registry client.
//!
//! Only schema registration is needed: the producer registers the key and
//! value schemas once at startup and stamps every message with the returned
//! ids.

use crate::error::ProducerError;
use crate::settings::RegistrySettings;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

const REGISTRY_CONTENT_TYPE: &str = "application/vnd.schemaregistry.v1+json";

#[derive(Serialize)]
struct RegisterRequest<'a> {
    schema: &'a str,
}

#[derive(Deserialize)]
struct RegisterResponse {
    id: u32,
}

/// Subject for a topic's message keys.
pub fn key_subject(topic: &str) -> String {
    format!("{topic}-key")
}

/// Subject for a topic's message values.
pub fn value_subject(topic: &str) -> String {
    format!("{topic}-value")
}

pub struct SchemaRegistryClient {
    http: reqwest::Client,
    settings: RegistrySettings,
    ids: HashMap<String, u32>,
}

impl SchemaRegistryClient {
    pub fn new(settings: RegistrySettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
            ids: HashMap::new(),
        }
    }

    /// Seed the id cache, skipping registration for `subject`.
    pub fn with_cached_id(mut self, subject: &str, id: u32) -> Self {
        self.ids.insert(subject.to_string(), id);
        self
    }

    fn versions_url(&self, subject: &str) -> String {
        format!(
            "{}/subjects/{subject}/versions",
            self.settings.url.trim_end_matches('/')
        )
    }

    /// Register `schema` under `subject` and return its id.
    ///
    /// Registering an identical schema again is idempotent on the registry
    /// side; ids are cached so each subject costs one request per process.
    pub async fn register(&mut self, subject: &str, schema: &str) -> Result<u32, ProducerError> {
        if let Some(id) = self.ids.get(subject) {
            debug!("Schema id for subject '{}' served from cache: {}", subject, id);
            return Ok(*id);
        }

        let response = self
            .http
            .post(self.versions_url(subject))
            .basic_auth(&self.settings.api_key, Some(&self.settings.api_secret))
            .header(CONTENT_TYPE, REGISTRY_CONTENT_TYPE)
            .json(&RegisterRequest { schema })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProducerError::SchemaRegistry {
                subject: subject.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let RegisterResponse { id } = response.json().await?;
        info!("Registered schema for subject '{}' with id {}", subject, id);
        self.ids.insert(subject.to_string(), id);
        Ok(id)
    }
}
