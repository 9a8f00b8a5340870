use thiserror::Error;

/// Failures while loading catalog or party data. Expected in-battle outcomes
/// (rejected effects, no-op actions) are values, not errors.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse {what} JSON")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse {what} YAML")]
    Yaml {
        what: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("duplicate skill id '{0}' in catalog")]
    DuplicateSkill(String),
}
