use thiserror::Error;

/// Raised while assembling squads, before any round is simulated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "player '{player}': number of clones ({clones}) and number of modifiers ({modifiers}) must be the same"
    )]
    ModifierCountMismatch {
        player: String,
        clones: u32,
        modifiers: usize,
    },
}

/// Failures reading scenario, squad or config files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
