use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("could not read parameter file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML parameter file {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse JSON parameter file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("parameter files nested deeper than {limit} levels at {}", path.display())]
    NestingTooDeep { path: PathBuf, limit: usize },

    #[error("circular parameter file reference: {cycle}")]
    Cycle { cycle: String },

    #[error("empty parameter file reference \"@\"")]
    EmptyReference,
}
