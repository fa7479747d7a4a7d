use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("i/o error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("key '{0}' not found")]
    NameNotFoundError(String),
    #[error("unknown built-in holiday '{0}'")]
    UnknownBuiltinHoliday(String),
    #[error("invalid location '{0}'")]
    InvalidLocation(String),
    #[error("invalid parameter in '{name}': {reason}")]
    InvalidParameter {
        name: String,
        reason: String
    }
}

impl ManagerError {
    pub fn map_elem_not_found(name: &str) -> ManagerError {
        ManagerError::NameNotFoundError(name.to_owned())
    }

    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> ManagerError {
        ManagerError::InvalidParameter {
            name: name.to_owned(),
            reason: reason.into()
        }
    }
}

pub fn parse_json_value<T: DeserializeOwned>(json_value: serde_json::Value) -> Result<T, ManagerError> {
    Ok(serde_json::from_value(json_value)?)
}
