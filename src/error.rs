use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbookError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity} is invalid: {}", messages.join("; "))]
    Invalid {
        entity: String,
        messages: Vec<String>,
    },

    #[error("Unknown address type: {0}")]
    InvalidAddressType(String),

    #[error("Unknown label template: {0}")]
    UnknownLabelTemplate(String),

    #[error("{name} has no address to share")]
    NoAddressToShare { name: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl AbookError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        AbookError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }
}

pub type AbookResult<T> = Result<T, AbookError>;
