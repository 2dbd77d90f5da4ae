use thiserror::Error;

/// Errors produced at the projection boundary.
///
/// Every conversion is an independent, stateless call; a failure never
/// poisons the shared projection instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    #[error("non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("singular input: {0}")]
    Singular(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
