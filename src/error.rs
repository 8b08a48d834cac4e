use thiserror::Error;

/// Failure of a dashboard query.
///
/// Loading errors go through `anyhow`; this type only covers parameters the
/// query layer refuses to compute with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid parameter `{name}`: {value} (must be at least {min})")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        min: usize,
    },
}

/// Reject counts below `min`.
pub(crate) fn ensure_at_least(name: &'static str, value: usize, min: usize) -> Result<(), QueryError> {
    if value < min {
        return Err(QueryError::InvalidParameter { name, value, min });
    }
    Ok(())
}
