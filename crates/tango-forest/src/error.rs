use thiserror::Error;

/// Largest accepted `levels` for perfect-tree construction.
pub const MAX_LEVELS: u32 = 30;

/// Recoverable conditions reported by tree operations.
///
/// Broken internal invariants are not represented here: the engines panic on
/// them instead of returning an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("operation not permitted: {0}")]
    OperationNotPermitted(&'static str),
    #[error("key {0} is reserved for sentinel leaves")]
    ReservedKey(i32),
    #[error("perfect tree levels must be in 1..={max}, got {levels}")]
    InvalidLevels { levels: u32, max: u32 },
    #[error("unknown tree kind: {0:?}")]
    UnknownTreeKind(String),
}

pub(crate) fn check_levels(levels: u32) -> Result<(), TreeError> {
    if levels == 0 || levels > MAX_LEVELS {
        return Err(TreeError::InvalidLevels {
            levels,
            max: MAX_LEVELS,
        });
    }
    Ok(())
}
