use crate::option::OptionId;

/// Errors reported by [`MultiSelect`](crate::multi_select::MultiSelect).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `select` was given an id that is not in the option list.
    #[error("no option with id `{0}`")]
    OptionNotFound(OptionId),
    /// Two options passed to the builder share an id.
    #[error("option id `{0}` appears more than once")]
    DuplicateOptionId(OptionId),
}

/// Result alias for widget operations.
pub type Result<T> = std::result::Result<T, Error>;
