use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    /// The caller supplied an empty or whitespace-only part number.
    #[error("a manufacturer part number is required")]
    MissingMpn,

    /// A batch request named no usable part numbers.
    #[error("at least one manufacturer part number is required")]
    MissingComponents,
}
