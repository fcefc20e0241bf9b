//! Error types for catalog parsing and conversion.

use thiserror::Error;

/// Errors produced while interpreting icon-set inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The extension type name is not one this crate knows about.
    #[error("unknown extension type: '{0}'")]
    UnknownExtensionType(String),

    /// A color string that is not `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color: '{0}' (expected #rrggbb or #rrggbbaa)")]
    InvalidColor(String),
}
