use thiserror::Error;

/// An enum-valued query field was given a textual name that matches no
/// variant.
///
/// Raised by the `*_name` builder setters and the `FromStr` impls in
/// [`options`](crate::options), at descriptor build time. Retrying the same
/// input cannot succeed; the caller has to fix the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {field} value: {value:?}")]
pub struct UnknownVariant {
    /// Which field rejected the value (e.g. `"shape"`).
    pub field: &'static str,
    /// The offending input.
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}
