//! Render-side errors.

/// Failure while registering or evaluating a flavor template.
///
/// Template evaluation problems surface as the single generic variant; the
/// engine's own error stays reachable through `source()` but is not part of
/// the message a caller sees.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not generate field definitions")]
    Generate {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RenderError {
    pub(crate) fn generate(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RenderError::Generate {
            source: Box::new(source),
        }
    }
}
