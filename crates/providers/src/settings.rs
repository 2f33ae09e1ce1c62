//! Declarative provider configuration.
//!
//! Hosts that load their configuration from files deserialize these values
//! and turn them into formatters. Every field maps onto one builder call.

use serde::{Deserialize, Serialize};

use crate::context::{ContextFieldFormatter, ContextFieldFormatterBuilder};
use crate::error::ConfigError;
use crate::render::{ExtendedTraceRenderer, ShortenedTraceRenderer};
use crate::stack_trace::{ErrorChainFormatter, ErrorChainFormatterBuilder, FIELD_STACK_TRACE};

/// Configuration of a [`ContextFieldFormatter`].
///
/// # Examples
///
/// ```
/// use providers::ContextFieldSettings;
///
/// let settings: ContextFieldSettings = serde_json::from_str(
///     r#"{"include_keys":["user"],"key_field_names":["user=user_name"],"field_name":"ctx"}"#,
/// )?;
/// let formatter = settings.build()?;
/// assert_eq!(formatter.output_name("user"), "user_name");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ContextFieldSettings {
    /// Keys allowed through.
    pub include_keys: Vec<String>,
    /// Keys filtered out.
    pub exclude_keys: Vec<String>,
    /// `keyName=fieldName` mappings.
    pub key_field_names: Vec<String>,
    /// Wrapper object name.
    pub field_name: Option<String>,
}

impl ContextFieldSettings {
    /// Converts the settings into a builder.
    ///
    /// # Errors
    ///
    /// Fails when a key field name mapping is malformed.
    pub fn into_builder(self) -> Result<ContextFieldFormatterBuilder, ConfigError> {
        let builder = ContextFieldFormatter::builder()
            .include_keys(self.include_keys)
            .exclude_keys(self.exclude_keys)
            .key_field_names(&self.key_field_names)?;
        Ok(match self.field_name {
            Some(name) => builder.field_name(name),
            None => builder,
        })
    }

    /// Builds the formatter.
    ///
    /// # Errors
    ///
    /// Fails when a key field name mapping is malformed.
    pub fn build(self) -> Result<ContextFieldFormatter, ConfigError> {
        self.into_builder().map(ContextFieldFormatterBuilder::build)
    }
}

/// Renderer selection for [`StackTraceSettings`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RendererSettings {
    /// [`ExtendedTraceRenderer`].
    Extended {
        /// Print packaging locations.
        #[serde(default = "default_true")]
        packaging: bool,
    },
    /// [`ShortenedTraceRenderer`].
    Shortened {
        /// Frames printed per error.
        #[serde(default)]
        max_frames_per_error: Option<usize>,
        /// Total length limit in characters.
        #[serde(default)]
        max_length: Option<usize>,
        /// Print packaging locations.
        #[serde(default)]
        packaging: bool,
    },
}

const fn default_true() -> bool {
    true
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self::Extended { packaging: true }
    }
}

impl RendererSettings {
    fn apply(self, builder: ErrorChainFormatterBuilder) -> ErrorChainFormatterBuilder {
        match self {
            Self::Extended { packaging: true } => builder.renderer(ExtendedTraceRenderer::new()),
            Self::Extended { packaging: false } => builder.renderer(ExtendedTraceRenderer::plain()),
            Self::Shortened {
                max_frames_per_error,
                max_length,
                packaging,
            } => {
                let mut renderer = ShortenedTraceRenderer::new().packaging(packaging);
                if let Some(max) = max_frames_per_error {
                    renderer = renderer.max_frames_per_error(max);
                }
                if let Some(max) = max_length {
                    renderer = renderer.max_length(max);
                }
                builder.renderer(renderer)
            }
        }
    }
}

/// Configuration of an [`ErrorChainFormatter`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StackTraceSettings {
    /// Rendered trace field name.
    pub field_name: String,
    /// Renderer to use.
    pub renderer: RendererSettings,
}

impl Default for StackTraceSettings {
    fn default() -> Self {
        Self {
            field_name: FIELD_STACK_TRACE.to_owned(),
            renderer: RendererSettings::default(),
        }
    }
}

impl StackTraceSettings {
    /// Converts the settings into a builder.
    #[must_use]
    pub fn into_builder(self) -> ErrorChainFormatterBuilder {
        self.renderer
            .apply(ErrorChainFormatter::builder().field_name(self.field_name))
    }

    /// Builds the formatter.
    #[must_use]
    pub fn build(self) -> ErrorChainFormatter {
        self.into_builder().build()
    }
}
