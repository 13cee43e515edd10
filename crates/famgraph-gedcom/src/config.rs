use crate::errors::{ParserError, ParserResult};
use serde::{Deserialize, Serialize};

/// Configuration for parser behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum input size to parse (in bytes)
    /// Larger inputs are rejected before decoding
    pub max_file_size: usize,

    /// Reject input whose first record is not `HEAD`
    pub require_header: bool,

    /// Keep unrecognized tags as opaque fields on their entity
    pub keep_unknown_tags: bool,

    /// Decode input that is not valid UTF-8 as Latin-1 instead of failing
    pub latin1_fallback: bool,

    /// Replace `NOTE`/`SOUR`/`OBJE` pointers with the referenced content
    pub resolve_references: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024, // 64 MB
            require_header: false,
            keep_unknown_tags: true,
            latin1_fallback: true,
            resolve_references: true,
        }
    }
}

impl ParserConfig {
    /// Create config that insists on well-formed input
    pub fn strict() -> Self {
        Self {
            require_header: true,
            latin1_fallback: false,
            ..Default::default()
        }
    }

    /// Create config that accepts anything decodable
    pub fn lenient() -> Self {
        Self {
            require_header: false,
            latin1_fallback: true,
            ..Default::default()
        }
    }

    /// Set maximum file size
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Require a leading HEAD record
    pub fn with_require_header(mut self, require: bool) -> Self {
        self.require_header = require;
        self
    }

    /// Keep or drop unrecognized tags
    pub fn with_keep_unknown_tags(mut self, keep: bool) -> Self {
        self.keep_unknown_tags = keep;
        self
    }

    /// Enable Latin-1 decoding of non-UTF-8 input
    pub fn with_latin1_fallback(mut self, fallback: bool) -> Self {
        self.latin1_fallback = fallback;
        self
    }

    /// Enable reference resolution
    pub fn with_resolve_references(mut self, resolve: bool) -> Self {
        self.resolve_references = resolve;
        self
    }

    /// Check the configuration for values no parse could succeed with
    pub fn validate(&self) -> ParserResult<()> {
        if self.max_file_size == 0 {
            return Err(ParserError::InvalidConfig(
                "max_file_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let strict = ParserConfig::strict();
        assert!(strict.require_header);
        assert!(!strict.latin1_fallback);

        let lenient = ParserConfig::lenient();
        assert!(!lenient.require_header);
        assert!(lenient.latin1_fallback);
    }

    #[test]
    fn test_validate() {
        assert!(ParserConfig::default().validate().is_ok());
        assert!(matches!(
            ParserConfig::default().with_max_file_size(0).validate(),
            Err(ParserError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ParserConfig::strict().with_keep_unknown_tags(false);
        let json = serde_json::to_string(&config).unwrap();
        let back: ParserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
