use crate::error::LoadError;

/// Default upper bound on a single input line, newline excluded.
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// Knobs for a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Lines longer than this fail with `LoadError::LineTooLong`.
    pub max_line_bytes: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl LoadOptions {
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.max_line_bytes == 0 {
            return Err(LoadError::InvalidOptions("max_line_bytes must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let opts = LoadOptions::default();
        assert_eq!(opts.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn zero_line_limit_rejected() {
        let opts = LoadOptions::default().with_max_line_bytes(0);
        assert!(matches!(opts.validate(), Err(LoadError::InvalidOptions(_))));
    }
}
