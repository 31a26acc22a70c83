/// Indentation width separating a nested block from a continuation line.
pub const NESTING_UNIT: usize = 4;

/// Keys written on a single comma-separated line when they hold several values.
pub const INLINE_KEYS: &[&str] = &["license"];

/// Knobs shared by the credit file reader and writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditFormat {
    pub(crate) inline_keys: Vec<String>,
    pub(crate) nesting_unit: usize,
}

impl CreditFormat {
    pub fn new() -> CreditFormat {
        CreditFormat {
            inline_keys: INLINE_KEYS.iter().map(|k| k.to_string()).collect(),
            nesting_unit: NESTING_UNIT,
        }
    }

    /// Replaces the inline allow-list.
    pub fn with_inline_keys<I, S>(mut self, keys: I) -> CreditFormat
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inline_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Panics if `width` is zero.
    pub fn with_nesting_unit(mut self, width: usize) -> CreditFormat {
        assert!(width > 0, "nesting unit must not be zero");
        self.nesting_unit = width;
        self
    }

    #[inline(always)]
    pub fn is_inline(&self, key: &str) -> bool {
        self.inline_keys.iter().any(|k| k == key)
    }

    #[inline(always)]
    pub fn inline_keys(&self) -> &[String] {
        &self.inline_keys
    }

    #[inline(always)]
    pub fn nesting_unit(&self) -> usize {
        self.nesting_unit
    }
}

impl Default for CreditFormat {
    fn default() -> Self {
        CreditFormat::new()
    }
}
