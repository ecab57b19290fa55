//! Converter limits

/// Default maximum element nesting depth
///
/// Every level of nesting is a level of recursion. The default keeps
/// conversion inside the stack of a spawned thread; it is a guard against
/// stack exhaustion, not a document rule.
pub const DEFAULT_MAX_DEPTH: u16 = 512;

/// Configuration for the converter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

/// Stack protection only: input size is not limited
impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: 0,
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }

    pub(crate) const fn depth_exceeded(&self, depth: u16) -> bool {
        self.max_depth > 0 && depth > self.max_depth
    }

    pub(crate) const fn size_exceeded(&self, len: usize) -> bool {
        self.max_size > 0 && len > self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = Config::default();
        assert_eq!(config.max_depth, 512);
        assert_eq!(config.max_size, 0);
        assert!(!config.size_exceeded(usize::MAX));
        assert!(!config.depth_exceeded(DEFAULT_MAX_DEPTH));
        assert!(config.depth_exceeded(DEFAULT_MAX_DEPTH + 1));
    }

    #[test]
    fn test_unlimited_never_trips() {
        let config = Config::unlimited();
        assert!(!config.depth_exceeded(u16::MAX));
        assert!(!config.size_exceeded(usize::MAX));
    }

    #[test]
    fn test_depth_limit_is_inclusive() {
        let config = Config::new(2, 0);
        assert!(!config.depth_exceeded(2));
        assert!(config.depth_exceeded(3));
    }
}
