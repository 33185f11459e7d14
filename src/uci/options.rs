//! UCI options: declaration and `setoption` handling.

/// Engine options configurable over UCI. Unknown option names are ignored
/// silently, per the UCI convention.
#[derive(Debug, Clone)]
pub struct UciOptions {
    pub hash_mb: usize,
    pub own_book: bool,
    pub book_depth: u32,
    pub move_overhead_ms: u64,
}

/// Side effects the loop must apply after a `setoption`.
#[derive(Debug, PartialEq, Eq)]
pub enum OptionAction {
    ResizeHash(usize),
}

impl UciOptions {
    pub const HASH_DEFAULT: usize = 64;
    pub const HASH_MIN: usize = 1;
    pub const HASH_MAX: usize = 4096;
    pub const BOOK_DEPTH_DEFAULT: u32 = 10;

    #[must_use]
    pub fn new() -> Self {
        UciOptions {
            hash_mb: Self::HASH_DEFAULT,
            own_book: false,
            book_depth: Self::BOOK_DEPTH_DEFAULT,
            move_overhead_ms: 50,
        }
    }

    /// The `option` declaration lines sent in reply to `uci`.
    #[must_use]
    pub fn declarations(&self) -> Vec<String> {
        vec![
            format!(
                "option name Hash type spin default {} min {} max {}",
                Self::HASH_DEFAULT,
                Self::HASH_MIN,
                Self::HASH_MAX
            ),
            "option name OwnBook type check default false".to_string(),
            format!(
                "option name BookDepth type spin default {} min 0 max 40",
                Self::BOOK_DEPTH_DEFAULT
            ),
            "option name Move Overhead type spin default 50 min 0 max 1000".to_string(),
        ]
    }

    /// Apply one `setoption`; returns an action when the loop must react.
    pub fn apply(&mut self, name: &str, value: Option<&str>) -> Option<OptionAction> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hash" => {
                let mb = value
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(Self::HASH_DEFAULT)
                    .clamp(Self::HASH_MIN, Self::HASH_MAX);
                if mb != self.hash_mb {
                    self.hash_mb = mb;
                    return Some(OptionAction::ResizeHash(mb));
                }
            }
            "ownbook" => {
                if let Some(v) = value {
                    self.own_book = matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1");
                }
            }
            "bookdepth" => {
                if let Some(v) = value.and_then(|v| v.parse::<u32>().ok()) {
                    self.book_depth = v.min(40);
                }
            }
            "move overhead" => {
                if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                    self.move_overhead_ms = v.min(1000);
                }
            }
            _ => {}
        }
        None
    }
}

impl Default for UciOptions {
    fn default() -> Self {
        UciOptions::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_resize_action() {
        let mut options = UciOptions::new();
        assert_eq!(
            options.apply("Hash", Some("256")),
            Some(OptionAction::ResizeHash(256))
        );
        assert_eq!(options.hash_mb, 256);
        // Same value again: no action
        assert_eq!(options.apply("Hash", Some("256")), None);
    }

    #[test]
    fn test_hash_clamped() {
        let mut options = UciOptions::new();
        options.apply("Hash", Some("999999"));
        assert_eq!(options.hash_mb, UciOptions::HASH_MAX);
        options.apply("Hash", Some("0"));
        assert_eq!(options.hash_mb, UciOptions::HASH_MIN);
    }

    #[test]
    fn test_own_book_toggle() {
        let mut options = UciOptions::new();
        assert!(!options.own_book);
        options.apply("OwnBook", Some("true"));
        assert!(options.own_book);
        options.apply("ownbook", Some("false"));
        assert!(!options.own_book);
    }

    #[test]
    fn test_unknown_option_ignored() {
        let mut options = UciOptions::new();
        assert_eq!(options.apply("SyzygyPath", Some("/tmp")), None);
    }
}
