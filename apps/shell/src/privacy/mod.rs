// Private-browsing detection. One asynchronous, best-effort classification
// per process lifetime; the result is recorded once and never re-evaluated.

pub mod detector;
pub mod probe;

use std::sync::OnceLock;

use tracing::debug;

/// Classification of the current browsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privacy {
    /// Detection has not completed yet.
    Unknown,
    /// Private/incognito session.
    Private,
    /// Ordinary session.
    Normal,
}

/// Set-once holder for the privacy classification.
///
/// Starts `Unknown` and accepts exactly one terminal value. Late probe
/// completions are dropped so a terminal classification can never revert
/// or flip.
#[derive(Debug, Default)]
pub struct PrivacyCell {
    value: OnceLock<Privacy>,
}

impl PrivacyCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the classification. Returns `false` if a terminal value was
    /// already present, in which case `classification` is discarded.
    pub fn set(&self, classification: Privacy) -> bool {
        let accepted = self.value.set(classification).is_ok();
        if !accepted {
            debug!("Privacy classification already terminal; ignoring {classification:?}");
        }
        accepted
    }

    pub fn get(&self) -> Privacy {
        self.value.get().copied().unwrap_or(Privacy::Unknown)
    }

    pub fn is_terminal(&self) -> bool {
        self.value.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_starts_unknown() {
        let cell = PrivacyCell::new();
        assert_eq!(cell.get(), Privacy::Unknown);
        assert!(!cell.is_terminal());
    }

    #[test]
    fn test_first_set_wins() {
        let cell = PrivacyCell::new();
        assert!(cell.set(Privacy::Private));
        assert_eq!(cell.get(), Privacy::Private);
        assert!(cell.is_terminal());
    }

    #[test]
    fn test_later_completions_are_ignored() {
        let cell = PrivacyCell::new();
        cell.set(Privacy::Normal);
        assert!(!cell.set(Privacy::Private));
        assert_eq!(cell.get(), Privacy::Normal);
    }
}
