use crate::util::{clog, cwarn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Warning => "warning",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            NoticeKind::Success => "#2ea043",
            NoticeKind::Error => "#f85149",
            NoticeKind::Warning => "#d29922",
        }
    }
}

/// A transient message shown in the notice bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// Dismissed automatically after the configured delay.
    pub transient: bool,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into(), transient: true }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text)
    }

    pub fn sticky(mut self) -> Self {
        self.transient = false;
        self
    }

    /// Builds a notice from a loosely typed `(type, text)` pair.
    /// `invisible` messages only reach the console; empty input and unknown
    /// types yield nothing.
    pub fn from_parts(kind: &str, text: &str) -> Option<Self> {
        if kind.is_empty() || text.is_empty() {
            return None;
        }
        match kind {
            "success" => Some(Self::new(NoticeKind::Success, text)),
            "error" => Some(Self::new(NoticeKind::Error, text)),
            "warning" => Some(Self::new(NoticeKind::Warning, text)),
            "invisible" => {
                clog(text);
                None
            }
            other => {
                cwarn(&format!("notice \"{}\" of type \"{}\" could not be handled", text, other));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_map_to_kinds() {
        assert_eq!(Notice::from_parts("warning", "careful").map(|n| n.kind), Some(NoticeKind::Warning));
        assert_eq!(Notice::from_parts("error", "bad"), Some(Notice::error("bad")));
    }

    #[test]
    fn invisible_unknown_and_empty_produce_nothing() {
        assert_eq!(Notice::from_parts("invisible", "debug only"), None);
        assert_eq!(Notice::from_parts("shout", "hi"), None);
        assert_eq!(Notice::from_parts("", "hi"), None);
        assert_eq!(Notice::from_parts("error", ""), None);
    }

    #[test]
    fn sticky_notices_stay_up() {
        assert!(Notice::error("x").transient);
        assert!(!Notice::error("x").sticky().transient);
    }
}
