//! Partial-update signals: swap strategies and the incoming swap request.
//!
//! The swap header value is a strategy word optionally followed by
//! `name:value` modifiers (`outerHTML swap:1s settle:200ms`). It is tokenized
//! with a small logos lexer; anything the lexer or the strategy table does
//! not recognise makes the whole signal malformed, which callers treat as
//! "no swap request".

use std::fmt;
use std::str::FromStr;

use logos::Logos;
use tracing::debug;

/// Header naming the element the client intends to patch.
pub const TARGET_HEADER: &str = "hx-target";
/// Header carrying the swap strategy.
pub const SWAP_HEADER: &str = "hx-swap";

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum SwapToken {
    /// `name:value` modifier, e.g. `swap:1s` or `scroll:#list:top`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_-]*:[^ \t\n\r\f]+")]
    Modifier,

    /// Strategy word, e.g. `outerHTML` or `replace-outer`.
    #[regex(r"[a-zA-Z][a-zA-Z-]*")]
    Word,
}

// ---------------------------------------------------------------------------
// SwapStrategy
// ---------------------------------------------------------------------------

/// How the client applies returned HTML to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwapStrategy {
    /// Replace the whole target element.
    #[default]
    ReplaceOuter,
    /// Replace the target's children.
    ReplaceInner,
    /// Replace the target's text content.
    TextOnly,
    BeforeBegin,
    AfterBegin,
    BeforeEnd,
    AfterEnd,
    /// Remove the target regardless of the response.
    Delete,
    /// Leave the target alone (out-of-band content still applies).
    None,
}

impl SwapStrategy {
    pub const ALL: [SwapStrategy; 9] = [
        Self::ReplaceOuter,
        Self::ReplaceInner,
        Self::TextOnly,
        Self::BeforeBegin,
        Self::AfterBegin,
        Self::BeforeEnd,
        Self::AfterEnd,
        Self::Delete,
        Self::None,
    ];

    /// Attribute value understood by the client library.
    pub fn as_htmx(self) -> &'static str {
        match self {
            Self::ReplaceOuter => "outerHTML",
            Self::ReplaceInner => "innerHTML",
            Self::TextOnly => "textContent",
            Self::BeforeBegin => "beforebegin",
            Self::AfterBegin => "afterbegin",
            Self::BeforeEnd => "beforeend",
            Self::AfterEnd => "afterend",
            Self::Delete => "delete",
            Self::None => "none",
        }
    }

    /// Hyphenated name (`replace-outer`, `after-begin`, ...).
    pub fn as_name(self) -> &'static str {
        match self {
            Self::ReplaceOuter => "replace-outer",
            Self::ReplaceInner => "replace-inner",
            Self::TextOnly => "text-only",
            Self::BeforeBegin => "before-begin",
            Self::AfterBegin => "after-begin",
            Self::BeforeEnd => "before-end",
            Self::AfterEnd => "after-end",
            Self::Delete => "delete",
            Self::None => "none",
        }
    }

    /// Whether the swap removes the target element itself.
    pub fn replaces_element(self) -> bool {
        matches!(self, Self::ReplaceOuter)
    }
}

impl fmt::Display for SwapStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_htmx())
    }
}

/// Error returned for an unrecognised strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown swap strategy `{0}`")]
pub struct UnknownStrategy(pub String);

impl FromStr for SwapStrategy {
    type Err = UnknownStrategy;

    /// Accepts both vocabularies, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| {
                strategy.as_htmx().eq_ignore_ascii_case(wanted)
                    || strategy.as_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownStrategy(wanted.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// SwapRequest
// ---------------------------------------------------------------------------

/// A well-formed incoming partial-update signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    /// DOM id of the target, without a leading `#`.
    pub target: String,
    pub strategy: SwapStrategy,
    /// `name:value` modifiers, in order.
    pub modifiers: Vec<String>,
}

impl SwapRequest {
    pub fn new(target: impl Into<String>, strategy: SwapStrategy) -> Self {
        Self {
            target: target.into(),
            strategy,
            modifiers: Vec::new(),
        }
    }

    /// Parse a target/swap pair. Returns `None` for malformed signals.
    pub fn parse(target: &str, swap: &str) -> Option<Self> {
        let target = target.trim().trim_start_matches('#');
        if target.is_empty() {
            debug!(swap, "swap signal without a target, using sequential ids");
            return None;
        }

        let mut lexer = SwapToken::lexer(swap);
        let mut strategy = None;
        let mut modifiers = Vec::new();
        while let Some(token) = lexer.next() {
            match token {
                Ok(SwapToken::Word) if strategy.is_none() => {
                    strategy = lexer.slice().parse::<SwapStrategy>().ok();
                    if strategy.is_none() {
                        debug!(swap, "unknown swap strategy, using sequential ids");
                        return None;
                    }
                }
                Ok(SwapToken::Modifier) if strategy.is_some() => {
                    modifiers.push(lexer.slice().to_owned());
                }
                _ => {
                    debug!(swap, "malformed swap signal, using sequential ids");
                    return None;
                }
            }
        }

        let strategy = strategy?;
        Some(Self {
            target: target.to_owned(),
            strategy,
            modifiers,
        })
    }

    /// Read the signal from request headers (names matched case-insensitively).
    ///
    /// Absent headers mean a full-page request and yield `None`.
    pub fn from_headers<'a, I>(headers: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut target = None;
        let mut swap = None;
        for (name, value) in headers {
            if name.eq_ignore_ascii_case(TARGET_HEADER) {
                target = Some(value);
            } else if name.eq_ignore_ascii_case(SWAP_HEADER) {
                swap = Some(value);
            }
        }
        Self::parse(target.unwrap_or_default(), swap?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── SwapStrategy ─────────────────────────────────────────────────

    #[test]
    fn parses_both_vocabularies() {
        assert_eq!("outerHTML".parse::<SwapStrategy>(), Ok(SwapStrategy::ReplaceOuter));
        assert_eq!("OUTERHTML".parse::<SwapStrategy>(), Ok(SwapStrategy::ReplaceOuter));
        assert_eq!("replace-outer".parse::<SwapStrategy>(), Ok(SwapStrategy::ReplaceOuter));
        assert_eq!("after-begin".parse::<SwapStrategy>(), Ok(SwapStrategy::AfterBegin));
        assert_eq!("afterbegin".parse::<SwapStrategy>(), Ok(SwapStrategy::AfterBegin));
        assert_eq!("text-only".parse::<SwapStrategy>(), Ok(SwapStrategy::TextOnly));
        assert!("sideways".parse::<SwapStrategy>().is_err());
    }

    #[test]
    fn displays_client_vocabulary() {
        assert_eq!(SwapStrategy::ReplaceInner.to_string(), "innerHTML");
        assert_eq!(SwapStrategy::default().to_string(), "outerHTML");
    }

    #[test]
    fn only_outer_replaces_element() {
        let replacing: Vec<_> = SwapStrategy::ALL
            .into_iter()
            .filter(|s| s.replaces_element())
            .collect();
        assert_eq!(replacing, vec![SwapStrategy::ReplaceOuter]);
    }

    // ── SwapRequest ──────────────────────────────────────────────────

    #[test]
    fn parse_with_modifiers() {
        let req = SwapRequest::parse("#list", "beforeend swap:1s scroll:#list:top").unwrap();
        assert_eq!(req.target, "list");
        assert_eq!(req.strategy, SwapStrategy::BeforeEnd);
        assert_eq!(req.modifiers, vec!["swap:1s", "scroll:#list:top"]);
    }

    #[test]
    fn malformed_signals_degrade() {
        assert!(SwapRequest::parse("", "outerHTML").is_none());
        assert!(SwapRequest::parse("a-1", "").is_none());
        assert!(SwapRequest::parse("a-1", "sideways").is_none());
        assert!(SwapRequest::parse("a-1", "swap:1s outerHTML").is_none());
        assert!(SwapRequest::parse("a-1", "outerHTML innerHTML").is_none());
        assert!(SwapRequest::parse("a-1", "outerHTML {}").is_none());
    }

    #[test]
    fn from_headers_case_insensitive() {
        let headers = [("HX-Target", "a-7"), ("Hx-Swap", "outerHTML"), ("accept", "*/*")];
        let req = SwapRequest::from_headers(headers).unwrap();
        assert_eq!(req, SwapRequest::new("a-7", SwapStrategy::ReplaceOuter));
    }

    #[test]
    fn from_headers_absent() {
        assert!(SwapRequest::from_headers([("accept", "text/html")]).is_none());
        assert!(SwapRequest::from_headers([("hx-target", "a-1")]).is_none());
    }
}
