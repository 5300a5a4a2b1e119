//! Key event matching.
//!
//! Decides whether a raw key event satisfies a parsed accelerator, either
//! tolerating extra held modifiers (non-strict) or requiring the exact
//! modifier set (strict).

use crate::modifiers::{EventFlags, normalize_modifiers};
use crate::parser::{ParseError, ParsedAccelerator, parse_accelerator};
use localshortcut_config::RegisterOptions;

/// How modifiers beyond the accelerator's own are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchPolicy {
    /// Required flags must be held; other flags are ignored.
    #[default]
    NonStrict,
    /// Required flags must be held and no other flag may be.
    Strict,
}

impl From<&RegisterOptions> for MatchPolicy {
    fn from(options: &RegisterOptions) -> Self {
        if options.strict {
            MatchPolicy::Strict
        } else {
            MatchPolicy::NonStrict
        }
    }
}

/// Whether a key was pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    KeyDown,
    KeyUp,
}

/// A key event as delivered by the window runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub phase: KeyPhase,
    /// Key value, e.g. "k", "K", "F4", "ArrowUp", " "
    pub key: String,
    pub flags: EventFlags,
}

impl RawKeyEvent {
    pub fn key_down(key: impl Into<String>, flags: EventFlags) -> Self {
        Self {
            phase: KeyPhase::KeyDown,
            key: key.into(),
            flags,
        }
    }

    pub fn key_up(key: impl Into<String>, flags: EventFlags) -> Self {
        Self {
            phase: KeyPhase::KeyUp,
            key: key.into(),
            flags,
        }
    }
}

/// Check the held flags against the required flags under `policy`.
pub fn flags_match(required: EventFlags, policy: MatchPolicy, held: EventFlags) -> bool {
    if !held.contains(required) {
        return false;
    }
    match policy {
        MatchPolicy::NonStrict => true,
        MatchPolicy::Strict => {
            let excess = EventFlags::all().difference(required);
            !held.intersects(excess)
        }
    }
}

/// Check a single event against an accelerator's required flags and key.
///
/// Key-up events never match. The key is compared case-insensitively and
/// must otherwise be equal.
pub fn matches(
    required: EventFlags,
    policy: MatchPolicy,
    key_token: &str,
    event: &RawKeyEvent,
) -> bool {
    matches_folded(required, policy, &key_token.to_lowercase(), event)
}

/// `matches` with the key token already lowercased.
fn matches_folded(
    required: EventFlags,
    policy: MatchPolicy,
    folded_key: &str,
    event: &RawKeyEvent,
) -> bool {
    if event.phase == KeyPhase::KeyUp {
        return false;
    }
    event.key.to_lowercase() == folded_key && flags_match(required, policy, event.flags)
}

/// Immutable matcher built once per registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutMatcher {
    required: EventFlags,
    /// Key token, lowercased
    key: String,
    policy: MatchPolicy,
}

impl ShortcutMatcher {
    /// Build a matcher from an already parsed accelerator.
    pub fn new(parsed: &ParsedAccelerator, policy: MatchPolicy) -> Self {
        let canonical = normalize_modifiers(parsed.modifiers.iter().copied());
        Self {
            required: canonical.event_flags(),
            key: parsed.key.to_lowercase(),
            policy,
        }
    }

    /// Parse `accelerator` and build a matcher for it.
    pub fn parse(accelerator: &str, policy: MatchPolicy) -> Result<Self, ParseError> {
        let parsed = parse_accelerator(accelerator)?;
        Ok(Self::new(&parsed, policy))
    }

    pub fn required_flags(&self) -> EventFlags {
        self.required
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Check if this event satisfies the accelerator.
    pub fn matches(&self, event: &RawKeyEvent) -> bool {
        matches_folded(self.required, self.policy, &self.key, event)
    }
}
