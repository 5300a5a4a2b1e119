//! Modifier normalization and event flag mapping.
//!
//! Raw modifier names collapse into a small canonical set, and each canonical
//! modifier maps onto one of the boolean flags carried by a key event.
//! `AltGr` survives normalization unchanged but shares the `CONTROL` flag
//! with `Ctrl`.

use crate::parser::ModifierToken;
use bitflags::bitflags;
use std::collections::BTreeSet;
use std::fmt;
use strum::{Display, EnumIter};

bitflags! {
    /// Modifier flags carried by a raw key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventFlags: u8 {
        const META = 1 << 0;
        const CONTROL = 1 << 1;
        const SHIFT = 1 << 2;
        const ALT = 1 << 3;
    }
}

impl fmt::Display for EventFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .iter_names()
            .map(|(name, _)| match name {
                "META" => "meta",
                "CONTROL" => "control",
                "SHIFT" => "shift",
                _ => "alt",
            })
            .collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Normalized modifier used for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum CanonicalModifier {
    Cmd,
    Ctrl,
    Alt,
    Shift,
    Super,
    AltGr,
}

impl CanonicalModifier {
    /// The event flag this modifier requires.
    pub fn event_flag(self) -> EventFlags {
        match self {
            CanonicalModifier::Cmd | CanonicalModifier::Super => EventFlags::META,
            CanonicalModifier::Ctrl | CanonicalModifier::AltGr => EventFlags::CONTROL,
            CanonicalModifier::Shift => EventFlags::SHIFT,
            CanonicalModifier::Alt => EventFlags::ALT,
        }
    }

    /// One raw spelling that normalizes back to this modifier.
    pub fn token(self) -> ModifierToken {
        match self {
            CanonicalModifier::Cmd => ModifierToken::Cmd,
            CanonicalModifier::Ctrl => ModifierToken::Ctrl,
            CanonicalModifier::Alt => ModifierToken::Alt,
            CanonicalModifier::Shift => ModifierToken::Shift,
            CanonicalModifier::Super => ModifierToken::Super,
            CanonicalModifier::AltGr => ModifierToken::AltGr,
        }
    }
}

impl From<ModifierToken> for CanonicalModifier {
    fn from(token: ModifierToken) -> Self {
        match token {
            ModifierToken::Cmd
            | ModifierToken::Command
            | ModifierToken::CmdOrCtrl
            | ModifierToken::CommandOrControl => CanonicalModifier::Cmd,
            ModifierToken::Alt | ModifierToken::OptionKey => CanonicalModifier::Alt,
            ModifierToken::Control | ModifierToken::Ctrl => CanonicalModifier::Ctrl,
            ModifierToken::Shift => CanonicalModifier::Shift,
            ModifierToken::Super => CanonicalModifier::Super,
            ModifierToken::AltGr => CanonicalModifier::AltGr,
        }
    }
}

/// Deduplicated set of canonical modifiers. Insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CanonicalModifierSet(BTreeSet<CanonicalModifier>);

impl CanonicalModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, modifier: CanonicalModifier) -> bool {
        self.0.insert(modifier)
    }

    pub fn contains(&self, modifier: CanonicalModifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CanonicalModifier> + '_ {
        self.0.iter().copied()
    }

    /// Union of the event flags required by every modifier in the set.
    pub fn event_flags(&self) -> EventFlags {
        self.iter()
            .fold(EventFlags::empty(), |acc, m| acc | m.event_flag())
    }
}

impl FromIterator<CanonicalModifier> for CanonicalModifierSet {
    fn from_iter<I: IntoIterator<Item = CanonicalModifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CanonicalModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|m| m.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Collapse raw modifier tokens into their canonical set.
pub fn normalize_modifiers<I>(tokens: I) -> CanonicalModifierSet
where
    I: IntoIterator<Item = ModifierToken>,
{
    tokens.into_iter().map(CanonicalModifier::from).collect()
}
