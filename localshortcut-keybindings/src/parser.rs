//! Accelerator parser.
//!
//! Splits human-readable accelerator strings like "CmdOrCtrl+Shift+K" into
//! modifier tokens and a key token.

use std::str::FromStr;
use strum::{AsRefStr, EnumIter, EnumString};
use thiserror::Error;

/// Error returned when an accelerator does not contain exactly one key token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Every token was a modifier (e.g. "Ctrl+Shift"), or the only key is blank ("Ctrl+").
    #[error("accelerator '{accelerator}' has no key, only modifiers")]
    MissingKey { accelerator: String },

    /// More than one token was not a modifier (e.g. "Ctrl+A+B", "Ctrl++").
    #[error("accelerator '{accelerator}' has more than one key: {keys:?}")]
    MultipleKeys {
        accelerator: String,
        keys: Vec<String>,
    },
}

/// Raw modifier name as written in an accelerator.
///
/// Matching is case-sensitive: `"shift"` is not a modifier, it is a key token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr)]
pub enum ModifierToken {
    Command,
    Cmd,
    Control,
    Ctrl,
    CommandOrControl,
    CmdOrCtrl,
    Alt,
    #[strum(serialize = "Option")]
    OptionKey,
    AltGr,
    Shift,
    Super,
}

/// Returns true if `token` is exactly one of the modifier names.
pub fn is_modifier(token: &str) -> bool {
    ModifierToken::from_str(token).is_ok()
}

/// Split an accelerator into its modifier tokens and its non-modifier tokens.
///
/// Both sequences keep the order they appear in. This never fails: a
/// well-formed accelerator yields exactly one non-modifier, anything else is
/// left for [`parse_accelerator`] to reject.
pub fn split(accelerator: &str) -> (Vec<ModifierToken>, Vec<&str>) {
    let mut modifiers = Vec::new();
    let mut rest = Vec::new();

    for part in accelerator.split('+') {
        match ModifierToken::from_str(part) {
            Ok(modifier) => modifiers.push(modifier),
            Err(_) => rest.push(part),
        }
    }

    (modifiers, rest)
}

/// An accelerator with its single key token resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAccelerator {
    pub modifiers: Vec<ModifierToken>,
    pub key: String,
}

/// Parse an accelerator, requiring exactly one key token.
pub fn parse_accelerator(accelerator: &str) -> Result<ParsedAccelerator, ParseError> {
    let (modifiers, rest) = split(accelerator);

    match rest.as_slice() {
        [""] | [] => Err(ParseError::MissingKey {
            accelerator: accelerator.to_string(),
        }),
        [key] => Ok(ParsedAccelerator {
            modifiers,
            key: (*key).to_string(),
        }),
        keys => Err(ParseError::MultipleKeys {
            accelerator: accelerator.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }),
    }
}
