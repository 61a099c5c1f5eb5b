//! The enumerated canonicalization rules and the set type used to toggle them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownRule;

/// A single canonicalization rule.
///
/// Variants are declared in pipeline order: the normalizer applies enabled
/// rules in exactly this sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Strip leading and trailing dots from the host.
    RemoveUnnecessaryHostDots,
    /// Decode DWORD, octal and hex IPv4 hosts into dotted decimal.
    DecodeHostNumeric,
    /// Drop the port when it equals the scheme default.
    RemoveDefaultPort,
    /// Collapse runs of `/` in the path.
    RemoveDuplicateSlashes,
    /// Resolve `.` and `..` path segments.
    RemoveDotSegments,
    /// Uppercase escapes, decode unreserved escapes, encode what must be encoded.
    EscapeNormalization,
    /// Sort `&`-separated query tokens by their raw text.
    SortQuery,
}

impl Rule {
    /// Every rule, in pipeline order.
    pub const ALL: [Rule; 7] = [
        Rule::RemoveUnnecessaryHostDots,
        Rule::DecodeHostNumeric,
        Rule::RemoveDefaultPort,
        Rule::RemoveDuplicateSlashes,
        Rule::RemoveDotSegments,
        Rule::EscapeNormalization,
        Rule::SortQuery,
    ];

    /// Kebab-case name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Rule::RemoveUnnecessaryHostDots => "remove-unnecessary-host-dots",
            Rule::DecodeHostNumeric => "decode-host-numeric",
            Rule::RemoveDefaultPort => "remove-default-port",
            Rule::RemoveDuplicateSlashes => "remove-duplicate-slashes",
            Rule::RemoveDotSegments => "remove-dot-segments",
            Rule::EscapeNormalization => "escape-normalization",
            Rule::SortQuery => "sort-query",
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Rule::ALL
            .into_iter()
            .find(|rule| rule.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRule(wanted.to_string()))
    }
}

/// A set of enabled [`Rule`]s.
///
/// The default enables every rule.
///
/// ```
/// use urlnorm::{NormalizationFlags, Rule};
///
/// let flags = NormalizationFlags::all().without(Rule::SortQuery);
/// assert!(!flags.contains(Rule::SortQuery));
/// assert!(flags.contains(Rule::RemoveDefaultPort));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizationFlags(u8);

impl NormalizationFlags {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < Rule::ALL.len() {
            bits |= Rule::ALL[i].bit();
            i += 1;
        }
        Self(bits)
    }

    #[must_use]
    pub const fn with(self, rule: Rule) -> Self {
        Self(self.0 | rule.bit())
    }

    #[must_use]
    pub const fn without(self, rule: Rule) -> Self {
        Self(self.0 & !rule.bit())
    }

    pub const fn contains(self, rule: Rule) -> bool {
        self.0 & rule.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Enabled rules in pipeline order.
    pub fn iter(self) -> impl Iterator<Item = Rule> {
        Rule::ALL.into_iter().filter(move |rule| self.contains(*rule))
    }
}

impl Default for NormalizationFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for NormalizationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Rule> for NormalizationFlags {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}
