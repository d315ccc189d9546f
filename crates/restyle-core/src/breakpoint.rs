//! Responsive breakpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named responsive width threshold.
///
/// Generated utility tokens receive a `"<breakpoint>:"` prefix for every
/// breakpoint except [`Breakpoint::Base`] and the UI-only [`Breakpoint::Auto`]
/// sentinel, which both mean "no prefix".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Auto,
    Base,
    Sm,
    Md,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl Breakpoint {
    /// Every breakpoint in ascending width order, `Auto` first.
    pub const ALL: [Breakpoint; 7] = [
        Breakpoint::Auto,
        Breakpoint::Base,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    /// Serialized name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Auto => "auto",
            Breakpoint::Base => "base",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }

    /// The variant prefix for generated tokens, `None` for unprefixed output.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Breakpoint::Auto | Breakpoint::Base => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| bp.as_str() == s.trim())
            .ok_or_else(|| format!("unknown breakpoint '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(Breakpoint::Auto.prefix(), None);
        assert_eq!(Breakpoint::Base.prefix(), None);
        assert_eq!(Breakpoint::Md.prefix(), Some("md"));
        assert_eq!(Breakpoint::Xxl.prefix(), Some("2xl"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("2xl".parse::<Breakpoint>(), Ok(Breakpoint::Xxl));
        assert_eq!(" sm ".parse::<Breakpoint>(), Ok(Breakpoint::Sm));
        assert!("3xl".parse::<Breakpoint>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Breakpoint::Xxl).unwrap(), "\"2xl\"");
        let bp: Breakpoint = serde_json::from_str("\"lg\"").unwrap();
        assert_eq!(bp, Breakpoint::Lg);
    }
}
