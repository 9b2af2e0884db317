//! Plain-language advice attached to a route's safety score.

/// Advice tier derived from a safety score.
///
/// # Examples
/// ```
/// use saferoute_core::SafetyAdvice;
///
/// assert_eq!(SafetyAdvice::for_score(91), SafetyAdvice::Excellent);
/// assert_eq!(SafetyAdvice::for_score(90), SafetyAdvice::Good);
/// assert_eq!(SafetyAdvice::for_score(70), SafetyAdvice::Caution);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum SafetyAdvice {
    /// Score above 90.
    Excellent,
    /// Score above 70.
    Good,
    /// Anything lower.
    Caution,
}

impl SafetyAdvice {
    /// Classify `score`.
    pub const fn for_score(score: u8) -> Self {
        if score > 90 {
            Self::Excellent
        } else if score > 70 {
            Self::Good
        } else {
            Self::Caution
        }
    }

    /// Message shown alongside the route.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => {
                "EXCELLENT CHOICE. Well lit, high foot traffic, frequent police patrols."
            }
            Self::Good => "GOOD. Mostly safe, but avoid the underpass after 10 PM.",
            Self::Caution => "CAUTION. High crime rate reported in this sector. Poor lighting.",
        }
    }
}

impl std::fmt::Display for SafetyAdvice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
