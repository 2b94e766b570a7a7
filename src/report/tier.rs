use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete compliance level derived from the overall percentage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    None,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Inclusive lower bounds, highest first
const THRESHOLDS: [(f64, Tier); 4] = [
    (90.0, Tier::Platinum),
    (75.0, Tier::Gold),
    (60.0, Tier::Silver),
    (40.0, Tier::Bronze),
];

impl Tier {
    /// Classify a percentage in `[0, 100]`
    pub fn classify(percentage: f64) -> Tier {
        THRESHOLDS
            .iter()
            .find(|(min, _)| percentage >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(Tier::None)
    }

    /// Display name of the tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::None => "None",
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let cases = [
            (100.0, Tier::Platinum),
            (90.0, Tier::Platinum),
            (89.9, Tier::Gold),
            (75.0, Tier::Gold),
            (74.9, Tier::Silver),
            (60.0, Tier::Silver),
            (59.9, Tier::Bronze),
            (40.0, Tier::Bronze),
            (39.9, Tier::None),
            (0.0, Tier::None),
        ];

        for (percentage, expected) in cases {
            assert_eq!(Tier::classify(percentage), expected, "at {}", percentage);
        }
    }

    #[test]
    fn test_tier_is_monotonic() {
        let mut previous = Tier::None;
        for step in 0..=1000 {
            let tier = Tier::classify(step as f64 / 10.0);
            assert!(tier >= previous, "tier dropped at {}", step as f64 / 10.0);
            previous = tier;
        }
    }

    #[test]
    fn test_tier_nan_is_none() {
        assert_eq!(Tier::classify(f64::NAN), Tier::None);
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(serde_json::to_string(&Tier::Platinum).unwrap(), "\"Platinum\"");
        assert_eq!(serde_json::to_string(&Tier::None).unwrap(), "\"None\"");
        assert_eq!(Tier::Gold.to_string(), "Gold");
    }
}
