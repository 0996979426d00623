use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseKindError;

/// Condition class of an overall index.
///
/// | Range        | Class |
/// |--------------|-------|
/// | >= 70        | Good  |
/// | >= 40, < 70  | Fair  |
/// | < 40         | Poor  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionClass {
    Good,
    Fair,
    Poor,
}

impl ConditionClass {
    pub const ALL: [ConditionClass; 3] = [Self::Good, Self::Fair, Self::Poor];

    pub fn from_index(index: f64) -> Self {
        match index {
            i if i >= 70.0 => Self::Good,
            i if i >= 40.0 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for ConditionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}

impl FromStr for ConditionClass {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            _ => Err(ParseKindError::new("condition class", s)),
        }
    }
}

/// Maintenance urgency band of an overall index.
///
/// | Range        | Priority |
/// |--------------|----------|
/// | < 30         | Critical |
/// | >= 30, < 50  | High     |
/// | >= 50, < 70  | Medium   |
/// | >= 70        | Routine  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenancePriority {
    Critical,
    High,
    Medium,
    Routine,
}

impl MaintenancePriority {
    pub fn from_index(index: f64) -> Self {
        match index {
            i if i >= 70.0 => Self::Routine,
            i if i >= 50.0 => Self::Medium,
            i if i >= 30.0 => Self::High,
            _ => Self::Critical,
        }
    }
}

impl fmt::Display for MaintenancePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Routine => write!(f, "routine"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_class_boundaries() {
        assert_eq!(ConditionClass::from_index(100.0), ConditionClass::Good);
        assert_eq!(ConditionClass::from_index(70.0), ConditionClass::Good);
        assert_eq!(ConditionClass::from_index(69.99), ConditionClass::Fair);
        assert_eq!(ConditionClass::from_index(40.0), ConditionClass::Fair);
        assert_eq!(ConditionClass::from_index(39.99), ConditionClass::Poor);
        assert_eq!(ConditionClass::from_index(0.0), ConditionClass::Poor);
    }

    #[test]
    fn test_priority_boundaries() {
        use MaintenancePriority::{Critical, High, Medium, Routine};

        assert_eq!(MaintenancePriority::from_index(0.0), Critical);
        assert_eq!(MaintenancePriority::from_index(29.9), Critical);
        assert_eq!(MaintenancePriority::from_index(30.0), High);
        assert_eq!(MaintenancePriority::from_index(49.9), High);
        assert_eq!(MaintenancePriority::from_index(50.0), Medium);
        assert_eq!(MaintenancePriority::from_index(69.9), Medium);
        assert_eq!(MaintenancePriority::from_index(70.0), Routine);
    }

    #[test]
    fn test_parse_condition_class() {
        let poor: ConditionClass = "poor".parse().unwrap();
        let good: ConditionClass = "GOOD".parse().unwrap();
        assert_eq!(poor, ConditionClass::Poor);
        assert_eq!(good, ConditionClass::Good);
        assert!("excellent".parse::<ConditionClass>().is_err());
    }

    #[test]
    fn test_priority_orders_most_urgent_first() {
        assert!(MaintenancePriority::Critical < MaintenancePriority::High);
        assert!(MaintenancePriority::Medium < MaintenancePriority::Routine);
    }
}
