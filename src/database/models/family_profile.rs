use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl Default for RiskTolerance {
    fn default() -> Self {
        RiskTolerance::Medium
    }
}

impl RiskTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => Err(format!("unknown risk tolerance: {other}")),
        }
    }
}

/// A persisted family financial profile.
///
/// Every descriptive field is optional: a profile may be created with only
/// part of the onboarding form filled in and completed later through
/// merge-updates or patches.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyProfile {
    pub id: i64,
    pub user_id: Option<i64>,
    pub family_size: Option<i32>,
    pub monthly_income: Option<Decimal>,
    pub monthly_expenses: Option<Decimal>,
    pub location: Option<String>,
    pub risk_tolerance: Option<RiskTolerance>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Insert shape, location already normalised.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewFamilyProfile {
    pub family_size: Option<i32>,
    pub monthly_income: Option<Decimal>,
    pub monthly_expenses: Option<Decimal>,
    pub location: Option<String>,
    pub risk_tolerance: Option<RiskTolerance>,
}
