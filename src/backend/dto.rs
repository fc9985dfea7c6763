use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database::models::{FamilyProfile, NewFamilyProfile, RiskTolerance, User};

/// Caller-facing shape of a family profile: returned by every read and
/// accepted by `create`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyProfileDto {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub family_size: Option<i32>,
    pub monthly_income: Option<Decimal>,
    pub monthly_expenses: Option<Decimal>,
    pub location: Option<String>,
    pub risk_tolerance: Option<RiskTolerance>,
}

/// Merge-update input. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyProfileUpdate {
    pub family_size: Option<i32>,
    pub monthly_income: Option<Decimal>,
    pub monthly_expenses: Option<Decimal>,
    pub location: Option<String>,
    pub risk_tolerance: Option<RiskTolerance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub principal: String,
    pub display_name: Option<String>,
    pub is_new_user: bool,
    pub family_profile_id: Option<i64>,
}

// Trimmed, and blank counts as absent
pub fn normalize_location(location: Option<&str>) -> Option<String> {
    location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

impl From<FamilyProfile> for FamilyProfileDto {
    fn from(profile: FamilyProfile) -> Self {
        FamilyProfileDto {
            id: Some(profile.id),
            user_id: profile.user_id,
            family_size: profile.family_size,
            monthly_income: profile.monthly_income,
            monthly_expenses: profile.monthly_expenses,
            location: profile.location,
            risk_tolerance: profile.risk_tolerance,
        }
    }
}

impl From<&FamilyProfileDto> for NewFamilyProfile {
    fn from(dto: &FamilyProfileDto) -> Self {
        NewFamilyProfile {
            family_size: dto.family_size,
            monthly_income: dto.monthly_income,
            monthly_expenses: dto.monthly_expenses,
            location: normalize_location(dto.location.as_deref()),
            risk_tolerance: dto.risk_tolerance,
        }
    }
}

impl FamilyProfileUpdate {
    /// Overwrite exactly the fields present in `self`.
    pub fn merge_into(&self, existing: &mut FamilyProfile) {
        if let Some(family_size) = self.family_size {
            existing.family_size = Some(family_size);
        }
        if let Some(monthly_income) = self.monthly_income {
            existing.monthly_income = Some(monthly_income);
        }
        if let Some(monthly_expenses) = self.monthly_expenses {
            existing.monthly_expenses = Some(monthly_expenses);
        }
        if let Some(location) = normalize_location(self.location.as_deref()) {
            existing.location = Some(location);
        }
        if let Some(risk_tolerance) = self.risk_tolerance {
            existing.risk_tolerance = Some(risk_tolerance);
        }
    }
}

impl UserDto {
    pub fn new(user: User, family_profile_id: Option<i64>) -> Self {
        UserDto {
            id: user.user_id,
            principal: user.principal,
            display_name: user.display_name,
            is_new_user: user.is_new_user,
            family_profile_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn stored() -> FamilyProfile {
        let ts = NaiveDateTime::parse_from_str("2025-11-22 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        FamilyProfile {
            id: 1,
            user_id: Some(9),
            family_size: Some(3),
            monthly_income: Some(Decimal::new(500000, 2)),
            monthly_expenses: Some(Decimal::new(350000, 2)),
            location: Some("Calgary".to_string()),
            risk_tolerance: Some(RiskTolerance::Low),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut profile = stored();
        FamilyProfileUpdate::default().merge_into(&mut profile);
        assert_eq!(profile, stored());
    }

    #[test]
    fn present_fields_overwrite_and_absent_fields_stay() {
        let mut profile = stored();
        let update = FamilyProfileUpdate {
            monthly_expenses: Some(Decimal::new(275000, 2)),
            risk_tolerance: Some(RiskTolerance::High),
            ..Default::default()
        };

        update.merge_into(&mut profile);

        assert_eq!(profile.monthly_expenses, Some(Decimal::new(275000, 2)));
        assert_eq!(profile.risk_tolerance, Some(RiskTolerance::High));
        assert_eq!(profile.family_size, Some(3));
        assert_eq!(profile.monthly_income, Some(Decimal::new(500000, 2)));
        assert_eq!(profile.location.as_deref(), Some("Calgary"));
    }

    #[test]
    fn location_is_trimmed_and_blank_is_ignored() {
        let mut profile = stored();

        FamilyProfileUpdate { location: Some("   ".to_string()), ..Default::default() }.merge_into(&mut profile);
        assert_eq!(profile.location.as_deref(), Some("Calgary"));

        FamilyProfileUpdate { location: Some("  Halifax ".to_string()), ..Default::default() }
            .merge_into(&mut profile);
        assert_eq!(profile.location.as_deref(), Some("Halifax"));
    }

    #[test]
    fn update_json_uses_camel_case_and_optional_fields() {
        let update: FamilyProfileUpdate =
            serde_json::from_str(r#"{ "familySize": 4, "monthlyIncome": 1500, "riskTolerance": "MEDIUM" }"#).unwrap();

        assert_eq!(update.family_size, Some(4));
        assert_eq!(update.monthly_income, Some(Decimal::new(1500, 0)));
        assert_eq!(update.risk_tolerance, Some(RiskTolerance::Medium));
        assert_eq!(update.monthly_expenses, None);
        assert_eq!(update.location, None);
    }

    #[test]
    fn new_profile_normalizes_location() {
        let dto = FamilyProfileDto { location: Some(" ".to_string()), ..Default::default() };
        assert_eq!(NewFamilyProfile::from(&dto).location, None);

        let dto = FamilyProfileDto { location: Some(" Regina\n".to_string()), ..Default::default() };
        assert_eq!(NewFamilyProfile::from(&dto).location.as_deref(), Some("Regina"));
    }
}
