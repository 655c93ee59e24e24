use time::Date;

use crate::members::repo::FamilyMember;
use crate::nutrition::{age_on, estimate_calorie_goal, NutritionError, Sex};

/// Derive the calorie goal for a member profile as of `today`.
/// Runs on profile creation and on biometric edits; the stored goal never
/// drifts outside these two events.
pub fn goal_for_biometrics(
    birth_date: Date,
    sex: Sex,
    height_cm: f64,
    weight_kg: f64,
    today: Date,
) -> Result<(u32, i32), NutritionError> {
    let age = age_on(birth_date, today)?;
    let goal = estimate_calorie_goal(weight_kg, height_cm, age, sex)?;
    Ok((age, goal))
}

/// Age as displayed. Write paths reject future birth dates, so a stored
/// value that fails to resolve displays as 0 rather than erroring the view.
pub fn display_age(member: &FamilyMember, today: Date) -> u32 {
    age_on(member.birth_date, today).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn goal_is_derived_from_age_at_reference_date() {
        let today = date!(2026 - 08 - 29);
        // 30 years old on this date.
        let (age, goal) =
            goal_for_biometrics(date!(1996 - 05 - 01), Sex::Male, 175.0, 70.0, today).unwrap();
        assert_eq!(age, 30);
        assert_eq!(goal, 1649);
    }

    #[test]
    fn invalid_biometrics_refuse_a_goal() {
        let today = date!(2026 - 08 - 29);
        let err = goal_for_biometrics(date!(1996 - 05 - 01), Sex::Male, 175.0, -1.0, today);
        assert!(matches!(err, Err(NutritionError::InvalidBiometricInput(_))));
        let err = goal_for_biometrics(date!(2030 - 01 - 01), Sex::Male, 175.0, 70.0, today);
        assert!(matches!(err, Err(NutritionError::InvalidBiometricInput(_))));
    }
}
