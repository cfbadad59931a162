use rust_decimal::Decimal;

use crate::entities::patient::BloodPressure;

/// Largest systolic or diastolic drift, in mmHg, that still counts as normal
pub const BLOOD_PRESSURE_TOLERANCE: i64 = 30;

/// Largest temperature drift, in degrees, that still counts as normal (1.5)
pub fn temperature_tolerance() -> Decimal {
    Decimal::new(15, 1)
}

/// Whether an observed temperature strays more than the tolerance from the baseline
pub fn temperature_deviates(baseline: Decimal, observed: Decimal) -> bool {
    // A difference too large to represent is certainly out of range
    observed
        .checked_sub(baseline)
        .map_or(true, |diff| diff.abs() > temperature_tolerance())
}

/// Whether either side of an observed blood pressure strays more than the tolerance
pub fn blood_pressure_deviates(baseline: &BloodPressure, observed: &BloodPressure) -> bool {
    let high_diff = (i64::from(observed.high) - i64::from(baseline.high)).abs();
    let low_diff = (i64::from(observed.low) - i64::from(baseline.low)).abs();

    high_diff > BLOOD_PRESSURE_TOLERANCE || low_diff > BLOOD_PRESSURE_TOLERANCE
}
