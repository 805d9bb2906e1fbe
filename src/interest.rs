use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Upper bound accepted for the principal, in euros. At the maximum rate and
/// term the final amount stays below [`max_amount`].
pub const MAX_PRINCIPAL_EUROS: i64 = 10_000_000_000;
/// Upper bound accepted for the annual rate, in percent.
pub const MAX_RATE_PERCENT: u32 = 100;
/// Upper bound accepted for the term, in months.
pub const MAX_TERM_MONTHS: u32 = 600;
/// Number of months shown in the compounding projection.
pub const PROJECTION_MONTHS: u32 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestCalculation {
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub term_months: u32,
    pub interest_amount: Decimal,
    pub final_amount: Decimal,
    pub monthly_interest: Decimal,
    pub yield_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionMonth {
    pub month: u32,
    pub interest: Decimal,
    pub balance: Decimal,
    pub total_interest: Decimal,
}

/// Largest value a `NUMERIC(14,2)` money column can hold.
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999_999, 2)
}

/// Round to cents, midpoint away from zero, always carrying two decimal places.
pub fn to_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Check the inputs of a deposit or calculator request.
pub fn validate(principal: Decimal, rate: Decimal, months: i64) -> Result<(), String> {
    if principal <= Decimal::ZERO {
        return Err("Principal must be greater than zero".to_string());
    }
    if principal.normalize().scale() > 2 {
        return Err("Principal must not have more than two decimal places".to_string());
    }
    if principal > Decimal::from(MAX_PRINCIPAL_EUROS) {
        return Err(format!("Principal must not exceed {MAX_PRINCIPAL_EUROS} EUR"));
    }
    if rate < Decimal::ZERO {
        return Err("Interest rate must not be negative".to_string());
    }
    if rate > Decimal::from(MAX_RATE_PERCENT) {
        return Err(format!("Interest rate must not exceed {MAX_RATE_PERCENT}%"));
    }
    if rate.normalize().scale() > 3 {
        return Err("Interest rate must not have more than three decimal places".to_string());
    }
    if months <= 0 {
        return Err("Term must be at least one month".to_string());
    }
    if months > i64::from(MAX_TERM_MONTHS) {
        return Err(format!("Term must not exceed {MAX_TERM_MONTHS} months"));
    }
    Ok(())
}

/// Simple interest for a fixed term: `principal * rate * months / 1200`.
pub fn calculate(principal: Decimal, rate: Decimal, months: u32) -> InterestCalculation {
    let term = Decimal::from(months);
    let interest_amount = to_cents(principal * rate * term / Decimal::from(1200));
    let final_amount = to_cents(principal + interest_amount);

    let monthly_interest = if months == 0 {
        Decimal::ZERO
    } else {
        to_cents(interest_amount / term)
    };
    let yield_percent = if principal.is_zero() {
        Decimal::ZERO
    } else {
        to_cents(interest_amount / principal * Decimal::ONE_HUNDRED)
    };

    InterestCalculation {
        principal,
        interest_rate: rate,
        term_months: months,
        interest_amount,
        final_amount,
        monthly_interest,
        yield_percent,
    }
}

/// Month-by-month balance when interest is compounded monthly, capped at
/// [`PROJECTION_MONTHS`] entries.
pub fn projection(principal: Decimal, rate: Decimal, months: u32) -> Vec<ProjectionMonth> {
    let monthly_rate = rate / Decimal::ONE_HUNDRED / Decimal::from(12);
    let mut balance = principal;

    (1..=months.min(PROJECTION_MONTHS))
        .map(|month| {
            let interest = balance * monthly_rate;
            balance += interest;
            ProjectionMonth {
                month,
                interest: to_cents(interest),
                balance: to_cents(balance),
                total_interest: to_cents(balance - principal),
            }
        })
        .collect()
}

/// Maturity date: `start` plus `months` calendar months. A day that does not
/// exist in the target month is clamped to that month's last day.
pub fn end_date(start: NaiveDate, months: u32) -> Result<NaiveDate, String> {
    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| "End date is out of range".to_string())
}
