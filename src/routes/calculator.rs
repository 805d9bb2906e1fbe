use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::interest::{self, InterestCalculation, ProjectionMonth};

#[derive(Deserialize)]
pub struct CalculatorRequest {
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub term_months: i64,
    pub start_date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct CalculatorResponse {
    #[serde(flatten)]
    pub calculation: InterestCalculation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub projection: Vec<ProjectionMonth>,
}

/// Preview the yield of a deposit without storing anything.
pub async fn calculate(
    _auth: AuthUser,
    JsonBody(req): JsonBody<CalculatorRequest>,
) -> Result<Json<CalculatorResponse>, AppError> {
    interest::validate(req.principal, req.interest_rate, req.term_months)
        .map_err(AppError::BadRequest)?;
    let months = req.term_months as u32;

    let end_date = req
        .start_date
        .map(|start| interest::end_date(start, months))
        .transpose()
        .map_err(AppError::BadRequest)?;

    Ok(Json(CalculatorResponse {
        calculation: interest::calculate(req.principal, req.interest_rate, months),
        end_date,
        projection: interest::projection(req.principal, req.interest_rate, months),
    }))
}
