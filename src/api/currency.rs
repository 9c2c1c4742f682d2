//! Currency Rate

use super::{get_json, ApiError};
use crate::models::RateResponse;

/// Current BGN/EUR rate, `None` if the server didn't report one
pub async fn fetch_currency_rate(url: &str) -> Result<Option<f64>, ApiError> {
    let response: RateResponse = get_json(url).await?;
    Ok(response.rate)
}
