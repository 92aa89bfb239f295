//! Option analytics endpoints
//!
//! Provides the calculation endpoints:
//! - `POST /api/v1/calculate/option`: price and Greeks of a European option
//! - `POST /api/v1/calculate/payoff`: expiry profit/loss over a price grid,
//!   plus break-even and maximum profit/loss with `?summary=true`
//! - `POST /api/v1/calculate/implied-volatility`: volatility implied by a price
//!
//! Handlers own all boundary work: parsing option type and position,
//! rejecting invalid numbers, and converting volatility, rate and dividend
//! yield to fractions according to the configured [`RateUnits`].

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
    routing::post,
    Router,
};
use pricer_core::types::PricingError;
use pricer_models::analytical::{
    implied_volatility, price_option, Greeks, ImpliedVolConfig, ImpliedVolatility, PricingResult,
};
use pricer_models::instruments::{
    payoff_profile, payoff_summary, price_grid, OptionSpec, OptionType, PayoffPoint,
    PayoffSummary, Position,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::config::RateUnits;
use crate::error::ServerError;

/// Grid size used when a payoff request omits `steps`
const DEFAULT_PAYOFF_STEPS: usize = 50;

/// Option pricing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionRequest {
    /// "CALL" or "PUT", case-insensitive
    #[serde(rename = "type")]
    pub option_type: String,
    /// Underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to expiry in years
    pub maturity: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Risk-free rate
    pub risk_free_rate: f64,
    /// Continuous dividend yield
    #[serde(default)]
    pub dividend_yield: f64,
    /// "LONG" or "SHORT"; accepted for client compatibility
    #[serde(default)]
    pub position: Option<String>,
    /// Ticker of the underlying, echoed into logs only
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Option pricing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionResponse {
    /// Theoretical value
    pub price: f64,
    /// Exercise value at the current spot
    pub intrinsic_value: f64,
    /// Price in excess of intrinsic value
    pub time_value: f64,
    /// Display-unit sensitivities
    pub greeks: Greeks,
}

impl From<PricingResult> for OptionResponse {
    fn from(result: PricingResult) -> Self {
        Self {
            price: result.price,
            intrinsic_value: result.intrinsic_value,
            time_value: result.time_value,
            greeks: result.greeks,
        }
    }
}

/// Payoff profile request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffRequest {
    /// Strike price
    pub strike: f64,
    /// Premium paid or received
    pub premium: f64,
    /// "CALL" or "PUT", case-insensitive
    #[serde(rename = "type")]
    pub option_type: String,
    /// "LONG" (default) or "SHORT"
    #[serde(default)]
    pub position: Option<String>,
    /// Lowest underlying price of the grid
    pub min_price: f64,
    /// Highest underlying price of the grid
    pub max_price: f64,
    /// Number of grid points, endpoints included
    #[serde(default = "default_payoff_steps")]
    pub steps: usize,
}

fn default_payoff_steps() -> usize {
    DEFAULT_PAYOFF_STEPS
}

/// Query flags of the payoff endpoint
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PayoffQuery {
    /// Wrap the profile together with a [`PayoffSummary`]
    #[serde(default)]
    pub summary: bool,
}

/// Payoff response: the bare profile, or the profile with its summary
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PayoffResponse {
    /// Default shape, a JSON array of points
    Profile(Vec<PayoffPoint>),
    /// Returned when `summary=true`
    WithSummary {
        /// Grid points
        profile: Vec<PayoffPoint>,
        /// Break-even and extremes of the holding
        summary: PayoffSummary,
    },
}

/// Implied volatility request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpliedVolatilityRequest {
    /// "CALL" or "PUT", case-insensitive
    #[serde(rename = "type")]
    pub option_type: String,
    /// Observed option price
    pub market_price: f64,
    /// Underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to expiry in years
    pub maturity: f64,
    /// Risk-free rate
    pub risk_free_rate: f64,
    /// Continuous dividend yield
    #[serde(default)]
    pub dividend_yield: f64,
}

/// Build the calculation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/calculate/option", post(option_handler))
        .route("/api/v1/calculate/payoff", post(payoff_handler))
        .route(
            "/api/v1/calculate/implied-volatility",
            post(implied_volatility_handler),
        )
}

fn require_finite(name: &str, value: f64) -> Result<f64, ServerError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ServerError::InvalidRequest(format!(
            "{} must be a finite number",
            name
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<f64, ServerError> {
    let value = require_finite(name, value)?;
    if value < 0.0 {
        return Err(ServerError::InvalidRequest(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(value)
}

fn parse_position(position: Option<&str>) -> Result<Position, ServerError> {
    match position {
        Some(text) => Ok(text.parse()?),
        None => Ok(Position::default()),
    }
}

/// Build a validated spec with unit-normalised volatility, rate and yield
#[allow(clippy::too_many_arguments)]
fn build_spec(
    units: RateUnits,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    maturity: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
) -> Result<OptionSpec, ServerError> {
    require_non_negative("maturity", maturity)?;

    let spec = OptionSpec::new(
        spot,
        strike,
        maturity,
        units.to_fraction(volatility),
        units.to_fraction(rate),
        option_type,
    )?
    .with_dividend_yield(units.to_fraction(dividend_yield))?;

    Ok(spec)
}

/// Reject results the core could not compute
fn ensure_finite_result(result: &PricingResult) -> Result<(), ServerError> {
    let g = &result.greeks;
    let values = [
        result.price,
        result.intrinsic_value,
        result.time_value,
        g.delta,
        g.gamma,
        g.theta,
        g.vega,
        g.rho,
    ];
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(PricingError::NumericalInstability(
            "pricing produced a non-finite value".to_string(),
        )
        .into())
    }
}

/// POST /api/v1/calculate/option - Price and Greeks
async fn option_handler(
    State(state): State<AppState>,
    payload: Result<Json<OptionRequest>, JsonRejection>,
) -> Result<Json<OptionResponse>, ServerError> {
    let Json(request) = payload?;

    let option_type: OptionType = request.option_type.parse()?;
    let position = parse_position(request.position.as_deref())?;

    let spec = build_spec(
        state.config.rate_units,
        option_type,
        request.spot,
        request.strike,
        request.maturity,
        request.volatility,
        request.risk_free_rate,
        request.dividend_yield,
    )?;

    let result = price_option(&spec);
    ensure_finite_result(&result)?;

    tracing::debug!(
        symbol = request.symbol.as_deref().unwrap_or("-"),
        option_type = %option_type,
        position = %position,
        spot = spec.spot(),
        strike = spec.strike(),
        maturity = spec.maturity(),
        volatility = spec.volatility(),
        regime = ?result.regime,
        price = result.price,
        "Option priced"
    );

    Ok(Json(result.into()))
}

/// POST /api/v1/calculate/payoff - Expiry payoff profile
async fn payoff_handler(
    State(state): State<AppState>,
    query: Result<Query<PayoffQuery>, QueryRejection>,
    payload: Result<Json<PayoffRequest>, JsonRejection>,
) -> Result<Json<PayoffResponse>, ServerError> {
    let Query(query) = query?;
    let Json(request) = payload?;

    let option_type: OptionType = request.option_type.parse()?;
    let position = parse_position(request.position.as_deref())?;

    let strike = require_finite("strike", request.strike)?;
    if strike <= 0.0 {
        return Err(ServerError::InvalidRequest(format!(
            "strike must be positive, got {}",
            strike
        )));
    }
    let premium = require_finite("premium", request.premium)?;
    let min_price = require_finite("min_price", request.min_price)?;
    let max_price = require_finite("max_price", request.max_price)?;

    if min_price > max_price {
        return Err(ServerError::InvalidRequest(format!(
            "min_price ({}) must not exceed max_price ({})",
            min_price, max_price
        )));
    }

    let max_steps = state.config.max_payoff_steps;
    if request.steps > max_steps {
        return Err(ServerError::InvalidRequest(format!(
            "steps must be at most {}, got {}",
            max_steps, request.steps
        )));
    }

    let grid = price_grid(min_price, max_price, request.steps);
    let profile = payoff_profile(&grid, strike, premium, option_type, position);

    tracing::debug!(
        option_type = %option_type,
        position = %position,
        strike,
        premium,
        points = profile.len(),
        "Payoff profile computed"
    );

    let response = if query.summary {
        PayoffResponse::WithSummary {
            profile,
            summary: payoff_summary(strike, premium, option_type, position),
        }
    } else {
        PayoffResponse::Profile(profile)
    };

    Ok(Json(response))
}

/// POST /api/v1/calculate/implied-volatility - Newton-Raphson inversion
async fn implied_volatility_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImpliedVolatilityRequest>, JsonRejection>,
) -> Result<Json<ImpliedVolatility>, ServerError> {
    let Json(request) = payload?;

    let option_type: OptionType = request.option_type.parse()?;
    let market_price = require_non_negative("market_price", request.market_price)?;

    // The solver replaces the volatility with its own iterate
    let spec = build_spec(
        state.config.rate_units,
        option_type,
        request.spot,
        request.strike,
        request.maturity,
        ImpliedVolConfig::default().initial_guess,
        request.risk_free_rate,
        request.dividend_yield,
    )?;

    let iv = implied_volatility(market_price, &spec);

    if iv.converged {
        tracing::debug!(
            option_type = %option_type,
            market_price,
            volatility = iv.volatility,
            iterations = iv.iterations,
            "Implied volatility converged"
        );
    } else {
        tracing::warn!(
            option_type = %option_type,
            market_price,
            volatility = iv.volatility,
            iterations = iv.iterations,
            termination = ?iv.termination,
            "Implied volatility did not converge"
        );
    }

    Ok(Json(iv))
}
