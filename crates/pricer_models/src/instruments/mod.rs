//! Option instrument definitions.
//!
//! This module provides the value types fed to the analytical pricer and
//! the payoff calculator:
//! - [`OptionSpec`]: validated inputs for one European option evaluation
//! - [`OptionType`] and [`Position`]: closed enums parsed at the boundary
//! - [`payoff_profile`] and [`price_grid`]: expiry profit/loss over a grid
//! - [`payoff_summary`]: break-even and maximum profit/loss of a holding
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{payoff_profile, price_grid, OptionType, Position};
//!
//! let grid = price_grid(80.0, 120.0, 41);
//! let profile = payoff_profile(&grid, 100.0, 4.5, OptionType::Put, Position::Short);
//!
//! assert_eq!(profile.len(), 41);
//! assert_eq!(profile[20].price, 100.0);
//! assert_eq!(profile[20].payoff, 4.5);
//! ```

mod error;
mod option_type;
mod payoff;
mod vanilla;

pub use error::InstrumentError;
pub use option_type::{OptionType, Position};
pub use payoff::{payoff_profile, payoff_summary, price_grid, PayoffPoint, PayoffSummary};
pub use vanilla::OptionSpec;
