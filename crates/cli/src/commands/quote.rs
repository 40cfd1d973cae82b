//! Offline price resolution.

use rust_decimal::Decimal;
use thiserror::Error;
use wholesale_core::{CurrencyCode, PolicyError, Price, PriceQuote, QuoteError, WholesalePolicy};

/// Errors that can occur while quoting offline.
#[derive(Debug, Error)]
pub enum QuoteCommandError {
    /// The bulk values do not form a valid policy.
    #[error("{0}")]
    Policy(#[from] PolicyError),

    /// The quantity could not be priced.
    #[error("{0}")]
    Quote(#[from] QuoteError),
}

/// Resolve and log the unit price and total for `quantity` units.
///
/// # Errors
///
/// Returns `QuoteCommandError` if the bulk values are negative or the total
/// is too large to represent.
pub fn run(
    price: Decimal,
    bulk_quantity: i64,
    bulk_price: Decimal,
    quantity: i64,
) -> Result<(), QuoteCommandError> {
    let policy = WholesalePolicy::new(bulk_quantity, bulk_price)?;
    let quote = PriceQuote::for_price(price, &policy, quantity)?;

    tracing::info!("Policy: {}", policy);
    tracing::info!(
        "Unit price for {} units: {}",
        quantity,
        Price::new(quote.unit_price, CurrencyCode::default())
    );
    tracing::info!("Total: {}", Price::new(quote.total, CurrencyCode::default()));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_run_prices_valid_input() {
        assert!(run(Decimal::from(40), 10, Decimal::from(32), 12).is_ok());
        assert!(run(Decimal::from(40), 0, Decimal::from(32), 12).is_ok());
        assert!(run(Decimal::from(40), 10, Decimal::from(32), -3).is_ok());
    }

    #[test]
    fn test_run_rejects_negative_bulk_values() {
        assert!(matches!(
            run(Decimal::ONE, -1, Decimal::ONE, 1),
            Err(QuoteCommandError::Policy(_))
        ));
        assert!(matches!(
            run(Decimal::ONE, 1, Decimal::from(-1), 1),
            Err(QuoteCommandError::Policy(_))
        ));
    }

    #[test]
    fn test_run_rejects_total_too_large() {
        let err = run(
            Decimal::from(20_000_000_000_i64),
            1,
            Decimal::from(10_000_000_000_i64),
            i64::MAX,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            QuoteCommandError::Quote(QuoteError::Overflow(i64::MAX))
        ));
    }
}
