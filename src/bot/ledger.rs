//! Shared income/expense ledger
//!
//! One ledger serves every session; totals only ever grow.

use super::error::CommandError;
use tokio::sync::Mutex;

/// Reply when an amount would push a total past the representable range
pub const AMOUNT_TOO_LARGE: &str = "That amount is too large for the ledger.";

/// Snapshot of the ledger totals
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of all logged income
    pub income: f64,
    /// Sum of all logged expenses
    pub expenses: f64,
}

impl Totals {
    /// `income - expenses`
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Process-wide accumulator of income and expenses
#[derive(Debug, Default)]
pub struct Ledger {
    totals: Mutex<Totals>,
}

impl Ledger {
    /// Empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds income and returns the new income total
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Validation` when the new total would not be a
    /// finite number; the totals are left untouched.
    pub async fn log_income(&self, amount: f64) -> Result<f64, CommandError> {
        let mut totals = self.totals.lock().await;
        totals.income = checked_total(totals.income, amount)?;
        Ok(totals.income)
    }

    /// Adds an expense and returns the new expense total
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Validation` when the new total would not be a
    /// finite number; the totals are left untouched.
    pub async fn log_expense(&self, amount: f64) -> Result<f64, CommandError> {
        let mut totals = self.totals.lock().await;
        totals.expenses = checked_total(totals.expenses, amount)?;
        Ok(totals.expenses)
    }

    /// Current balance
    pub async fn balance(&self) -> f64 {
        self.totals.lock().await.balance()
    }

    /// Current totals
    pub async fn totals(&self) -> Totals {
        *self.totals.lock().await
    }
}

fn checked_total(total: f64, amount: f64) -> Result<f64, CommandError> {
    let sum = total + amount;
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(CommandError::validation(AMOUNT_TOO_LARGE))
    }
}

/// Parses an amount token: a finite, non-negative decimal number.
///
/// # Errors
///
/// Returns `CommandError::Validation` carrying `error_message` when the token
/// is missing or not a valid amount.
pub fn parse_amount(token: Option<&str>, error_message: &str) -> Result<f64, CommandError> {
    token
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .ok_or_else(|| CommandError::validation(error_message))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSG: &str = "Please provide a valid income amount.";

    #[tokio::test]
    async fn test_running_totals() -> Result<(), CommandError> {
        let ledger = Ledger::new();

        assert!((ledger.log_income(50.0).await? - 50.0).abs() < f64::EPSILON);
        assert!((ledger.log_income(25.0).await? - 75.0).abs() < f64::EPSILON);
        assert!((ledger.log_expense(30.0).await? - 30.0).abs() < f64::EPSILON);
        assert!((ledger.balance().await - 45.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[tokio::test]
    async fn test_overflowing_total_is_rejected() -> Result<(), CommandError> {
        let ledger = Ledger::new();

        ledger.log_income(f64::MAX).await?;
        let res = ledger.log_income(f64::MAX).await;
        assert!(matches!(&res, Err(CommandError::Validation(m)) if m == AMOUNT_TOO_LARGE));
        assert!(ledger.log_expense(f64::MAX).await.is_ok());
        assert!(ledger.log_expense(f64::MAX).await.is_err());

        let totals = ledger.totals().await;
        assert_eq!(totals.income, f64::MAX);
        assert_eq!(totals.expenses, f64::MAX);
        assert_eq!(ledger.balance().await, 0.0);
        Ok(())
    }

    #[test]
    fn test_parse_amount_accepts_decimals() -> Result<(), CommandError> {
        assert!((parse_amount(Some("12.5"), MSG)? - 12.5).abs() < f64::EPSILON);
        assert!(parse_amount(Some("0"), MSG)?.abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_parse_amount_rejects_invalid() {
        for token in [None, Some("abc"), Some("-5"), Some("nan"), Some("inf"), Some("")] {
            let res = parse_amount(token, MSG);
            assert!(
                matches!(&res, Err(CommandError::Validation(m)) if m == MSG),
                "{token:?} should be rejected, got {res:?}"
            );
        }
    }
}
