use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Please enter a valid amount.")]
    InvalidAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionKind {
    #[default]
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub const ALL: &'static [TransactionKind] =
        &[TransactionKind::Deposit, TransactionKind::Withdrawal];

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed, masked accounts a transaction can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationAccount {
    #[default]
    Savings,
    Checking,
}

impl DestinationAccount {
    pub const ALL: &'static [DestinationAccount] =
        &[DestinationAccount::Savings, DestinationAccount::Checking];

    pub fn label(&self) -> &'static str {
        match self {
            DestinationAccount::Savings => "Savings Account - ****1234",
            DestinationAccount::Checking => "Checking Account - ****5678",
        }
    }
}

impl fmt::Display for DestinationAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A finite amount strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Parse user input. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, TransactionError> {
        let value: f64 = input
            .trim()
            .parse()
            .map_err(|_| TransactionError::InvalidAmount)?;
        if !value.is_finite() || value <= 0.0 {
            return Err(TransactionError::InvalidAmount);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Validated form submission. Built, confirmed, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    pub kind: TransactionKind,
    pub amount: Amount,
    pub destination: DestinationAccount,
}

impl TransactionRequest {
    pub fn submit(
        kind: TransactionKind,
        amount_input: &str,
        destination: DestinationAccount,
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            kind,
            amount: Amount::parse(amount_input)?,
            destination,
        })
    }

    pub fn confirmation_message(&self) -> String {
        format!(
            "Transaction completed:\n\nType: {}\nAmount: ${}\nAccount: {}",
            self.kind, self.amount, self.destination
        )
    }
}
