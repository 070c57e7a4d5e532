use super::transaction_request::{
    DestinationAccount, TransactionError, TransactionKind, TransactionRequest,
};

/// Editable state of the transaction screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    pub kind: TransactionKind,
    pub amount_input: String,
    pub destination: DestinationAccount,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the current input. On success the amount field is cleared;
    /// on failure nothing changes so the user can correct it.
    pub fn submit(&mut self) -> Result<TransactionRequest, TransactionError> {
        let request = TransactionRequest::submit(self.kind, &self.amount_input, self.destination)?;
        log::info!(
            "Transaction accepted: {} {} to {}",
            request.kind,
            request.amount,
            request.destination
        );
        self.amount_input.clear();
        Ok(request)
    }
}
