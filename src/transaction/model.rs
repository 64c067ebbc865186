use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A recorded transfer intent. No ownership or signature semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    /// Any JSON number: integer, negative or fractional. Kept as received so
    /// it renders the same way in the block fingerprint.
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount: amount.into(),
        }
    }
}
