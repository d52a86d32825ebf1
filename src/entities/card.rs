// Card - read-only card records carried by the ledger document.
//
// Cards have no mutation path in this service; they are listed and counted
// in summaries only.

use serde::{Deserialize, Serialize};

use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    Active,
    Blocked,
    Expired,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Active => "Active",
            CardStatus::Blocked => "Blocked",
            CardStatus::Expired => "Expired",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier, e.g. "CARD001"
    pub card_id: String,

    /// Masked card number, e.g. "**** **** **** 1234"
    pub card_number: String,

    /// Scheme and kind, e.g. "Visa Debit"
    pub card_type: String,

    /// Owning account
    pub account_id: String,

    /// Expiry in MM/YYYY form
    pub expiry: String,

    pub status: CardStatus,

    /// Month-to-date spend on this card
    pub spent_this_month: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_serialization_shape() {
        let card = Card {
            card_id: "CARD001".to_string(),
            card_number: "**** **** **** 1234".to_string(),
            card_type: "Visa Debit".to_string(),
            account_id: "ACC001".to_string(),
            expiry: "12/2026".to_string(),
            status: CardStatus::Active,
            spent_this_month: Money::from_cents(125075),
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["card_number"], "**** **** **** 1234");
        assert_eq!(json["spent_this_month"], 1250.75);
        assert_eq!(json["status"], "Active");

        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }
}
