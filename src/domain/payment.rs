//! Saved payment methods

use super::common::string_enum;
use serde::{Deserialize, Serialize};

string_enum! {
    PaymentType {
        Card => "card",
        Upi => "upi",
        Netbanking => "netbanking",
    }
}

/// `payment_methods/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPaymentMethod {
    pub id: String,
    pub user_id: String,
    pub payment_type: PaymentType,
    pub card_last_four: Option<String>,
    pub card_brand: Option<String>,
    pub upi_id: Option<String>,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddPaymentMethodInput {
    pub payment_type: PaymentType,
    pub card_last_four: Option<String>,
    pub card_brand: Option<String>,
    pub upi_id: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}
