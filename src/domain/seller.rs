//! Seller profiles and approval

use super::common::{now_iso, string_enum};
use super::user::UserStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

string_enum! {
    /// Seller approval gate, separate from the account role
    ApprovalStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

/// `seller_profiles/{uid}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerProfile {
    pub id: String,
    pub user_id: String,
    pub farm_name: String,
    pub farm_description: Option<String>,
    pub farm_location: Option<String>,
    pub farm_address: Option<String>,
    pub farm_size: Option<String>,
    pub certification_type: Option<String>,
    pub certification_number: Option<String>,
    pub certification_document_url: Option<String>,
    pub bank_account_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub rating: f64,
    pub total_sales: f64,
    pub total_orders: i64,
    pub is_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl SellerProfile {
    /// A profile awaiting admin approval
    pub fn pending(uid: &str, input: &SellerRegisterInput) -> Self {
        let t = now_iso();
        Self {
            id: uid.to_string(),
            user_id: uid.to_string(),
            farm_name: input.farm_name.clone(),
            farm_description: input.farm_description.clone(),
            farm_location: input.farm_location.clone(),
            farm_address: input.farm_address.clone(),
            farm_size: input.farm_size.clone(),
            certification_type: input.certification_type.clone(),
            certification_number: input.certification_number.clone(),
            certification_document_url: input.certification_document_url.clone(),
            bank_account_name: input.bank_account_name.clone(),
            bank_account_number: input.bank_account_number.clone(),
            bank_name: input.bank_name.clone(),
            ifsc_code: input.ifsc_code.clone(),
            gst_number: input.gst_number.clone(),
            pan_number: input.pan_number.clone(),
            approval_status: ApprovalStatus::Pending,
            rejection_reason: None,
            rating: 0.0,
            total_sales: 0.0,
            total_orders: 0,
            is_verified: false,
            created_at: t.clone(),
            updated_at: t,
        }
    }
}

/// Input for seller registration
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SellerRegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 2))]
    pub full_name: String,
    pub phone: Option<String>,
    #[validate(length(min = 2))]
    pub farm_name: String,
    pub farm_description: Option<String>,
    pub farm_location: Option<String>,
    pub farm_address: Option<String>,
    pub farm_size: Option<String>,
    pub certification_type: Option<String>,
    pub certification_number: Option<String>,
    pub certification_document_url: Option<String>,
    pub bank_account_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
}

/// Input for seller profile updates (merge)
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SellerProfileUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2))]
    pub farm_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_document_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,

    // Admin-only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl SellerProfileUpdateInput {
    /// Drop the fields a seller may not set on their own profile
    pub fn without_admin_fields(mut self) -> Self {
        self.approval_status = None;
        self.rejection_reason = None;
        self.is_verified = None;
        self
    }
}

/// Input for rejecting a seller
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RejectSellerInput {
    pub rejection_reason: Option<String>,
    pub reason: Option<String>,
}

impl RejectSellerInput {
    pub fn reason(self) -> Option<String> {
        self.rejection_reason.or(self.reason)
    }
}

/// Input for changing a seller's account status
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SellerStatusInput {
    pub status: UserStatus,
}

/// Per-seller dashboard figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerStats {
    pub seller_id: String,
    pub total_products: usize,
    pub active_products: usize,
    pub total_orders: usize,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub total_revenue: f64,
    pub average_rating: f64,
    pub total_reviews: usize,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerDashboardStats {
    pub products: usize,
    pub orders: usize,
}
