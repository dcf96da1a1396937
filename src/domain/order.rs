//! Orders, their line items, tracking history and payment transactions

use super::common::{default_one, string_enum};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

string_enum! {
    /// Fulfilment state. Any state may follow any other.
    OrderStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Packed => "packed",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
        Refunded => "refunded",
    }
}

impl OrderStatus {
    /// Counted as open work on a seller's stats
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Packed | OrderStatus::Shipped
        )
    }
}

string_enum! {
    PaymentStatus {
        Pending => "pending",
        Paid => "paid",
        Failed => "failed",
        Refunded => "refunded",
    }
}

string_enum! {
    PaymentMethod {
        Cod => "cod",
        Online => "online",
        Upi => "upi",
    }
}

impl PaymentMethod {
    /// Whether the payment is settled outside of delivery and needs a transaction record
    pub fn needs_transaction(&self) -> bool {
        !matches!(self, PaymentMethod::Cod)
    }
}

string_enum! {
    TransactionStatus {
        Pending => "pending",
        Success => "success",
        Failed => "failed",
        Refunded => "refunded",
    }
}

/// `ORD-<year>-<8 upper-case hex chars>`
pub fn order_number(year: i32) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("ORD-{}-{}", year, suffix)
}

/// `orders/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub user_id: String,
    pub seller_id: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub delivery_address: Map<String, Value>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub estimated_delivery_date: Option<String>,
    pub actual_delivery_date: Option<String>,
    pub tracking_number: Option<String>,
    pub courier_partner: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// `order_items/{id}`; name, image and price are copied at order time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub product_variant_id: Option<String>,
    pub product_name: Option<String>,
    pub product_image: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    pub created_at: String,
}

/// `order_tracking/{id}`, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTracking {
    pub id: String,
    pub order_id: String,
    pub status: OrderStatus,
    pub location: Option<String>,
    pub description: Option<String>,
    pub updated_by: String,
    pub created_at: String,
}

/// `transactions/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub order_id: String,
    pub user_id: String,
    pub transaction_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub amount: f64,
    pub status: TransactionStatus,
    pub gateway_response: Map<String, Value>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OrderItemInput {
    #[serde(default)]
    pub product_id: String,
    pub product_variant_id: Option<String>,
    #[serde(default = "default_one")]
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub total_price: Option<f64>,
    pub product_name: Option<String>,
    pub product_image: Option<String>,
}

/// Input for placing an order
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateOrderInput {
    #[serde(default)]
    pub seller_id: String,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<OrderItemInput>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub subtotal: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub delivery_fee: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub tax_amount: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub discount_amount: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub total_amount: f64,
    #[serde(default)]
    pub delivery_address: Map<String, Value>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub estimated_delivery_date: Option<String>,
    pub tracking_number: Option<String>,
    pub courier_partner: Option<String>,
    pub tracking_location: Option<String>,
    pub transaction_id: Option<String>,
    pub gateway_response: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderStatusInput {
    pub status: OrderStatus,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentUpdateInput {
    pub payment_status: PaymentStatus,
    pub transaction_status: Option<TransactionStatus>,
    pub transaction_id: Option<String>,
    pub gateway_response: Option<Map<String, Value>>,
}

/// `GET /api/orders/track?orderId=&phone=`
#[derive(Debug, Clone, Deserialize)]
pub struct TrackQuery {
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub phone: String,
}
