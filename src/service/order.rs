//! Order placement, tracking and fulfilment

use super::{into_items, touch};
use crate::domain::{
    gen_id, now_iso, order_number, CreateOrderInput, Order, OrderItem, OrderStatus,
    OrderStatusInput, OrderTracking, PaymentMethod, PaymentStatus, PaymentUpdateInput,
    Transaction, TransactionStatus,
};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthContext;
use crate::policy::require_seller_owns;
use crate::store::{check_id, collections, fields, to_fields, Document, DocumentStore, Filter};
use crate::telemetry::metrics::record_order_created;
use chrono::{Datelike, Utc};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use validator::Validate;

/// Ids of a freshly placed order
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub id: String,
    pub order_number: String,
}

pub struct OrderService<D: DocumentStore> {
    store: Arc<D>,
}

impl<D: DocumentStore> OrderService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    /// Write the order, one item row per line, the first tracking row and,
    /// for prepaid methods, a pending transaction. Writes are independent.
    pub async fn create(&self, auth: &AuthContext, input: CreateOrderInput) -> Result<PlacedOrder> {
        if input.seller_id.is_empty() {
            return Err(AppError::BadRequest(
                "seller_id required (single seller per order)".to_string(),
            ));
        }
        if input.items.is_empty() {
            return Err(AppError::BadRequest("items required".to_string()));
        }
        if input.items.iter().any(|i| i.product_id.is_empty()) {
            return Err(AppError::BadRequest("Each item needs product_id".to_string()));
        }
        for item in &input.items {
            check_id(&item.product_id)?;
        }
        input.validate()?;

        let t = now_iso();
        let order = Order {
            id: gen_id(),
            order_number: order_number(Utc::now().year()),
            user_id: auth.uid.clone(),
            seller_id: input.seller_id,
            status: input.status.unwrap_or(OrderStatus::Pending),
            payment_status: input.payment_status.unwrap_or(PaymentStatus::Pending),
            payment_method: input.payment_method.unwrap_or(PaymentMethod::Cod),
            subtotal: input.subtotal,
            delivery_fee: input.delivery_fee,
            tax_amount: input.tax_amount,
            discount_amount: input.discount_amount,
            total_amount: input.total_amount,
            delivery_address: input.delivery_address,
            customer_phone: input.customer_phone,
            customer_email: input.customer_email.or_else(|| auth.email.clone()),
            notes: input.notes,
            cancellation_reason: None,
            estimated_delivery_date: input.estimated_delivery_date,
            actual_delivery_date: None,
            tracking_number: input.tracking_number,
            courier_partner: input.courier_partner,
            created_at: t.clone(),
            updated_at: t.clone(),
        };
        self.store
            .put(collections::ORDERS, &order.id, to_fields(&order)?, false)
            .await?;

        for line in input.items {
            let product = self.store.get(collections::PRODUCTS, &line.product_id).await?;
            let item = OrderItem {
                id: gen_id(),
                order_id: order.id.clone(),
                product_variant_id: line.product_variant_id,
                product_name: line.product_name.or_else(|| {
                    product
                        .as_ref()
                        .and_then(|p| p.str_field("name"))
                        .map(str::to_string)
                }),
                product_image: line.product_image.or_else(|| {
                    product
                        .as_ref()
                        .and_then(|p| p.get("images"))
                        .and_then(|v| v.get(0))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                }),
                quantity: line.quantity,
                unit_price: line
                    .unit_price
                    .or_else(|| product.as_ref().and_then(|p| p.f64_field("price")))
                    .unwrap_or(0.0),
                total_price: line.total_price.unwrap_or(0.0),
                product_id: line.product_id,
                created_at: t.clone(),
            };
            self.store
                .put(collections::ORDER_ITEMS, &item.id, to_fields(&item)?, false)
                .await?;
        }

        self.append_tracking(
            &order.id,
            order.status,
            input.tracking_location,
            Some("Order created".to_string()),
            &auth.uid,
        )
        .await?;

        if order.payment_method.needs_transaction() {
            let transaction = Transaction {
                id: gen_id(),
                order_id: order.id.clone(),
                user_id: auth.uid.clone(),
                transaction_id: input.transaction_id,
                payment_method: order.payment_method,
                amount: order.total_amount,
                status: TransactionStatus::Pending,
                gateway_response: input.gateway_response.unwrap_or_default(),
                created_at: t.clone(),
                updated_at: t,
            };
            self.store
                .put(
                    collections::TRANSACTIONS,
                    &transaction.id,
                    to_fields(&transaction)?,
                    false,
                )
                .await?;
        }

        record_order_created(order.payment_method.as_str());
        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            seller_id = %order.seller_id,
            "Order created"
        );

        Ok(PlacedOrder {
            id: order.id,
            order_number: order.order_number,
        })
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Value>> {
        self.list_where("user_id", user_id).await
    }

    pub async fn list_for_seller(&self, seller_id: &str) -> Result<Vec<Value>> {
        self.list_where("seller_id", seller_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Value>> {
        Ok(into_items(self.store.scan_all(collections::ORDERS).await?))
    }

    /// Public tracking lookup; the phone number on the order acts as the secret
    pub async fn track(&self, order_id: &str, phone: &str) -> Result<Value> {
        let order = self.find(order_id).await?;
        if order.str_field("customer_phone") != Some(phone) {
            return Err(AppError::Forbidden("Phone mismatch".to_string()));
        }

        let tracking = self.by_order(collections::ORDER_TRACKING, order_id).await?;
        Ok(json!({
            "order": order.into_value(),
            "tracking": into_items(tracking),
        }))
    }

    /// `{order, items, tracking}` for the buyer, the seller or an admin
    pub async fn details(&self, auth: &AuthContext, order_id: &str) -> Result<Value> {
        let order = self.find(order_id).await?;
        let uid = Some(auth.uid.as_str());
        if !auth.is_admin() && order.str_field("user_id") != uid && order.str_field("seller_id") != uid
        {
            return Err(AppError::Forbidden("Forbidden".to_string()));
        }

        let items = self.by_order(collections::ORDER_ITEMS, order_id).await?;
        let tracking = self.by_order(collections::ORDER_TRACKING, order_id).await?;
        Ok(json!({
            "order": order.into_value(),
            "items": into_items(items),
            "tracking": into_items(tracking),
        }))
    }

    /// Set any status and append a tracking row
    pub async fn update_status(
        &self,
        auth: &AuthContext,
        order_id: &str,
        input: OrderStatusInput,
    ) -> Result<()> {
        let order = self.find(order_id).await?;
        require_seller_owns(auth, order.str_field("seller_id"))?;

        self.store
            .put(
                collections::ORDERS,
                order_id,
                touch(fields([("status", json!(input.status))])),
                true,
            )
            .await?;
        self.append_tracking(
            order_id,
            input.status,
            input.location,
            input.description,
            &auth.uid,
        )
        .await
    }

    /// Set the order's payment status and mirror it onto its transactions
    pub async fn update_payment(
        &self,
        auth: &AuthContext,
        order_id: &str,
        input: PaymentUpdateInput,
    ) -> Result<()> {
        let order = self.find(order_id).await?;
        require_seller_owns(auth, order.str_field("seller_id"))?;

        self.store
            .put(
                collections::ORDERS,
                order_id,
                touch(fields([("payment_status", json!(input.payment_status))])),
                true,
            )
            .await?;

        let mut patch = Map::new();
        if let Some(status) = input.transaction_status {
            patch.insert("status".to_string(), json!(status));
        }
        if let Some(transaction_id) = input.transaction_id {
            patch.insert("transaction_id".to_string(), json!(transaction_id));
        }
        if let Some(gateway_response) = input.gateway_response {
            patch.insert("gateway_response".to_string(), Value::Object(gateway_response));
        }
        if patch.is_empty() {
            return Ok(());
        }

        for transaction in self.by_order(collections::TRANSACTIONS, order_id).await? {
            self.store
                .put(
                    collections::TRANSACTIONS,
                    &transaction.id,
                    touch(patch.clone()),
                    true,
                )
                .await?;
        }
        Ok(())
    }

    async fn append_tracking(
        &self,
        order_id: &str,
        status: OrderStatus,
        location: Option<String>,
        description: Option<String>,
        updated_by: &str,
    ) -> Result<()> {
        let row = OrderTracking {
            id: gen_id(),
            order_id: order_id.to_string(),
            status,
            location,
            description,
            updated_by: updated_by.to_string(),
            created_at: now_iso(),
        };
        self.store
            .put(collections::ORDER_TRACKING, &row.id, to_fields(&row)?, false)
            .await
    }

    async fn find(&self, order_id: &str) -> Result<Document> {
        self.store
            .get(collections::ORDERS, order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    async fn by_order(&self, collection: &str, order_id: &str) -> Result<Vec<Document>> {
        self.store
            .scan(collection, &[Filter::eq("order_id", order_id)])
            .await
    }

    async fn list_where(&self, field: &str, value: &str) -> Result<Vec<Value>> {
        let docs = self
            .store
            .scan(collections::ORDERS, &[Filter::eq(field, value)])
            .await?;
        Ok(into_items(docs))
    }
}
