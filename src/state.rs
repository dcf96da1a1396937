//! Application state traits for dependency injection
//!
//! Handlers are generic over `HasServices`, so the same router serves the
//! production `AppState` and the in-memory state used by HTTP tests.

use crate::config::Config;
use crate::identity::IdentityProvider;
use crate::service::{
    AdminService, AuthService, BlogService, CartService, ContentService, OrderService,
    PaymentMethodService, ProductService, ProfileService, ReviewService, SellerService,
};
use crate::store::DocumentStore;
use metrics_exporter_prometheus::PrometheusHandle;

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The document store backend
    type Store: DocumentStore;
    /// The identity provider client
    type Identity: IdentityProvider;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the document store
    fn store(&self) -> &Self::Store;

    /// Get the identity provider
    fn identity(&self) -> &Self::Identity;

    fn auth_service(&self) -> &AuthService<Self::Store, Self::Identity>;

    fn profile_service(&self) -> &ProfileService<Self::Store>;

    fn seller_service(&self) -> &SellerService<Self::Store>;

    fn admin_service(&self) -> &AdminService<Self::Store>;

    fn product_service(&self) -> &ProductService<Self::Store>;

    fn cart_service(&self) -> &CartService<Self::Store>;

    fn order_service(&self) -> &OrderService<Self::Store>;

    fn payment_method_service(&self) -> &PaymentMethodService<Self::Store>;

    fn review_service(&self) -> &ReviewService<Self::Store>;

    fn blog_service(&self) -> &BlogService<Self::Store>;

    fn content_service(&self) -> &ContentService<Self::Store>;

    /// Prometheus handle, when the recorder is installed
    fn metrics_handle(&self) -> Option<&PrometheusHandle>;
}
