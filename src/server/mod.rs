//! Server initialization and routing

use crate::api;
use crate::config::{Config, StoreBackend};
use crate::credentials::{ServiceAccountKey, TokenSource};
use crate::identity::{FirebaseIdentityClient, IdentityProvider};
use crate::middleware::ObservabilityLayer;
use crate::service::{
    AdminService, AuthService, BlogService, CartService, ContentService, OrderService,
    PaymentMethodService, ProductService, ProfileService, ReviewService, SellerService,
};
use crate::state::HasServices;
use crate::store::{DocumentStore, FirestoreStore, MemoryStore};
use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, patch, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

struct Services<D: DocumentStore, I: IdentityProvider> {
    config: Config,
    store: Arc<D>,
    identity: Arc<I>,
    auth: AuthService<D, I>,
    profile: ProfileService<D>,
    seller: SellerService<D>,
    admin: AdminService<D>,
    product: ProductService<D>,
    cart: CartService<D>,
    order: OrderService<D>,
    payment_method: PaymentMethodService<D>,
    review: ReviewService<D>,
    blog: BlogService<D>,
    content: ContentService<D>,
    metrics_handle: Option<PrometheusHandle>,
}

/// Application state shared across handlers
pub struct AppState<D: DocumentStore, I: IdentityProvider> {
    inner: Arc<Services<D, I>>,
}

impl<D: DocumentStore, I: IdentityProvider> Clone for AppState<D, I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<D: DocumentStore, I: IdentityProvider> AppState<D, I> {
    /// Wire every service over one store and one identity provider
    pub fn new(
        config: Config,
        store: Arc<D>,
        identity: Arc<I>,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            inner: Arc::new(Services {
                auth: AuthService::new(store.clone(), identity.clone()),
                profile: ProfileService::new(store.clone()),
                seller: SellerService::new(store.clone()),
                admin: AdminService::new(store.clone()),
                product: ProductService::new(store.clone()),
                cart: CartService::new(store.clone()),
                order: OrderService::new(store.clone()),
                payment_method: PaymentMethodService::new(store.clone()),
                review: ReviewService::new(store.clone()),
                blog: BlogService::new(store.clone()),
                content: ContentService::new(store.clone()),
                config,
                store,
                identity,
                metrics_handle,
            }),
        }
    }
}

impl<D: DocumentStore, I: IdentityProvider> HasServices for AppState<D, I> {
    type Store = D;
    type Identity = I;

    fn config(&self) -> &Config {
        &self.inner.config
    }

    fn store(&self) -> &D {
        &self.inner.store
    }

    fn identity(&self) -> &I {
        &self.inner.identity
    }

    fn auth_service(&self) -> &AuthService<D, I> {
        &self.inner.auth
    }

    fn profile_service(&self) -> &ProfileService<D> {
        &self.inner.profile
    }

    fn seller_service(&self) -> &SellerService<D> {
        &self.inner.seller
    }

    fn admin_service(&self) -> &AdminService<D> {
        &self.inner.admin
    }

    fn product_service(&self) -> &ProductService<D> {
        &self.inner.product
    }

    fn cart_service(&self) -> &CartService<D> {
        &self.inner.cart
    }

    fn order_service(&self) -> &OrderService<D> {
        &self.inner.order
    }

    fn payment_method_service(&self) -> &PaymentMethodService<D> {
        &self.inner.payment_method
    }

    fn review_service(&self) -> &ReviewService<D> {
        &self.inner.review
    }

    fn blog_service(&self) -> &BlogService<D> {
        &self.inner.blog
    }

    fn content_service(&self) -> &ContentService<D> {
        &self.inner.content
    }

    fn metrics_handle(&self) -> Option<&PrometheusHandle> {
        self.inner.metrics_handle.as_ref()
    }
}

/// Run the HTTP server
pub async fn run(config: Config, metrics_handle: Option<PrometheusHandle>) -> Result<()> {
    let tokens = token_source(&config)?;
    let identity = Arc::new(FirebaseIdentityClient::new(
        config.firebase.clone(),
        tokens.clone(),
    ));
    info!(project_id = %config.firebase.project_id, "Identity provider configured");

    match config.store.backend {
        StoreBackend::Firestore => {
            let store = Arc::new(FirestoreStore::new(&config.firebase, tokens));
            info!(url = %config.firebase.firestore_url, "Using Firestore document store");
            serve(config, store, identity, metrics_handle).await
        }
        StoreBackend::Memory => {
            warn!("Using in-memory document store; data is lost on restart");
            serve(config, Arc::new(MemoryStore::new()), identity, metrics_handle).await
        }
    }
}

async fn serve<D: DocumentStore, I: IdentityProvider>(
    config: Config,
    store: Arc<D>,
    identity: Arc<I>,
    metrics_handle: Option<PrometheusHandle>,
) -> Result<()> {
    let http_addr = config.http_addr();
    let state = AppState::new(config, store, identity, metrics_handle);
    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Credentials for Google APIs: the emulators accept a static owner token,
/// everything else needs a service account
fn token_source(config: &Config) -> Result<TokenSource> {
    let firebase = &config.firebase;
    if firebase.auth_emulator || firebase.firestore_emulator {
        info!("Firebase emulator detected, using emulator credentials");
        return Ok(TokenSource::emulator());
    }

    match &firebase.service_account_path {
        Some(path) => {
            let key = ServiceAccountKey::from_file(path)?;
            TokenSource::service_account(key).context("Invalid service account key")
        }
        None if config.store.backend == StoreBackend::Memory => {
            warn!("FIREBASE_SERVICE_ACCOUNT not set; account management calls will be rejected");
            Ok(TokenSource::emulator())
        }
        None => anyhow::bail!("FIREBASE_SERVICE_ACCOUNT is required"),
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Build the HTTP router with generic state type
///
/// Generic over the state so HTTP tests run the production routes against
/// an in-memory store and a fake identity provider.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = cors_layer(&state.config().cors.allowed_origins);

    Router::new()
        .route("/health", get(api::health::health))
        .route("/metrics", get(api::metrics::metrics_handler::<S>))
        // === Auth ===
        .route("/api/auth/register", post(api::auth::register::<S>))
        .route("/api/auth/login", post(api::auth::login::<S>))
        .route("/api/auth/admin/login", post(api::auth::admin_login::<S>))
        .route(
            "/api/auth/seller/register",
            post(api::auth::seller_register::<S>),
        )
        .route("/api/auth/seller/login", post(api::auth::seller_login::<S>))
        .route("/api/auth/google", post(api::auth::google::<S>))
        .route("/api/auth/logout", post(api::auth::logout::<S>))
        .route("/api/auth/me", get(api::auth::me))
        // === Products ===
        .route(
            "/api/products",
            get(api::product::list::<S>).post(api::product::create::<S>),
        )
        .route(
            "/api/products/{id}",
            get(api::product::get::<S>)
                .put(api::product::update::<S>)
                .delete(api::product::delete::<S>),
        )
        .route(
            "/api/products/{id}/status",
            patch(api::product::set_status::<S>),
        )
        .route(
            "/api/products/{id}/variants",
            get(api::product::list_variants::<S>).post(api::product::create_variant::<S>),
        )
        .route(
            "/api/products/{id}/variants/{variant_id}",
            put(api::product::update_variant::<S>).delete(api::product::delete_variant::<S>),
        )
        // === Orders ===
        .route(
            "/api/orders",
            get(api::order::list_all::<S>).post(api::order::create::<S>),
        )
        .route("/api/orders/track", get(api::order::track::<S>))
        .route(
            "/api/orders/user/{user_id}",
            get(api::order::list_for_user::<S>),
        )
        .route(
            "/api/orders/seller/{seller_id}",
            get(api::order::list_for_seller::<S>),
        )
        .route("/api/orders/{id}", get(api::order::details::<S>))
        .route(
            "/api/orders/{id}/status",
            patch(api::order::update_status::<S>),
        )
        .route(
            "/api/orders/{id}/payment",
            patch(api::order::update_payment::<S>),
        )
        // === Blogs ===
        .route(
            "/api/blogs",
            get(api::blog::list::<S>).post(api::blog::create::<S>),
        )
        .route(
            "/api/blogs/{id}",
            get(api::blog::get::<S>)
                .put(api::blog::update::<S>)
                .delete(api::blog::delete::<S>),
        )
        .route("/api/blogs/{id}/status", patch(api::blog::set_status::<S>))
        // === Profiles ===
        .route(
            "/api/profile/{user_id}",
            get(api::profile::get::<S>).put(api::profile::update::<S>),
        )
        .route(
            "/api/profile/{user_id}/addresses",
            get(api::profile::list_addresses::<S>).post(api::profile::upsert_address::<S>),
        )
        .route(
            "/api/profile/{user_id}/addresses/{address_id}",
            axum::routing::delete(api::profile::delete_address::<S>),
        )
        // === Sellers ===
        .route(
            "/api/sellers/{seller_id}",
            get(api::seller::get_profile::<S>).put(api::seller::update_profile::<S>),
        )
        .route(
            "/api/sellers/{seller_id}/stats",
            get(api::seller::stats::<S>),
        )
        .route(
            "/api/sellers/{seller_id}/products",
            get(api::seller::products::<S>),
        )
        .route(
            "/api/sellers/{seller_id}/reviews",
            get(api::seller::reviews::<S>),
        )
        .route(
            "/api/sellers/{seller_id}/dashboard-stats",
            get(api::seller::dashboard_stats::<S>),
        )
        // === Admin ===
        .route("/api/admin/sellers", get(api::admin::list_sellers::<S>))
        .route(
            "/api/admin/sellers/{id}/approve",
            patch(api::admin::approve_seller::<S>),
        )
        .route(
            "/api/admin/sellers/{id}/reject",
            patch(api::admin::reject_seller::<S>),
        )
        .route(
            "/api/admin/sellers/{id}/status",
            patch(api::admin::set_seller_status::<S>),
        )
        .route("/api/admin/stats", get(api::admin::stats::<S>))
        // === Cart ===
        .route(
            "/api/cart/{user_id}",
            get(api::cart::list::<S>).delete(api::cart::clear::<S>),
        )
        .route(
            "/api/cart/{user_id}/items",
            post(api::cart::add_item::<S>),
        )
        .route(
            "/api/cart/{user_id}/items/{item_id}",
            put(api::cart::update_item::<S>).delete(api::cart::remove_item::<S>),
        )
        // === Payment methods ===
        .route(
            "/api/payment-methods/{user_id}",
            get(api::payment_method::list::<S>).post(api::payment_method::add::<S>),
        )
        .route(
            "/api/payment-methods/{user_id}/{method_id}",
            axum::routing::delete(api::payment_method::delete::<S>),
        )
        // === Reviews ===
        .route("/api/reviews", post(api::review::create::<S>))
        .route(
            "/api/reviews/product/{product_id}",
            get(api::review::for_product::<S>),
        )
        .route(
            "/api/reviews/seller/{seller_id}",
            get(api::review::for_seller::<S>),
        )
        // === Site content ===
        .route("/api/site-content", get(api::site_content::list::<S>))
        .route(
            "/api/site-content/{section}",
            get(api::site_content::get::<S>).put(api::site_content::put::<S>),
        )
        // === Education ===
        .route(
            "/api/education/bsf",
            get(api::education::list_bsf::<S>).put(api::education::put_bsf::<S>),
        )
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(ObservabilityLayer)
        .with_state(state)
}
