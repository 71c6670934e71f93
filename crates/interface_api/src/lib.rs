//! HTTP API Layer
//!
//! REST API for billbook using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: businesses, bills, numbering preview, ledger, reports
//! - **Middleware**: JWT tenant authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent `{ error, message }` responses
//!
//! Every protected route is scoped to the business named in the token.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::postgres(pool, config);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put, delete},
    middleware as axum_middleware,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use core_kernel::HealthCheckable;
use domain_billing::{
    BillPort, BillService, CounterPort, InvoiceNumberFormat, LedgerPort, LedgerRecorder,
    NumberingAllocator,
};
use domain_business::{BusinessPort, BusinessService};
use infra_db::{PostgresBillAdapter, PostgresBusinessAdapter, PostgresLedgerAdapter, StoreSettings};

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{bills, business, health, numbers, reports, transactions};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub businesses: BusinessService,
    pub bills: BillService,
    /// Adapters probed by `/health/ready`
    pub health_checks: Arc<Vec<Arc<dyn HealthCheckable>>>,
}

impl AppState {
    /// Wires the services over the given ports
    ///
    /// Invoice numbers are padded to `config.invoice_number_width`.
    pub fn new(
        config: ApiConfig,
        businesses: Arc<dyn BusinessPort>,
        counters: Arc<dyn CounterPort>,
        bills: Arc<dyn BillPort>,
        ledger: Arc<dyn LedgerPort>,
    ) -> Self {
        let allocator = NumberingAllocator::new(counters)
            .with_format(InvoiceNumberFormat::zero_padded(config.invoice_number_width));

        Self {
            businesses: BusinessService::new(businesses),
            bills: BillService::new(allocator, bills, LedgerRecorder::new(ledger)),
            health_checks: Arc::new(Vec::new()),
            config,
        }
    }

    pub fn with_health_checks(mut self, checks: Vec<Arc<dyn HealthCheckable>>) -> Self {
        self.health_checks = Arc::new(checks);
        self
    }

    /// State backed by the PostgreSQL adapters
    pub fn postgres(pool: PgPool, config: ApiConfig) -> Self {
        let settings = StoreSettings::with_timeout(config.persistence_timeout());
        let businesses = Arc::new(PostgresBusinessAdapter::new(pool.clone(), settings));
        let bills = Arc::new(PostgresBillAdapter::new(pool.clone(), settings));
        let ledger = Arc::new(PostgresLedgerAdapter::new(pool, settings));

        let checks = vec![
            businesses.clone() as Arc<dyn HealthCheckable>,
            bills.clone() as Arc<dyn HealthCheckable>,
            ledger.clone() as Arc<dyn HealthCheckable>,
        ];

        Self::new(config, businesses.clone(), businesses, bills, ledger).with_health_checks(checks)
    }
}

/// Creates the main API router
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/v1/businesses", post(business::register_business));

    let business_routes = Router::new()
        .route("/", get(business::get_business))
        .route("/settings", put(business::update_settings))
        .route("/settings/:list", post(business::add_settings_entry))
        .route("/settings/:list/:name", delete(business::remove_settings_entry));

    let bill_routes = Router::new()
        .route("/", post(bills::create_bill).get(bills::list_bills))
        .route(
            "/:id",
            get(bills::get_bill).put(bills::update_bill).delete(bills::delete_bill),
        );

    // Protected API routes
    let api_routes = Router::new()
        .nest("/business", business_routes)
        .nest("/bills", bill_routes)
        .route("/numbers/next", get(numbers::next_numbers))
        .route("/transactions", get(transactions::list_transactions))
        .route("/reports/summary", get(reports::summary))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
