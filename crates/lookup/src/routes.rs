//! HTTP routers for the directory and ledger services.
//!
//! Every lookup answers `200`; "not found" and "bad parameters" are
//! encoded in the body as `{}` or `[]`.

use crate::directory::Directory;
use crate::ledger::Ledger;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use revenue_core::{Customer, Sale};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Body of `GET /customer/{id}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CustomerBody {
    /// The customer record.
    Found(Customer),
    /// Serialized as `{}`.
    Absent {},
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub records: usize,
}

impl Health {
    fn ok(records: usize) -> Self {
        Self {
            status: "ok".to_string(),
            records,
        }
    }
}

/// Query string of `GET /sales`. Missing parameters arrive as empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct SalesParams {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Customer directory routes.
pub fn directory_router(directory: Directory) -> Router {
    Router::new()
        .route("/customer/{id}", get(get_customer))
        .route("/customers/city/{city}", get(get_customers_by_city))
        .route("/health", get(directory_health))
        .layer(TraceLayer::new_for_http())
        .with_state(directory)
}

/// Sales ledger routes.
pub fn ledger_router(ledger: Ledger) -> Router {
    Router::new()
        .route("/sales", get(get_sales))
        .route("/health", get(ledger_health))
        .layer(TraceLayer::new_for_http())
        .with_state(ledger)
}

async fn get_customer(State(directory): State<Directory>, Path(id): Path<String>) -> Json<CustomerBody> {
    let body = match directory.lookup_by_id(&id) {
        Some(customer) => CustomerBody::Found(customer.clone()),
        None => {
            debug!(id = %id, "customer not found");
            CustomerBody::Absent {}
        }
    };
    Json(body)
}

async fn get_customers_by_city(
    State(directory): State<Directory>,
    Path(city): Path<String>,
) -> Json<Vec<Customer>> {
    let customers: Vec<Customer> = directory
        .lookup_by_city(&city)
        .into_iter()
        .cloned()
        .collect();
    debug!(city = %city, matched = customers.len(), "city lookup");
    Json(customers)
}

async fn get_sales(State(ledger): State<Ledger>, Query(params): Query<SalesParams>) -> Json<Vec<Sale>> {
    let sales: Vec<Sale> = ledger
        .query_by_date_range(&params.start_date, &params.end_date)
        .into_iter()
        .cloned()
        .collect();
    debug!(
        start = %params.start_date,
        end = %params.end_date,
        matched = sales.len(),
        "sales range query"
    );
    Json(sales)
}

async fn directory_health(State(directory): State<Directory>) -> Json<Health> {
    Json(Health::ok(directory.len()))
}

async fn ledger_health(State(ledger): State<Ledger>) -> Json<Health> {
    Json(Health::ok(ledger.len()))
}
