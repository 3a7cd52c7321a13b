use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const USERNAME: &str = "serious_business";
pub const PASSWORD: &str = "suchPassw0rdSecure";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Created,
    Approved,
    Cancelled,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub payee_id: String,
    pub payer_id: String,
    pub payment_system: String,
    pub payment_method: String,
    pub amount: f64,
    pub currency: String,
    pub comment: String,
    pub status: PaymentStatus,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    pub payee_id: String,
    pub payer_id: String,
    pub payment_system: String,
    pub payment_method: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub tokens: HashSet<String>,
    pub payments: HashMap<Uuid, Payment>,
}

pub type Db = Arc<RwLock<Store>>;

/// Routes carry the trailing slash the client always appends.
pub fn app() -> Router {
    let store = Store {
        users: vec![User {
            id: Uuid::new_v4(),
            username: USERNAME.to_string(),
        }],
        ..Store::default()
    };
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/authenticate/", post(authenticate))
        .route("/users/", get(list_users))
        .route("/payments/", get(list_payments).post(create_payment))
        .route("/payment/{id}/", get(get_payment))
        .route("/payments/{id}/approve/", put(approve_payment))
        .route("/payments/{id}/cancel/", put(cancel_payment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn authorize(db: &Db, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "missing bearer token"))?;
    if db.read().await.tokens.contains(token) {
        Ok(())
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "invalid token"))
    }
}

async fn authenticate(State(db): State<Db>, Form(creds): Form<Credentials>) -> Response {
    if creds.username != USERNAME || creds.password != PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "invalid credentials");
    }
    let token = Uuid::new_v4().simple().to_string();
    db.write().await.tokens.insert(token.clone());
    Json(json!({ "authToken": token })).into_response()
}

async fn list_users(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Vec<User>>, Response> {
    authorize(&db, &headers).await?;
    Ok(Json(db.read().await.users.clone()))
}

async fn list_payments(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Vec<Payment>>, Response> {
    authorize(&db, &headers).await?;
    Ok(Json(db.read().await.payments.values().cloned().collect()))
}

async fn create_payment(
    State(db): State<Db>,
    headers: HeaderMap,
    Form(input): Form<CreatePayment>,
) -> Result<(StatusCode, Json<Payment>), Response> {
    authorize(&db, &headers).await?;
    let payment = Payment {
        id: Uuid::new_v4(),
        payee_id: input.payee_id,
        payer_id: input.payer_id,
        payment_system: input.payment_system,
        payment_method: input.payment_method,
        amount: input.amount,
        currency: input.currency,
        comment: input.comment,
        status: PaymentStatus::Created,
    };
    db.write().await.payments.insert(payment.id, payment.clone());
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn get_payment(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Payment>, Response> {
    authorize(&db, &headers).await?;
    let store = db.read().await;
    Uuid::parse_str(&id)
        .ok()
        .and_then(|id| store.payments.get(&id).cloned())
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "not found"))
}

async fn approve_payment(State(db): State<Db>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    transition(db, headers, id, PaymentStatus::Approved).await
}

async fn cancel_payment(State(db): State<Db>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    transition(db, headers, id, PaymentStatus::Cancelled).await
}

/// Only payments still in `Created` can be approved or cancelled.
async fn transition(db: Db, headers: HeaderMap, id: String, to: PaymentStatus) -> Response {
    if let Err(resp) = authorize(&db, &headers).await {
        return resp;
    }
    let Ok(id) = Uuid::parse_str(&id) else {
        return error(StatusCode::NOT_FOUND, "not found");
    };
    let mut store = db.write().await;
    let Some(payment) = store.payments.get_mut(&id) else {
        return error(StatusCode::NOT_FOUND, "not found");
    };
    if payment.status != PaymentStatus::Created {
        return error(StatusCode::CONFLICT, "payment is not pending");
    }
    payment.status = to;
    StatusCode::NO_CONTENT.into_response()
}
