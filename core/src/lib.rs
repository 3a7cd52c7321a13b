//! Async client for the payment-processing REST API.
//!
//! # Overview
//! Covers login, user and payment listing, payment lookup, approval,
//! cancellation and creation. The bearer token returned by login is owned by
//! the caller and passed to every call; the client never stores it.
//!
//! # Design
//! - `PaymentClient` is the facade: presence validation, then delegation.
//! - `Transport` joins paths onto the base URL, attaches headers, encodes
//!   query or form data and classifies responses by status.
//! - The network round trip sits behind `HttpExecutor`; `ReqwestExecutor`
//!   is the default, tests plug in canned executors.
//! - Every call builds its own `HttpRequest`, so calls with different tokens
//!   can run concurrently on one client.
//!
//! ```no_run
//! use pay_core::{AuthToken, Credentials, PaymentClient};
//!
//! # async fn run() -> Result<(), pay_core::PayError> {
//! let client = PaymentClient::new("https://api.example.com")?;
//! let login = client
//!     .user_login(&Credentials::new("serious_business", "suchPassw0rdSecure"))
//!     .await?;
//! if let Some(token) = AuthToken::from_login_payload(&login) {
//!     let payments = client.get_payments(token.as_str()).await?;
//!     println!("{payments}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::PaymentClient;
pub use config::ClientConfig;
pub use error::{PayError, ValidationCode};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestData};
pub use transport::{classify, HttpExecutor, ReqwestExecutor, Transport};
pub use types::{AuthToken, Credentials, PaymentRequest};
