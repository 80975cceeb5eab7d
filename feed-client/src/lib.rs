//! HTTP client for the blog backend: the public post feed plus the
//! authenticated endpoints (login, register, password reset, publishing).
//! Wire models mirror the backend's JSON contract; domain types come from
//! `feed-core`.

pub mod error;
pub mod http_client;
pub mod models;

pub use error::FeedClientError;
pub use http_client::{ApiClient, ImageUpload, Session};
pub use models::{ForgotPasswordRequest, LoginRequest, RegisterRequest};
