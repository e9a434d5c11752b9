//! Tender API
//!
//! Async client for the tender backend: session login, tenders and bids CRUD,
//! plus the submission and status-update collaborators the form layer uses.

pub mod client;
pub mod error;
pub mod models;
pub mod submit;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use models::{Bid, Tender, User};
pub use submit::{BidSubmitter, TenderSubmitter};
