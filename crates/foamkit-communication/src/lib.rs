//! # FoamKit Communication
//!
//! Client for the delegated solid-model service: one `POST` per export
//! carrying the canonical layout, answered by STEP text either raw or
//! inside a small JSON wrapper.
//!
//! Every request is bounded by a timeout and can be cancelled through an
//! [`AbortHandle`]. Failures surface as [`ServiceError`] from
//! [`SolidServiceClient::request_solid`]; [`SolidServiceClient::fetch_solid`]
//! logs them and yields `None`, never a partial document.

pub mod client;
pub mod response;

pub use client::{SolidRequest, SolidServiceClient, DEFAULT_TIMEOUT};
pub use foamkit_core::ServiceError;
pub use futures_util::future::{AbortHandle, AbortRegistration};
pub use response::{parse_service_response, STEP_MAGIC};
