//! Core traits for the carrier CIDR tracker
//!
//! This module defines the abstract interfaces the pipelines drive.
//!
//! - [`CarrierSource`]: Fetch one carrier's published gateway ranges
//! - [`MailTransport`]: Deliver a change notification
//! - [`Generator`]: Produce a consolidated output bundle

pub mod carrier_source;
pub mod generator;
pub mod mail_transport;

pub use carrier_source::CarrierSource;
pub use generator::Generator;
pub use mail_transport::{MailMessage, MailTransport};
