//! Forwards S3 upload event notifications to an SNS topic as
//! human-readable messages.

pub mod app;
pub mod client;
pub mod conf;
pub mod error;
pub mod message;
pub mod record;
