//! Defines the errors that can interrupt the handling of a single
//! upload record. Every variant that involves a known object carries
//! the bucket and key, so that logged failures can be replayed by
//! hand.

use std::string::FromUtf8Error;
use thiserror::Error;

/// An error encountered while turning one upload record into a
/// published notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The event record lacked a field the platform normally always
    /// delivers.
    #[error("upload record is missing its {0}")]
    MalformedRecord(&'static str),

    /// The percent-encoded object key didn't decode to valid UTF-8.
    #[error("failed to decode object key {key:?} from bucket {bucket:?}: {source}")]
    KeyDecode {
        bucket: String,
        key: String,
        #[source]
        source: FromUtf8Error,
    },

    /// The metadata read for the uploaded object failed.
    #[error("failed to fetch metadata for object {key:?} in bucket {bucket:?}: {reason}")]
    MetadataFetch {
        bucket: String,
        key: String,
        reason: String,
    },

    /// The publish call to the SNS topic failed.
    #[error("failed to publish notification for object {key:?} in bucket {bucket:?}: {reason}")]
    Publish {
        bucket: String,
        key: String,
        reason: String,
    },
}
