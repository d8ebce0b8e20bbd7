//! Defines the notification message format. Composition is a pure
//! function of the upload, the optional content type, and the
//! environment label.

use crate::record::Upload;

/// A ready-to-publish notification.
#[derive(Debug)]
pub struct Notification {
    /// The message subject line.
    pub subject: String,

    /// The multi-line message body.
    pub body: String,
}

/// Composes the notification for a single upload. Values are inserted
/// verbatim; upstream data is trusted.
pub fn compose(upload: &Upload, content_type: Option<&str>, environment: &str) -> Notification {
    let subject = format!(
        "[{}] New File Upload: {}",
        environment.to_uppercase(),
        upload.key
    );
    let body = format!(
        "New file uploaded to {} environment!\n\
         \n\
         File Name: {}\n\
         Bucket: {}\n\
         Size: {} bytes\n\
         Content Type: {}\n\
         Timestamp: {}",
        environment,
        upload.key,
        upload.bucket,
        upload.size,
        content_type.unwrap_or("unknown"),
        upload.event_time,
    );
    Notification { subject, body }
}
