//! Defines an _upload_, the decoded view of a single S3 event record.
//! The upload is built from the raw record delivered by the platform,
//! with the object key percent-decoded.

use crate::error::NotifyError;
use aws_lambda_events::event::s3::S3EventRecord;
use std::string::FromUtf8Error;

/// One object-storage write, as extracted from an event record.
#[derive(Debug)]
pub struct Upload {
    /// The bucket that received the object.
    pub bucket: String,

    /// The object key, percent-decoded.
    pub key: String,

    /// The object size in bytes, zero when the platform omits it.
    pub size: i64,

    /// The event timestamp, rendered as RFC 3339.
    pub event_time: String,
}

/// Decodes an object key as found in an S3 event notification. Keys
/// arrive percent-encoded with spaces delivered as `+`.
pub fn decode_key(raw: &str) -> Result<String, FromUtf8Error> {
    let spaced = raw.replace('+', " ");
    Ok(urlencoding::decode(&spaced)?.into_owned())
}

impl Upload {
    /// Builds an upload from a raw event record. Fails if the record
    /// lacks a bucket name or object key, or if the key doesn't
    /// decode to valid UTF-8.
    pub fn from_record(record: &S3EventRecord) -> Result<Self, NotifyError> {
        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .ok_or(NotifyError::MalformedRecord("bucket name"))?;
        let raw_key = record
            .s3
            .object
            .key
            .clone()
            .ok_or(NotifyError::MalformedRecord("object key"))?;
        let key = decode_key(&raw_key).map_err(|source| NotifyError::KeyDecode {
            bucket: bucket.clone(),
            key: raw_key,
            source,
        })?;
        Ok(Upload {
            bucket,
            key,
            size: record.s3.object.size.unwrap_or_default(),
            event_time: record.event_time.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lambda_events::event::s3::{S3Bucket, S3Entity, S3EventRecord, S3Object};
    use chrono::{TimeZone, Utc};

    fn record(bucket: Option<&str>, key: Option<&str>, size: i64) -> S3EventRecord {
        S3EventRecord {
            event_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            s3: S3Entity {
                bucket: S3Bucket {
                    name: bucket.map(String::from),
                    ..Default::default()
                },
                object: S3Object {
                    key: key.map(String::from),
                    size: Some(size),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn decodes_percent_encoded_keys() {
        assert_eq!(
            decode_key("folder%2Ffile%20name.txt").unwrap(),
            "folder/file name.txt"
        );
        assert_eq!(decode_key("plain-key.bin").unwrap(), "plain-key.bin");
        assert_eq!(decode_key("caf%C3%A9.txt").unwrap(), "café.txt");
    }

    #[test]
    fn decodes_plus_as_space() {
        assert_eq!(decode_key("file+name.txt").unwrap(), "file name.txt");
    }

    #[test]
    fn rejects_invalid_utf8_escapes() {
        assert!(decode_key("%FF%FE").is_err());
    }

    #[test]
    fn builds_upload_from_record() {
        let upload =
            Upload::from_record(&record(Some("my-bucket"), Some("folder%2Ffile%20name.txt"), 1024))
                .unwrap();
        assert_eq!(upload.bucket, "my-bucket");
        assert_eq!(upload.key, "folder/file name.txt");
        assert_eq!(upload.size, 1024);
        assert_eq!(upload.event_time, "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_record_without_bucket() {
        let error = Upload::from_record(&record(None, Some("key"), 0)).unwrap_err();
        assert!(matches!(error, NotifyError::MalformedRecord("bucket name")));
    }

    #[test]
    fn rejects_record_with_undecodable_key() {
        let error = Upload::from_record(&record(Some("my-bucket"), Some("%FF"), 0)).unwrap_err();
        assert!(matches!(error, NotifyError::KeyDecode { .. }));
        assert!(error.to_string().contains("my-bucket"));
        assert!(error.to_string().contains("%FF"));
    }
}
