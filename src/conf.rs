//! Defines configuration as read from the environment.

use serde::Deserialize;

/// Default `environment` value.
fn default_environment() -> String {
    String::from("dev")
}

/// The upload notifier forwards S3 upload events to an SNS topic. The
/// configuration must be given as environment variables, read once at
/// startup.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// The ARN of the SNS topic that receives upload notifications.
    /// If omitted, events are logged and skipped without publishing
    /// anything.
    #[serde(default)]
    pub sns_topic_arn: Option<String>,

    /// A label for the deployment environment (e.g. "prod",
    /// "staging"), used only to decorate the notification subject and
    /// body.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Overrides the region resolved by the AWS SDK's default
    /// provider chain. Usually omitted on Lambda, where the ambient
    /// region applies.
    #[serde(default)]
    pub region: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_all_settings() {
        let settings: Settings = envy::from_iter([
            (
                String::from("SNS_TOPIC_ARN"),
                String::from("arn:aws:sns:us-east-1:123456789012:uploads"),
            ),
            (String::from("ENVIRONMENT"), String::from("prod")),
            (String::from("REGION"), String::from("eu-west-1")),
        ])
        .unwrap();
        assert_eq!(
            settings.sns_topic_arn.as_deref(),
            Some("arn:aws:sns:us-east-1:123456789012:uploads")
        );
        assert_eq!(settings.environment, "prod");
        assert_eq!(settings.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn applies_defaults_when_unset() {
        let settings: Settings = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert!(settings.sns_topic_arn.is_none());
        assert_eq!(settings.environment, "dev");
        assert!(settings.region.is_none());
    }
}
