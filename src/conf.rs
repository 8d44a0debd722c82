//! Defines configuration as read from the environment.

use serde::Deserialize;

/// Default `target_arn` value.
fn default_target_arn() -> String {
    String::from("arn:aws:sns:us-east-1:950816420455:POC-Topic")
}

/// The forwarder is configured to publish inserted items to a single
/// SNS topic. The configuration must be given as environment
/// variables.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// The ARN of the topic that receives every inserted item.
    #[serde(default = "default_target_arn")]
    pub target_arn: String,

    /// Overrides the endpoint used to reach SNS, e.g. to point the
    /// forwarder at a local emulator. A bare host is given an
    /// `https://` scheme.
    #[serde(default)]
    pub aws_endpoint_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            target_arn: default_target_arn(),
            aws_endpoint_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_environment_uses_fixed_topic() {
        let settings: Settings = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(
            settings.target_arn,
            "arn:aws:sns:us-east-1:950816420455:POC-Topic"
        );
        assert!(settings.aws_endpoint_url.is_none());
    }

    #[test]
    fn target_arn_can_be_overridden() {
        let settings: Settings = envy::from_iter(vec![
            (
                String::from("TARGET_ARN"),
                String::from("arn:aws:sns:eu-west-1:000000000000:Other"),
            ),
            (
                String::from("AWS_ENDPOINT_URL"),
                String::from("localhost:4566"),
            ),
        ])
        .unwrap();
        assert_eq!(settings.target_arn, "arn:aws:sns:eu-west-1:000000000000:Other");
        assert_eq!(settings.aws_endpoint_url.as_deref(), Some("localhost:4566"));
    }
}
