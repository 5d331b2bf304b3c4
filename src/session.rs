use aws_config::{BehaviorVersion, Region, SdkConfig};
use log::debug;

/// Route 53 is a global service; any region resolves its endpoint.
const ROUTE53_FALLBACK_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Named profile from the shared AWS config files, default chain if unset
    pub profile: Option<String>,
    pub region: Option<String>,
}

/// Resolved AWS configuration that hands out service clients.
///
/// Credentials are resolved lazily, so a bad profile only shows up on the
/// first request.
pub struct Session {
    sdk_config: SdkConfig,
}

impl Session {
    pub async fn load(config: &SessionConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile.clone());
        }
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        let sdk_config = loader.load().await;
        debug!(
            "AWS session loaded (profile: {}, region: {})",
            config.profile.as_deref().unwrap_or("default"),
            sdk_config.region().map(|r| r.as_ref()).unwrap_or("-")
        );

        Self { sdk_config }
    }

    pub fn region(&self) -> Option<&Region> {
        self.sdk_config.region()
    }

    pub fn ec2(&self) -> aws_sdk_ec2::Client {
        aws_sdk_ec2::Client::new(&self.sdk_config)
    }

    pub fn route53(&self) -> aws_sdk_route53::Client {
        let mut builder = aws_sdk_route53::config::Builder::from(&self.sdk_config);
        if self.region().is_none() {
            builder = builder.region(Region::from_static(ROUTE53_FALLBACK_REGION));
        }
        aws_sdk_route53::Client::from_conf(builder.build())
    }
}
