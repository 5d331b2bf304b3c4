use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::Client;
use log::trace;

use super::{Instance, InstancePage, InstanceSource, ProviderError, Reservation};

#[async_trait]
impl InstanceSource for Client {
    async fn instance_page(
        &self,
        next_token: Option<String>,
    ) -> Result<InstancePage, ProviderError> {
        trace!("DescribeInstances, next token {:?}", next_token);

        let output = self
            .describe_instances()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| ProviderError::Other(DisplayErrorContext(&e).to_string()))?;

        let reservations = output
            .reservations()
            .iter()
            .map(|reservation| Reservation {
                instances: reservation.instances().iter().map(convert_instance).collect(),
            })
            .collect();

        Ok(InstancePage {
            reservations,
            next_token: output.next_token().map(str::to_string),
        })
    }
}

fn convert_instance(instance: &aws_sdk_ec2::types::Instance) -> Instance {
    Instance {
        instance_id: instance.instance_id().unwrap_or("-").to_string(),
        tags: instance
            .tags()
            .iter()
            .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
            .collect(),
        private_ip: instance.private_ip_address().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::{Instance as Ec2Instance, Tag};

    #[test]
    fn converts_tags_and_address() {
        let instance = Ec2Instance::builder()
            .instance_id("i-0abc")
            .private_ip_address("10.0.0.5")
            .tags(Tag::builder().key("Name").value("web1").build())
            .tags(Tag::builder().key("Env").build())
            .build();

        let converted = convert_instance(&instance);
        assert_eq!(converted.instance_id, "i-0abc");
        assert_eq!(converted.private_ip.as_deref(), Some("10.0.0.5"));
        // tags without a value are dropped
        assert_eq!(converted.tags, vec![("Name".to_string(), "web1".to_string())]);
    }
}
