//! An AWS SSM Parameter Store implementation of the [`SecretStore`][super::SecretStore] trait.
use crate::secret::SecretStore;
use anyhow::anyhow;
use aws_config::SdkConfig;

#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct SsmSecretStore {
    client: aws_sdk_ssm::Client,
}

impl SsmSecretStore {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(sdk_config),
        }
    }
}

#[async_trait::async_trait]
impl SecretStore for SsmSecretStore {
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> anyhow::Result<String> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await?;
        output
            .parameter()
            .and_then(|param| param.value())
            .map(ToOwned::to_owned)
            .ok_or_else(|| anyhow!("parameter \"{name}\" has no value"))
    }
}
