use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = crate::env::expand_placeholders(&raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the quota plan table, relay TTL, or payment
    /// price mapping is invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.relay.ttl_seconds == 0 {
            anyhow::bail!("relay.ttl_seconds must be greater than 0");
        }

        if self.auth.cache_ttl_seconds == 0 {
            anyhow::bail!("auth.cache_ttl_seconds must be greater than 0");
        }

        if !self.quota.plans.contains_key(&self.quota.default_plan) {
            anyhow::bail!(
                "quota.plans must contain the default plan '{}'",
                self.quota.default_plan
            );
        }

        if let Some(ref payments) = self.payments {
            for plan in payments.prices.keys() {
                if !self.quota.plans.contains_key(plan) {
                    anyhow::bail!("payments.prices references unknown plan '{plan}'");
                }
            }
        }

        Ok(())
    }
}
