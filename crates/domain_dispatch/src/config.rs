//! Dispatch configuration

use serde::Deserialize;

/// Dispatch configuration
///
/// Defaults encode the documented policy: 50-receipt batches, a 30-minute
/// resend cooldown, and a 1-second pause between successful sends.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Maximum receipts accepted in one bulk call
    pub max_batch_size: usize,
    /// Minimum minutes before the same receipt may be re-emailed
    pub cooldown_minutes: i64,
    /// Pause between successful sends within one bulk call
    pub inter_send_delay_ms: u64,
    /// Envelope sender address
    pub from_address: String,
    /// Optional reply-to address
    pub reply_to: Option<String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 50,
            cooldown_minutes: 30,
            inter_send_delay_ms: 1000,
            from_address: "receipts@pg-manager.example".to_string(),
            reply_to: None,
        }
    }
}

impl DispatchConfig {
    /// Loads configuration from environment variables prefixed `DISPATCH_`
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("DISPATCH"))
            .build()?
            .try_deserialize()
    }

    /// Cooldown as a chrono duration
    pub fn cooldown(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cooldown_minutes)
    }

    /// Inter-send delay as a std duration
    pub fn inter_send_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.inter_send_delay_ms)
    }
}
