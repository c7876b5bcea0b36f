use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Payment method requested by the caller of `/payment`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PaymentMethod {
    /// Always approved, no provider involved
    Demo,
    Stripe,
}

impl PaymentMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Demo => "Demo",
            PaymentMethod::Stripe => "Stripe",
        }
    }

    /// Whether charges for this method go through an external provider
    pub fn is_provider_backed(&self) -> bool {
        !matches!(self, PaymentMethod::Demo)
    }
}
