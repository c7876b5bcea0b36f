use strum::{AsRefStr, Display};

/// Whether provider charges move real money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Test,
    Live,
}

impl PaymentMode {
    /// Stripe secret and restricted keys carry their mode in the prefix.
    /// Anything that is not a live key counts as test.
    pub fn of_stripe_key(key: &str) -> Self {
        match key.trim().split('_').take(2).collect::<Vec<_>>().as_slice() {
            ["sk" | "rk", "live"] => PaymentMode::Live,
            _ => PaymentMode::Test,
        }
    }
}
