//! Error message templates. Only affects wording, never control flow.
//!
//! Placeholders use `{name}` syntax. Any template left unset in a supplied
//! dictionary falls back to the English default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// `{childId}`, `{channel}`
    ChannelUnsupported,
    /// `{childId}`, `{channel}`, `{required}`, `{available}`
    InsufficientChannelSupply,
    /// `{templateId}`, `{required}`, `{available}`
    InsufficientTemplateSupply,
    /// `{childId}`, `{templateId}`, `{required}`, `{available}`
    InsufficientNestedSupply,
    /// `{childId}`, `{error}`
    ChildFetchFailed,
    /// `{templateId}`, `{error}`
    TemplateFetchFailed,
    /// `{childId}`
    NoFuturesCredits,
    /// `{childId}`, `{required}`, `{available}`
    InsufficientFuturesCredits,
    /// `{user}`, `{error}`
    CreditsFetchFailed,
    /// `{childId}`, `{amount}`, `{editions}`
    DemandOverflow,
}

impl MessageKey {
    fn default_template(self) -> &'static str {
        match self {
            Self::ChannelUnsupported => "Child {childId} does not support {channel} editions",
            Self::InsufficientChannelSupply => {
                "Insufficient {channel} supply for child {childId}: required {required}, available {available}"
            }
            Self::InsufficientTemplateSupply => {
                "Insufficient supply for template {templateId}: required {required}, available {available}"
            }
            Self::InsufficientNestedSupply => {
                "Insufficient supply for child {childId} in template {templateId}: required {required}, available {available}"
            }
            Self::ChildFetchFailed => "Failed to fetch data for child {childId}: {error}",
            Self::TemplateFetchFailed => "Failed to fetch data for template {templateId}: {error}",
            Self::NoFuturesCredits => "No futures credits found for child {childId}",
            Self::InsufficientFuturesCredits => {
                "Insufficient futures credits for child {childId}: required {required}, available {available}"
            }
            Self::CreditsFetchFailed => "Failed to fetch futures credits for {user}: {error}",
            Self::DemandOverflow => {
                "Required amount for {childId} overflows uint256: {amount} per edition, {editions} editions"
            }
        }
    }
}

/// Localised templates keyed by message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dictionary {
    pub channel_unsupported: Option<String>,
    pub insufficient_channel_supply: Option<String>,
    pub insufficient_template_supply: Option<String>,
    pub insufficient_nested_supply: Option<String>,
    pub child_fetch_failed: Option<String>,
    pub template_fetch_failed: Option<String>,
    pub no_futures_credits: Option<String>,
    pub insufficient_futures_credits: Option<String>,
    pub credits_fetch_failed: Option<String>,
    pub demand_overflow: Option<String>,
    /// Channel names substituted for `{channel}`.
    pub digital: Option<String>,
    pub physical: Option<String>,
}

impl Dictionary {
    /// English defaults only.
    pub fn english() -> Self {
        Self::default()
    }

    pub fn template(&self, key: MessageKey) -> &str {
        let custom = match key {
            MessageKey::ChannelUnsupported => &self.channel_unsupported,
            MessageKey::InsufficientChannelSupply => &self.insufficient_channel_supply,
            MessageKey::InsufficientTemplateSupply => &self.insufficient_template_supply,
            MessageKey::InsufficientNestedSupply => &self.insufficient_nested_supply,
            MessageKey::ChildFetchFailed => &self.child_fetch_failed,
            MessageKey::TemplateFetchFailed => &self.template_fetch_failed,
            MessageKey::NoFuturesCredits => &self.no_futures_credits,
            MessageKey::InsufficientFuturesCredits => &self.insufficient_futures_credits,
            MessageKey::CreditsFetchFailed => &self.credits_fetch_failed,
            MessageKey::DemandOverflow => &self.demand_overflow,
        };
        custom.as_deref().unwrap_or_else(|| key.default_template())
    }

    pub fn channel_name(&self, channel: crate::Channel) -> &str {
        let custom = match channel {
            crate::Channel::Digital => &self.digital,
            crate::Channel::Physical => &self.physical,
        };
        custom.as_deref().unwrap_or(channel.as_str())
    }

    /// Fill `key`'s template with `args`. Unknown placeholders stay verbatim.
    pub fn format(&self, key: MessageKey, args: &[(&str, &dyn std::fmt::Display)]) -> String {
        let mut out = self.template(key).to_string();
        for (name, value) in args {
            let placeholder = format!("{{{name}}}");
            if out.contains(&placeholder) {
                out = out.replace(&placeholder, &value.to_string());
            }
        }
        out
    }
}
