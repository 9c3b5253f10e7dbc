//! Registry of third-party apps that can be connected to the CMS dashboard.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown app: {0}")]
    UnknownApp(String),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumString, Display,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AppId {
    Stripe,
    Paypal,
    Mailchimp,
    GoogleAnalytics,
    Algolia,
    Hubspot,
    Salesforce,
    Shopify,
    Slack,
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
}

impl AppId {
    pub fn parse(value: &str) -> Result<Self, RegistryError> {
        Self::from_str(value).map_err(|_| RegistryError::UnknownApp(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AppCategory {
    Payments,
    EmailMarketing,
    Analytics,
    Search,
    Crm,
    Commerce,
    Messaging,
    Social,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Payments,
    RevenueSeries,
    Subscribers,
    Campaigns,
    Search,
    Traffic,
    Contacts,
    SocialPosts,
    Messaging,
}

/// Branding and behaviour of one app, resolved once per lookup.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct AppDescriptor {
    pub id: AppId,
    pub name: String,
    pub category: AppCategory,
    pub brand_color: String,
    pub icon: String,
    pub capabilities: Vec<Capability>,
    pub empty_state: String,
}

impl AppDescriptor {
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

fn descriptor(id: AppId) -> AppDescriptor {
    use Capability::*;

    let (name, category, brand_color, capabilities, empty_state): (_, _, _, Vec<Capability>, _) =
        match id {
            AppId::Stripe => (
                "Stripe",
                AppCategory::Payments,
                "#635BFF",
                vec![Payments, RevenueSeries],
                "No payments yet",
            ),
            AppId::Paypal => (
                "PayPal",
                AppCategory::Payments,
                "#003087",
                vec![Payments, RevenueSeries],
                "No transactions yet",
            ),
            AppId::Mailchimp => (
                "Mailchimp",
                AppCategory::EmailMarketing,
                "#FFE01B",
                vec![Subscribers, Campaigns],
                "No campaigns sent yet",
            ),
            AppId::GoogleAnalytics => (
                "Google Analytics",
                AppCategory::Analytics,
                "#E37400",
                vec![Traffic],
                "No traffic recorded yet",
            ),
            AppId::Algolia => (
                "Algolia",
                AppCategory::Search,
                "#003DFF",
                vec![Search],
                "No searches yet",
            ),
            AppId::Hubspot => (
                "HubSpot",
                AppCategory::Crm,
                "#FF7A59",
                vec![Contacts, Campaigns],
                "No contacts synced yet",
            ),
            AppId::Salesforce => (
                "Salesforce",
                AppCategory::Crm,
                "#00A1E0",
                vec![Contacts],
                "No contacts synced yet",
            ),
            AppId::Shopify => (
                "Shopify",
                AppCategory::Commerce,
                "#96BF48",
                vec![Payments, RevenueSeries],
                "No orders yet",
            ),
            AppId::Slack => (
                "Slack",
                AppCategory::Messaging,
                "#4A154B",
                vec![Messaging],
                "No notifications sent yet",
            ),
            AppId::Twitter => (
                "X (Twitter)",
                AppCategory::Social,
                "#000000",
                vec![SocialPosts],
                "No posts yet",
            ),
            AppId::Facebook => (
                "Facebook",
                AppCategory::Social,
                "#1877F2",
                vec![SocialPosts],
                "No posts yet",
            ),
            AppId::Instagram => (
                "Instagram",
                AppCategory::Social,
                "#E4405F",
                vec![SocialPosts],
                "No posts yet",
            ),
            AppId::Linkedin => (
                "LinkedIn",
                AppCategory::Social,
                "#0A66C2",
                vec![SocialPosts],
                "No posts yet",
            ),
        };

    AppDescriptor {
        id,
        name: name.to_string(),
        category,
        brand_color: brand_color.to_string(),
        icon: format!("icons/apps/{id}.svg"),
        capabilities,
        empty_state: empty_state.to_string(),
    }
}

/// Descriptors for every supported app, in display order.
#[derive(Debug, Clone)]
pub struct AppRegistry {
    apps: Vec<AppDescriptor>,
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AppRegistry {
    pub fn new() -> Self {
        Self {
            apps: AppId::iter().map(descriptor).collect(),
        }
    }

    pub fn all(&self) -> &[AppDescriptor] {
        &self.apps
    }

    pub fn get(&self, id: AppId) -> &AppDescriptor {
        // `apps` is built from `AppId::iter()`, so the discriminant is the position.
        &self.apps[id as usize]
    }

    pub fn lookup(&self, id: &str) -> Result<&AppDescriptor, RegistryError> {
        AppId::parse(id).map(|id| self.get(id))
    }
}
