//! Typed page blocks. Each variant serializes as `{ "type": "<Kind>", "props": { .. } }`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "props")]
pub enum Block {
    Hero(HeroProps),
    Features(FeaturesProps),
    Testimonial(TestimonialProps),
    Faq(FaqProps),
    Stats(StatsProps),
    CallToAction(CallToActionProps),
    Pricing(PricingProps),
    Gallery(GalleryProps),
    Text(TextProps),
    Team(TeamProps),
    Contact(ContactProps),
    Menu(MenuProps),
    Schedule(ScheduleProps),
    Logos(LogosProps),
    Footer(FooterProps),
}

macro_rules! with_props {
    ($block:expr, $props:ident => $body:expr) => {
        match $block {
            Block::Hero($props) => $body,
            Block::Features($props) => $body,
            Block::Testimonial($props) => $body,
            Block::Faq($props) => $body,
            Block::Stats($props) => $body,
            Block::CallToAction($props) => $body,
            Block::Pricing($props) => $body,
            Block::Gallery($props) => $body,
            Block::Text($props) => $body,
            Block::Team($props) => $body,
            Block::Contact($props) => $body,
            Block::Menu($props) => $body,
            Block::Schedule($props) => $body,
            Block::Logos($props) => $body,
            Block::Footer($props) => $body,
        }
    };
}

impl Block {
    pub fn id(&self) -> Option<&str> {
        with_props!(self, props => props.id.as_deref())
    }

    pub fn set_id(&mut self, id: String) {
        with_props!(self, props => props.id = Some(id))
    }

    /// The `type` tag this block serializes with.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Hero(_) => "Hero",
            Block::Features(_) => "Features",
            Block::Testimonial(_) => "Testimonial",
            Block::Faq(_) => "Faq",
            Block::Stats(_) => "Stats",
            Block::CallToAction(_) => "CallToAction",
            Block::Pricing(_) => "Pricing",
            Block::Gallery(_) => "Gallery",
            Block::Text(_) => "Text",
            Block::Team(_) => "Team",
            Block::Contact(_) => "Contact",
            Block::Menu(_) => "Menu",
            Block::Schedule(_) => "Schedule",
            Block::Logos(_) => "Logos",
            Block::Footer(_) => "Footer",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct HeroProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_href: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub align: Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct FeaturesProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default = "default_columns")]
    pub columns: u8,
    #[serde(default)]
    pub items: Vec<FeatureItem>,
}

fn default_columns() -> u8 {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Quote {
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TestimonialProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct FaqProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct StatItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct StatsProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<StatItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CallToActionProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub button_label: String,
    pub button_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct PricingProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub plans: Vec<PricingPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct GalleryProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_columns")]
    pub columns: u8,
    #[serde(default)]
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TextProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TeamProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ContactProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub show_form: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct MenuItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct MenuSection {
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct MenuProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<MenuSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ScheduleEntry {
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ScheduleProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct LogosProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub logos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct FooterProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub copyright: String,
    #[serde(default)]
    pub links: Vec<FooterLink>,
}
