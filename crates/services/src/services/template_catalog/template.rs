use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use ts_rs::TS;

use super::block::Block;

/// Industry vertical a template is designed for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
    EnumString, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TemplateCategory {
    Agency,
    Restaurant,
    Saas,
    Ecommerce,
    Portfolio,
    Blog,
    RealEstate,
    Fitness,
    Healthcare,
    Education,
    Nonprofit,
    Events,
    Photography,
    Legal,
    Finance,
    Travel,
    Construction,
    Beauty,
    Automotive,
    Music,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
pub struct RootProps {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
pub struct Root {
    #[serde(default)]
    pub props: RootProps,
}

/// Page document handed to the page builder: root props, ordered content, named zones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
pub struct TemplateData {
    #[serde(default)]
    pub root: Root,
    #[serde(default)]
    pub content: Vec<Block>,
    #[serde(default)]
    pub zones: BTreeMap<String, Vec<Block>>,
}

impl TemplateData {
    pub fn block_count(&self) -> usize {
        self.content.len() + self.zones.values().map(Vec::len).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: TemplateCategory,
    pub description: String,
    pub data: TemplateData,
}

/// Listing entry for the template picker
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub category: TemplateCategory,
    pub description: String,
    pub block_count: usize,
    pub font_family: Option<String>,
}

impl From<&Template> for TemplateSummary {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            category: template.category,
            description: template.description.clone(),
            block_count: template.data.block_count(),
            font_family: template.data.root.props.font_family.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CategoryCount {
    pub category: TemplateCategory,
    pub count: usize,
}
