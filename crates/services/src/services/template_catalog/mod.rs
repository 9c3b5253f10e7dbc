//! Static library of page templates, one embedded JSON file per vertical.

pub mod block;
pub mod font;
pub mod padding;
pub mod process;
pub mod template;

use std::collections::HashMap;

use rust_embed::RustEmbed;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, info};

use self::{
    process::process_template,
    template::{CategoryCount, Template, TemplateCategory, TemplateSummary},
};

#[derive(RustEmbed)]
#[folder = "catalog/"]
struct CatalogAssets;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file {file} is not valid catalog JSON: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("template id {id} is defined in both {first} and {second}")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
}

/// Processed, read-only template library
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    index: HashMap<String, usize>,
}

impl TemplateCatalog {
    /// Load and process every embedded catalog file.
    pub fn load() -> Result<Self, CatalogError> {
        let mut files: Vec<_> = CatalogAssets::iter().collect();
        files.sort();

        let mut sources = Vec::with_capacity(files.len());
        for file in files {
            let Some(asset) = CatalogAssets::get(&file) else {
                continue;
            };
            let templates: Vec<Template> =
                serde_json::from_slice(&asset.data).map_err(|source| CatalogError::Parse {
                    file: file.to_string(),
                    source,
                })?;
            debug!(file = %file, count = templates.len(), "Loaded catalog file");
            sources.extend(templates.into_iter().map(|t| (file.to_string(), t)));
        }

        let catalog = Self::from_sources(sources)?;
        info!(templates = catalog.len(), "Template catalog ready");
        Ok(catalog)
    }

    /// Build a catalog from templates tagged with the file they came from.
    pub fn from_sources(
        sources: impl IntoIterator<Item = (String, Template)>,
    ) -> Result<Self, CatalogError> {
        let mut templates = Vec::new();
        let mut index = HashMap::new();
        let mut origin: HashMap<String, String> = HashMap::new();

        for (file, template) in sources {
            if let Some(first) = origin.get(&template.id) {
                return Err(CatalogError::DuplicateId {
                    id: template.id,
                    first: first.clone(),
                    second: file,
                });
            }
            origin.insert(template.id.clone(), file);
            index.insert(template.id.clone(), templates.len());
            templates.push(process_template(template));
        }

        Ok(Self { templates, index })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    pub fn by_category(&self, category: TemplateCategory) -> impl Iterator<Item = &Template> {
        self.templates
            .iter()
            .filter(move |t| t.category == category)
    }

    pub fn summaries(&self, category: Option<TemplateCategory>) -> Vec<TemplateSummary> {
        self.templates
            .iter()
            .filter(|t| category.is_none_or(|c| t.category == c))
            .map(TemplateSummary::from)
            .collect()
    }

    /// Template count for every category, including empty ones.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        TemplateCategory::iter()
            .map(|category| CategoryCount {
                category,
                count: self.by_category(category).count(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{font::FONTS, padding::MIN_BLOCKS, *};

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = TemplateCatalog::load().unwrap();
        assert!(catalog.len() >= 20);

        let covered: HashSet<_> = catalog.all().iter().map(|t| t.category).collect();
        assert_eq!(covered.len(), TemplateCategory::iter().count());
    }

    #[test]
    fn test_every_template_is_processed() {
        let catalog = TemplateCatalog::load().unwrap();
        for template in catalog.all() {
            assert!(template.data.content.len() >= MIN_BLOCKS - 2, "{}", template.id);
            let font = template.data.root.props.font_family.as_deref().unwrap();
            assert!(!font.is_empty());
            for (i, block) in template.data.content.iter().enumerate() {
                assert_eq!(block.id(), Some(format!("{}-block-{}", template.id, i).as_str()));
            }
        }
        assert!(
            catalog
                .all()
                .iter()
                .any(|t| FONTS.contains(&t.data.root.props.font_family.as_deref().unwrap()))
        );
    }

    #[test]
    fn test_shipped_templates_are_padded_to_the_minimum() {
        let catalog = TemplateCatalog::load().unwrap();

        let garage = catalog.get("automotive-garage").unwrap();
        let kinds: Vec<_> = garage.data.content.iter().map(|b| b.kind()).collect();
        assert_eq!(kinds, ["Contact", "Testimonial", "Faq", "Stats"]);

        let saas = catalog.get("saas-launch").unwrap();
        let kinds: Vec<_> = saas.data.content.iter().map(|b| b.kind()).collect();
        assert_eq!(
            kinds,
            ["Hero", "Logos", "Features", "Pricing", "Faq", "CallToAction"]
        );

        let bistro = catalog.get("restaurant-bistro").unwrap();
        assert_eq!(bistro.data.content.len(), MIN_BLOCKS);
        assert_eq!(bistro.data.content[MIN_BLOCKS - 1].kind(), "Contact");
    }

    #[test]
    fn test_lookup_and_filter() {
        let catalog = TemplateCatalog::load().unwrap();
        let agency = catalog.get("agency-creative").unwrap();
        assert_eq!(agency.category, TemplateCategory::Agency);
        assert!(catalog.get("does-not-exist").is_none());

        let restaurants = catalog.summaries(Some(TemplateCategory::Restaurant));
        assert!(!restaurants.is_empty());
        assert!(restaurants.iter().all(|s| s.category == TemplateCategory::Restaurant));

        let counts = catalog.category_counts();
        assert_eq!(counts.len(), 20);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), catalog.len());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let template = TemplateCatalog::load().unwrap().all()[0].clone();
        let err = TemplateCatalog::from_sources([
            ("a.json".to_string(), template.clone()),
            ("b.json".to_string(), template),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { second, .. } if second == "b.json"));
    }
}
