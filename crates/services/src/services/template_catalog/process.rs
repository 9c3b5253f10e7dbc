use super::{
    font::assign_font,
    padding::pad_blocks,
    template::Template,
};

/// Normalize a catalog template for display.
///
/// Pads the content to the minimum block count, gives every block an id derived
/// from the template id and its position, and assigns a font when the root has none.
pub fn process_template(mut template: Template) -> Template {
    let content = std::mem::take(&mut template.data.content);
    template.data.content = pad_blocks(content);

    for (index, block) in template.data.content.iter_mut().enumerate() {
        block.set_id(format!("{}-block-{}", template.id, index));
    }

    for (zone, blocks) in template.data.zones.iter_mut() {
        for (index, block) in blocks.iter_mut().enumerate() {
            block.set_id(format!("{}-{}-{}", template.id, zone, index));
        }
    }

    let root = &mut template.data.root.props;
    if root.font_family.is_none() {
        root.font_family = Some(assign_font(&template.id).to_string());
    }

    template
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::services::template_catalog::{
        block::{Block, FooterProps, HeroProps},
        template::{Root, RootProps, TemplateCategory, TemplateData},
    };

    fn hero(title: &str) -> Block {
        Block::Hero(HeroProps {
            id: Some("hand-written".to_string()),
            title: title.to_string(),
            subtitle: None,
            cta_label: None,
            cta_href: None,
            image_url: None,
            align: Default::default(),
        })
    }

    fn template(id: &str, content: Vec<Block>, font: Option<&str>) -> Template {
        Template {
            id: id.to_string(),
            name: "Creative Agency".to_string(),
            category: TemplateCategory::Agency,
            description: "Bold portfolio for studios".to_string(),
            data: TemplateData {
                root: Root {
                    props: RootProps {
                        font_family: font.map(str::to_string),
                        ..Default::default()
                    },
                },
                content,
                zones: BTreeMap::new(),
            },
        }
    }

    #[test]
    fn test_ids_follow_position_after_padding() {
        let processed = process_template(template(
            "agency-creative",
            vec![hero("We build brands"), hero("Selected work")],
            None,
        ));

        let ids: Vec<_> = processed.data.content.iter().map(|b| b.id().unwrap()).collect();
        assert_eq!(
            ids,
            [
                "agency-creative-block-0",
                "agency-creative-block-1",
                "agency-creative-block-2",
                "agency-creative-block-3",
                "agency-creative-block-4",
            ]
        );
    }

    #[test]
    fn test_font_assigned_only_when_missing() {
        let assigned = process_template(template("agency-creative", vec![], None));
        assert_eq!(
            assigned.data.root.props.font_family.as_deref(),
            Some("Merriweather")
        );
        assert_eq!(assigned.data.content.len(), 3);

        let explicit = process_template(template("agency-creative", vec![], Some("Lora")));
        assert_eq!(explicit.data.root.props.font_family.as_deref(), Some("Lora"));
    }

    #[test]
    fn test_zone_blocks_get_zone_scoped_ids() {
        let mut input = template("blog-journal", vec![], None);
        input.data.zones.insert(
            "footer".to_string(),
            vec![Block::Footer(FooterProps {
                id: None,
                copyright: "© Journal".to_string(),
                links: vec![],
            })],
        );

        let processed = process_template(input);
        assert_eq!(
            processed.data.zones["footer"][0].id(),
            Some("blog-journal-footer-0")
        );
    }
}
