use once_cell::sync::Lazy;

use super::block::{
    Block, FaqItem, FaqProps, Quote, StatItem, StatsProps, TestimonialProps,
};

/// Templates shorter than this are topped up from [`FALLBACK_BLOCKS`].
pub const MIN_BLOCKS: usize = 5;

/// Generic filler appended, in this order, to short templates.
static FALLBACK_BLOCKS: Lazy<Vec<Block>> = Lazy::new(|| {
    vec![
        Block::Testimonial(TestimonialProps {
            id: None,
            title: Some("What our customers say".to_string()),
            quotes: vec![
                Quote {
                    text: "Working with this team was the best decision we made all year."
                        .to_string(),
                    author: "Jordan Lee".to_string(),
                    role: Some("Founder".to_string()),
                },
                Quote {
                    text: "Fast, friendly and genuinely invested in our success.".to_string(),
                    author: "Sam Patel".to_string(),
                    role: Some("Operations Lead".to_string()),
                },
            ],
        }),
        Block::Faq(FaqProps {
            id: None,
            title: "Frequently asked questions".to_string(),
            items: vec![
                FaqItem {
                    question: "How do I get started?".to_string(),
                    answer: "Reach out through the contact form and we will reply within one business day."
                        .to_string(),
                },
                FaqItem {
                    question: "Can I change my plan later?".to_string(),
                    answer: "Yes. You can upgrade or downgrade at any time.".to_string(),
                },
            ],
        }),
        Block::Stats(StatsProps {
            id: None,
            title: Some("By the numbers".to_string()),
            items: vec![
                StatItem {
                    label: "Happy clients".to_string(),
                    value: "500+".to_string(),
                },
                StatItem {
                    label: "Years in business".to_string(),
                    value: "10".to_string(),
                },
                StatItem {
                    label: "Satisfaction".to_string(),
                    value: "98%".to_string(),
                },
            ],
        }),
    ]
});

pub fn fallback_blocks() -> &'static [Block] {
    &FALLBACK_BLOCKS
}

/// Append copies of the fallback blocks until there are [`MIN_BLOCKS`] or the
/// fallbacks run out.
///
/// With three fallbacks a template starting with 0 or 1 blocks ends up with 3 or 4.
pub fn pad_blocks(mut blocks: Vec<Block>) -> Vec<Block> {
    for fallback in FALLBACK_BLOCKS.iter() {
        if blocks.len() >= MIN_BLOCKS {
            break;
        }
        blocks.push(fallback.clone());
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::template_catalog::block::TextProps;

    fn text_blocks(n: usize) -> Vec<Block> {
        (0..n)
            .map(|i| {
                Block::Text(TextProps {
                    id: None,
                    heading: None,
                    body: format!("paragraph {i}"),
                })
            })
            .collect()
    }

    #[test]
    fn test_padded_lengths() {
        let expected = [(0, 3), (1, 4), (2, 5), (3, 5), (4, 5), (5, 5), (7, 7)];
        for (n, len) in expected {
            assert_eq!(pad_blocks(text_blocks(n)).len(), len, "input of {n} blocks");
        }
    }

    #[test]
    fn test_fallbacks_are_appended_in_order() {
        let padded = pad_blocks(text_blocks(2));
        let kinds: Vec<_> = padded.iter().map(Block::kind).collect();
        assert_eq!(kinds, ["Text", "Text", "Testimonial", "Faq", "Stats"]);

        let padded = pad_blocks(text_blocks(4));
        assert_eq!(padded[4].kind(), "Testimonial");
    }

    #[test]
    fn test_padded_blocks_are_independent_copies() {
        let mut first = pad_blocks(Vec::new());
        let second = pad_blocks(Vec::new());

        if let Block::Faq(props) = &mut first[1] {
            props.title = "Edited".to_string();
            props.items.clear();
        }
        first[0].set_id("first-block-0".to_string());

        assert_eq!(second[1], fallback_blocks()[1]);
        assert_eq!(second[0].id(), None);
        assert_eq!(fallback_blocks()[0].id(), None);
    }
}
