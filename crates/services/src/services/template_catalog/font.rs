/// Fonts handed out to templates that do not pick one. Order is part of the contract.
pub const FONTS: [&str; 10] = [
    "Inter",
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Poppins",
    "Playfair Display",
    "Merriweather",
    "Raleway",
    "Nunito",
];

/// Pick a font for `template_id` from the sum of its UTF-16 code units.
///
/// Stable across runs; different ids may share a font.
pub fn assign_font(template_id: &str) -> &'static str {
    let checksum = template_id
        .encode_utf16()
        .fold(0usize, |sum, unit| sum.wrapping_add(unit as usize));
    FONTS[checksum % FONTS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_id_selects_first_font() {
        assert_eq!(assign_font(""), "Inter");
    }

    #[test]
    fn test_pinned_assignments() {
        assert_eq!(assign_font("agency-creative"), "Merriweather");
        assert_eq!(assign_font("restaurant-bistro"), "Roboto");
        assert_eq!(assign_font("saas-launch"), "Montserrat");
    }

    #[test]
    fn test_assignment_is_stable_and_in_list() {
        for id in ["agency-creative", "a", "ünïcødé-føntš", "🎉 party", "x".repeat(500).as_str()] {
            let font = assign_font(id);
            assert_eq!(font, assign_font(id));
            assert!(FONTS.contains(&font));
        }
    }

    #[test]
    fn test_non_bmp_characters_count_as_surrogate_pairs() {
        // U+1F389 is 0xD83C + 0xDF89 in UTF-16: 55356 + 57225 = 112581, 112581 % 10 = 1.
        assert_eq!(assign_font("🎉"), "Roboto");
    }
}
