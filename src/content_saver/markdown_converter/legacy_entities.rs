//! Numeric character entities used by the manual's code listings.
//!
//! Only the five entities below are decoded. Anything else, including other
//! numeric entities, is left untouched.

/// Fixed substitution table, entity text → literal character
const LEGACY_ENTITIES: [(&str, char); 5] = [
    ("&#034;", '"'),
    ("&#038;", '&'),
    ("&#039;", '\''),
    ("&#060;", '<'),
    ("&#062;", '>'),
];

/// Decode the legacy entities of one line.
///
/// Each table entry is replaced over the whole line, in table order, so text
/// produced by an earlier entry is seen by the later ones: `&#038;#060;`
/// becomes `<`.
#[must_use]
pub fn decode_legacy_entities(line: &str) -> String {
    if !line.contains("&#0") {
        return line.to_string();
    }

    LEGACY_ENTITIES
        .iter()
        .fold(line.to_string(), |text, (entity, ch)| {
            if text.contains(entity) {
                text.replace(entity, ch.encode_utf8(&mut [0; 4]))
            } else {
                text
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_table_entries() {
        assert_eq!(
            decode_legacy_entities("if (a &#060; b &#038;&#038; c &#062; d) puts(&#034;x&#039;s&#034;);"),
            "if (a < b && c > d) puts(\"x's\");"
        );
    }

    #[test]
    fn leaves_unknown_entities_alone() {
        assert_eq!(decode_legacy_entities("&#035; &#0; &amp;"), "&#035; &#0; &amp;");
    }

    #[test]
    fn ampersand_entity_feeds_later_entries() {
        assert_eq!(decode_legacy_entities("a &#038;#060; b"), "a < b");
        assert_eq!(decode_legacy_entities("&#038;#062;&#038;#034;"), ">&#034;");
    }
}
