//! Emoji display.

/// Characters for a unicode emoji code: hex codepoints joined by `-`
/// (`1f44d`, `1f1fa-1f1f8`). `None` if any part is not a codepoint.
pub fn unicode_glyph(code: &str) -> Option<String> {
    code.split('-')
        .map(|part| u32::from_str_radix(part, 16).ok().and_then(char::from_u32))
        .collect()
}

/// What to show for an emoji: an image URL when the code names an image
/// emoji, else the unicode characters, else `:name:`.
pub(crate) fn display(
    code: &str,
    name: &str,
    image_emoji: &std::collections::BTreeMap<String, String>,
) -> EmojiDisplay {
    if let Some(url) = image_emoji.get(code) {
        return EmojiDisplay { image_url: url.clone(), glyph: String::new() };
    }
    let glyph = unicode_glyph(code).unwrap_or_else(|| format!(":{name}:"));
    EmojiDisplay { image_url: String::new(), glyph }
}

/// Either `image_url` or `glyph` is set.
pub(crate) struct EmojiDisplay {
    pub image_url: String,
    pub glyph: String,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn decodes_sequences() {
        assert_eq!(unicode_glyph("1f44d").as_deref(), Some("\u{1f44d}"));
        assert_eq!(unicode_glyph("1f1fa-1f1f8").as_deref(), Some("\u{1f1fa}\u{1f1f8}"));
        assert_eq!(unicode_glyph("zulip"), None);
        assert_eq!(unicode_glyph("d800"), None);
    }

    #[test]
    fn image_emoji_take_precedence() {
        let images = BTreeMap::from([("42".to_owned(), "/emoji/42.png".to_owned())]);

        assert_eq!(display("42", "parrot", &images).image_url, "/emoji/42.png");
        assert_eq!(display("zulip", "zulip", &images).glyph, ":zulip:");
    }
}
