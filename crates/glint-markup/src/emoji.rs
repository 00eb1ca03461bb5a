//! Emoji shortcode replacement.
//!
//! `:name:` tokens in markup text are looked up in an [`EmojiSource`]. The
//! lookup is exact (after lowercasing); tokens that don't resolve are left as
//! written. A `-emoji` or `-text` suffix (`:warning-emoji:`) appends the
//! matching variation selector.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Maps shortcode names to glyphs.
pub trait EmojiSource: Send + Sync {
    /// Returns the glyph for `name`, without surrounding colons.
    fn lookup(&self, name: &str) -> Option<&str>;
}

/// The built-in shortcode table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEmoji;

static BUILTIN: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("+1", "👍"),
        ("art", "🎨"),
        ("books", "📚"),
        ("bug", "🐛"),
        ("check_mark", "✔"),
        ("check_mark_button", "✅"),
        ("clapping_hands", "👏"),
        ("computer", "💻"),
        ("crab", "🦀"),
        ("cross_mark", "❌"),
        ("eyes", "👀"),
        ("fire", "🔥"),
        ("gear", "⚙"),
        ("heart", "❤"),
        ("high_voltage", "⚡"),
        ("hourglass_done", "⌛"),
        ("key", "🔑"),
        ("light_bulb", "💡"),
        ("lock", "🔒"),
        ("package", "📦"),
        ("party_popper", "🎉"),
        ("performing_arts", "🎭"),
        ("pile_of_poo", "💩"),
        ("rainbow", "🌈"),
        ("red_heart", "❤"),
        ("rocket", "🚀"),
        ("smile", "😄"),
        ("smiley", "😃"),
        ("snake", "🐍"),
        ("sparkles", "✨"),
        ("star", "⭐"),
        ("thinking_face", "🤔"),
        ("thumbs_down", "👎"),
        ("thumbs_up", "👍"),
        ("thumbsup", "👍"),
        ("vampire", "🧛"),
        ("warning", "⚠"),
        ("waving_hand", "👋"),
        ("white_heavy_check_mark", "✅"),
    ]
    .into_iter()
    .collect()
});

impl EmojiSource for BuiltinEmoji {
    fn lookup(&self, name: &str) -> Option<&str> {
        BUILTIN.get(name).copied()
    }
}

impl EmojiSource for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Replaces every resolvable `:name:` token in `text`.
pub fn replace_emoji(text: &str, source: &dyn EmojiSource) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(colon) = rest.find(':') {
        out.push_str(&rest[..colon]);
        let after = &rest[colon + 1..];

        let replaced = after.find(':').and_then(|end| {
            let code = &after[..end];
            if code.is_empty() || code.contains(char::is_whitespace) {
                return None;
            }
            resolve(code, source).map(|glyph| (glyph, end))
        });

        match replaced {
            Some((glyph, end)) => {
                out.push_str(&glyph);
                rest = &after[end + 1..];
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn resolve(code: &str, source: &dyn EmojiSource) -> Option<String> {
    let code = code.to_lowercase();
    let (name, selector) = if let Some(name) = code.strip_suffix("-emoji") {
        (name, "\u{FE0F}")
    } else if let Some(name) = code.strip_suffix("-text") {
        (name, "\u{FE0E}")
    } else {
        (code.as_str(), "")
    };
    source
        .lookup(name)
        .map(|glyph| format!("{glyph}{selector}"))
}
