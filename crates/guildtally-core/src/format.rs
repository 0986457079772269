//! Display-name rendering for counter channels.

/// Substitution token replaced with the live count in name templates.
pub const COUNT_TOKEN: &str = "{count}";

/// Formats a count with the digit grouping customary for `locale`.
///
/// The locale tag is the two-letter language code kept on the record. Only
/// grouping is handled here; unknown locales group with a comma.
#[must_use]
pub fn format_count(count: u64, locale: &str) -> String {
    let separator = match locale {
        "de" | "it" | "es" | "pt" | "nl" | "tr" | "id" | "da" => '.',
        // Narrow no-break space, as used by French and most Slavic and
        // Nordic locales.
        "fr" | "ru" | "uk" | "cs" | "pl" | "sv" | "fi" | "nb" => '\u{202f}',
        _ => ',',
    };

    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Renders a channel name template, substituting the live count.
#[must_use]
pub fn render_name(template: &str, count: u64, locale: &str) -> String {
    template.replace(COUNT_TOKEN, &format_count(count, locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_grouping() {
        assert_eq!(format_count(0, "en"), "0");
        assert_eq!(format_count(999, "en"), "999");
        assert_eq!(format_count(1000, "en"), "1,000");
        assert_eq!(format_count(1234567, "en"), "1,234,567");
    }

    #[test]
    fn test_format_count_locales() {
        assert_eq!(format_count(1234567, "de"), "1.234.567");
        assert_eq!(format_count(1234567, "fr"), "1\u{202f}234\u{202f}567");
        // Unknown locales fall back to comma grouping.
        assert_eq!(format_count(1000, "zz"), "1,000");
    }

    #[test]
    fn test_render_name() {
        assert_eq!(render_name("All: {count}", 42, "en"), "All: 42");
        assert_eq!(render_name("Members {count}!", 1500, "de"), "Members 1.500!");
        // Templates without the token are left untouched.
        assert_eq!(render_name("Lobby", 3, "en"), "Lobby");
    }
}
