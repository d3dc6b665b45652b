//! Static label tables for the backend views.

mod de;
mod en;
mod zh;

pub type Table = &'static [(&'static str, &'static str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Helper,
    Navigation,
}

pub const SUPPORTED: [&str; 3] = ["en", "de", "zh"];

fn table(lang: &str, group: Group) -> Option<Table> {
    match (lang, group) {
        ("en", Group::Helper) => Some(en::HELPER),
        ("en", Group::Navigation) => Some(en::NAVIGATION),
        ("de", Group::Helper) => Some(de::HELPER),
        ("de", Group::Navigation) => Some(de::NAVIGATION),
        ("zh", Group::Helper) => Some(zh::HELPER),
        // No Chinese navigation labels exist; English is used.
        _ => None,
    }
}

fn find(table: Option<Table>, key: &str) -> Option<&'static str> {
    table?.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// The label for `key`, falling back to English and then to the key itself.
pub fn translate<'k>(lang: &str, group: Group, key: &'k str) -> &'k str {
    find(table(lang, group), key)
        .or_else(|| find(table("en", group), key))
        .unwrap_or(key)
}

/// Chooses the view language: an explicit `lang` parameter, then the first supported
/// entry of `Accept-Language`, then `default`.
pub fn negotiate(explicit: Option<&str>, accept_language: Option<&str>, default: &str) -> String {
    let supported = |tag: &str| -> Option<&'static str> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default().trim();
        SUPPORTED
            .iter()
            .find(|lang| lang.eq_ignore_ascii_case(primary))
            .copied()
    };

    if let Some(lang) = explicit.and_then(supported) {
        return lang.to_string();
    }
    if let Some(lang) = accept_language.and_then(|header| {
        header
            .split(',')
            .filter_map(|part| part.split(';').next())
            .find_map(supported)
    }) {
        return lang.to_string();
    }
    default.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        assert_eq!(translate("de", Group::Helper, "Template"), "Vorlage");
        assert_eq!(translate("zh", Group::Helper, "Template"), "模板");
        assert_eq!(translate("de", Group::Navigation, "List"), "Liste");
    }

    #[test]
    fn test_translate_fallback() {
        assert_eq!(translate("zh", Group::Navigation, "List"), "List");
        assert_eq!(translate("fr", Group::Helper, "Reports"), "Reports");
        assert_eq!(translate("de", Group::Helper, "NoSuchKey"), "NoSuchKey");
    }

    #[test]
    fn test_tables_share_keys() {
        for (key, _) in en::HELPER {
            assert!(find(Some(de::HELPER), key).is_some(), "de is missing {}", key);
            assert!(find(Some(zh::HELPER), key).is_some(), "zh is missing {}", key);
        }
    }

    #[test]
    fn test_negotiate() {
        assert_eq!(negotiate(Some("de"), Some("zh-CN"), "en"), "de");
        assert_eq!(negotiate(Some("xx"), Some("fr, zh-CN;q=0.8"), "en"), "zh");
        assert_eq!(negotiate(None, Some("DE-at"), "en"), "de");
        assert_eq!(negotiate(None, None, "en"), "en");
    }
}
