//! Built-in domain tables.

use super::{DomainCatalog, KindSpec};

/// Names of the built-in domains, in listing order.
pub fn builtin_names() -> &'static [&'static str] {
    &["technology", "food"]
}

/// Looks up a built-in domain catalog by name.
pub fn builtin(name: &str) -> Option<DomainCatalog> {
    match name {
        "technology" => Some(technology()),
        "food" => Some(food()),
        _ => None,
    }
}

fn kind(id: &str, label: &str, proper_noun: bool, relation_label: &str) -> KindSpec {
    KindSpec {
        id: id.to_string(),
        label: label.to_string(),
        proper_noun,
        relation_label: relation_label.to_string(),
    }
}

fn technology() -> DomainCatalog {
    DomainCatalog::new(
        "technology",
        "テクノロジー",
        vec![
            kind("field", "分野", false, "関連分野"),
            kind("technology", "技術", false, "要素技術"),
            kind("company", "企業", true, "開発企業"),
            kind("person", "人物", true, "関連人物"),
            kind("product", "製品", true, "代表的な製品"),
            kind("concept", "概念", false, "関連概念"),
        ],
    )
}

fn food() -> DomainCatalog {
    DomainCatalog::new(
        "food",
        "和食",
        vec![
            kind("dish", "料理", false, "代表的な料理"),
            kind("ingredient", "食材", false, "主な食材"),
            kind("region", "地域", true, "発祥地域"),
            kind("technique", "調理法", false, "調理法"),
            kind("concept", "概念", false, "関連概念"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_resolves() {
        for name in builtin_names() {
            let catalog = builtin(name).unwrap();
            assert_eq!(catalog.name(), *name);
            // every domain ends in a non-proper-noun coercion target
            assert!(!catalog.fallback_kind().proper_noun);
        }
    }

    #[test]
    fn test_unknown_domain_is_none() {
        assert!(builtin("astrology").is_none());
    }
}
