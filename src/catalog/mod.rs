//! Domain catalogs: the closed kind vocabularies the map draws from.
//!
//! A catalog fixes everything domain-specific the pipeline needs:
//! - the allowed node kinds, in display order,
//! - the root node descriptor (created once at graph initialization),
//! - which kinds are proper-noun exempt for the language-policy filter,
//! - the default relation label per kind, used when a generated edge label
//!   is rejected or an edge has to be synthesized.

mod builtin;

pub use builtin::{builtin, builtin_names};

use serde::Serialize;

use crate::models::Node;

/// Kind id reserved for the root node of every domain.
pub const ROOT_KIND: &str = "root";

/// Relation label used when a kind has no entry of its own.
pub const DEFAULT_RELATION_LABEL: &str = "関連";

/// One kind in a domain's vocabulary.
#[derive(Debug, Clone, Serialize)]
pub struct KindSpec {
    /// Kind id as it appears on nodes (e.g. "person").
    pub id: String,
    /// Display label (e.g. "人物").
    pub label: String,
    /// Proper-noun exemption: labels of this kind pass the language-policy
    /// filter in any script (brand names, product names, person names).
    pub proper_noun: bool,
    /// Default relation label for edges pointing at nodes of this kind.
    pub relation_label: String,
}

impl KindSpec {
    fn new(id: &str, label: &str, proper_noun: bool, relation_label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            proper_noun,
            relation_label: relation_label.to_string(),
        }
    }
}

/// Descriptor for a domain's root node.
#[derive(Debug, Clone, Serialize)]
pub struct RootSpec {
    /// Root node id.
    pub id: String,
    /// Root node label (the domain's topic).
    pub label: String,
}

/// A domain's complete vocabulary.
#[derive(Debug, Clone, Serialize)]
pub struct DomainCatalog {
    name: String,
    root: RootSpec,
    kinds: Vec<KindSpec>,
}

impl DomainCatalog {
    /// Builds a catalog. The root kind is prepended to `kinds`, so callers
    /// pass only the expandable kinds; at least one is required.
    pub fn new(name: &str, root_label: &str, kinds: Vec<KindSpec>) -> Self {
        debug_assert!(!kinds.is_empty(), "a domain needs at least one kind");
        let mut all = Vec::with_capacity(kinds.len() + 1);
        all.push(KindSpec::new(
            ROOT_KIND,
            root_label,
            false,
            DEFAULT_RELATION_LABEL,
        ));
        all.extend(kinds);
        Self {
            name: name.to_string(),
            root: RootSpec {
                id: ROOT_KIND.to_string(),
                label: root_label.to_string(),
            },
            kinds: all,
        }
    }

    /// The catalog's name (e.g. "technology").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root node descriptor.
    pub fn root(&self) -> &RootSpec {
        &self.root
    }

    /// All kinds, root first, in display order.
    pub fn kinds(&self) -> &[KindSpec] {
        &self.kinds
    }

    /// Whether `kind` belongs to this domain's vocabulary.
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k.id == kind)
    }

    /// Looks up a kind's spec.
    pub fn spec(&self, kind: &str) -> Option<&KindSpec> {
        self.kinds.iter().find(|k| k.id == kind)
    }

    /// The coercion target for unknown kinds: the last non-root kind.
    pub fn fallback_kind(&self) -> &KindSpec {
        self.kinds
            .iter()
            .rev()
            .find(|k| k.id != ROOT_KIND)
            .unwrap_or(&self.kinds[0])
    }

    /// Whether labels of `kind` are proper-noun exempt. Unknown kinds are not.
    pub fn is_proper_noun(&self, kind: &str) -> bool {
        self.spec(kind).is_some_and(|k| k.proper_noun)
    }

    /// The default relation label for edges targeting nodes of `kind`.
    pub fn relation_label(&self, kind: &str) -> &str {
        self.spec(kind)
            .map(|k| k.relation_label.as_str())
            .unwrap_or(DEFAULT_RELATION_LABEL)
    }

    /// The root node this catalog seeds a graph with.
    pub fn root_node(&self) -> Node {
        Node::new(self.root.id.clone(), self.root.label.clone(), ROOT_KIND, 0)
    }
}
