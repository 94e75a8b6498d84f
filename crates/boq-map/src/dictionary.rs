//! Header label synonyms.
//!
//! Entries are ordered. A header cell resolves to the field of the first
//! entry whose synonym it contains, so more specific labels (原価, 単価) are
//! listed ahead of the general ones they overlap with.

use boq_model::FieldKey;

const BUILTIN_SYNONYMS: &[(&str, FieldKey)] = &[
    ("原価", FieldKey::CostPrice),
    ("仕入", FieldKey::CostPrice),
    ("cost", FieldKey::CostPrice),
    ("単価", FieldKey::UnitPrice),
    ("unitprice", FieldKey::UnitPrice),
    ("price", FieldKey::UnitPrice),
    ("金額", FieldKey::Amount),
    ("合計", FieldKey::Amount),
    ("amount", FieldKey::Amount),
    ("total", FieldKey::Amount),
    ("数量", FieldKey::Quantity),
    ("quantity", FieldKey::Quantity),
    ("qty", FieldKey::Quantity),
    ("単位", FieldKey::Unit),
    ("unit", FieldKey::Unit),
    ("仕様", FieldKey::Specification),
    ("規格", FieldKey::Specification),
    ("型式", FieldKey::Specification),
    ("寸法", FieldKey::Specification),
    ("spec", FieldKey::Specification),
    ("品名", FieldKey::Name),
    ("名称", FieldKey::Name),
    ("品目", FieldKey::Name),
    ("項目", FieldKey::Name),
    ("摘要", FieldKey::Name),
    ("name", FieldKey::Name),
    ("item", FieldKey::Name),
    ("description", FieldKey::Name),
    ("分類", FieldKey::Category),
    ("区分", FieldKey::Category),
    ("工種", FieldKey::Category),
    ("カテゴリ", FieldKey::Category),
    ("category", FieldKey::Category),
];

/// Normalizes header text for matching: all whitespace (including the
/// ideographic space in labels like `名　称`) is removed and ASCII is
/// lowercased.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One synonym entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synonym {
    /// Normalized synonym text.
    pub label: String,
    pub field: FieldKey,
}

/// Ordered mapping from header label fragments to fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSynonymDictionary {
    entries: Vec<Synonym>,
}

impl Default for HeaderSynonymDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HeaderSynonymDictionary {
    /// The built-in Japanese and English labels.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_SYNONYMS
                .iter()
                .map(|(label, field)| ((*label).to_string(), *field)),
        )
    }

    /// Builds a dictionary from `(label, field)` pairs, keeping their order.
    /// Labels that normalize to nothing are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, FieldKey)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .filter_map(|(label, field)| {
                    let label = normalize_header(&label);
                    (!label.is_empty()).then_some(Synonym { label, field })
                })
                .collect(),
        }
    }

    /// Returns a dictionary where `entries` are consulted before the
    /// existing ones.
    #[must_use]
    pub fn with_priority_entries(
        self,
        entries: impl IntoIterator<Item = (String, FieldKey)>,
    ) -> Self {
        let mut merged = Self::from_entries(entries);
        merged.entries.extend(self.entries);
        merged
    }

    /// Resolves header cell text to a field.
    pub fn lookup(&self, cell_text: &str) -> Option<FieldKey> {
        let text = normalize_header(cell_text);
        if text.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| text.contains(entry.label.as_str()))
            .map(|entry| entry.field)
    }

    /// Synonyms that resolve to `field`, in lookup order.
    pub fn synonyms_for(&self, field: FieldKey) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.field == field)
            .map(|entry| entry.label.as_str())
            .collect()
    }

    pub fn entries(&self) -> &[Synonym] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
