//! Hierarchical listing with prefix and delimiter collapsing.

use std::collections::BTreeSet;

use super::object::S3Object;

/// Result of a bucket listing.
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    /// Individual objects, in ascending key order.
    pub objects: Vec<S3Object>,
    /// Collapsed common prefixes, deduplicated and in ascending order.
    pub common_prefixes: Vec<String>,
}

/// One entry of the merged listing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEntry<'a> {
    /// An individual object.
    Object(&'a S3Object),
    /// A collapsed group of keys.
    CommonPrefix(&'a str),
}

impl ListEntry<'_> {
    /// The name this entry is listed under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Object(obj) => &obj.key,
            Self::CommonPrefix(prefix) => prefix,
        }
    }
}

impl ListResult {
    /// Objects and common prefixes merged into one sequence, sorted by name.
    #[must_use]
    pub fn entries(&self) -> Vec<ListEntry<'_>> {
        let mut entries: Vec<_> = self
            .objects
            .iter()
            .map(ListEntry::Object)
            .chain(self.common_prefixes.iter().map(|p| ListEntry::CommonPrefix(p.as_str())))
            .collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries
    }

    /// The names of [`ListResult::entries`].
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|e| e.name().to_owned())
            .collect()
    }
}

/// List `objects` (which must already be in ascending key order).
///
/// Keys not starting with `prefix` are skipped. When `delimiter` is set, a key
/// whose remainder after the prefix contains it collapses into a common prefix
/// made of the prefix, the remainder up to the first delimiter, and the
/// delimiter itself.
///
/// An empty prefix counts as no prefix. Without a prefix the collapsed entry
/// is the key up to the first delimiter with the delimiter left off, so keys
/// `toplevel/a` and `toplevel/b` collapse to `toplevel`, not `toplevel/`.
pub fn list_objects<'a>(
    objects: impl Iterator<Item = &'a S3Object>,
    prefix: Option<&str>,
    delimiter: Option<&str>,
) -> ListResult {
    let prefix = prefix.filter(|p| !p.is_empty());
    let delimiter = delimiter.filter(|d| !d.is_empty());

    let mut result_objects = Vec::new();
    let mut common_prefixes = BTreeSet::new();

    for obj in objects {
        let remainder = match prefix {
            Some(p) => match obj.key.strip_prefix(p) {
                Some(rest) => rest,
                None => continue,
            },
            None => obj.key.as_str(),
        };

        if let Some(delim) = delimiter {
            if let Some(pos) = remainder.find(delim) {
                let cp = match prefix {
                    Some(p) => format!("{p}{}{delim}", &remainder[..pos]),
                    None => remainder[..pos].to_owned(),
                };
                common_prefixes.insert(cp);
                continue;
            }
        }

        result_objects.push(obj.clone());
    }

    ListResult {
        objects: result_objects,
        common_prefixes: common_prefixes.into_iter().collect(),
    }
}
