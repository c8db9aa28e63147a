//! Collision detection within one namespace.

use indexmap::IndexMap;

use crate::document::{ConfigDocument, Namespace};

/// Position of an entry: document index, then entry index within that
/// document's namespace list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef {
    pub document: usize,
    pub entry: usize,
}

/// Two or more entries of one namespace sharing a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionGroup {
    pub namespace: Namespace,
    pub name: String,
    pub members: Vec<EntryRef>,
}

/// Group the entries of `namespace` by name across all documents and keep
/// the groups with more than one member.
///
/// Groups come out in order of their first member; members are ordered by
/// document, then by position within the document.
pub fn detect(documents: &[ConfigDocument], namespace: Namespace) -> Vec<CollisionGroup> {
    let mut by_name: IndexMap<&str, Vec<EntryRef>> = IndexMap::new();

    for (document, doc) in documents.iter().enumerate() {
        for (entry, name) in doc.names(namespace).into_iter().enumerate() {
            by_name
                .entry(name)
                .or_default()
                .push(EntryRef { document, entry });
        }
    }

    by_name
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(name, members)| CollisionGroup {
            namespace,
            name: name.to_string(),
            members,
        })
        .collect()
}

/// Collision groups of every namespace, in scan order.
pub fn detect_all(documents: &[ConfigDocument]) -> Vec<CollisionGroup> {
    Namespace::ALL
        .iter()
        .flat_map(|ns| detect(documents, *ns))
        .collect()
}
