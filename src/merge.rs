//! Flattening of resolved documents into one kubeconfig.

use std::path::Path;

use kcm_kubeconfig::KubeConfig;

use crate::document::ConfigDocument;

/// Concatenate the clusters, users and contexts of every document, in input
/// order, under a fresh `v1`/`Config` header.
///
/// Expects collision-free input (see [`crate::resolve::resolve`]); nothing is
/// validated here. The result carries no `current-context`.
pub fn merge(documents: &[ConfigDocument]) -> KubeConfig {
    documents.iter().fold(KubeConfig::empty(), |mut merged, doc| {
        merged.clusters.extend(doc.config.clusters.iter().cloned());
        merged.users.extend(doc.config.users.iter().cloned());
        merged.contexts.extend(doc.config.contexts.iter().cloned());
        merged
    })
}

/// Like [`merge`], and also carries over a `current-context`.
///
/// The document loaded from `preferred` wins when it has one, otherwise the
/// first document that has one. A current context naming no merged context
/// is dropped.
pub fn merge_with_current_context(
    documents: &[ConfigDocument],
    preferred: Option<&Path>,
) -> KubeConfig {
    let mut merged = merge(documents);

    let from_preferred = preferred.and_then(|path| {
        documents
            .iter()
            .find(|doc| doc.source == path)
            .and_then(|doc| doc.config.current_context.clone())
    });
    let current = from_preferred.or_else(|| {
        documents
            .iter()
            .find_map(|doc| doc.config.current_context.clone())
    });

    merged.current_context =
        current.filter(|name| merged.contexts.iter().any(|ctx| &ctx.name == name));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::testing::{doc, Fixture};

    #[test]
    fn test_concatenates_in_input_order() {
        let docs = vec![
            doc("a.yaml", Fixture::default().cluster("a1").cluster("a2").user("ua")),
            doc("b.yaml", Fixture::default().cluster("b1").context("cb", "b1", "ub")),
            doc("c.yaml", Fixture::default().user("uc").context("cc", "c", "uc")),
        ];

        let merged = merge(&docs);

        let clusters: Vec<&str> = merged.clusters.iter().map(|c| c.name.as_str()).collect();
        let users: Vec<&str> = merged.users.iter().map(|u| u.name.as_str()).collect();
        let contexts: Vec<&str> = merged.contexts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(clusters, vec!["a1", "a2", "b1"]);
        assert_eq!(users, vec!["ua", "uc"]);
        assert_eq!(contexts, vec!["cb", "cc"]);
        assert_eq!(merged.api_version, "v1");
        assert_eq!(merged.kind, "Config");
        assert!(merged.current_context.is_none());
    }

    #[test]
    fn test_empty_input() {
        let merged = merge(&[]);
        assert!(merged.clusters.is_empty());
        assert!(merged.users.is_empty());
        assert!(merged.contexts.is_empty());
    }

    #[test]
    fn test_current_context_prefers_target_document() {
        let docs = vec![
            doc("a.yaml", Fixture::default().context("a", "x", "y").current("a")),
            doc("home", Fixture::default().context("h", "x", "y").current("h")),
        ];

        let merged = merge_with_current_context(&docs, Some(Path::new("home")));
        assert_eq!(merged.current_context.as_deref(), Some("h"));

        let merged = merge_with_current_context(&docs, None);
        assert_eq!(merged.current_context.as_deref(), Some("a"));
    }

    #[test]
    fn test_current_context_falls_back_when_target_has_none() {
        let docs = vec![
            doc("a.yaml", Fixture::default().context("a", "x", "y").current("a")),
            doc("home", Fixture::default()),
        ];

        let merged = merge_with_current_context(&docs, Some(Path::new("home")));
        assert_eq!(merged.current_context.as_deref(), Some("a"));
    }

    #[test]
    fn test_unknown_current_context_dropped() {
        let docs = vec![doc("a.yaml", Fixture::default().current("gone"))];

        let merged = merge_with_current_context(&docs, None);
        assert!(merged.current_context.is_none());
    }
}
