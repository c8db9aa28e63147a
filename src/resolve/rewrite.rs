//! Propagation of a rename to the references of the same document.

use kcm_kubeconfig::KubeConfig;

use crate::document::Namespace;

/// Point every by-name reference to `old` in `config` at `new` instead.
///
/// Cluster and user renames update the contexts of the document; context
/// renames update `current-context`. Returns how many references changed.
pub fn rewrite_references(
    config: &mut KubeConfig,
    namespace: Namespace,
    old: &str,
    new: &str,
) -> usize {
    let mut rewritten = 0;

    match namespace {
        Namespace::Clusters => {
            for ctx in config.contexts.iter_mut() {
                if ctx.context.cluster == old {
                    ctx.context.cluster = new.to_string();
                    rewritten += 1;
                }
            }
        }
        Namespace::Users => {
            for ctx in config.contexts.iter_mut() {
                if ctx.context.user == old {
                    ctx.context.user = new.to_string();
                    rewritten += 1;
                }
            }
        }
        Namespace::Contexts => {
            if config.current_context.as_deref() == Some(old) {
                config.current_context = Some(new.to_string());
                rewritten += 1;
            }
        }
    }

    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::testing::{doc, Fixture};

    #[test]
    fn test_cluster_rename_updates_contexts() {
        let mut d = doc(
            "a.yaml",
            Fixture::default()
                .cluster("prod")
                .user("prod")
                .context("one", "prod", "prod")
                .context("two", "prod", "other")
                .context("three", "dev", "prod"),
        );

        let n = rewrite_references(&mut d.config, Namespace::Clusters, "prod", "prod-2");

        assert_eq!(n, 2);
        assert_eq!(d.config.contexts[0].context.cluster, "prod-2");
        assert_eq!(d.config.contexts[1].context.cluster, "prod-2");
        assert_eq!(d.config.contexts[2].context.cluster, "dev");
        // user references with the same text are a different namespace
        assert_eq!(d.config.contexts[0].context.user, "prod");
    }

    #[test]
    fn test_user_rename_updates_contexts() {
        let mut d = doc(
            "a.yaml",
            Fixture::default()
                .context("one", "c", "admin")
                .context("two", "admin", "ops"),
        );

        let n = rewrite_references(&mut d.config, Namespace::Users, "admin", "admin-a");

        assert_eq!(n, 1);
        assert_eq!(d.config.contexts[0].context.user, "admin-a");
        assert_eq!(d.config.contexts[1].context.cluster, "admin");
    }

    #[test]
    fn test_context_rename_updates_current_context() {
        let mut d = doc("a.yaml", Fixture::default().context("ctx1", "c", "u").current("ctx1"));

        let n = rewrite_references(&mut d.config, Namespace::Contexts, "ctx1", "ctx1-a");

        assert_eq!(n, 1);
        assert_eq!(d.config.current_context.as_deref(), Some("ctx1-a"));
    }

    #[test]
    fn test_context_rename_leaves_other_current_context() {
        let mut d = doc("a.yaml", Fixture::default().current("other"));

        assert_eq!(rewrite_references(&mut d.config, Namespace::Contexts, "ctx1", "x"), 0);
        assert_eq!(d.config.current_context.as_deref(), Some("other"));

        let mut none = doc("b.yaml", Fixture::default());
        assert_eq!(rewrite_references(&mut none.config, Namespace::Contexts, "ctx1", "x"), 0);
        assert!(none.config.current_context.is_none());
    }
}
