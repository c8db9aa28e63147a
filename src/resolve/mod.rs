//! Collision resolution.
//!
//! Runs passes over clusters, users and contexts until a full pass finds no
//! name shared by two entries. Every member of a collision group is asked for
//! a new name; renames are propagated to the references of the document that
//! owns the entry.

mod detector;
mod rewrite;

pub use detector::{detect, detect_all, CollisionGroup, EntryRef};
pub use rewrite::rewrite_references;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::document::{ConfigDocument, Namespace};
use crate::prompt::{PromptError, Prompter};

/// A rename applied during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub namespace: Namespace,
    pub source: PathBuf,
    pub from: String,
    pub to: String,
    /// References rewritten in the same document
    pub references: usize,
}

/// Outcome of a completed resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Passes run, including the final clean one
    pub passes: usize,
    /// Rename prompts answered
    pub prompts: usize,
    /// Prompts whose answer differed from the current name
    pub renames: Vec<Rename>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("collision resolution aborted: {0}")]
    Prompt(#[from] PromptError),
}

impl ResolveError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResolveError::Prompt(PromptError::Cancelled))
    }
}

/// Resolve every name collision in `documents`, in place.
///
/// On success no two clusters, users or contexts across all documents share a
/// name. On error the documents may be partially renamed and must not be
/// merged or written.
pub fn resolve<P: Prompter + ?Sized>(
    documents: &mut [ConfigDocument],
    prompter: &mut P,
) -> Result<ResolutionReport, ResolveError> {
    let mut report = ResolutionReport::default();

    loop {
        report.passes += 1;
        prompter.begin_pass(report.passes);

        let mut dirty = false;
        for namespace in Namespace::ALL {
            let groups = detect(documents, namespace);
            if groups.is_empty() {
                continue;
            }

            dirty = true;
            debug!(pass = report.passes, %namespace, groups = groups.len(), "collisions found");

            for group in &groups {
                resolve_group(documents, group, prompter, &mut report)?;
            }
        }

        if !dirty {
            break;
        }
    }

    info!(
        passes = report.passes,
        renames = report.renames.len(),
        "collision resolution complete"
    );
    Ok(report)
}

fn resolve_group<P: Prompter + ?Sized>(
    documents: &mut [ConfigDocument],
    group: &CollisionGroup,
    prompter: &mut P,
    report: &mut ResolutionReport,
) -> Result<(), ResolveError> {
    let namespace = group.namespace;
    prompter.report_collision(namespace, &group.name, group.members.len());

    for member in &group.members {
        let document = &mut documents[member.document];
        let Some(current) = document.name_mut(namespace, member.entry).map(|n| n.clone()) else {
            continue;
        };

        let label = format!(
            "{} \"{}\" in \"{}\"",
            namespace.entity(),
            current,
            document.source.display()
        );
        let answer = prompter.ask_rename(&current, &label)?;
        report.prompts += 1;

        if answer == current {
            continue;
        }

        if let Some(name) = document.name_mut(namespace, member.entry) {
            *name = answer.clone();
        }
        let references = rewrite_references(&mut document.config, namespace, &current, &answer);

        info!(
            %namespace,
            source = %document.source.display(),
            from = %current,
            to = %answer,
            references,
            "renamed"
        );
        report.renames.push(Rename {
            namespace,
            source: document.source.clone(),
            from: current,
            to: answer,
            references,
        });
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::{doc, Fixture};
    use super::*;
    use crate::prompt::ScriptedPrompter;

    fn no_answers() -> ScriptedPrompter {
        ScriptedPrompter::new(Vec::<Option<String>>::new())
    }

    #[test]
    fn test_clean_input_single_pass_no_prompts() {
        let mut docs = vec![
            doc("a.yaml", Fixture::default().cluster("a").user("a").context("a", "a", "a")),
            doc("b.yaml", Fixture::default().cluster("b").user("b").context("b", "b", "b")),
            doc("c.yaml", Fixture::default().cluster("c").user("c").context("c", "c", "c")),
        ];
        let before = docs.clone();
        let mut prompter = no_answers();

        let report = resolve(&mut docs, &mut prompter).unwrap();

        assert_eq!(report.passes, 1);
        assert_eq!(report.prompts, 0);
        assert!(prompter.asked().is_empty());
        assert_eq!(docs, before);
    }

    #[test]
    fn test_every_member_is_prompted() {
        let mut docs = vec![
            doc("a.yaml", Fixture::default().cluster("prod").context("p", "prod", "u")),
            doc("b.yaml", Fixture::default().cluster("prod").context("q", "prod", "v")),
        ];
        let mut prompter = ScriptedPrompter::new([None, Some("prod-2")]);

        let report = resolve(&mut docs, &mut prompter).unwrap();

        assert_eq!(
            prompter.asked(),
            &[
                "What name should cluster \"prod\" in \"a.yaml\" be?".to_string(),
                "What name should cluster \"prod\" in \"b.yaml\" be?".to_string(),
            ]
        );
        assert_eq!(report.passes, 2);
        assert_eq!(report.prompts, 2);
        assert_eq!(report.renames.len(), 1);
        assert_eq!(report.renames[0].references, 1);

        assert_eq!(docs[0].config.clusters[0].name, "prod");
        assert_eq!(docs[0].config.contexts[0].context.cluster, "prod");
        assert_eq!(docs[1].config.clusters[0].name, "prod-2");
        assert_eq!(docs[1].config.contexts[0].context.cluster, "prod-2");
        assert!(detect_all(&docs).is_empty());
    }

    #[test]
    fn test_namespaces_scanned_clusters_users_contexts() {
        let mut docs = vec![
            doc("a.yaml", Fixture::default().cluster("x").user("x").context("x", "x", "x")),
            doc("b.yaml", Fixture::default().cluster("x").user("x").context("x", "x", "x")),
        ];
        let mut prompter = ScriptedPrompter::new([
            None,
            Some("x-cluster"),
            None,
            Some("x-user"),
            None,
            Some("x-context"),
        ]);

        resolve(&mut docs, &mut prompter).unwrap();

        let namespaces: Vec<Namespace> = prompter.collisions().iter().map(|c| c.0).collect();
        assert_eq!(
            namespaces,
            vec![Namespace::Clusters, Namespace::Users, Namespace::Contexts]
        );
        let second = &docs[1].config.contexts[0];
        assert_eq!(second.name, "x-context");
        assert_eq!(second.context.cluster, "x-cluster");
        assert_eq!(second.context.user, "x-user");
    }

    #[test]
    fn test_current_context_follows_rename() {
        let mut docs = vec![
            doc("a.yaml", Fixture::default().context("ctx1", "c", "u").current("ctx1")),
            doc("b.yaml", Fixture::default().context("ctx1", "d", "v").current("ctx1")),
        ];
        let mut prompter = ScriptedPrompter::new([Some("ctx1-a"), None]);

        resolve(&mut docs, &mut prompter).unwrap();

        assert_eq!(docs[0].config.current_context.as_deref(), Some("ctx1-a"));
        assert_eq!(docs[1].config.current_context.as_deref(), Some("ctx1"));
    }

    #[test]
    fn test_rename_into_new_collision_triggers_another_pass() {
        let mut docs = vec![
            doc("a.yaml", Fixture::default().user("admin").user("ops")),
            doc("b.yaml", Fixture::default().user("admin")),
        ];
        // "admin" in b.yaml is renamed to "ops", which now collides with a.yaml
        let mut prompter = ScriptedPrompter::new([None, Some("ops"), None, Some("ops-b")]);

        let report = resolve(&mut docs, &mut prompter).unwrap();

        assert_eq!(report.passes, 3);
        assert_eq!(prompter.collisions().len(), 2);
        assert_eq!(prompter.collisions()[1].1, "ops");
        assert_eq!(docs[1].config.users[0].name, "ops-b");
        assert!(detect_all(&docs).is_empty());
    }

    #[test]
    fn test_accepting_defaults_keeps_looping_until_cancelled() {
        let mut docs = vec![
            doc("a.yaml", Fixture::default().cluster("prod")),
            doc("b.yaml", Fixture::default().cluster("prod")),
        ];
        let mut prompter = ScriptedPrompter::new([None::<&str>; 4]);

        let err = resolve(&mut docs, &mut prompter).unwrap_err();

        assert!(matches!(err, ResolveError::Prompt(PromptError::Exhausted(_))));
        assert_eq!(prompter.passes(), 3);
    }

    #[test]
    fn test_cancel_aborts() {
        struct Cancelling;
        impl Prompter for Cancelling {
            fn ask_rename(&mut self, _: &str, _: &str) -> Result<String, PromptError> {
                Err(PromptError::Cancelled)
            }
            fn ask_confirm(&mut self, _: &str) -> Result<bool, PromptError> {
                Err(PromptError::Cancelled)
            }
        }

        let mut docs = vec![
            doc("a.yaml", Fixture::default().context("c", "x", "y")),
            doc("b.yaml", Fixture::default().context("c", "x", "y")),
        ];

        let err = resolve(&mut docs, &mut Cancelling).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_references_only_rewritten_in_owning_document() {
        let mut docs = vec![
            doc("a.yaml", Fixture::default().cluster("prod").context("a", "prod", "u")),
            doc("b.yaml", Fixture::default().cluster("prod").context("b", "prod", "u")),
        ];
        let mut prompter = ScriptedPrompter::new([Some("prod-a"), None]);

        resolve(&mut docs, &mut prompter).unwrap();

        assert_eq!(docs[0].config.contexts[0].context.cluster, "prod-a");
        assert_eq!(docs[1].config.contexts[0].context.cluster, "prod");
    }
}
