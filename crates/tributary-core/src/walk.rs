//! Breadth-first collection of dependency candidates.
//!
//! The walk only gathers which packages could satisfy each dependency id; it
//! does not evaluate version requirements or pick a candidate.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace, warn};

use crate::{
    error::Result,
    package::Package,
    repository::PackageRepository,
};

/// Candidates found for one dependency id.
#[derive(Debug, Clone)]
pub struct DependencyCandidates {
    pub id: String,
    /// Ids of the packages that declared this dependency.
    pub required_by: Vec<String>,
    pub candidates: Vec<Package>,
}

/// Result of walking the dependency graph of a package.
#[derive(Debug, Default)]
pub struct DependencyClosure {
    /// The packages matching the requested id itself.
    pub roots: Vec<Package>,
    /// One entry per dependency id, in discovery order.
    pub dependencies: Vec<DependencyCandidates>,
    /// Dependency ids no repository could supply.
    pub missing: Vec<String>,
}

impl DependencyClosure {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn candidates_for(&self, id: &str) -> Option<&DependencyCandidates> {
        self.dependencies
            .iter()
            .find(|entry| entry.id.eq_ignore_ascii_case(id))
    }
}

fn lookup(repository: &dyn PackageRepository, id: &str) -> Result<Vec<Package>> {
    match repository.as_dependency_provider() {
        Some(provider) => provider.dependencies(id),
        None => repository.find_packages_by_id(id),
    }
}

/// Collects the candidate packages for every transitive dependency of `id`.
///
/// The root packages are looked up through the repository's own surface;
/// dependencies go through its dependency provider when it has one. Each id is
/// visited once, so cycles terminate. A failed lookup counts as no candidates.
pub fn collect_dependency_candidates(
    repository: &dyn PackageRepository,
    id: &str,
) -> Result<DependencyClosure> {
    let roots = repository.find_packages_by_id(id)?;
    debug!(id = id, roots = roots.len(), "collecting dependency candidates");

    let mut closure = DependencyClosure {
        roots,
        ..Default::default()
    };
    let mut visited = HashSet::from([id.to_ascii_lowercase()]);
    let mut queue: VecDeque<(String, String)> = VecDeque::new();

    let enqueue = |queue: &mut VecDeque<(String, String)>, pkg: &Package| {
        for dep in &pkg.dependencies {
            queue.push_back((dep.id.clone(), pkg.id.clone()));
        }
    };

    for pkg in &closure.roots {
        enqueue(&mut queue, pkg);
    }

    while let Some((dep_id, parent)) = queue.pop_front() {
        if !visited.insert(dep_id.to_ascii_lowercase()) {
            if let Some(entry) = closure
                .dependencies
                .iter_mut()
                .find(|entry| entry.id.eq_ignore_ascii_case(&dep_id))
            {
                if !entry.required_by.contains(&parent) {
                    entry.required_by.push(parent);
                }
            }
            continue;
        }

        let candidates = lookup(repository, &dep_id).unwrap_or_else(|err| {
            warn!("Failed to look up dependency {}: {}", dep_id, err);
            Vec::new()
        });
        trace!(id = dep_id, candidates = candidates.len(), "dependency lookup");

        if candidates.is_empty() {
            closure.missing.push(dep_id.clone());
        }
        for pkg in &candidates {
            enqueue(&mut queue, pkg);
        }

        closure.dependencies.push(DependencyCandidates {
            id: dep_id,
            required_by: vec![parent],
            candidates,
        });
    }

    Ok(closure)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        aggregate::AggregateRepository,
        fallback::FallbackRepository,
        package::Dependency,
        repository::{MemoryRepository, RepositoryHandle},
    };

    fn feed(source: &str, packages: Vec<Package>) -> RepositoryHandle {
        Arc::new(MemoryRepository::with_packages(source, packages))
    }

    #[test]
    fn test_dependencies_resolved_across_feeds() {
        let primary = feed(
            "Source1",
            vec![Package::new("App", "1.0").with_dependency(Dependency::new("Lib"))],
        );
        let other = feed(
            "Source2",
            vec![
                Package::new("Lib", "2.0").with_dependency(Dependency::new("Core")),
                Package::new("Core", "3.0"),
            ],
        );
        let aggregate: RepositoryHandle =
            Arc::new(AggregateRepository::new([primary.clone(), other]));
        let fallback = FallbackRepository::new(primary, aggregate);

        let closure = collect_dependency_candidates(&fallback, "App").unwrap();

        assert_eq!(closure.roots, vec![Package::new("App", "1.0")]);
        assert!(closure.is_complete());
        let ids: Vec<_> = closure.dependencies.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["Lib", "Core"]);
        assert_eq!(
            closure.candidates_for("core").unwrap().required_by,
            vec!["Lib".to_string()]
        );
    }

    #[test]
    fn test_plain_repository_sees_only_itself() {
        let primary = MemoryRepository::with_packages(
            "Source1",
            vec![Package::new("App", "1.0").with_dependency(Dependency::new("Lib"))],
        );

        let closure = collect_dependency_candidates(&primary, "App").unwrap();

        assert!(!closure.is_complete());
        assert_eq!(closure.missing, vec!["Lib".to_string()]);
        assert!(closure.candidates_for("Lib").unwrap().candidates.is_empty());
    }

    #[test]
    fn test_cycles_terminate() {
        let repo = MemoryRepository::with_packages(
            "Source1",
            vec![
                Package::new("A", "1.0").with_dependency(Dependency::new("B")),
                Package::new("B", "1.0").with_dependency(Dependency::new("A")),
            ],
        );

        let closure = collect_dependency_candidates(&repo, "A").unwrap();

        assert_eq!(closure.dependencies.len(), 1);
        assert_eq!(closure.dependencies[0].id, "B");
    }

    #[test]
    fn test_shared_dependency_tracks_every_parent() {
        let repo = MemoryRepository::with_packages(
            "Source1",
            vec![
                Package::new("App", "1.0")
                    .with_dependency(Dependency::new("Left"))
                    .with_dependency(Dependency::new("Right")),
                Package::new("Left", "1.0").with_dependency(Dependency::new("Shared")),
                Package::new("Right", "1.0").with_dependency(Dependency::new("Shared")),
                Package::new("Shared", "1.0"),
            ],
        );

        let closure = collect_dependency_candidates(&repo, "App").unwrap();

        let shared = closure.candidates_for("Shared").unwrap();
        assert_eq!(shared.required_by, vec!["Left".to_string(), "Right".to_string()]);
        assert_eq!(shared.candidates.len(), 1);
    }

    #[test]
    fn test_unknown_root() {
        let repo = MemoryRepository::new("Source1");
        let closure = collect_dependency_candidates(&repo, "Nope").unwrap();
        assert!(closure.roots.is_empty());
        assert!(closure.dependencies.is_empty());
    }
}
