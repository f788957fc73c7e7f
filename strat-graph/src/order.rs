//! Apply ordering over explicit dependency edges.
//!
//! Resources are addressed by their declaration index so that ties between
//! unconstrained resources are always broken the same way: the ready set is
//! drained lowest index first, which keeps the output stable across runs.

use std::collections::{BTreeSet, HashMap};

use stratus_ir::{Resource, ResourceId};

use crate::{Error, Result};

/// Edges resolved to declaration indices.
struct IndexedEdges {
    /// For each resource, the resources it depends on.
    dependencies: Vec<Vec<usize>>,
    /// For each resource, the resources that depend on it.
    dependents: Vec<Vec<usize>>,
}

fn resolve_edges(resources: &[Resource], index: &HashMap<ResourceId, usize>) -> Result<IndexedEdges> {
    let mut dependencies = vec![Vec::new(); resources.len()];
    let mut dependents = vec![Vec::new(); resources.len()];

    for (i, resource) in resources.iter().enumerate() {
        for dep in &resource.depends_on {
            let Some(&j) = index.get(dep) else {
                return Err(Box::new(Error::UnknownReference {
                    from: resource.id.clone(),
                    to: dep.clone(),
                }));
            };
            dependencies[i].push(j);
            dependents[j].push(i);
        }
    }

    Ok(IndexedEdges {
        dependencies,
        dependents,
    })
}

/// Topologically sort resources (Kahn's algorithm).
///
/// # Errors
///
/// Returns `UnknownReference` for an edge to an undeclared resource and
/// `CyclicDependency` when the edges contain a cycle.
pub(crate) fn apply_order(
    resources: &[Resource],
    index: &HashMap<ResourceId, usize>,
) -> Result<Vec<ResourceId>> {
    let edges = resolve_edges(resources, index)?;

    let mut in_degree: Vec<usize> = edges.dependencies.iter().map(Vec::len).collect();
    let mut ready: BTreeSet<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(i, _)| i)
        .collect();

    let mut sorted = Vec::with_capacity(resources.len());
    while let Some(i) = ready.pop_first() {
        sorted.push(i);
        for &dependent in &edges.dependents[i] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if sorted.len() != resources.len() {
        let cycle = find_cycle(&edges.dependencies, &in_degree)
            .into_iter()
            .map(|i| resources[i].id.clone())
            .collect();
        return Err(Box::new(Error::CyclicDependency { cycle }));
    }

    Ok(sorted.into_iter().map(|i| resources[i].id.clone()).collect())
}

/// Find one cycle among the resources Kahn's algorithm could not place.
///
/// Returns the cycle in dependency order starting from its lowest
/// declaration index reached by the search.
fn find_cycle(dependencies: &[Vec<usize>], in_degree: &[usize]) -> Vec<usize> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }

    fn visit(
        node: usize,
        dependencies: &[Vec<usize>],
        marks: &mut [Mark],
        path: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        marks[node] = Mark::OnPath;
        path.push(node);

        for &dep in &dependencies[node] {
            match marks[dep] {
                Mark::OnPath => {
                    let start = path.iter().position(|&p| p == dep).unwrap_or(0);
                    return Some(path[start..].to_vec());
                }
                Mark::Unvisited => {
                    if let Some(cycle) = visit(dep, dependencies, marks, path) {
                        return Some(cycle);
                    }
                }
                Mark::Done => {}
            }
        }

        marks[node] = Mark::Done;
        path.pop();
        None
    }

    let mut marks = vec![Mark::Unvisited; dependencies.len()];
    let mut path = Vec::new();

    for node in 0..dependencies.len() {
        // Placed nodes cannot be on a cycle
        if in_degree[node] == 0 || marks[node] != Mark::Unvisited {
            continue;
        }
        if let Some(cycle) = visit(node, dependencies, &mut marks, &mut path) {
            return cycle;
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use stratus_ir::ResourceKind;

    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> (Vec<Resource>, HashMap<ResourceId, usize>) {
        let resources: Vec<Resource> = edges
            .iter()
            .map(|(id, deps)| {
                deps.iter().fold(Resource::new(*id, ResourceKind::Network), |r, d| {
                    r.depends_on(*d)
                })
            })
            .collect();
        let index = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        (resources, index)
    }

    #[test]
    fn test_ties_follow_declaration_order() {
        let (resources, index) = graph(&[("c", &[]), ("a", &[]), ("b", &[])]);
        let order = apply_order(&resources, &index).unwrap();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn test_dependencies_first() {
        let (resources, index) = graph(&[("app", &["db", "net"]), ("db", &["net"]), ("net", &[])]);
        let order = apply_order(&resources, &index).unwrap();
        assert_eq!(order, ["net", "db", "app"]);
    }

    #[test]
    fn test_released_resource_respects_declaration_order() {
        // "late" becomes ready after "x" is placed but was declared before "y"
        let (resources, index) = graph(&[("x", &[]), ("late", &["x"]), ("y", &[])]);
        let order = apply_order(&resources, &index).unwrap();
        assert_eq!(order, ["x", "late", "y"]);
    }

    #[test]
    fn test_cycle_reported_in_order() {
        let (resources, index) = graph(&[("root", &[]), ("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let err = apply_order(&resources, &index).unwrap_err();
        match *err {
            Error::CyclicDependency { cycle } => assert_eq!(cycle, ["a", "b", "c"]),
            other => panic!("expected CyclicDependency, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_behind_dependent() {
        // "top" depends on a cycle but is not part of it
        let (resources, index) = graph(&[("top", &["a"]), ("a", &["b"]), ("b", &["a"])]);
        let err = apply_order(&resources, &index).unwrap_err();
        match *err {
            Error::CyclicDependency { cycle } => assert_eq!(cycle, ["a", "b"]),
            other => panic!("expected CyclicDependency, got {:?}", other),
        }
    }

    #[test]
    fn test_self_dependency() {
        let (resources, index) = graph(&[("a", &["a"])]);
        let err = apply_order(&resources, &index).unwrap_err();
        assert!(matches!(*err, Error::CyclicDependency { ref cycle } if cycle == &["a"]));
    }

    #[test]
    fn test_unknown_dependency() {
        let (resources, index) = graph(&[("a", &["ghost"])]);
        let err = apply_order(&resources, &index).unwrap_err();
        assert!(matches!(*err, Error::UnknownReference { ref to, .. } if to == "ghost"));
    }
}
