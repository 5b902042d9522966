//! Task dependency graph
//!
//! Nodes are dense indices (a task's insertion position in its project) and
//! each node stores the list of nodes it depends on. The graph is kept
//! acyclic at all times: [`TaskGraph::set_dependencies`] checks the whole
//! graph after writing the new edge set and restores the previous one if a
//! cycle appeared.
//!
//! ```text
//! dependencies[c] = [a, b]      a ──┐
//!                                   ├──> c
//!                               b ──┘
//! ```

use std::collections::VecDeque;

/// A dependency edit that would close a cycle through `node`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleError {
    pub node: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Index-based DAG of task dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGraph {
    dependencies: Vec<Vec<usize>>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node with no dependencies, returning its index
    pub fn add_node(&mut self) -> usize {
        self.dependencies.push(Vec::new());
        self.dependencies.len() - 1
    }

    /// Drop every node at index `len` or above, along with its edges
    ///
    /// Only nodes nothing else depends on may be removed; the project uses
    /// this to undo a provisional insertion.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.dependencies.truncate(len);
    }

    pub fn node_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(Vec::len).sum()
    }

    /// True when no node has any dependency
    pub fn is_edgeless(&self) -> bool {
        self.dependencies.iter().all(Vec::is_empty)
    }

    pub fn dependencies(&self, node: usize) -> &[usize] {
        self.dependencies
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace the dependency set of `node`
    ///
    /// Duplicates are dropped (first occurrence wins). If the resulting graph
    /// contains a cycle, the previous dependency set is restored and the
    /// edit is rejected.
    pub fn set_dependencies(&mut self, node: usize, deps: &[usize]) -> Result<(), CycleError> {
        let mut unique = Vec::with_capacity(deps.len());
        for &dep in deps {
            if !unique.contains(&dep) {
                unique.push(dep);
            }
        }

        let previous = std::mem::replace(&mut self.dependencies[node], unique);
        if self.has_cycle() {
            self.dependencies[node] = previous;
            return Err(CycleError { node });
        }
        Ok(())
    }

    /// Depth-first cycle search from every unvisited node
    ///
    /// Iterative, so deep chains cannot overflow the call stack.
    pub fn has_cycle(&self) -> bool {
        let n = self.dependencies.len();
        let mut marks = vec![Mark::Unvisited; n];
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for start in 0..n {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            marks[start] = Mark::OnStack;
            stack.push((start, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                frame.1 += 1;
                match self.dependencies[node].get(next) {
                    Some(&dep) => match marks[dep] {
                        Mark::OnStack => return true,
                        Mark::Unvisited => {
                            marks[dep] = Mark::OnStack;
                            stack.push((dep, 0));
                        }
                        Mark::Done => {}
                    },
                    None => {
                        marks[node] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        false
    }

    /// Reverse adjacency: for each node, the nodes that depend on it, in
    /// ascending index order
    pub fn dependents(&self) -> Vec<Vec<usize>> {
        let mut dependents = vec![Vec::new(); self.dependencies.len()];
        for (node, deps) in self.dependencies.iter().enumerate() {
            for &dep in deps {
                dependents[dep].push(node);
            }
        }
        dependents
    }

    /// Kahn's algorithm
    ///
    /// Ready nodes are processed first-in first-out, seeded in index order,
    /// so the result is deterministic for a fixed insertion order. On an
    /// acyclic graph every node appears exactly once.
    pub fn topological_order(&self) -> Vec<usize> {
        let n = self.dependencies.len();
        let dependents = self.dependents();
        let mut in_degree: Vec<usize> = self.dependencies.iter().map(Vec::len).collect();

        let mut ready: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(node) = ready.pop_front() {
            order.push(node);
            for &dependent in &dependents[node] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push_back(dependent);
                }
            }
        }
        order
    }
}
