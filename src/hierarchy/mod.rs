//! Hierarchy module - trees derived from flat records
//!
//! Every tree here is a snapshot rebuilt from the record store on each read.
//! Builders collect records into an arena first (records plus child index
//! lists) and only assemble owned children once the structure validated, so a
//! half-built tree is never exposed.

pub mod flatten;
pub mod lead;
pub mod partition;
pub mod reporting;
pub mod team;

pub use flatten::{flatten, flatten_with_depth, Flatten, FlattenWithDepth};
pub use lead::{ancestors, resolve_lead, teams_by_id, LeadRole, TeamIndex};
pub use partition::{
    Board, DisplayTree, Headcount, PartitionNode, PartitionOptions, PartitionVariant,
    INTERNAL_WEIGHT, LEAF_WEIGHT,
};
pub use reporting::{build_reporting_hierarchy, resolve_manager, ReportingNode};
pub use team::{build_team_hierarchy, TeamNode};

/// A node of any derived tree
pub trait HierarchyNode: Sized {
    fn id(&self) -> &str;

    fn children(&self) -> &[Self];
}

/// Assemble an owned tree from an arena.
///
/// `children[i]` lists the arena slots attached below slot `i`. Each slot may
/// appear in at most one child list. Slots not reachable from `root` are
/// returned as the error so callers can name them.
pub(crate) fn assemble<R, T>(
    root: usize,
    records: Vec<R>,
    children: &[Vec<usize>],
    mut make: impl FnMut(R, Vec<T>) -> T,
) -> Result<T, Vec<usize>> {
    let mut reached = vec![false; records.len()];
    let mut order = Vec::with_capacity(records.len());
    let mut stack = vec![root];

    while let Some(slot) = stack.pop() {
        if reached[slot] {
            continue;
        }
        reached[slot] = true;
        order.push(slot);
        stack.extend(children[slot].iter().rev().copied());
    }

    let unreached: Vec<usize> = reached
        .iter()
        .enumerate()
        .filter(|(_, seen)| !**seen)
        .map(|(slot, _)| slot)
        .collect();
    if !unreached.is_empty() {
        return Err(unreached);
    }

    let mut records: Vec<Option<R>> = records.into_iter().map(Some).collect();
    let mut built: Vec<Option<T>> = std::iter::repeat_with(|| None).take(records.len()).collect();

    // reverse pre-order visits every child before its parent
    for &slot in order.iter().rev() {
        let kids = children[slot]
            .iter()
            .filter_map(|child| built[*child].take())
            .collect();
        if let Some(record) = records[slot].take() {
            built[slot] = Some(make(record, kids));
        }
    }

    built[root].take().ok_or_else(Vec::new)
}

/// Post-order fold over a tree without recursion.
///
/// `f` receives a node together with the folded values of its children, in
/// child order.
pub fn fold_tree<N, T>(root: &N, mut f: impl FnMut(&N, Vec<T>) -> T) -> T
where
    N: HierarchyNode,
{
    enum Step<'a, N> {
        Enter(&'a N),
        Exit(&'a N),
    }

    let mut stack = vec![Step::Enter(root)];
    let mut results: Vec<T> = Vec::new();

    loop {
        match stack.pop() {
            Some(Step::Enter(node)) => {
                stack.push(Step::Exit(node));
                stack.extend(node.children().iter().rev().map(Step::Enter));
            }
            Some(Step::Exit(node)) => {
                let kids = results.split_off(results.len() - node.children().len());
                let value = f(node, kids);
                if stack.is_empty() {
                    return value;
                }
                results.push(value);
            }
            None => unreachable!("the root exit step always ends the fold"),
        }
    }
}
