//! Snapshots emitted by the algorithm driver.
//!
//! Every [`VisualizationStep`] owns its own copy of the sequence and of the role sets, so a
//! consumer can keep it around after the driver has moved on.

use std::collections::BTreeSet;
use std::fmt::Display;

/// The visual role of a single bar. Ordered by precedence: when an index belongs to several role
/// sets, the first matching role wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Sorted,
    Swapping,
    Comparing,
    Unsorted,
}

/// Colors a renderer is expected to use for each [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarColor {
    Green,
    Red,
    Yellow,
    Blue,
}

impl Role {
    pub fn color(self) -> BarColor {
        match self {
            Role::Sorted => BarColor::Green,
            Role::Swapping => BarColor::Red,
            Role::Comparing => BarColor::Yellow,
            Role::Unsorted => BarColor::Blue,
        }
    }

    /// Label shown in legends.
    pub fn label(self) -> &'static str {
        match self {
            Role::Sorted => "Sorted",
            Role::Swapping => "Swapping",
            Role::Comparing => "Comparing",
            Role::Unsorted => "Unsorted",
        }
    }

    /// All roles in legend order.
    pub const ALL: [Role; 4] = [Role::Unsorted, Role::Comparing, Role::Swapping, Role::Sorted];
}

/// Which indices the latest operation touched and which ones are final.
///
/// `comparing` and `swapping` describe only the most recent operation and are replaced wholesale
/// on every step. `sorted` accumulates for the lifetime of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    pub comparing: Vec<usize>,
    pub swapping: Vec<usize>,
    pub sorted: BTreeSet<usize>,
}

impl RoleSet {
    pub fn is_empty(&self) -> bool {
        self.comparing.is_empty() && self.swapping.is_empty() && self.sorted.is_empty()
    }

    pub fn clear(&mut self) {
        self.comparing.clear();
        self.swapping.clear();
        self.sorted.clear();
    }

    /// Resolves the role of `index`, `sorted` taking precedence over `swapping` over `comparing`.
    pub fn role_of(&self, index: usize) -> Role {
        if self.sorted.contains(&index) {
            Role::Sorted
        } else if self.swapping.contains(&index) {
            Role::Swapping
        } else if self.comparing.contains(&index) {
            Role::Comparing
        } else {
            Role::Unsorted
        }
    }

    pub fn color_of(&self, index: usize) -> BarColor {
        self.role_of(index).color()
    }
}

/// What kind of operation produced a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Compare,
    Swap,
    /// A snapshot without an active pair: end of a merge, or the final state of a run.
    Settle,
}

impl Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepKind::Compare => write!(f, "compare"),
            StepKind::Swap => write!(f, "swap"),
            StepKind::Settle => write!(f, "settle"),
        }
    }
}

/// An immutable snapshot of the working copy and its role sets at one instant of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizationStep {
    sequence: Vec<u32>,
    roles: RoleSet,
}

impl VisualizationStep {
    pub fn new(sequence: Vec<u32>, roles: RoleSet) -> Self {
        Self { sequence, roles }
    }

    pub fn sequence(&self) -> &[u32] {
        &self.sequence
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    pub fn comparing(&self) -> &[usize] {
        &self.roles.comparing
    }

    pub fn swapping(&self) -> &[usize] {
        &self.roles.swapping
    }

    pub fn sorted(&self) -> &BTreeSet<usize> {
        &self.roles.sorted
    }

    pub fn kind(&self) -> StepKind {
        if !self.roles.swapping.is_empty() {
            StepKind::Swap
        } else if !self.roles.comparing.is_empty() {
            StepKind::Compare
        } else {
            StepKind::Settle
        }
    }

    /// The pair of indices the step is about, if any.
    pub fn active_indices(&self) -> &[usize] {
        match self.kind() {
            StepKind::Swap => &self.roles.swapping,
            StepKind::Compare => &self.roles.comparing,
            StepKind::Settle => &[],
        }
    }

    /// True once every index of the sequence has been marked sorted.
    pub fn is_final(&self) -> bool {
        self.roles.sorted.len() == self.sequence.len()
    }

    pub fn into_parts(self) -> (Vec<u32>, RoleSet) {
        (self.sequence, self.roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(comparing: &[usize], swapping: &[usize], sorted: &[usize]) -> RoleSet {
        RoleSet {
            comparing: comparing.to_vec(),
            swapping: swapping.to_vec(),
            sorted: sorted.iter().copied().collect(),
        }
    }

    #[test]
    fn role_precedence() {
        let set = roles(&[0, 1, 2], &[1, 2], &[2]);
        assert_eq!(set.role_of(0), Role::Comparing);
        assert_eq!(set.role_of(1), Role::Swapping);
        assert_eq!(set.role_of(2), Role::Sorted);
        assert_eq!(set.role_of(3), Role::Unsorted);
    }

    #[test]
    fn role_colors() {
        let set = roles(&[0], &[1], &[2]);
        assert_eq!(set.color_of(0), BarColor::Yellow);
        assert_eq!(set.color_of(1), BarColor::Red);
        assert_eq!(set.color_of(2), BarColor::Green);
        assert_eq!(set.color_of(3), BarColor::Blue);
    }

    #[test]
    fn step_kind() {
        let compare = VisualizationStep::new(vec![2, 1], roles(&[0, 1], &[], &[]));
        assert_eq!(compare.kind(), StepKind::Compare);
        assert_eq!(compare.active_indices(), &[0, 1]);

        let swap = VisualizationStep::new(vec![1, 2], roles(&[], &[0, 1], &[]));
        assert_eq!(swap.kind(), StepKind::Swap);

        let settle = VisualizationStep::new(vec![1, 2], roles(&[], &[], &[0, 1]));
        assert_eq!(settle.kind(), StepKind::Settle);
        assert!(settle.active_indices().is_empty());
        assert!(settle.is_final());
    }

    #[test]
    fn clear_empties_everything() {
        let mut set = roles(&[0], &[1], &[2]);
        assert!(!set.is_empty());
        set.clear();
        assert!(set.is_empty());
    }
}
