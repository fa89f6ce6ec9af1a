use super::{visit, Child, Level, VisitMut};

use strata_core::query::Splitting;

/// Rewrites a joined plan so that every collection that did not choose its
/// own mode is loaded by a separate command.
///
/// Only the loading strategy changes: the levels, their filters and their
/// correlations are untouched.
pub(super) fn apply(root: &mut Level) {
    SplitCollections.visit_level_mut(root);
}

struct SplitCollections;

impl VisitMut for SplitCollections {
    fn visit_child_mut(&mut self, i: &mut Child) {
        if !i.pinned {
            i.mode = Splitting::Split;
        }

        visit::visit_child_mut(self, i);
    }
}
