#![allow(unused_variables)]

use super::{Child, Level};

pub(crate) trait VisitMut {
    fn visit_level_mut(&mut self, i: &mut Level) {
        visit_level_mut(self, i);
    }

    fn visit_child_mut(&mut self, i: &mut Child) {
        visit_child_mut(self, i);
    }
}

pub(crate) fn visit_level_mut<V>(v: &mut V, node: &mut Level)
where
    V: VisitMut + ?Sized,
{
    for child in &mut node.children {
        v.visit_child_mut(child);
    }
}

pub(crate) fn visit_child_mut<V>(v: &mut V, node: &mut Child)
where
    V: VisitMut + ?Sized,
{
    v.visit_level_mut(&mut node.level);
}
