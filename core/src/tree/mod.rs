//! Entitlement tree model.
//!
//! The view is a flat, depth-first pre-order list of visible nodes. A
//! container's children appear only while its path is in the `ExpandSet`.
//! Mapping entries are visited in key order, sequence elements in index
//! order. The result is rebuilt from scratch on every change to the record,
//! the expand-set or the filter.

use crate::types::{NodePath, PathSegment, PropertyValue, SearchText};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Paths of the expanded container nodes for one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandSet {
    paths: HashSet<NodePath>,
}

impl ExpandSet {
    /// Flips membership of `path`. Returns whether it is now expanded.
    pub fn toggle(&mut self, path: &NodePath) -> bool {
        if self.paths.remove(path) {
            return false;
        }
        self.paths.insert(path.clone());
        true
    }

    pub fn expand(&mut self, path: NodePath) {
        self.paths.insert(path);
    }

    pub fn collapse(&mut self, path: &NodePath) {
        self.paths.remove(path);
    }

    pub fn contains(&self, path: &NodePath) -> bool {
        self.paths.contains(path)
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// How far the entitlement filter reaches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterScope {
    /// Only root entries are tested; a kept root shows its subtree unfiltered.
    #[default]
    Root,
    /// A node is kept if it, an ancestor, or a descendant matches.
    Recursive,
}

impl fmt::Display for FilterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterScope::Root => write!(f, "root"),
            FilterScope::Recursive => write!(f, "recursive"),
        }
    }
}

/// One visible row of the entitlement view.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitlementNode<'a> {
    pub path: NodePath,
    pub value: &'a PropertyValue,
    pub depth: usize,
    pub child_count: usize,
    pub expanded: bool,
}

impl EntitlementNode<'_> {
    /// The node's own key, or `[i]` for array elements.
    pub fn key(&self) -> String {
        self.path.label()
    }

    pub fn display_value(&self) -> String {
        self.value.display_value()
    }

    pub fn has_children(&self) -> bool {
        self.child_count > 0
    }

    pub fn is_array_element(&self) -> bool {
        self.path.is_array_element()
    }

    /// Row subtitle: collapsed containers show only their size.
    pub fn summary(&self) -> String {
        if self.has_children() && !self.expanded {
            format!("{} items", self.child_count)
        } else {
            self.display_value()
        }
    }

    /// Clipboard text for the row.
    pub fn copy_text(&self) -> String {
        let value = self.display_value();
        if self.is_array_element() {
            format!("{value} = {value}")
        } else {
            format!("{} = {value}", self.path)
        }
    }
}

/// Builds the visible node list for one entitlements structure.
///
/// Pure: equal inputs give equal output. A scalar root has no entries and
/// yields an empty view.
pub fn build_view<'a>(
    entitlements: &'a PropertyValue,
    expanded: &ExpandSet,
    filter: &SearchText,
    scope: FilterScope,
) -> Vec<EntitlementNode<'a>> {
    let walk = Walk {
        expanded,
        filter,
        scope,
    };
    let mut nodes = Vec::new();
    for (segment, value) in entitlements.children() {
        walk.visit(NodePath::new(segment), value, filter.is_empty(), &mut nodes);
    }
    nodes
}

struct Walk<'s> {
    expanded: &'s ExpandSet,
    filter: &'s SearchText,
    scope: FilterScope,
}

impl Walk<'_> {
    /// `admitted` is true when the filter no longer applies to this subtree.
    fn visit<'a>(
        &self,
        path: NodePath,
        value: &'a PropertyValue,
        admitted: bool,
        nodes: &mut Vec<EntitlementNode<'a>>,
    ) {
        let matched = admitted || self.matches(path.last(), value);
        let kept = match self.scope {
            FilterScope::Root => matched,
            FilterScope::Recursive => matched || self.descendant_matches(value),
        };
        if !kept {
            return;
        }

        let expanded = self.expanded.contains(&path);
        nodes.push(EntitlementNode {
            depth: path.depth(),
            child_count: value.child_count(),
            expanded,
            value,
            path: path.clone(),
        });

        if !expanded {
            return;
        }
        let children_admitted = match self.scope {
            FilterScope::Root => true,
            FilterScope::Recursive => matched,
        };
        for (segment, child) in value.children() {
            self.visit(path.join(segment), child, children_admitted, nodes);
        }
    }

    /// Keys and rendered values are searched; array indices are not.
    fn matches(&self, segment: &PathSegment, value: &PropertyValue) -> bool {
        let key_matches = match segment {
            PathSegment::Key(key) => self.filter.matches(key),
            PathSegment::Index(_) => false,
        };
        key_matches || self.filter.matches(&value.display_value())
    }

    fn descendant_matches(&self, value: &PropertyValue) -> bool {
        value
            .children()
            .any(|(segment, child)| self.matches(&segment, child) || self.descendant_matches(child))
    }
}
