//! Node paths within an entitlements tree.

use std::cmp::Ordering;
use std::fmt;

/// One step from a container to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a node, from the root entry down.
///
/// Identity is the segment sequence, so keys containing `.` or `[` never
/// collide. The `Display` form is the dotted/bracketed text shown to users,
/// e.g. `com.apple.security.network.client` or `foo[2].bar`. Root keys are
/// printed verbatim, so the root entry `a.b` and the nested path `a` → `b`
/// print the same text. Key rows by the `NodePath` itself, not its string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    ancestors: Vec<PathSegment>,
    last: PathSegment,
}

impl NodePath {
    pub fn new(first: PathSegment) -> Self {
        Self {
            ancestors: Vec::new(),
            last: first,
        }
    }

    /// Path of a root entry.
    pub fn root(key: impl Into<String>) -> Self {
        Self::new(PathSegment::Key(key.into()))
    }

    pub fn join(&self, segment: PathSegment) -> Self {
        let mut ancestors = Vec::with_capacity(self.ancestors.len() + 1);
        ancestors.extend_from_slice(&self.ancestors);
        ancestors.push(self.last.clone());
        Self {
            ancestors,
            last: segment,
        }
    }

    pub fn key(&self, key: impl Into<String>) -> Self {
        self.join(PathSegment::Key(key.into()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.join(PathSegment::Index(index))
    }

    /// Segments from the root entry down to this node.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.ancestors.iter().chain(std::iter::once(&self.last))
    }

    /// Root entries are at depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn last(&self) -> &PathSegment {
        &self.last
    }

    pub fn is_array_element(&self) -> bool {
        matches!(self.last, PathSegment::Index(_))
    }

    /// Short label for the node: its own key, or `[i]` for array elements.
    pub fn label(&self) -> String {
        match &self.last {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => format!("[{index}]"),
        }
    }

    pub fn parent(&self) -> Option<NodePath> {
        let (last, ancestors) = self.ancestors.split_last()?;
        Some(Self {
            ancestors: ancestors.to_vec(),
            last: last.clone(),
        })
    }
}

impl Ord for NodePath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments().cmp(other.segments())
    }
}

impl PartialOrd for NodePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments().enumerate() {
            match segment {
                PathSegment::Key(key) if position == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
