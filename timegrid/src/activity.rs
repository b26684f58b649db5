use serde::{Deserialize, Serialize};

/// A category row: `(parent, code, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Activity {
    pub code: String,
    pub name: String,
    /// Code of the parent activity. Empty, or equal to `code`, for top-level activities.
    pub parent: String,
}

impl Activity {
    pub fn new(parent: &str, code: &str, name: &str) -> Self {
        Self {
            code: code.to_owned(),
            name: name.to_owned(),
            parent: parent.to_owned(),
        }
    }

    /// Parse a stored category row. Rows without both a code and a name are skipped.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Option<Self> {
        let cell = |i: usize| row.get(i).map(|c| c.as_ref()).unwrap_or("");
        let (parent, code, name) = (cell(0), cell(1), cell(2));
        if code.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(parent, code, name))
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_empty() || self.parent == self.code
    }
}

/// A top-level activity with its direct children. Trees are exactly two levels deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityNode {
    pub activity: Activity,
    pub children: Vec<Activity>,
    pub expanded: bool,
}

impl ActivityNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Group a flat category list into roots with their children.
///
/// Children whose parent code matches no root are dropped.
pub fn build_activity_tree(activities: Vec<Activity>) -> Vec<ActivityNode> {
    let (roots, children): (Vec<_>, Vec<_>) =
        activities.into_iter().partition(Activity::is_root);

    let tree: Vec<ActivityNode> = roots
        .into_iter()
        .map(|root| ActivityNode {
            children: children
                .iter()
                .filter(|child| child.parent == root.code)
                .cloned()
                .collect(),
            activity: root,
            expanded: false,
        })
        .collect();

    for orphan in children
        .iter()
        .filter(|child| !tree.iter().any(|node| node.activity.code == child.parent))
    {
        tracing::debug!(
            "dropping activity {} with unknown parent {}",
            orphan.code,
            orphan.parent
        );
    }

    tree
}

/// Position of a row in the activity panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub root: usize,
    pub child: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityTree {
    nodes: Vec<ActivityNode>,
}

impl ActivityTree {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self {
            nodes: build_activity_tree(activities),
        }
    }

    pub fn nodes(&self) -> &[ActivityNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Roots, followed by the children of expanded roots.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        for (root, node) in self.nodes.iter().enumerate() {
            rows.push(VisibleRow { root, child: None });
            if node.expanded {
                rows.extend((0..node.children.len()).map(|child| VisibleRow {
                    root,
                    child: Some(child),
                }));
            }
        }
        rows
    }

    pub fn activity_at(&self, row: VisibleRow) -> Option<&Activity> {
        let node = self.nodes.get(row.root)?;
        match row.child {
            Some(child) => node.children.get(child),
            None => Some(&node.activity),
        }
    }

    pub fn node(&self, root: usize) -> Option<&ActivityNode> {
        self.nodes.get(root)
    }

    /// Expand or collapse a root. Returns the new expansion state.
    pub fn toggle_expanded(&mut self, root: usize) -> bool {
        match self.nodes.get_mut(root) {
            Some(node) => {
                node.expanded = !node.expanded;
                node.expanded
            }
            None => false,
        }
    }

    /// Look up an activity by code, roots first.
    pub fn find(&self, code: &str) -> Option<&Activity> {
        self.nodes
            .iter()
            .map(|node| &node.activity)
            .find(|activity| activity.code == code)
            .or_else(|| {
                self.nodes
                    .iter()
                    .flat_map(|node| node.children.iter())
                    .find(|activity| activity.code == code)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_two_level_tree() {
        let tree = build_activity_tree(vec![
            Activity::new("", "W", "Work"),
            Activity::new("W", "W1", "Meetings"),
        ]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].activity.code, "W");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].code, "W1");
        assert_eq!(tree[0].children[0].name, "Meetings");
    }

    #[test]
    fn orphans_are_dropped() {
        let tree = build_activity_tree(vec![
            Activity::new("", "W", "Work"),
            Activity::new("W", "W1", "Meetings"),
            Activity::new("X", "X1", "Orphan"),
        ]);

        assert_eq!(tree.len(), 1);
        assert!(tree
            .iter()
            .flat_map(|node| node.children.iter())
            .all(|child| child.code != "X1"));
    }

    #[test]
    fn parent_equal_to_own_code_is_a_root() {
        let tree = build_activity_tree(vec![
            Activity::new("S", "S", "Sleep"),
            Activity::new("", "E", "Exercise"),
        ]);

        let codes: Vec<&str> = tree.iter().map(|n| n.activity.code.as_str()).collect();
        assert_eq!(codes, vec!["S", "E"]);
        assert!(tree.iter().all(|node| !node.has_children()));
    }

    #[test]
    fn children_keep_source_order() {
        let tree = build_activity_tree(vec![
            Activity::new("W", "W2", "Coding"),
            Activity::new("", "W", "Work"),
            Activity::new("W", "W1", "Meetings"),
        ]);

        let codes: Vec<&str> = tree[0].children.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["W2", "W1"]);
    }

    #[test]
    fn rows_without_code_or_name_are_skipped() {
        assert_eq!(
            Activity::from_row(&["", "W", "Work"]),
            Some(Activity::new("", "W", "Work"))
        );
        assert_eq!(
            Activity::from_row(&["W", "W1", "Meetings"]),
            Some(Activity::new("W", "W1", "Meetings"))
        );
        assert_eq!(Activity::from_row(&["W", "W1"]), None);
        assert_eq!(Activity::from_row(&["W", "", "Meetings"]), None);
        assert_eq!(Activity::from_row::<&str>(&[]), None);
    }

    #[test]
    fn visible_rows_follow_expansion() {
        let mut tree = ActivityTree::new(vec![
            Activity::new("", "W", "Work"),
            Activity::new("W", "W1", "Meetings"),
            Activity::new("W", "W2", "Coding"),
            Activity::new("", "S", "Sleep"),
        ]);

        assert_eq!(tree.visible_rows().len(), 2);

        assert!(tree.toggle_expanded(0));
        let rows = tree.visible_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(tree.activity_at(rows[2]).map(|a| a.code.as_str()), Some("W2"));
        assert_eq!(tree.activity_at(rows[3]).map(|a| a.code.as_str()), Some("S"));

        assert!(!tree.toggle_expanded(0));
        assert_eq!(tree.visible_rows().len(), 2);
    }

    #[test]
    fn find_searches_roots_and_children() {
        let tree = ActivityTree::new(vec![
            Activity::new("", "W", "Work"),
            Activity::new("W", "W1", "Meetings"),
        ]);

        assert_eq!(tree.find("W1").map(|a| a.name.as_str()), Some("Meetings"));
        assert_eq!(tree.find("W").map(|a| a.name.as_str()), Some("Work"));
        assert!(tree.find("nope").is_none());
    }
}
