use std::fmt;

use serde::{Deserialize, Serialize};

/// The top-level sections every report starts with, in document order.
pub const INITIAL_SECTIONS: [&str; 8] = [
    "1. Executive Summary",
    "2. Project Overview",
    "3. Market Analysis",
    "4. Technical Feasibility",
    "5. Financial Analysis",
    "6. Environmental Impact",
    "7. Risk Assessment",
    "8. Conclusion and Recommendations",
];

/// Number of children generated under an expanded section.
pub const CHILDREN_PER_SECTION: u32 = 3;

const CHILD_SUFFIX: &str = " Subsection";

/// One entry of the report outline.
///
/// Hierarchy is encoded in the text itself: a generated child is written as
/// `"<parent>.<k> Subsection"`, so `"1. Executive Summary.2 Subsection"` is the
/// second child of `"1. Executive Summary"`. Any label that does not end in
/// that pattern is a top-level section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionLabel(String);

impl SectionLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The label this one was generated from, if it is a child label.
    pub fn parent(&self) -> Option<SectionLabel> {
        split_child(&self.0).map(|(parent, _)| SectionLabel::new(parent))
    }

    /// Hierarchy depth: 1 for top-level sections, one more per child level.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut label = self.0.as_str();
        while let Some((parent, _)) = split_child(label) {
            depth += 1;
            label = parent;
        }
        depth
    }

    pub fn is_top_level(&self) -> bool {
        split_child(&self.0).is_none()
    }

    /// Section numbering, e.g. `[1, 2]` for `"1. Executive Summary.2 Subsection"`.
    ///
    /// Child indices are always present; the leading number is omitted when the
    /// top-level ancestor does not start with `"N."`.
    pub fn numbering(&self) -> Vec<u32> {
        let mut indices = Vec::new();
        let mut label = self.0.as_str();
        while let Some((parent, index)) = split_child(label) {
            indices.push(index);
            label = parent;
        }
        if let Some(top) = leading_number(label) {
            indices.push(top);
        }
        indices.reverse();
        indices
    }

    /// The `k`-th generated child of this label.
    pub fn child(&self, k: u32) -> SectionLabel {
        SectionLabel(format!("{}.{}{}", self.0, k, CHILD_SUFFIX))
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Split `"<parent>.<k> Subsection"` into its parent text and index.
fn split_child(label: &str) -> Option<(&str, u32)> {
    let head = label.strip_suffix(CHILD_SUFFIX)?;
    let (parent, index) = head.rsplit_once('.')?;
    if parent.is_empty() || index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((parent, index.parse().ok()?))
}

fn leading_number(label: &str) -> Option<u32> {
    let (number, _) = label.split_once('.')?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}

/// The fixed outline produced when a report is first generated.
pub fn initial_outline() -> Vec<SectionLabel> {
    INITIAL_SECTIONS.iter().map(|&s| SectionLabel::new(s)).collect()
}

/// One expansion pass over the outline.
///
/// Every top-level label that is not already followed by its own children gains
/// [`CHILDREN_PER_SECTION`] children right after it. Child labels never gain
/// children, so a pass over an already expanded outline returns it unchanged.
pub fn expand_pass(sections: &[SectionLabel]) -> Vec<SectionLabel> {
    let per_section = 1 + CHILDREN_PER_SECTION as usize;
    let mut expanded = Vec::with_capacity(sections.len() * per_section);

    for (i, section) in sections.iter().enumerate() {
        expanded.push(section.clone());

        if !section.is_top_level() {
            continue;
        }
        let has_children = sections
            .get(i + 1)
            .and_then(SectionLabel::parent)
            .is_some_and(|parent| &parent == section);
        if !has_children {
            expanded.extend((1..=CHILDREN_PER_SECTION).map(|k| section.child(k)));
        }
    }

    expanded
}

/// Deepest label depth in the outline, 0 when empty.
pub fn max_depth(sections: &[SectionLabel]) -> usize {
    sections.iter().map(SectionLabel::depth).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_label_has_depth_one() {
        let label = SectionLabel::new("1. Executive Summary");
        assert_eq!(label.depth(), 1);
        assert!(label.is_top_level());
        assert_eq!(label.parent(), None);
        assert_eq!(label.numbering(), vec![1]);
    }

    #[test]
    fn child_label_points_back_to_parent() {
        let parent = SectionLabel::new("5. Financial Analysis");
        let child = parent.child(2);
        assert_eq!(child.as_str(), "5. Financial Analysis.2 Subsection");
        assert_eq!(child.depth(), 2);
        assert!(!child.is_top_level());
        assert_eq!(child.parent(), Some(parent));
        assert_eq!(child.numbering(), vec![5, 2]);
    }

    #[test]
    fn nested_child_counts_every_level() {
        let grandchild = SectionLabel::new("3. Market Analysis").child(1).child(3);
        assert_eq!(grandchild.depth(), 3);
        assert_eq!(grandchild.numbering(), vec![3, 1, 3]);
    }

    #[test]
    fn unnumbered_labels_are_top_level() {
        let label = SectionLabel::new("Appendix");
        assert_eq!(label.depth(), 1);
        assert!(label.numbering().is_empty());
        assert_eq!(label.child(1).numbering(), vec![1]);
    }

    #[test]
    fn subsection_without_index_is_not_a_child() {
        let label = SectionLabel::new("9. Extra Subsection");
        assert!(label.is_top_level());
        let label = SectionLabel::new(".1 Subsection");
        assert!(label.is_top_level());
    }

    #[test]
    fn pass_inserts_children_after_each_parent() {
        let sections = vec![SectionLabel::new("1. A"), SectionLabel::new("2. B")];
        let expanded = expand_pass(&sections);
        let labels: Vec<&str> = expanded.iter().map(SectionLabel::as_str).collect();
        assert_eq!(
            labels,
            vec![
                "1. A",
                "1. A.1 Subsection",
                "1. A.2 Subsection",
                "1. A.3 Subsection",
                "2. B",
                "2. B.1 Subsection",
                "2. B.2 Subsection",
                "2. B.3 Subsection",
            ]
        );
    }

    #[test]
    fn pass_is_stable_once_expanded() {
        let once = expand_pass(&initial_outline());
        let twice = expand_pass(&once);
        assert_eq!(once, twice);
        assert_eq!(max_depth(&twice), 2);
    }

    #[test]
    fn empty_outline_stays_empty() {
        assert!(expand_pass(&[]).is_empty());
        assert_eq!(max_depth(&[]), 0);
    }
}
