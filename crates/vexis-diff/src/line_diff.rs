//! Line-level diff: runs of unchanged, added, and removed lines.
//!
//! Uses the `similar` crate (Myers diff algorithm) and then coalesces
//! adjacent changes of the same kind. Line terminators are kept inside the
//! runs, so the old and new texts can be rebuilt byte for byte.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// What happened to a run of lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present only in the new text.
    Added,
    /// Present only in the old text.
    Removed,
    /// Present in both.
    Unchanged,
}

impl ChangeKind {
    fn from_tag(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => Self::Unchanged,
            ChangeTag::Delete => Self::Removed,
            ChangeTag::Insert => Self::Added,
        }
    }

    /// Marker prefixed to each line in plain rendering.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Added => "++",
            Self::Removed => "--",
            Self::Unchanged => "",
        }
    }
}

/// A maximal run of consecutive lines sharing one [`ChangeKind`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffRun {
    pub kind: ChangeKind,
    /// The lines of the run, concatenated with their terminators.
    pub lines: String,
    /// Number of lines in the run.
    pub line_count: usize,
}

impl DiffRun {
    /// Iterate over the individual lines, terminators included.
    pub fn iter_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.split_inclusive('\n')
    }
}

/// The edit script between two texts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    pub runs: Vec<DiffRun>,
}

impl LineDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_unchanged(&self) -> bool {
        self.runs.iter().all(|r| r.kind == ChangeKind::Unchanged)
    }

    /// Total number of lines added.
    pub fn additions(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    /// Total number of lines removed.
    pub fn deletions(&self) -> usize {
        self.count(ChangeKind::Removed)
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.runs
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.line_count)
            .sum()
    }

    /// Rebuild the old text from the unchanged and removed runs.
    pub fn old_view(&self) -> String {
        self.view(ChangeKind::Removed)
    }

    /// Rebuild the new text from the unchanged and added runs.
    pub fn new_view(&self) -> String {
        self.view(ChangeKind::Added)
    }

    fn view(&self, side: ChangeKind) -> String {
        self.runs
            .iter()
            .filter(|r| r.kind == ChangeKind::Unchanged || r.kind == side)
            .map(|r| r.lines.as_str())
            .collect()
    }

    /// Render without color: added lines prefixed `++`, removed lines `--`.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            for line in run.iter_lines() {
                out.push_str(run.kind.marker());
                out.push_str(line);
            }
        }
        out
    }
}

/// Compute the line diff from `old` to `new`.
pub fn diff_text(old: &str, new: &str) -> LineDiff {
    let text_diff = TextDiff::from_lines(old, new);
    let mut runs: Vec<DiffRun> = Vec::new();

    for change in text_diff.iter_all_changes() {
        let kind = ChangeKind::from_tag(change.tag());
        let value = change.value();

        match runs.last_mut() {
            Some(run) if run.kind == kind => {
                run.lines.push_str(value);
                run.line_count += 1;
            }
            _ => runs.push(DiffRun {
                kind,
                lines: value.to_string(),
                line_count: 1,
            }),
        }
    }

    LineDiff { runs }
}

/// Compute the line diff between two blobs.
///
/// Non-UTF-8 bytes are replaced with U+FFFD; binary content is not
/// treated specially.
pub fn diff_blobs(old: &[u8], new: &[u8]) -> LineDiff {
    diff_text(&String::from_utf8_lossy(old), &String::from_utf8_lossy(new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kinds(diff: &LineDiff) -> Vec<ChangeKind> {
        diff.runs.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn identical_texts() {
        let diff = diff_text("hello\nworld\n", "hello\nworld\n");
        assert!(diff.is_unchanged());
        assert_eq!(kinds(&diff), vec![ChangeKind::Unchanged]);
        assert_eq!(diff.runs[0].line_count, 2);
    }

    #[test]
    fn appended_line() {
        let diff = diff_text("hello\n", "hello\nworld\n");
        assert_eq!(kinds(&diff), vec![ChangeKind::Unchanged, ChangeKind::Added]);
        assert_eq!(diff.runs[0].lines, "hello\n");
        assert_eq!(diff.runs[1].lines, "world\n");
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 0);
    }

    #[test]
    fn removed_line() {
        let diff = diff_text("a\nb\nc\n", "a\nc\n");
        assert_eq!(
            kinds(&diff),
            vec![ChangeKind::Unchanged, ChangeKind::Removed, ChangeKind::Unchanged]
        );
        assert_eq!(diff.runs[1].lines, "b\n");
        assert_eq!(diff.deletions(), 1);
    }

    #[test]
    fn adjacent_changes_are_coalesced() {
        let diff = diff_text("keep\nx\ny\n", "keep\n1\n2\n3\n");
        assert_eq!(diff.runs[0].kind, ChangeKind::Unchanged);
        let removed: Vec<_> = diff
            .runs
            .iter()
            .filter(|r| r.kind == ChangeKind::Removed)
            .collect();
        let added: Vec<_> = diff
            .runs
            .iter()
            .filter(|r| r.kind == ChangeKind::Added)
            .collect();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].line_count, 2);
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].lines, "1\n2\n3\n");
    }

    #[test]
    fn empty_to_content() {
        let diff = diff_text("", "new content\n");
        assert_eq!(kinds(&diff), vec![ChangeKind::Added]);
    }

    #[test]
    fn content_to_empty() {
        let diff = diff_text("old content\n", "");
        assert_eq!(kinds(&diff), vec![ChangeKind::Removed]);
    }

    #[test]
    fn both_empty_has_no_runs() {
        let diff = diff_text("", "");
        assert!(diff.runs.is_empty());
        assert!(diff.is_unchanged());
    }

    #[test]
    fn missing_final_newline_survives() {
        let diff = diff_text("a\nb", "a\nb\nc");
        assert_eq!(diff.old_view(), "a\nb");
        assert_eq!(diff.new_view(), "a\nb\nc");
    }

    #[test]
    fn views_rebuild_inputs() {
        let old = "line1\nline2\nline3\nline4\nline5\n";
        let new = "line1\nmodified\nline3\nnew_line\nline5\n";
        let diff = diff_text(old, new);
        assert_eq!(diff.old_view(), old);
        assert_eq!(diff.new_view(), new);
    }

    #[test]
    fn plain_rendering_marks_each_line() {
        let diff = diff_text("a\nb\n", "a\nc\nd\n");
        assert_eq!(diff.render_plain(), "a\n--b\n++c\n++d\n");
    }

    #[test]
    fn blobs_with_invalid_utf8_still_diff() {
        let diff = diff_blobs(b"ok\n\xff\n", b"ok\n");
        assert_eq!(diff.deletions(), 1);
    }

    #[test]
    fn serializes_kinds_lowercase() {
        let diff = diff_text("", "x\n");
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["runs"][0]["kind"], "added");
    }

    fn text_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![Just("a"), Just("b"), Just("c"), Just(""), Just("dd")],
            0..12,
        )
        .prop_flat_map(|lines| {
            let joined = lines.join("\n");
            prop_oneof![Just(joined.clone()), Just(format!("{joined}\n"))]
        })
    }

    proptest! {
        #[test]
        fn views_always_rebuild_inputs(old in text_strategy(), new in text_strategy()) {
            let diff = diff_text(&old, &new);
            prop_assert_eq!(diff.old_view(), old);
            prop_assert_eq!(diff.new_view(), new);
        }

        #[test]
        fn runs_are_maximal(old in text_strategy(), new in text_strategy()) {
            let diff = diff_text(&old, &new);
            for pair in diff.runs.windows(2) {
                prop_assert_ne!(pair[0].kind, pair[1].kind);
            }
        }
    }
}
