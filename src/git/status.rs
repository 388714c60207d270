//! Working-tree change classification from `git status --porcelain`.

use strum::{EnumCount, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Category of a single porcelain status entry.
///
/// Declaration order is the order categories appear in a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumCount, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ChangeKind {
    Modified,
    Added,
    Deleted,
    Renamed,
    Copied,
    Conflicted,
    Untracked,
}

impl ChangeKind {
    /// Classify the two-character `XY` prefix of a porcelain v1 line.
    ///
    /// Returns `None` for ignored entries (`!!`) and prefixes git doesn't document.
    pub fn from_porcelain(xy: &str) -> Option<Self> {
        let mut chars = xy.chars();
        let (x, y) = (chars.next()?, chars.next()?);

        match (x, y) {
            ('?', '?') => return Some(ChangeKind::Untracked),
            ('!', '!') => return None,
            ('U', _) | (_, 'U') | ('A', 'A') | ('D', 'D') => return Some(ChangeKind::Conflicted),
            _ => {}
        }

        // Index column wins; the worktree column only matters when the index is unchanged
        let code = if x == ' ' { y } else { x };
        match code {
            'M' | 'T' => Some(ChangeKind::Modified),
            'A' => Some(ChangeKind::Added),
            'D' => Some(ChangeKind::Deleted),
            'R' => Some(ChangeKind::Renamed),
            'C' => Some(ChangeKind::Copied),
            _ => None,
        }
    }
}

/// Per-category counts for one working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeCounts {
    counts: [usize; ChangeKind::COUNT],
}

impl ChangeCounts {
    /// Count the entries of `git status --porcelain` output.
    ///
    /// Lines shorter than two characters and unclassified prefixes are skipped.
    pub fn from_porcelain(output: &str) -> Self {
        let mut counts = Self::default();
        for line in output.lines() {
            let Some(xy) = line.get(..2) else {
                continue;
            };
            if let Some(kind) = ChangeKind::from_porcelain(xy) {
                counts.counts[kind as usize] += 1;
            }
        }
        counts
    }

    pub fn get(&self, kind: ChangeKind) -> usize {
        self.counts[kind as usize]
    }

    /// True when no line was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&n| n == 0)
    }

    /// "3 modified, 1 untracked", or "Clean" when nothing was counted.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "Clean".to_string();
        }
        ChangeKind::iter()
            .filter(|&kind| self.get(kind) > 0)
            .map(|kind| {
                let label: &'static str = kind.into();
                format!("{} {}", self.get(kind), label)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
