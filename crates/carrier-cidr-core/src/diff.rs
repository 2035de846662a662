//! Element-level list diff
//!
//! Computes the entries added and deleted between two ordered snapshots via
//! a longest-common-subsequence walk. Elements are matched by value, not by
//! line position, so an insertion in the middle of a list reports exactly
//! one added entry instead of shifting every line after it.

use crate::cidr::CidrEntry;
use serde::Serialize;

/// Entries added and deleted between two snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffResult<T = CidrEntry> {
    /// Present in new but not matched in old, in new's order
    pub added: Vec<T>,
    /// Present in old but not matched in new, in old's order
    pub deleted: Vec<T>,
}

impl<T> DiffResult<T> {
    /// Whether the two sides matched completely
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

/// Diff two ordered sequences
///
/// An absent previous snapshot is passed as an empty `old`.
pub fn diff<T: PartialEq + Clone>(old: &[T], new: &[T]) -> DiffResult<T> {
    // Common prefix and suffix never contribute to the result
    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old = &old[prefix..old.len() - suffix];
    let new = &new[prefix..new.len() - suffix];

    let table = lcs_table(old, new);

    let mut added = Vec::new();
    let mut deleted = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            deleted.push(old[i].clone());
            i += 1;
        } else {
            added.push(new[j].clone());
            j += 1;
        }
    }
    deleted.extend(old[i..].iter().cloned());
    added.extend(new[j..].iter().cloned());

    DiffResult { added, deleted }
}

/// `table[i][j]` = LCS length of `old[i..]` and `new[j..]`
fn lcs_table<T: PartialEq>(old: &[T], new: &[T]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            table[i][j] = if old[i] == new[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_and_deleted() {
        let result = diff(&["A", "B", "C"], &["A", "C", "D"]);
        assert_eq!(result.added, vec!["D"]);
        assert_eq!(result.deleted, vec!["B"]);
    }

    #[test]
    fn test_identical_is_empty() {
        let result = diff(&["A", "B"], &["A", "B"]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_absent_old_reports_everything_added() {
        let result = diff::<&str>(&[], &["A", "B"]);
        assert_eq!(result.added, vec!["A", "B"]);
        assert!(result.deleted.is_empty());
    }

    #[test]
    fn test_emptied_new_reports_everything_deleted() {
        let result = diff::<&str>(&["A", "B"], &[]);
        assert!(result.added.is_empty());
        assert_eq!(result.deleted, vec!["A", "B"]);
    }

    #[test]
    fn test_middle_insert_is_not_a_shift() {
        let old = ["1.0.0.0/24", "2.0.0.0/24", "3.0.0.0/24", "4.0.0.0/24"];
        let new = [
            "1.0.0.0/24",
            "1.5.0.0/24",
            "2.0.0.0/24",
            "3.0.0.0/24",
            "4.0.0.0/24",
        ];
        let result = diff(&old, &new);
        assert_eq!(result.added, vec!["1.5.0.0/24"]);
        assert!(result.deleted.is_empty());
    }

    #[test]
    fn test_orders_are_preserved() {
        let result = diff(&["X", "A", "Y", "B"], &["P", "A", "Q", "B", "R"]);
        assert_eq!(result.added, vec!["P", "Q", "R"]);
        assert_eq!(result.deleted, vec!["X", "Y"]);
    }

    #[test]
    fn test_pure_reorder_is_minimal() {
        let result = diff(&["A", "B", "C"], &["C", "A", "B"]);
        assert_eq!(result.added, vec!["C"]);
        assert_eq!(result.deleted, vec!["C"]);
    }

    #[test]
    fn test_works_on_cidr_entries() {
        let old: Vec<CidrEntry> = vec!["1.2.3.0/24".into()];
        let new: Vec<CidrEntry> = vec!["1.2.3.0/24".into(), "5.6.7.0/24".into()];
        let result = diff(&old, &new);
        assert_eq!(result.added, vec![CidrEntry::new("5.6.7.0/24")]);
    }
}
