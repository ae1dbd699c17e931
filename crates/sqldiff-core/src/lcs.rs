//! Longest-common-subsequence edit script over interned lines

use crate::diff::Edit;

/// Compute an edit script with the classic O(n·m) suffix table.
///
/// `table[i][j]` holds the LCS length of `old[i..]` and `new[j..]`, which lets
/// the walk run forward. On a tie the removal is taken first.
pub(crate) fn edit_script(old: &[u32], new: &[u32]) -> Vec<Edit> {
    let n = old.len();
    let m = new.len();
    let width = m + 1;
    let mut table = vec![0u32; (n + 1) * width];

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if old[i] == new[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut script = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            script.push(Edit::Keep);
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            script.push(Edit::Remove);
            i += 1;
        } else {
            script.push(Edit::Add);
            j += 1;
        }
    }
    script.extend(std::iter::repeat(Edit::Remove).take(n - i));
    script.extend(std::iter::repeat(Edit::Add).take(m - j));
    script
}
