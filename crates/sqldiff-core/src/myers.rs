//! Myers O(ND) edit script for inputs too large for the LCS table
//!
//! Linear-space variant: the forward and backward searches meet at a middle
//! snake, the input is split there and both halves are solved recursively.
//! Only two frontier vectors of length O(N+M) are alive per level.

use crate::diff::Edit;

/// Compute a shortest edit script between two id sequences
pub(crate) fn edit_script(old: &[u32], new: &[u32]) -> Vec<Edit> {
    let mut script = Vec::with_capacity(old.len() + new.len());
    conquer(old, new, &mut script);
    script
}

fn conquer(old: &[u32], new: &[u32], script: &mut Vec<Edit>) {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let (old, new) = (&old[prefix..], &new[prefix..]);
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let (old, new) = (&old[..old.len() - suffix], &new[..new.len() - suffix]);

    script.extend(std::iter::repeat(Edit::Keep).take(prefix));
    match middle_snake(old, new) {
        // Each half must be strictly smaller than the whole
        Some((x, y)) if (x, y) != (0, 0) && (x, y) != (old.len(), new.len()) => {
            conquer(&old[..x], &new[..y], script);
            conquer(&old[x..], &new[y..], script);
        }
        _ => {
            script.extend(std::iter::repeat(Edit::Remove).take(old.len()));
            script.extend(std::iter::repeat(Edit::Add).take(new.len()));
        }
    }
    script.extend(std::iter::repeat(Edit::Keep).take(suffix));
}

/// Find the point where a shortest edit path crosses its middle.
///
/// Expects trimmed input (first and last lines differ). Returns `None` when
/// either side is empty or the texts share no line, in which case removing
/// everything and adding everything is already minimal.
fn middle_snake(old: &[u32], new: &[u32]) -> Option<(usize, usize)> {
    if old.is_empty() || new.is_empty() {
        return None;
    }
    let n = old.len() as isize;
    let m = new.len() as isize;
    let max_d = (n + m + 1) / 2;
    let offset = max_d + 1;
    let len = (2 * max_d + 3) as usize;

    // Furthest x per diagonal; -1 marks diagonals not reached yet
    let mut forward = vec![-1isize; len];
    let mut backward = vec![-1isize; len];
    forward[(offset + 1) as usize] = 0;
    backward[(offset + 1) as usize] = 0;

    let delta = n - m;
    let odd = delta % 2 != 0;
    // Diagonals that ran off the grid are skipped from then on
    let (mut fwd_lo, mut fwd_hi, mut bwd_lo, mut bwd_hi) = (0, 0, 0, 0);

    for d in 0..max_d {
        let mut k = -d + fwd_lo;
        while k <= d - fwd_hi {
            let idx = (offset + k) as usize;
            let mut x = if k == -d || (k != d && forward[idx - 1] < forward[idx + 1]) {
                forward[idx + 1]
            } else {
                forward[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && old[x as usize] == new[y as usize] {
                x += 1;
                y += 1;
            }
            forward[idx] = x;
            if x > n {
                fwd_hi += 2;
            } else if y > m {
                fwd_lo += 2;
            } else if odd {
                let other = offset + delta - k;
                if let Some(bx) = reached(&backward, other, delta - k, n, m) {
                    if x >= n - bx {
                        return Some((x as usize, y as usize));
                    }
                }
            }
            k += 2;
        }

        let mut k = -d + bwd_lo;
        while k <= d - bwd_hi {
            let idx = (offset + k) as usize;
            let mut x = if k == -d || (k != d && backward[idx - 1] < backward[idx + 1]) {
                backward[idx + 1]
            } else {
                backward[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && old[(n - x - 1) as usize] == new[(m - y - 1) as usize] {
                x += 1;
                y += 1;
            }
            backward[idx] = x;
            if x > n {
                bwd_hi += 2;
            } else if y > m {
                bwd_lo += 2;
            } else if !odd {
                let other = offset + delta - k;
                if let Some(fx) = reached(&forward, other, delta - k, n, m) {
                    let fy = fx - (delta - k);
                    if fx >= n - x {
                        return Some((fx as usize, fy as usize));
                    }
                }
            }
            k += 2;
        }
    }

    None
}

/// Frontier value at `idx` for diagonal `k`, if it was reached inside the grid
fn reached(frontier: &[isize], idx: isize, k: isize, n: isize, m: isize) -> Option<isize> {
    let x = *frontier.get(usize::try_from(idx).ok()?)?;
    (x >= 0 && x <= n && x - k >= 0 && x - k <= m).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(script: &[Edit], edit: Edit) -> usize {
        script.iter().filter(|e| **e == edit).count()
    }

    #[test]
    fn test_identical() {
        let script = edit_script(&[1, 2, 3], &[1, 2, 3]);
        assert_eq!(script, vec![Edit::Keep; 3]);
    }

    #[test]
    fn test_single_substitution() {
        let script = edit_script(&[1, 2, 3], &[1, 9, 3]);
        assert_eq!(count(&script, Edit::Keep), 2);
        assert_eq!(count(&script, Edit::Remove), 1);
        assert_eq!(count(&script, Edit::Add), 1);
        assert_eq!(script.first(), Some(&Edit::Keep));
        assert_eq!(script.last(), Some(&Edit::Keep));
    }

    #[test]
    fn test_matches_lcs_length() {
        let old = [1, 2, 3, 2, 4, 1, 2];
        let new = [2, 4, 3, 1, 2, 1];
        let script = edit_script(&old, &new);
        assert_eq!(count(&script, Edit::Keep), 4);
        assert_eq!(count(&script, Edit::Remove), 3);
        assert_eq!(count(&script, Edit::Add), 2);
    }

    #[test]
    fn test_disjoint_without_shortcut() {
        let old: Vec<u32> = (0..3000).collect();
        let new: Vec<u32> = (3000..6000).collect();
        let script = edit_script(&old, &new);
        assert_eq!(count(&script, Edit::Keep), 0);
        assert_eq!(count(&script, Edit::Remove), 3000);
        assert_eq!(count(&script, Edit::Add), 3000);
    }

    #[test]
    fn test_large_sparse_edits() {
        let old: Vec<u32> = (0..20_000).collect();
        let new: Vec<u32> = old
            .iter()
            .map(|&id| if id % 500 == 0 { id + 100_000 } else { id })
            .collect();
        let script = edit_script(&old, &new);
        assert_eq!(count(&script, Edit::Remove), 40);
        assert_eq!(count(&script, Edit::Add), 40);
        assert_eq!(count(&script, Edit::Keep), 19_960);
    }

    #[test]
    fn test_matches_lcs_on_interleaved_input() {
        let old: Vec<u32> = (0..300).map(|i| i % 7).collect();
        let new: Vec<u32> = (0..280).map(|i| (i * 3) % 11).collect();
        let keeps = count(&edit_script(&old, &new), Edit::Keep);
        let lcs_keeps = crate::lcs::edit_script(&old, &new)
            .iter()
            .filter(|e| **e == Edit::Keep)
            .count();
        assert_eq!(keeps, lcs_keeps);
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(edit_script(&[], &[1]), vec![Edit::Add]);
        assert_eq!(edit_script(&[1, 2], &[]), vec![Edit::Remove, Edit::Remove]);
    }
}
