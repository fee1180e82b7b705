//! Change decomposition: break a target amount into available coins.

use crate::Cents;

/// Find a combination of coins summing exactly to `target`.
///
/// `coins` lists each denomination with the number of units available; the
/// search runs over a scratch copy, so the caller's banks are untouched
/// either way. Returns the selected coin values (largest first) or `None`
/// when no combination exists.
///
/// Depth-first backtracking over denominations sorted descending, retrying
/// the same denomination before advancing, stopping at the first success.
/// That approximates greedy selection while still escaping greedy dead
/// ends; worst case is bounded by the denomination count times
/// `target / smallest denomination`.
pub fn make_change(target: Cents, coins: &[(Cents, u32)]) -> Option<Vec<Cents>> {
    let mut scratch: Vec<(Cents, u32)> = coins.to_vec();
    scratch.sort_by(|a, b| b.0.cmp(&a.0));

    let mut picked = Vec::new();
    if search(target, 0, &mut scratch, &mut picked) {
        Some(picked)
    } else {
        None
    }
}

fn search(
    remainder: Cents,
    index: usize,
    coins: &mut [(Cents, u32)],
    picked: &mut Vec<Cents>,
) -> bool {
    if remainder == 0 {
        return true;
    }

    for i in index..coins.len() {
        let (value, available) = coins[i];
        // Unsigned remainder: value > remainder is the R < 0 prune.
        if available == 0 || value > remainder {
            continue;
        }

        coins[i].1 -= 1;
        picked.push(value);
        if search(remainder - value, i, coins, picked) {
            return true;
        }
        picked.pop();
        coins[i].1 += 1;
    }

    false
}
