//! Correlation-based targeting for the opponent board.
//!
//! Ship halves are entangled, so across snapshots a ship's two cells always
//! agree (Φ kinds) or always disagree (Ψ kinds). Independent neighbours agree
//! about half the time. Scoring every adjacent pair by how far its agreement
//! rate sits from one half picks out likely ships.

use rand::Rng;

use crate::core::config::AI_HISTORY_WINDOW;
use crate::core::history::{HistoryLedger, Reading};
use crate::core::ship::Direction;

/// Score every cell of an `size×size` board from the most recent snapshots.
///
/// A cell's score is the strongest correlation it shows with any neighbour,
/// from `0.0` (no evidence) to `1.0` (perfectly correlated in every sample).
/// Pairs seen fewer than twice score zero.
pub fn correlation_scores(history: &HistoryLedger, size: usize) -> Vec<f64> {
    let cells = size * size;
    // per cell: [right neighbour, down neighbour] as (seen, agreed)
    let mut tallies = vec![[(0u32, 0u32); 2]; cells];
    let skip = history.len().saturating_sub(AI_HISTORY_WINDOW);
    for snapshot in history.iter().skip(skip) {
        if snapshot.size() != size {
            continue;
        }
        for r in 0..size {
            for c in 0..size {
                let Some(Reading::Bit(here)) = snapshot.get(r, c) else {
                    continue;
                };
                for (slot, dir) in [Direction::Right, Direction::Down].into_iter().enumerate() {
                    let Some((nr, nc)) = dir.step(r, c, size) else {
                        continue;
                    };
                    if let Some(Reading::Bit(there)) = snapshot.get(nr, nc) {
                        let tally = &mut tallies[r * size + c][slot];
                        tally.0 += 1;
                        if here == there {
                            tally.1 += 1;
                        }
                    }
                }
            }
        }
    }

    let mut scores = vec![0.0f64; cells];
    for r in 0..size {
        for c in 0..size {
            for (slot, dir) in [Direction::Right, Direction::Down].into_iter().enumerate() {
                let (seen, agreed) = tallies[r * size + c][slot];
                if seen < 2 {
                    continue;
                }
                let Some((nr, nc)) = dir.step(r, c, size) else {
                    continue;
                };
                let score = (2.0 * agreed as f64 / seen as f64 - 1.0).abs();
                let (a, b) = (r * size + c, nr * size + nc);
                scores[a] = scores[a].max(score);
                scores[b] = scores[b].max(score);
            }
        }
    }
    scores
}

/// Pick an unresolved cell of the latest snapshot.
///
/// Cells listed in `focus` (typically neighbours of unsunk hits) get a bonus
/// of one on top of their correlation score. Cells in `exclude` are skipped:
/// the snapshot does not show shots fired since it was taken. Ties are broken
/// at random.
/// Returns `None` when the history is empty or nothing is left unresolved.
pub fn pick_target<R: Rng>(
    history: &HistoryLedger,
    focus: &[(usize, usize)],
    exclude: &[(usize, usize)],
    rng: &mut R,
) -> Option<(usize, usize)> {
    let latest = history.latest()?;
    let size = latest.size();
    let scores = correlation_scores(history, size);

    let mut best = f64::NEG_INFINITY;
    let mut candidates = Vec::new();
    for r in 0..size {
        for c in 0..size {
            if !matches!(latest.get(r, c), Some(Reading::Bit(_))) || exclude.contains(&(r, c)) {
                continue;
            }
            let mut score = scores[r * size + c];
            if focus.contains(&(r, c)) {
                score += 1.0;
            }
            if score > best + 1e-9 {
                best = score;
                candidates.clear();
            }
            if (score - best).abs() <= 1e-9 {
                candidates.push((r, c));
            }
        }
    }
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}
