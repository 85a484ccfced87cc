use log::debug;

use crate::{PairMatrix, PairwiseMatrix, SchulzeResult, StrengthMatrix, ValidElection};

/// Head-to-head counts: the (a, b) entry is the number of ballots ranking a ahead of b.
pub fn pairwise_matrix(election: &ValidElection) -> PairwiseMatrix {
    let n = election.num_alternatives();
    let mut cells: Vec<Vec<u64>> = vec![vec![0; n]; n];
    let mut pos: Vec<usize> = vec![0; n];
    for rank in election.ranks.iter() {
        for (idx, id) in rank.iter().enumerate() {
            pos[id.0] = idx;
        }
        for a in 0..n {
            for b in 0..n {
                if a != b && pos[a] < pos[b] {
                    cells[a][b] += 1;
                }
            }
        }
    }
    debug!("pairwise_matrix: {:?}", cells);
    PairMatrix {
        alternatives: election.alternatives().to_vec(),
        cells,
    }
}

/// The alternative that beats every other one head to head, if any.
pub fn condorcet_winner(matrix: &PairwiseMatrix) -> Option<String> {
    let m = &matrix.cells;
    let n = matrix.alternatives.len();
    (0..n)
        .find(|&a| (0..n).all(|b| a == b || m[a][b] > m[b][a]))
        .map(|a| matrix.alternatives[a].clone())
}

/// Schulze method: strongest paths over the pairwise defeats.
///
/// A direct link a -> b has the strength of the a over b count when a wins
/// that pair, and 0 otherwise. A path is as strong as its weakest link.
/// An alternative wins when no other alternative has a stronger path back to it.
/// Several winners denote a tie.
pub fn schulze(matrix: &PairwiseMatrix) -> SchulzeResult {
    let m = &matrix.cells;
    let n = matrix.alternatives.len();

    let mut p: Vec<Vec<u64>> = vec![vec![0; n]; n];
    for a in 0..n {
        for b in 0..n {
            if a != b && m[a][b] > m[b][a] {
                p[a][b] = m[a][b];
            }
        }
    }

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            for k in 0..n {
                if i == k || j == k {
                    continue;
                }
                p[j][k] = p[j][k].max(p[j][i].min(p[i][k]));
            }
        }
    }
    debug!("schulze: strongest paths: {:?}", p);

    let winners: Vec<String> = (0..n)
        .filter(|&a| (0..n).all(|b| a == b || p[a][b] >= p[b][a]))
        .map(|a| matrix.alternatives[a].clone())
        .collect();
    debug!("schulze: winners: {:?}", winners);

    SchulzeResult {
        winners,
        strengths: StrengthMatrix {
            alternatives: matrix.alternatives.clone(),
            cells: p,
        },
    }
}
