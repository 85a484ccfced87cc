/*!
Classical social-choice methods over complete, strict ranked ballots.

Every method is a pure function of a [`ValidElection`], which can only be
obtained through [`validate`]:

```
use social_choice::*;

let election = Election::new(
    &["A", "B", "C"],
    vec![
        Ballot::new(&["A", "B", "C"]),
        Ballot::new(&["B", "C", "A"]),
        Ballot::new(&["A", "C", "B"]),
    ],
);
let valid = validate(&election)?;

assert_eq!(majority(&valid).winner, Some("A".to_string()));
assert_eq!(borda(&valid).winner, "A");
let matrix = pairwise_matrix(&valid);
assert_eq!(condorcet_winner(&matrix), Some("A".to_string()));
# Ok::<(), ValidationError>(())
```

See the [manual] for a description of each method.
*/

mod config;
mod elimination;
mod pairwise;

pub mod builder;
pub mod manual;

use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;
pub use crate::elimination::{coombs, irv};
pub use crate::pairwise::{condorcet_winner, pairwise_matrix, schulze};

// **** Private structures ****

/// Position of an alternative in the declared order.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct AltId(usize);

/// An election that passed [`validate`].
///
/// Invariant: at least 2 distinct alternatives, at least 1 ballot, and every
/// ballot is a permutation of the alternatives.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ValidElection {
    election: Election,
    // The ballots translated to alternative ids, most preferred first.
    ranks: Vec<Vec<AltId>>,
}

impl ValidElection {
    pub fn election(&self) -> &Election {
        &self.election
    }

    pub fn alternatives(&self) -> &[String] {
        &self.election.alternatives
    }

    pub fn num_ballots(&self) -> u64 {
        self.ranks.len() as u64
    }

    fn num_alternatives(&self) -> usize {
        self.election.alternatives.len()
    }

    fn ids(&self) -> impl Iterator<Item = AltId> {
        (0..self.num_alternatives()).map(AltId)
    }

    fn name(&self, id: AltId) -> &str {
        self.election.alternatives[id.0].as_str()
    }

    /// Public tally for the given alternatives, from counts indexed by id.
    fn tally(&self, ids: &[AltId], counts: &[u64]) -> Tally {
        Tally {
            counts: ids
                .iter()
                .map(|id| (self.name(*id).to_string(), counts[id.0]))
                .collect(),
        }
    }

    fn names(&self, ids: &[AltId]) -> Vec<String> {
        ids.iter().map(|id| self.name(*id).to_string()).collect()
    }

    /// True if the count is strictly more than half of the ballots.
    fn is_majority(&self, count: u64) -> bool {
        2 * count > self.num_ballots()
    }
}

/// Checks that the election is well formed.
///
/// The checks run in this order, and the first failure is returned:
/// at least 2 alternatives, at least 1 ballot, then for each ballot in turn its
/// length and whether it ranks every alternative exactly once.
pub fn validate(election: &Election) -> Result<ValidElection, ValidationError> {
    let num_alternatives = election.alternatives.len();
    if num_alternatives < 2 {
        return Err(ValidationError::TooFewAlternatives);
    }
    if election.ballots.is_empty() {
        return Err(ValidationError::NoBallots);
    }

    let ids: HashMap<&str, AltId> = election
        .alternatives
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), AltId(idx)))
        .collect();

    let mut ranks: Vec<Vec<AltId>> = Vec::with_capacity(election.ballots.len());
    for (idx, ballot) in election.ballots.iter().enumerate() {
        if ballot.ranking.len() != num_alternatives {
            debug!("validate: ballot {} is incomplete: {:?}", idx, ballot);
            return Err(ValidationError::IncompleteBallot {
                ballot: idx,
                expected: num_alternatives,
                found: ballot.ranking.len(),
            });
        }
        // Unknown labels are dropped here, and duplicated ones collapse in the set.
        // Both leave fewer distinct ids than alternatives.
        let rank: Vec<AltId> = ballot
            .ranking
            .iter()
            .filter_map(|name| ids.get(name.as_str()).copied())
            .collect();
        let distinct: HashSet<AltId> = rank.iter().copied().collect();
        if rank.len() != num_alternatives || distinct.len() != num_alternatives {
            debug!("validate: ballot {} is not a permutation: {:?}", idx, ballot);
            return Err(ValidationError::DuplicateOrMissingPreference { ballot: idx });
        }
        ranks.push(rank);
    }

    Ok(ValidElection {
        election: election.clone(),
        ranks,
    })
}

fn first_preference_counts(election: &ValidElection) -> Vec<u64> {
    let mut counts = vec![0; election.num_alternatives()];
    for rank in election.ranks.iter() {
        if let Some(first) = rank.first() {
            counts[first.0] += 1;
        }
    }
    counts
}

/// Number of ballots ranking each alternative first.
pub fn plurality_tally(election: &ValidElection) -> Tally {
    let all: Vec<AltId> = election.ids().collect();
    election.tally(&all, &first_preference_counts(election))
}

/// Absolute majority of first preferences. A count of exactly half is not a win.
pub fn majority(election: &ValidElection) -> MajorityResult {
    let counts = first_preference_counts(election);
    let winner = election
        .ids()
        .find(|id| election.is_majority(counts[id.0]))
        .map(|id| election.name(id).to_string());
    debug!("majority: counts: {:?} winner: {:?}", counts, winner);
    let all: Vec<AltId> = election.ids().collect();
    MajorityResult {
        winner,
        tally: election.tally(&all, &counts),
    }
}

/// Top-two runoff.
///
/// The two alternatives with the most first preferences go to a second round,
/// where each ballot counts for whichever of them it ranks higher. Equal first
/// round counts are resolved in declared order.
pub fn runoff(election: &ValidElection) -> RunoffResult {
    let counts = first_preference_counts(election);
    let mut sorted: Vec<AltId> = election.ids().collect();
    // sort_by is stable: on equal counts, the declared order is kept.
    sorted.sort_by(|a, b| counts[b.0].cmp(&counts[a.0]));
    // A valid election has at least two alternatives.
    let (x, y) = (sorted[0], sorted[1]);

    let mut x_votes: u64 = 0;
    let mut y_votes: u64 = 0;
    for rank in election.ranks.iter() {
        match rank.iter().find(|id| **id == x || **id == y) {
            Some(id) if *id == x => x_votes += 1,
            _ => y_votes += 1,
        }
    }

    let winner = match x_votes.cmp(&y_votes) {
        std::cmp::Ordering::Greater => Some(election.name(x).to_string()),
        std::cmp::Ordering::Less => Some(election.name(y).to_string()),
        std::cmp::Ordering::Equal => None,
    };
    info!(
        "runoff: {} ({}) vs {} ({}) -> {:?}",
        election.name(x),
        x_votes,
        election.name(y),
        y_votes,
        winner
    );

    let all: Vec<AltId> = election.ids().collect();
    RunoffResult {
        finalists: (election.name(x).to_string(), election.name(y).to_string()),
        votes: (x_votes, y_votes),
        winner,
        first_round: election.tally(&all, &counts),
    }
}

/// Borda count: with n alternatives, rank position p (from 0) is worth n - 1 - p points.
pub fn borda(election: &ValidElection) -> BordaResult {
    let n = election.num_alternatives();
    let mut scores: Vec<u64> = vec![0; n];
    for rank in election.ranks.iter() {
        for (pos, id) in rank.iter().enumerate() {
            scores[id.0] += (n - 1 - pos) as u64;
        }
    }

    let all: Vec<AltId> = election.ids().collect();
    let mut sorted = all.clone();
    sorted.sort_by(|a, b| scores[b.0].cmp(&scores[a.0]));
    debug!("borda: scores: {:?} sorted: {:?}", scores, sorted);

    let ranking = election.names(&sorted);
    BordaResult {
        scores: election.tally(&all, &scores),
        winner: ranking[0].clone(),
        ranking,
    }
}

/// Validates the election and runs every method over it.
pub fn tabulate(election: &Election) -> Result<Summary, ValidationError> {
    info!(
        "Processing {:?} ballots, alternatives: {:?}",
        election.ballots.len(),
        election.alternatives
    );
    let valid = validate(election)?;

    let pairwise = pairwise_matrix(&valid);
    let condorcet = condorcet_winner(&pairwise);
    let schulze = schulze(&pairwise);
    let summary = Summary {
        ballots: valid.num_ballots(),
        majority: majority(&valid),
        runoff: runoff(&valid),
        condorcet,
        schulze,
        pairwise,
        irv: irv(&valid),
        coombs: coombs(&valid),
        borda: borda(&valid),
    };
    info!(
        "Winners: majority {:?}, runoff {:?}, condorcet {:?}, schulze {:?}, irv {}, coombs {}, borda {}",
        summary.majority.winner,
        summary.runoff.winner,
        summary.condorcet,
        summary.schulze.winners,
        summary.irv.winner,
        summary.coombs.winner,
        summary.borda.winner
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn election(alternatives: &[&str], ballots: &[&[&str]]) -> Election {
        Election::new(
            alternatives,
            ballots.iter().map(|b| Ballot::new(*b)).collect(),
        )
    }

    fn repeat(ballot: &'static [&'static str], times: usize) -> Vec<&'static [&'static str]> {
        vec![ballot; times]
    }

    #[test]
    fn validate_checks_in_order() {
        assert_eq!(
            validate(&election(&["A"], &[])),
            Err(ValidationError::TooFewAlternatives)
        );
        assert_eq!(
            validate(&election(&["A", "B"], &[])),
            Err(ValidationError::NoBallots)
        );
        assert_eq!(
            validate(&election(&["A", "B", "C"], &[&["A", "B", "C"], &["A", "B"]])),
            Err(ValidationError::IncompleteBallot {
                ballot: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            validate(&election(&["A", "B", "C"], &[&["A", "A", "C"]])),
            Err(ValidationError::DuplicateOrMissingPreference { ballot: 0 })
        );
    }

    #[test]
    fn validate_reports_the_first_bad_ballot() {
        // The permutation check of ballot 0 fails before the length check of ballot 1.
        let e = election(&["A", "B"], &[&["A", "A"], &["A"]]);
        assert_eq!(
            validate(&e),
            Err(ValidationError::DuplicateOrMissingPreference { ballot: 0 })
        );
    }

    #[test]
    fn validate_rejects_unknown_labels() {
        let e = election(&["A", "B", "C"], &[&["A", "B", "X"]]);
        assert_eq!(
            validate(&e),
            Err(ValidationError::DuplicateOrMissingPreference { ballot: 0 })
        );
    }

    #[test]
    fn validate_rejects_duplicated_alternatives() {
        let e = election(&["A", "A", "B"], &[&["A", "A", "B"]]);
        assert_eq!(
            validate(&e),
            Err(ValidationError::DuplicateOrMissingPreference { ballot: 0 })
        );
    }

    #[test]
    fn validation_messages() {
        assert_eq!(ValidationError::NoBallots.code(), "no_ballots");
        assert_eq!(
            ValidationError::IncompleteBallot {
                ballot: 2,
                expected: 3,
                found: 1
            }
            .to_string(),
            "Every voter must rank all the alternatives (voter 3 ranked 1 of 3)."
        );
    }

    #[test]
    fn plurality_counts_first_choices() {
        let e = election(
            &["A", "B", "C"],
            &[&["B", "A", "C"], &["B", "C", "A"], &["C", "A", "B"]],
        );
        let tally = plurality_tally(&validate(&e).unwrap());
        assert_eq!(
            tally.counts,
            vec![
                ("A".to_string(), 0),
                ("B".to_string(), 2),
                ("C".to_string(), 1)
            ]
        );
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn majority_needs_more_than_half() {
        // 2 of 4 is exactly half.
        let e = election(
            &["A", "B"],
            &[&["A", "B"], &["A", "B"], &["B", "A"], &["B", "A"]],
        );
        let res = majority(&validate(&e).unwrap());
        assert_eq!(res.winner, None);
        assert_eq!(res.tally.count("A"), Some(2));

        let e = election(&["A", "B"], &[&["A", "B"], &["A", "B"], &["B", "A"]]);
        assert_eq!(
            majority(&validate(&e).unwrap()).winner,
            Some("A".to_string())
        );
    }

    #[test]
    fn runoff_uses_declared_order_on_ties() {
        // A=4, B=3, C=3: C loses the tie with B by declared order.
        let mut ballots = repeat(&["A", "C", "B"], 4);
        ballots.extend(repeat(&["B", "A", "C"], 3));
        ballots.extend(repeat(&["C", "B", "A"], 3));
        let e = election(&["A", "B", "C"], &ballots);
        let res = runoff(&validate(&e).unwrap());
        assert_eq!(res.finalists, ("A".to_string(), "B".to_string()));
        // The C voters prefer B to A.
        assert_eq!(res.votes, (4, 6));
        assert_eq!(res.winner, Some("B".to_string()));
        assert_eq!(res.first_round.count("C"), Some(3));
    }

    #[test]
    fn runoff_exact_split_has_no_winner() {
        let mut ballots = repeat(&["A", "C", "B"], 4);
        ballots.extend(repeat(&["B", "A", "C"], 3));
        ballots.extend(repeat(&["C", "B", "A"], 1));
        let e = election(&["A", "B", "C"], &ballots);
        let res = runoff(&validate(&e).unwrap());
        assert_eq!(res.finalists, ("A".to_string(), "B".to_string()));
        assert_eq!(res.votes, (4, 4));
        assert_eq!(res.winner, None);
    }

    #[test]
    fn runoff_finalist_order_follows_counts() {
        let e = election(
            &["A", "B", "C"],
            &[&["C", "A", "B"], &["C", "B", "A"], &["B", "A", "C"]],
        );
        let res = runoff(&validate(&e).unwrap());
        assert_eq!(res.finalists, ("C".to_string(), "B".to_string()));
        assert_eq!(res.votes, (2, 1));
        assert_eq!(res.winner, Some("C".to_string()));
    }

    #[test]
    fn borda_single_ballot() {
        let e = election(&["A", "B", "C"], &[&["A", "B", "C"]]);
        let res = borda(&validate(&e).unwrap());
        assert_eq!(res.scores.count("A"), Some(2));
        assert_eq!(res.scores.count("B"), Some(1));
        assert_eq!(res.scores.count("C"), Some(0));
        assert_eq!(res.ranking, vec!["A", "B", "C"]);
        assert_eq!(res.winner, "A");
    }

    #[test]
    fn borda_ties_keep_declared_order() {
        let e = election(&["A", "B", "C"], &[&["C", "B", "A"], &["A", "B", "C"]]);
        let res = borda(&validate(&e).unwrap());
        // Everyone has 2 points.
        assert_eq!(res.ranking, vec!["A", "B", "C"]);
        assert_eq!(res.winner, "A");
    }

    #[test]
    fn tabulate_stops_at_validation() {
        let e = election(&["A", "B"], &[]);
        assert_eq!(tabulate(&e), Err(ValidationError::NoBallots));
    }

    #[test]
    fn tabulate_runs_every_method() {
        let e = election(
            &["A", "B", "C"],
            &[&["A", "B", "C"], &["B", "C", "A"], &["A", "C", "B"]],
        );
        let s = tabulate(&e).unwrap();
        assert_eq!(s.ballots, 3);
        assert_eq!(s.majority.winner, Some("A".to_string()));
        assert_eq!(s.condorcet, Some("A".to_string()));
        assert_eq!(s.schulze.winners, vec!["A"]);
        assert_eq!(s.irv.winner, "A");
        assert_eq!(s.coombs.winner, "A");
        assert_eq!(s.borda.winner, "A");
    }
}
