use log::{debug, info};

use std::collections::HashSet;

use crate::{AltId, EliminationResult, EliminationRound, ValidElection};

/// Which tally decides the alternative to drop in a round without a majority.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum EliminationRule {
    /// Fewest first preferences among the active alternatives.
    FewestFirst,
    /// Most last preferences among the active alternatives.
    MostLast,
}

// The elimination methods move from one active set to the next until an
// alternative collects a majority. A single active alternative always has one.
#[derive(Eq, PartialEq, Debug, Clone)]
enum Stage {
    Counting(Vec<AltId>),
    Decided(AltId),
}

/// Instant-runoff voting.
///
/// Each round counts every ballot for its most preferred active alternative.
/// An alternative with more than half of the ballots wins, otherwise the one
/// with the fewest votes is eliminated. Equal counts eliminate the alternative
/// whose label sorts first.
pub fn irv(election: &ValidElection) -> EliminationResult {
    run_elimination(election, EliminationRule::FewestFirst)
}

/// Coombs method.
///
/// The majority check is the same as for [`irv`], but the alternative ranked
/// last among the active ones on the most ballots is eliminated. Equal counts
/// eliminate the alternative whose label sorts first.
pub fn coombs(election: &ValidElection) -> EliminationResult {
    run_elimination(election, EliminationRule::MostLast)
}

fn run_elimination(election: &ValidElection, rule: EliminationRule) -> EliminationResult {
    let mut rounds: Vec<EliminationRound> = Vec::new();
    let mut stage = Stage::Counting(election.ids().collect());
    loop {
        match stage {
            Stage::Decided(winner) => {
                info!(
                    "{:?}: {} elected after {} round(s)",
                    rule,
                    election.name(winner),
                    rounds.len()
                );
                return EliminationResult {
                    winner: election.name(winner).to_string(),
                    rounds,
                };
            }
            Stage::Counting(active) => {
                let round_id = rounds.len() as u32 + 1;
                let (record, next) = run_one_round(election, rule, &active, round_id);
                rounds.push(record);
                stage = next;
            }
        }
    }
}

fn run_one_round(
    election: &ValidElection,
    rule: EliminationRule,
    active: &[AltId],
    round_id: u32,
) -> (EliminationRound, Stage) {
    let still_running: HashSet<AltId> = active.iter().copied().collect();
    let first_counts = count_first_active(election, &still_running);
    let last_counts = match rule {
        EliminationRule::FewestFirst => None,
        EliminationRule::MostLast => Some(count_last_active(election, &still_running)),
    };
    debug!(
        "run_one_round: round {} active: {:?} first: {:?} last: {:?}",
        round_id, active, first_counts, last_counts
    );

    let winner: Option<AltId> = active
        .iter()
        .copied()
        .find(|id| election.is_majority(first_counts[id.0]));

    let eliminated: Option<AltId> = match (winner, &last_counts) {
        (Some(_), _) => None,
        (None, Some(last)) => find_eliminated(election, active, last, rule),
        (None, None) => find_eliminated(election, active, &first_counts, rule),
    };

    info!(
        "Round {} ({:?}): active {:?} -> winner {:?}, eliminated {:?}",
        round_id,
        rule,
        election.names(active),
        winner.map(|id| election.name(id)),
        eliminated.map(|id| election.name(id))
    );

    let record = EliminationRound {
        round: round_id,
        active: election.names(active),
        first_counts: election.tally(active, &first_counts),
        last_counts: last_counts.map(|last| election.tally(active, &last)),
        winner: winner.map(|id| election.name(id).to_string()),
        eliminated: eliminated.map(|id| election.name(id).to_string()),
    };

    let next = match (winner, eliminated) {
        (Some(w), _) => Stage::Decided(w),
        (None, Some(loser)) => Stage::Counting(
            active
                .iter()
                .copied()
                .filter(|id| *id != loser)
                .collect(),
        ),
        (None, None) => unreachable!(
            "round {}: no majority and no alternative to eliminate among {:?}",
            round_id, active
        ),
    };
    (record, next)
}

/// Counts, indexed by id, of the ballots whose best active alternative is this one.
fn count_first_active(election: &ValidElection, still_running: &HashSet<AltId>) -> Vec<u64> {
    let mut counts = vec![0; election.num_alternatives()];
    for rank in election.ranks.iter() {
        if let Some(id) = rank.iter().find(|id| still_running.contains(id)) {
            counts[id.0] += 1;
        }
    }
    counts
}

/// Counts, indexed by id, of the ballots whose worst active alternative is this one.
fn count_last_active(election: &ValidElection, still_running: &HashSet<AltId>) -> Vec<u64> {
    let mut counts = vec![0; election.num_alternatives()];
    for rank in election.ranks.iter() {
        if let Some(id) = rank.iter().rev().find(|id| still_running.contains(id)) {
            counts[id.0] += 1;
        }
    }
    counts
}

fn find_eliminated(
    election: &ValidElection,
    active: &[AltId],
    counts: &[u64],
    rule: EliminationRule,
) -> Option<AltId> {
    let active_counts = active.iter().map(|id| counts[id.0]);
    let target = match rule {
        EliminationRule::FewestFirst => active_counts.min()?,
        EliminationRule::MostLast => active_counts.max()?,
    };
    let tied: Vec<AltId> = active
        .iter()
        .copied()
        .filter(|id| counts[id.0] == target)
        .collect();
    debug!("find_eliminated: count {} tied: {:?}", target, tied);
    // Ties go to the label that sorts first.
    tied.into_iter().min_by_key(|id| election.name(*id))
}
