// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One voter's complete ranking of the alternatives, most preferred first.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    pub ranking: Vec<String>,
}

impl Ballot {
    pub fn new<S: AsRef<str>>(ranking: &[S]) -> Ballot {
        Ballot {
            ranking: ranking.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

/// The alternatives, in declared order, and the ballots cast over them.
///
/// Nothing is checked at construction. Run [`crate::validate`] to obtain a
/// [`crate::ValidElection`] before computing any result.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Election {
    pub alternatives: Vec<String>,
    pub ballots: Vec<Ballot>,
}

impl Election {
    pub fn new<S: AsRef<str>>(alternatives: &[S], ballots: Vec<Ballot>) -> Election {
        Election {
            alternatives: alternatives.iter().map(|s| s.as_ref().to_string()).collect(),
            ballots,
        }
    }
}

// ******** Output data structures *********

/// Counts per alternative, listed in declared order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Tally {
    pub counts: Vec<(String, u64)>,
}

impl Tally {
    pub fn count(&self, name: &str) -> Option<u64> {
        self.counts
            .iter()
            .find_map(|(n, c)| if n == name { Some(*c) } else { None })
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| *c).sum()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MajorityResult {
    /// The alternative with strictly more than half of the first preferences.
    pub winner: Option<String>,
    pub tally: Tally,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunoffResult {
    /// The two alternatives with the most first preferences.
    pub finalists: (String, String),
    /// Ballots preferring the first finalist, then the second one.
    pub votes: (u64, u64),
    /// None on an exact split.
    pub winner: Option<String>,
    pub first_round: Tally,
}

/// Values indexed by ordered pairs of distinct alternatives.
///
/// Only the crate builds these, from a validated election.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PairMatrix {
    pub(crate) alternatives: Vec<String>,
    // cells[a][b], indexed in declared order. The diagonal is always 0.
    pub(crate) cells: Vec<Vec<u64>>,
}

/// Number of ballots ranking the row alternative ahead of the column one.
pub type PairwiseMatrix = PairMatrix;

/// Strength of the strongest path from the row alternative to the column one.
pub type StrengthMatrix = PairMatrix;

impl PairMatrix {
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// The value for the pair (a, b), or None if a == b or a label is unknown.
    pub fn get(&self, a: &str, b: &str) -> Option<u64> {
        let ia = self.alternatives.iter().position(|x| x == a)?;
        let ib = self.alternatives.iter().position(|x| x == b)?;
        if ia == ib {
            None
        } else {
            Some(self.cells[ia][ib])
        }
    }

    /// All the ordered pairs with their value, rows then columns in declared order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, u64)> + '_ {
        self.alternatives.iter().enumerate().flat_map(move |(ia, a)| {
            self.alternatives
                .iter()
                .enumerate()
                .filter(move |(ib, _)| *ib != ia)
                .map(move |(ib, b)| (a.as_str(), b.as_str(), self.cells[ia][ib]))
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SchulzeResult {
    /// Every alternative not beaten by strongest paths, in declared order.
    /// More than one entry means a tie.
    pub winners: Vec<String>,
    pub strengths: StrengthMatrix,
}

impl SchulzeResult {
    /// The first winner in declared order, for display.
    pub fn winner(&self) -> Option<&str> {
        self.winners.first().map(|s| s.as_str())
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}

/// Snapshot of one round of an elimination method (instant-runoff or Coombs).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationRound {
    pub round: u32,
    /// The alternatives still running at the start of the round, in declared order.
    pub active: Vec<String>,
    /// Ballots whose most preferred active alternative is this one.
    pub first_counts: Tally,
    /// Ballots whose least preferred active alternative is this one (Coombs only).
    pub last_counts: Option<Tally>,
    pub winner: Option<String>,
    pub eliminated: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationResult {
    pub winner: String,
    pub rounds: Vec<EliminationRound>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BordaResult {
    pub scores: Tally,
    /// All the alternatives by decreasing score. Equal scores keep declared order.
    pub ranking: Vec<String>,
    pub winner: String,
}

/// The outcome of every method over the same election.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Summary {
    pub ballots: u64,
    pub majority: MajorityResult,
    pub runoff: RunoffResult,
    pub pairwise: PairwiseMatrix,
    pub condorcet: Option<String>,
    pub schulze: SchulzeResult,
    pub irv: EliminationResult,
    pub coombs: EliminationResult,
    pub borda: BordaResult,
}

/// Reasons for rejecting an election. Ballot indices start at 0.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ValidationError {
    TooFewAlternatives,
    NoBallots,
    IncompleteBallot {
        ballot: usize,
        expected: usize,
        found: usize,
    },
    DuplicateOrMissingPreference {
        ballot: usize,
    },
}

impl ValidationError {
    /// A stable identifier, for callers that localize the message.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::TooFewAlternatives => "too_few_alternatives",
            ValidationError::NoBallots => "no_ballots",
            ValidationError::IncompleteBallot { .. } => "incomplete_ballot",
            ValidationError::DuplicateOrMissingPreference { .. } => {
                "duplicate_or_missing_preference"
            }
        }
    }
}

impl Error for ValidationError {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TooFewAlternatives => {
                write!(f, "At least 2 alternatives are required.")
            }
            ValidationError::NoBallots => write!(f, "Add at least 1 voter."),
            ValidationError::IncompleteBallot {
                ballot,
                expected,
                found,
            } => write!(
                f,
                "Every voter must rank all the alternatives (voter {} ranked {} of {}).",
                ballot + 1,
                found,
                expected
            ),
            ValidationError::DuplicateOrMissingPreference { ballot } => write!(
                f,
                "The preferences of voter {} contain duplicated or missing alternatives.",
                ballot + 1
            ),
        }
    }
}

/// Errors raised when editing an election with the builder.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum EditError {
    EmptyAlternative,
    DuplicateAlternative(String),
    UnknownAlternative(String),
    /// Removing would leave fewer than 2 alternatives.
    TooFewAlternatives,
    VoterOutOfRange(usize),
    PositionOutOfRange(usize),
}

impl Error for EditError {}

impl Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::EmptyAlternative => write!(f, "An alternative needs a non-empty label"),
            EditError::DuplicateAlternative(s) => write!(f, "Alternative {:?} already exists", s),
            EditError::UnknownAlternative(s) => write!(f, "Unknown alternative {:?}", s),
            EditError::TooFewAlternatives => {
                write!(f, "An election keeps at least 2 alternatives")
            }
            EditError::VoterOutOfRange(idx) => write!(f, "No voter at index {}", idx),
            EditError::PositionOutOfRange(pos) => write!(f, "No rank position {}", pos),
        }
    }
}
