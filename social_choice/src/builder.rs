pub use crate::config::*;

/// A builder for editing an election.
///
/// Edits keep every ballot a permutation of the alternatives: adding an
/// alternative appends it to the bottom of each ballot, removing it drops it
/// from each ballot, and moving an alternative swaps two rank positions.
///
/// ```
/// use social_choice::builder::ElectionBuilder;
/// # use social_choice::EditError;
///
/// let mut builder = ElectionBuilder::new()
///     .alternatives(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_voter();
/// builder.add_alternative("Clara")?;
/// builder.set_rank(0, 0, "Clara")?;
///
/// let election = builder.build();
/// assert_eq!(election.ballots[0].ranking, vec!["Clara", "Bob", "Anna"]);
/// # Ok::<(), EditError>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionBuilder {
    pub(crate) alternatives: Vec<String>,
    pub(crate) ballots: Vec<Vec<String>>,
}

impl Default for ElectionBuilder {
    fn default() -> Self {
        ElectionBuilder::new()
    }
}

impl From<Election> for ElectionBuilder {
    fn from(election: Election) -> Self {
        ElectionBuilder {
            alternatives: election.alternatives,
            ballots: election.ballots.into_iter().map(|b| b.ranking).collect(),
        }
    }
}

impl ElectionBuilder {
    /// Starts with the alternatives A, B and C and no voters.
    pub fn new() -> ElectionBuilder {
        ElectionBuilder {
            alternatives: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            ballots: Vec::new(),
        }
    }

    /// Replaces the alternatives. Existing voters are dropped.
    pub fn alternatives(self, alts: &[String]) -> Result<ElectionBuilder, EditError> {
        let mut res = ElectionBuilder {
            alternatives: Vec::new(),
            ballots: Vec::new(),
        };
        for a in alts {
            res.add_alternative(a)?;
        }
        Ok(res)
    }

    pub fn add_alternative(&mut self, name: &str) -> Result<(), EditError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::EmptyAlternative);
        }
        if self.alternatives.iter().any(|a| a == name) {
            return Err(EditError::DuplicateAlternative(name.to_string()));
        }
        self.alternatives.push(name.to_string());
        for ranking in self.ballots.iter_mut() {
            ranking.push(name.to_string());
        }
        Ok(())
    }

    pub fn remove_alternative(&mut self, name: &str) -> Result<(), EditError> {
        if self.alternatives.len() <= 2 {
            return Err(EditError::TooFewAlternatives);
        }
        if !self.alternatives.iter().any(|a| a == name) {
            return Err(EditError::UnknownAlternative(name.to_string()));
        }
        self.alternatives.retain(|a| a != name);
        for ranking in self.ballots.iter_mut() {
            ranking.retain(|a| a != name);
        }
        Ok(())
    }

    /// Adds a voter whose ranking is the current declared order.
    pub fn add_voter(&mut self) {
        self.ballots.push(self.alternatives.clone());
    }

    /// Adds a ballot as given. It is checked later, by [`crate::validate`].
    pub fn add_ballot(&mut self, ranking: &[String]) {
        self.ballots.push(ranking.to_vec());
    }

    pub fn remove_voter(&mut self, voter: usize) -> Result<(), EditError> {
        if voter >= self.ballots.len() {
            return Err(EditError::VoterOutOfRange(voter));
        }
        self.ballots.remove(voter);
        Ok(())
    }

    /// Puts the alternative at the given rank position (0 is the top) of a
    /// voter's ranking, swapping it with the alternative previously there.
    pub fn set_rank(
        &mut self,
        voter: usize,
        position: usize,
        alternative: &str,
    ) -> Result<(), EditError> {
        let ranking = self
            .ballots
            .get_mut(voter)
            .ok_or(EditError::VoterOutOfRange(voter))?;
        if position >= ranking.len() {
            return Err(EditError::PositionOutOfRange(position));
        }
        let current = ranking
            .iter()
            .position(|a| a == alternative)
            .ok_or_else(|| EditError::UnknownAlternative(alternative.to_string()))?;
        ranking.swap(position, current);
        Ok(())
    }

    pub fn num_voters(&self) -> usize {
        self.ballots.len()
    }

    pub fn build(&self) -> Election {
        Election {
            alternatives: self.alternatives.clone(),
            ballots: self
                .ballots
                .iter()
                .map(|ranking| Ballot {
                    ranking: ranking.clone(),
                })
                .collect(),
        }
    }
}
