// The JSON election format.

use serde::Deserialize;
use snafu::ResultExt;

use social_choice::{Ballot, Election};

use crate::tabulation::{OpeningFileSnafu, ParsingJsonSnafu, TabulationResult};

#[derive(Deserialize, Debug, Clone)]
pub struct VoterFile {
    pub ranking: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ElectionFile {
    #[serde(default)]
    pub title: Option<String>,
    pub options: Vec<String>,
    pub voters: Vec<VoterFile>,
}

impl ElectionFile {
    pub fn to_election(&self) -> Election {
        Election {
            alternatives: self.options.clone(),
            ballots: self
                .voters
                .iter()
                .map(|v| Ballot {
                    ranking: v.ranking.clone(),
                })
                .collect(),
        }
    }
}

pub fn read_election_file(path: &str) -> TabulationResult<ElectionFile> {
    let contents = std::fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let ef: ElectionFile =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(ef)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_optional() {
        let ef: ElectionFile = serde_json::from_str(
            r#"{"options": ["A", "B"], "voters": [{"ranking": ["B", "A"]}]}"#,
        )
        .unwrap();
        assert_eq!(ef.title, None);
        let e = ef.to_election();
        assert_eq!(e.alternatives, vec!["A", "B"]);
        assert_eq!(e.ballots, vec![Ballot::new(&["B", "A"])]);
    }
}
