// Shared steps for the tabular inputs (csv and xlsx).

use log::{debug, warn};
use snafu::ResultExt;

use social_choice::builder::ElectionBuilder;
use social_choice::Election;

use crate::tabulation::{InvalidAlternativesSnafu, TabulationResult};

/// One row of a tabular input, with its line number (starting at 1, header included).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawRow {
    pub lineno: usize,
    pub cells: Vec<String>,
}

/// Trims the cells and drops the blank cells at the end of the row.
pub fn clean_cells(cells: &[String]) -> Vec<String> {
    let mut res: Vec<String> = cells.iter().map(|c| c.trim().to_string()).collect();
    while res.last().map_or(false, |c| c.is_empty()) {
        res.pop();
    }
    res
}

/// The non-empty labels, in order of first appearance.
fn labels_by_appearance(rows: &[RawRow]) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for row in rows.iter() {
        for c in row.cells.iter() {
            if !c.is_empty() && !res.contains(c) {
                res.push(c.clone());
            }
        }
    }
    res
}

/// Builds the election from the rows. Blank rows are skipped, every other row
/// becomes a ballot as is: incomplete rankings are reported by the validation.
pub fn assemble_election(
    declared: Option<&[String]>,
    rows: Vec<RawRow>,
) -> TabulationResult<Election> {
    let rows: Vec<RawRow> = rows
        .into_iter()
        .filter(|row| {
            if row.cells.is_empty() {
                warn!("assemble_election: skipping empty row {}", row.lineno);
                false
            } else {
                true
            }
        })
        .collect();

    let alternatives = match declared {
        Some(alts) => alts.to_vec(),
        None => labels_by_appearance(&rows),
    };
    debug!("assemble_election: alternatives: {:?}", alternatives);

    let mut builder = ElectionBuilder::new()
        .alternatives(&alternatives)
        .context(InvalidAlternativesSnafu {})?;
    for row in rows.iter() {
        builder.add_ballot(&row.cells);
    }
    Ok(builder.build())
}
