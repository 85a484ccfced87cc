// Reading ballots from CSV files: a header row, then one ballot per row.

use log::debug;
use snafu::ResultExt;

use crate::tabulation::io_common::{clean_cells, RawRow};
use crate::tabulation::{CsvLineParseSnafu, CsvOpenSnafu, TabulationResult};

pub fn read_csv_ballots(path: &str) -> TabulationResult<Vec<RawRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<RawRow> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        let cells = clean_cells(&cells);
        debug!("read_csv_ballots: lineno: {:?} row: {:?}", lineno, &cells);
        res.push(RawRow { lineno, cells });
    }
    Ok(res)
}
