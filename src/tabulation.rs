use log::{debug, info, warn};

use social_choice::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

mod io_common;
mod io_csv;
mod io_json;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum TabulationError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON in {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook has no worksheet"))]
    EmptyExcel {},
    #[snafu(display("The workbook has no worksheet named {name}"))]
    MissingWorksheet { name: String },
    #[snafu(display("Row {lineno}: cannot read the cell {content} as an alternative"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Invalid list of alternatives"))]
    InvalidAlternatives { source: EditError },
    #[snafu(display("Unknown input type {input_type} (expected json, csv or xlsx)"))]
    UnknownInputType { input_type: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TabulationResult<T> = Result<T, TabulationError>;

/// An election as read from the input, before validation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct InputElection {
    pub title: Option<String>,
    pub election: Election,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum InputType {
    Json,
    Csv,
    Xlsx,
}

fn input_type(args: &Args) -> TabulationResult<InputType> {
    let name = match &args.input_type {
        Some(t) => t.to_lowercase(),
        None => Path::new(&args.input)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_else(|| "json".to_string()),
    };
    match name.as_str() {
        "json" => Ok(InputType::Json),
        "csv" => Ok(InputType::Csv),
        "xlsx" => Ok(InputType::Xlsx),
        // Unknown extensions are read as json, an explicit type must be known.
        _ if args.input_type.is_none() => Ok(InputType::Json),
        x => UnknownInputTypeSnafu { input_type: x }.fail(),
    }
}

fn read_input(args: &Args) -> TabulationResult<InputElection> {
    let it = input_type(args)?;
    info!("Attempting to read {:?} file {:?}", it, args.input);
    match it {
        InputType::Json => {
            let ef = io_json::read_election_file(&args.input)?;
            Ok(InputElection {
                title: ef.title.clone(),
                election: ef.to_election(),
            })
        }
        InputType::Csv => {
            let rows = io_csv::read_csv_ballots(&args.input)?;
            let election = io_common::assemble_election(args.alternatives.as_deref(), rows)?;
            Ok(InputElection {
                title: None,
                election,
            })
        }
        InputType::Xlsx => {
            let rows = io_xlsx::read_xlsx_ballots(
                &args.input,
                args.excel_worksheet_name.as_deref(),
            )?;
            let election = io_common::assemble_election(args.alternatives.as_deref(), rows)?;
            Ok(InputElection {
                title: None,
                election,
            })
        }
    }
}

fn tally_to_json(tally: &Tally) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (name, count) in tally.counts.iter() {
        m.insert(name.clone(), json!(count));
    }
    JSValue::Object(m)
}

fn matrix_to_json(matrix: &PairMatrix) -> JSValue {
    let mut rows: JSMap<String, JSValue> = JSMap::new();
    for (a, b, value) in matrix.pairs() {
        let row = rows
            .entry(a.to_string())
            .or_insert_with(|| JSValue::Object(JSMap::new()));
        if let JSValue::Object(m) = row {
            m.insert(b.to_string(), json!(value));
        }
    }
    JSValue::Object(rows)
}

fn rounds_to_json(res: &EliminationResult) -> JSValue {
    let mut l: Vec<JSValue> = Vec::new();
    for round in res.rounds.iter() {
        let mut js = json!({
            "round": round.round,
            "active": round.active,
            "tally": tally_to_json(&round.first_counts),
            "winner": round.winner,
            "eliminated": round.eliminated,
        });
        if let (Some(last), JSValue::Object(m)) = (&round.last_counts, &mut js) {
            m.insert("lastTally".to_string(), tally_to_json(last));
        }
        l.push(js);
    }
    json!({ "winner": res.winner, "rounds": l })
}

fn summary_to_json(s: &Summary) -> JSValue {
    let (x, y) = &s.runoff.finalists;
    let mut runoff_votes: JSMap<String, JSValue> = JSMap::new();
    runoff_votes.insert(x.clone(), json!(s.runoff.votes.0));
    runoff_votes.insert(y.clone(), json!(s.runoff.votes.1));

    json!({
        "majority": {
            "winner": s.majority.winner,
            "tally": tally_to_json(&s.majority.tally),
        },
        "runoff": {
            "finalists": [x, y],
            "votes": runoff_votes,
            "winner": s.runoff.winner,
        },
        "condorcet": {
            "winner": s.condorcet,
            "pairwise": matrix_to_json(&s.pairwise),
        },
        "schulze": {
            "winner": s.schulze.winner(),
            "winners": s.schulze.winners,
            "strengths": matrix_to_json(&s.schulze.strengths),
        },
        "irv": rounds_to_json(&s.irv),
        "coombs": rounds_to_json(&s.coombs),
        "borda": {
            "winner": s.borda.winner,
            "scores": tally_to_json(&s.borda.scores),
            "ranking": s.borda.ranking,
        },
    })
}

/// The summary of an election. A failed validation replaces all the results by one error.
pub fn build_summary_js(
    input: &InputElection,
    outcome: &Result<Summary, ValidationError>,
) -> JSValue {
    let config = json!({
        "title": input.title,
        "alternatives": input.election.alternatives,
        "ballots": input.election.ballots.len(),
    });
    match outcome {
        Ok(s) => json!({ "config": config, "results": summary_to_json(s) }),
        Err(e) => json!({
            "config": config,
            "error": { "code": e.code(), "message": e.to_string() },
        }),
    }
}

fn read_summary(path: &str) -> TabulationResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    debug!("read_summary: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

fn write_summary(out: Option<&str>, pretty_js: &str) -> TabulationResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", pretty_js);
            Ok(())
        }
        Some("") => Ok(()),
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingSummarySnafu { path })
        }
    }
}

/// Computes the summary of the election described by the arguments.
pub fn compute_summary(args: &Args) -> TabulationResult<JSValue> {
    let input = read_input(args)?;
    debug!("input: {:?}", input);

    let outcome = tabulate(&input.election);
    if let Err(e) = &outcome {
        warn!("The election is not valid: {}", e);
    }
    Ok(build_summary_js(&input, &outcome))
}

pub fn run_election(args: &Args) -> TabulationResult<()> {
    let result_js = compute_summary(args)?;
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu)?;
    write_summary(args.out.as_deref(), &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu)?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
        info!("The summary matches the reference {:?}", summary_p);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args(input: &str, reference: Option<&str>) -> Args {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");
        Args {
            input: format!("{}/{}", dir, input),
            input_type: None,
            alternatives: None,
            excel_worksheet_name: None,
            out: Some(String::new()),
            reference: reference.map(|r| format!("{}/{}", dir, r)),
            verbose: false,
        }
    }

    fn test_wrapper(test_name: &str, input: &str) {
        let _ = env_logger::builder().is_test(true).try_init();
        let input_p = format!("{}/{}", test_name, input);
        let reference_p = format!("{}/{}_expected_summary.json", test_name, test_name);
        let args = test_args(&input_p, Some(&reference_p));
        if let Err(e) = run_election(&args) {
            panic!("{}: {}", test_name, e);
        }
    }

    #[test]
    fn paradox() {
        test_wrapper("paradox", "paradox.json");
    }

    #[test]
    fn majority_csv() {
        test_wrapper("majority_csv", "ballots.csv");
    }

    #[test]
    fn invalid_ballot() {
        test_wrapper("invalid_ballot", "invalid_ballot.json");
    }

    #[test]
    fn xlsx_worksheet() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut args = test_args(
            "xlsx_worksheet/ballots.xlsx",
            Some("xlsx_worksheet/xlsx_worksheet_expected_summary.json"),
        );
        args.excel_worksheet_name = Some("Ballots".to_string());
        args.alternatives = Some(vec!["A".to_string(), "B".to_string()]);
        if let Err(e) = run_election(&args) {
            panic!("xlsx_worksheet: {}", e);
        }
    }

    #[test]
    fn reference_mismatch_is_an_error() {
        let args = test_args(
            "paradox/paradox.json",
            Some("invalid_ballot/invalid_ballot_expected_summary.json"),
        );
        assert!(run_election(&args).is_err());
    }

    #[test]
    fn declared_order_from_arguments() {
        let mut args = test_args("majority_csv/ballots.csv", None);
        args.alternatives = Some(vec!["C".to_string(), "B".to_string(), "A".to_string()]);
        let js = compute_summary(&args).unwrap();
        assert_eq!(js["config"]["alternatives"], json!(["C", "B", "A"]));
        assert_eq!(js["results"]["majority"]["winner"], json!("A"));
    }

    #[test]
    fn unknown_input_type() {
        let mut args = test_args("paradox/paradox.json", None);
        args.input_type = Some("ods".to_string());
        assert!(matches!(
            compute_summary(&args),
            Err(TabulationError::UnknownInputType { .. })
        ));
    }

    #[test]
    fn missing_file() {
        let args = test_args("nothing/here.json", None);
        assert!(matches!(
            compute_summary(&args),
            Err(TabulationError::OpeningFile { .. })
        ));
    }
}
