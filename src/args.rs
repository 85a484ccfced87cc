use clap::Parser;

/// Compares classical voting methods on a set of ranked ballots.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The election to tabulate. See the documentation of --input-type for the formats.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (json, csv or xlsx) The type of the input. If not specified, it is deduced from the
    /// extension of the file, and defaults to json.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (list of labels or not specified) The alternatives, in declared order, for the csv and
    /// xlsx inputs. Repeat the flag for each alternative. If not specified, the alternatives are
    /// taken in order of first appearance in the ballots.
    #[clap(long, value_parser)]
    pub alternatives: Option<Vec<String>>,

    /// (default: the first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the summary of the election in JSON format.
    /// The summary goes to the standard output if not specified.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of an election in JSON format. If provided,
    /// rmcount will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
