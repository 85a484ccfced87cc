// Reading ballots from Excel workbooks: a header row, then one ballot per row.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use snafu::{OptionExt, ResultExt};

use crate::tabulation::io_common::{clean_cells, RawRow};
use crate::tabulation::*;

fn get_range(
    path: &str,
    worksheet_name_o: Option<&str>,
) -> TabulationResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name_o);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    match worksheet_name_o {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?
            .context(OpeningExcelSnafu { path }),
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path }),
    }
}

fn cell_to_string(lineno: usize, cell: &DataType) -> TabulationResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok(String::new()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        x => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", x),
        }
        .fail(),
    }
}

pub fn read_xlsx_ballots(
    path: &str,
    worksheet_name_o: Option<&str>,
) -> TabulationResult<Vec<RawRow>> {
    let wrange = get_range(path, worksheet_name_o)?;
    let mut res: Vec<RawRow> = Vec::new();
    // The first row is the header.
    for (idx, row) in wrange.rows().enumerate().skip(1) {
        let lineno = idx + 1;
        let cells = row
            .iter()
            .map(|cell| cell_to_string(lineno, cell))
            .collect::<TabulationResult<Vec<String>>>()?;
        let cells = clean_cells(&cells);
        debug!("read_xlsx_ballots: lineno: {:?} row: {:?}", lineno, &cells);
        res.push(RawRow { lineno, cells });
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/xlsx_worksheet/ballots.xlsx"
    );

    #[test]
    fn numbers_are_labels() {
        assert_eq!(cell_to_string(2, &DataType::Float(3.0)).unwrap(), "3");
        assert_eq!(cell_to_string(2, &DataType::Int(12)).unwrap(), "12");
        assert!(matches!(
            cell_to_string(4, &DataType::Bool(true)),
            Err(TabulationError::ExcelWrongCellType { lineno: 4, .. })
        ));
    }

    #[test]
    fn reads_named_worksheet() {
        let rows = read_xlsx_ballots(PATH, Some("Ballots")).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].lineno, 2);
        assert_eq!(rows[0].cells, vec!["A", "B"]);
    }

    #[test]
    fn missing_worksheet() {
        assert!(matches!(
            read_xlsx_ballots(PATH, Some("Nope")),
            Err(TabulationError::MissingWorksheet { .. })
        ));
    }
}
