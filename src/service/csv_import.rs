use crate::error::PadError;

/// A parsed CSV upload: the header row names the columns, every cell kept as
/// text so the uploaded content round-trips exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// Parse uploaded CSV bytes. The first row is the header; ragged rows are a
/// parse error, surfaced to the page like any other failure.
pub fn parse(bytes: &[u8]) -> Result<CsvTable, PadError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(PadError::EmptyCsv);
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(CsvTable { headers, records })
}
