//! Loading home/work/day rows from delimited text and grouping them by day.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::InputError;

const HOME_COLUMNS: &[&str] = &["home", "casa"];
const WORK_COLUMNS: &[&str] = &["work", "lavoro"];
const DAY_COLUMNS: &[&str] = &["day", "giorno"];

/// One input row. Blank cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    pub home: Option<String>,
    pub work: Option<String>,
    pub day: Option<String>,
}

impl DayRecord {
    pub fn new(home: Option<&str>, work: Option<&str>, day: Option<&str>) -> Self {
        Self {
            home: home.map(str::to_string),
            work: work.map(str::to_string),
            day: day.map(str::to_string),
        }
    }
}

/// Everything needed to plan one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub day: String,
    /// `None` when no row of the day (after forward fill) had a home.
    pub home: Option<String>,
    /// Work addresses in input order, duplicates included.
    pub stops: Vec<String>,
}

/// Picks `;` when the header line contains one, `,` otherwise.
pub fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains(';') { b';' } else { b',' }
}

/// Reads rows from delimited text with a header line.
///
/// Columns are found by name, case-insensitively: `home`/`casa`,
/// `work`/`lavoro`, `day`/`giorno`. Other columns are ignored.
pub fn read_records<R: Read>(reader: R, delimiter: u8) -> Result<Vec<DayRecord>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let home = find_column(&headers, HOME_COLUMNS).ok_or(InputError::MissingColumn("home"))?;
    let work = find_column(&headers, WORK_COLUMNS).ok_or(InputError::MissingColumn("work"))?;
    let day = find_column(&headers, DAY_COLUMNS).ok_or(InputError::MissingColumn("day"))?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(DayRecord {
            home: cell(&row, home),
            work: cell(&row, work),
            day: cell(&row, day),
        });
    }

    debug!(rows = records.len(), "input rows read");
    Ok(records)
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim().trim_start_matches('\u{feff}');
        names.iter().any(|name| header.eq_ignore_ascii_case(name))
    })
}

fn cell(row: &csv::StringRecord, index: usize) -> Option<String> {
    row.get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Fills blank homes with the most recent non-blank home above them.
///
/// Runs over the whole input in order, before rows are grouped by day.
pub fn forward_fill_home(records: &mut [DayRecord]) {
    let mut last_home: Option<String> = None;
    for record in records.iter_mut() {
        match &record.home {
            Some(home) => last_home = Some(home.clone()),
            None => record.home = last_home.clone(),
        }
    }
}

/// Groups rows by day, days in ascending order.
///
/// Rows without a day are ignored; rows without a work address only
/// contribute their home. A day's home is the first one seen for it.
pub fn group_by_day(records: &[DayRecord]) -> Vec<DayGroup> {
    let mut groups: BTreeMap<&str, DayGroup> = BTreeMap::new();

    for record in records {
        let Some(day) = record.day.as_deref() else {
            continue;
        };
        let group = groups.entry(day).or_insert_with(|| DayGroup {
            day: day.to_string(),
            home: None,
            stops: Vec::new(),
        });

        if let Some(home) = &record.home {
            if group.home.is_none() {
                group.home = Some(home.clone());
            } else if group.home.as_ref() != Some(home) {
                warn!(day, ignored = %home, "multiple homes for one day; using the first");
            }
        }

        if let Some(work) = &record.work {
            group.stops.push(work.clone());
        }
    }

    groups.into_values().collect()
}

/// Reads a file, forward-fills homes and groups rows by day.
///
/// When `delimiter` is `None` it is detected from the header line.
pub fn load_day_groups(path: &Path, delimiter: Option<u8>) -> Result<Vec<DayGroup>, InputError> {
    let mut text = String::new();
    std::fs::File::open(path)?.read_to_string(&mut text)?;
    let text = text.trim_start_matches('\u{feff}');

    let delimiter =
        delimiter.unwrap_or_else(|| detect_delimiter(text.lines().next().unwrap_or_default()));
    let mut records = read_records(text.as_bytes(), delimiter)?;
    forward_fill_home(&mut records);
    Ok(group_by_day(&records))
}
