//! Loader pipeline: file → parsed rows → cleaned rows → [`PlayerTable`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pl_analyzer::transform::{default_plan, load_players};
//! use std::path::Path;
//!
//! let table = load_players(Path::new("database.csv"), &default_plan())?;
//! println!("Loaded {} rows", table.len());
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

use super::dsl::{execute, CleaningPlan};
use crate::api::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::error::{FieldParseError, LoadError, PipelineResult};
use crate::models::*;
use crate::parser::{parse_bytes_auto, read_source, ParseResult};

/// Parse metadata, kept for CLI/API display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

impl From<&ParseResult> for SourceInfo {
    fn from(parsed: &ParseResult) -> Self {
        Self {
            encoding: parsed.encoding.clone(),
            delimiter: parsed.delimiter,
            headers: parsed.headers.clone(),
            row_count: parsed.records.len(),
        }
    }
}

/// Load and clean a statistics file.
pub fn load_players(path: &Path, plan: &CleaningPlan) -> PipelineResult<PlayerTable> {
    log_info(format!("Reading {}", path.display()));
    let bytes = read_source(path)?;
    load_players_from_bytes(&bytes, plan)
}

/// Load and clean raw file bytes.
pub fn load_players_from_bytes(bytes: &[u8], plan: &CleaningPlan) -> PipelineResult<PlayerTable> {
    let parsed = parse_bytes_auto(bytes)?;
    build_table(&parsed, plan)
}

/// Clean parsed rows and convert them into typed records.
pub fn build_table(parsed: &ParseResult, plan: &CleaningPlan) -> PipelineResult<PlayerTable> {
    plan.validate()?;

    let info = SourceInfo::from(parsed);
    log_success(format!(
        "Detected encoding {} and delimiter '{}'",
        info.encoding,
        format_delimiter(info.delimiter)
    ));
    log_success(format!("Read {} rows, {} columns", info.row_count, info.headers.len()));

    if parsed.records.is_empty() {
        return Err(LoadError::DataMalformed("file has a header but no data rows".to_string()).into());
    }

    let columns = plan.output_columns(&parsed.headers);
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !columns.iter().any(|c| c == required))
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::DataMalformed(format!(
            "missing required column(s): {}",
            missing.join(", ")
        ))
        .into());
    }

    log_info(format!("Applying cleaning plan ({} rules)", plan.rules.len()));
    let cleaned = execute(&parsed.records, plan);
    log_info_indent(cleaned.summary(), 1);

    let mut errors = cleaned.errors;
    let mut records = Vec::with_capacity(cleaned.records.len());
    for (row_idx, row) in cleaned.records.iter().enumerate() {
        let Some(obj) = row.as_object() else { continue };
        match record_from_row(obj, row_idx, &mut errors) {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }

    if records.is_empty() {
        return Err(LoadError::DataMalformed("no usable player rows".to_string()).into());
    }
    if !errors.is_empty() {
        log_warning(format!("{} cells treated as missing", errors.len()));
        for err in errors.iter().take(3) {
            log_info_indent(err.to_string(), 1);
        }
    }
    log_success(format!("Loaded {} player rows", records.len()));

    Ok(PlayerTable {
        records,
        columns,
        parse_errors: errors,
    })
}

/// Convert one cleaned row. Only an empty player name rejects the row.
fn record_from_row(
    row: &Map<String, Value>,
    row_idx: usize,
    errors: &mut Vec<FieldParseError>,
) -> Result<PlayerRecord, FieldParseError> {
    let name = text_cell(row, COL_PLAYER);
    if name.is_empty() {
        return Err(FieldParseError::new("", "empty player name")
            .in_column(COL_PLAYER)
            .at_row(row_idx));
    }

    let mut cells = Cells { row, row_idx, errors };
    Ok(PlayerRecord {
        name,
        team: text_cell(row, COL_TEAM),
        position: text_cell(row, COL_POSITION),
        jersey_number: cells.count(COL_JERSEY),
        age: cells.count(COL_AGE).filter(|age| *age > 0),
        minutes: cells.count(COL_MINUTES),
        goals: cells.count(COL_GOALS),
        assists: cells.count(COL_ASSISTS),
        pass_completion: cells.number(COL_PASS_COMPLETION).filter(|p| (0.0..=100.0).contains(p)),
        yellow_cards: cells.count(COL_YELLOW_CARDS),
        expected_goals: cells.number(COL_XG),
        dribbles: cells.number(COL_DRIBBLES),
        touches: cells.number(COL_TOUCHES),
        tackles: cells.number(COL_TACKLES),
        shot_creating_actions: cells.number(COL_SCA),
        progressive_passes: cells.number(COL_PROGRESSIVE_PASSES),
    })
}

fn text_cell(row: &Map<String, Value>, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Typed cell access for one row. Cells a custom plan left as text are
/// coerced leniently; failures are recorded and read as missing.
struct Cells<'a> {
    row: &'a Map<String, Value>,
    row_idx: usize,
    errors: &'a mut Vec<FieldParseError>,
}

impl Cells<'_> {
    fn number(&mut self, column: &str) -> Option<f64> {
        match self.row.get(column)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v),
                _ => {
                    self.reject(column, s, "not a number");
                    None
                }
            },
            _ => None,
        }
    }

    fn count(&mut self, column: &str) -> Option<u32> {
        let value = self.number(column)?;
        if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
            Some(value as u32)
        } else {
            self.reject(column, &value.to_string(), "expected a non-negative integer");
            None
        }
    }

    fn reject(&mut self, column: &str, value: &str, reason: &str) {
        self.errors.push(
            FieldParseError::new(value, reason)
                .in_column(column)
                .at_row(self.row_idx),
        );
    }
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::dsl::default_plan;

    const HEADER: &str = "#,Player,Nation,Team,Position,Age,Minutes,Goals,Assists,Pass Completion %,Yellow Cards,xG";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_load_from_bytes() {
        let data = csv(&[
            "7,Bukayo Saka,eng ENG,Arsenal,FW,22-150,2900,16,9,78.4%,5,14.2",
            "20,Cole Palmer,eng ENG,Chelsea,MF,21-340,2600,22,11,81%,7,17.9",
        ]);
        let table = load_players_from_bytes(data.as_bytes(), &default_plan()).unwrap();

        assert_eq!(table.len(), 2);
        let saka = &table.records[0];
        assert_eq!(saka.name, "Bukayo Saka");
        assert_eq!(saka.age, Some(22));
        assert_eq!(saka.jersey_number, Some(7));
        assert_eq!(saka.pass_completion, Some(78.4));
        assert_eq!(saka.expected_goals, Some(14.2));
        assert_eq!(saka.touches, None);
        assert!(table.columns.contains(&"Jersey Number".to_string()));
        assert!(!table.columns.contains(&"Nation".to_string()));
    }

    #[test]
    fn test_bad_cells_do_not_abort_load() {
        let data = csv(&["9,Striker,xx,Team,FW,unknown,900,5,1,n/a,2,3.1"]);
        let table = load_players_from_bytes(data.as_bytes(), &default_plan()).unwrap();

        let row = &table.records[0];
        assert_eq!(row.age, None);
        assert_eq!(row.pass_completion, None);
        assert_eq!(row.goals, Some(5));
        assert!(table.parse_errors.iter().any(|e| e.column == "Age"));
    }

    #[test]
    fn test_zero_age_is_recorded_as_parse_error() {
        let data = csv(&["1,Keeper,xx,Team,GK,0-100,900,0,0,60%,0,0.0"]);
        let table = load_players_from_bytes(data.as_bytes(), &default_plan()).unwrap();

        assert_eq!(table.records[0].age, None);
        assert_eq!(table.parse_errors.len(), 1);
        assert_eq!(table.parse_errors[0].column, "Age");
    }

    #[test]
    fn test_header_only_is_malformed() {
        let err = load_players_from_bytes(HEADER.as_bytes(), &default_plan()).unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn test_missing_required_column_is_malformed() {
        let data = "Player,Team\nSaka,Arsenal";
        let err = load_players_from_bytes(data.as_bytes(), &default_plan()).unwrap_err();
        assert!(err.to_string().contains("Minutes"));
    }

    #[test]
    fn test_empty_player_name_dropped() {
        let data = csv(&[
            "1,,xx,Team,GK,30-001,900,0,0,70%,0,0",
            "2,Keeper,xx,Team,GK,30-001,900,0,0,70%,0,0",
        ]);
        let table = load_players_from_bytes(data.as_bytes(), &default_plan()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.parse_errors.len(), 1);
    }

    #[test]
    fn test_plan_without_rules_coerces_leniently() {
        let data = "Player,Team,Position,Age,Minutes,Goals,Assists,Pass Completion %,Yellow Cards\nA,T,FW,24,90,x,0,80,0";
        let table = load_players_from_bytes(data.as_bytes(), &CleaningPlan::new()).unwrap();
        let row = &table.records[0];
        assert_eq!(row.age, Some(24));
        assert_eq!(row.goals, None);
        assert_eq!(table.parse_errors[0].column, "Goals");
    }
}
