//! Demo tabular: registros JSON con columnas `name`, `birth_date`, `height`
//! y `gender`, transformados en tres steps (`types`, `dates`, `names`).

use chrono::NaiveDate;
use pipetory_core::{factory, Pipe};
use serde_json::{json, Map, Value};

use crate::errors::AppError;

pub type Record = Map<String, Value>;
pub type Table = Vec<Record>;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn record(name: &str, birth_date: &str, height: &str, gender: &str) -> Record {
    let mut r = Map::new();
    r.insert("name".into(), json!(name));
    r.insert("birth_date".into(), json!(birth_date));
    r.insert("height".into(), json!(height));
    r.insert("gender".into(), json!(gender));
    r
}

/// Tabla de ejemplo con todas las columnas como texto.
pub fn sample_people() -> Table {
    vec![record("John", "1980-01-01", "180", "male"),
         record("Jane", "1979-01-01", "170", "female"),
         record("Lucal", "1945-01-01", "180", "male"),
         record("Mary", "1990-01-01", "170", "female"),]
}

fn text<'a>(r: &'a Record, column: &str) -> Result<&'a str, AppError> {
    r.get(column)
     .and_then(Value::as_str)
     .ok_or_else(|| AppError::Record(format!("missing text column {column}")))
}

/// `height` de texto a entero.
pub fn assign_types(table: Table) -> Result<Table, AppError> {
    table.into_iter()
         .map(|mut r| {
             let height: i64 = match r.get("height") {
                 Some(Value::String(s)) => s.trim()
                                            .parse()
                                            .map_err(|_| AppError::Record(format!("invalid height {s:?}")))?,
                 Some(Value::Number(n)) => n.as_i64()
                                            .ok_or_else(|| AppError::Record(format!("invalid height {n}")))?,
                 _ => return Err(AppError::Record("missing column height".into())),
             };
             r.insert("height".into(), json!(height));
             Ok(r)
         })
         .collect()
}

/// Normaliza `birth_date` y agrega `age` (años, relativo a `reference`).
pub fn transform_dates(table: Table, reference: NaiveDate) -> Result<Table, AppError> {
    table.into_iter()
         .map(|mut r| {
             let raw = text(&r, "birth_date")?;
             let born = NaiveDate::parse_from_str(raw, DATE_FORMAT)
                 .map_err(|e| AppError::Record(format!("invalid birth_date {raw:?}: {e}")))?;
             let age = (reference - born).num_days() as f64 / 365.0;
             r.insert("birth_date".into(), json!(born.format(DATE_FORMAT).to_string()));
             r.insert("age".into(), json!(age));
             Ok(r)
         })
         .collect()
}

/// Agrega `name_length` y `name_first_letter`.
pub fn transform_names(table: Table) -> Table {
    table.into_iter()
         .map(|mut r| {
             let name = r.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
             let first = name.chars().next().map(String::from).unwrap_or_default();
             r.insert("name_length".into(), json!(name.chars().count()));
             r.insert("name_first_letter".into(), json!(first));
             r
         })
         .collect()
}

/// Sequencer `df1`: `types` -> `dates` -> `names`.
pub fn people_pipe(reference: NaiveDate) -> Result<Pipe<Table>, AppError> {
    let mut pipe = factory("sequential", "df1")?;
    pipe.register_fallible(assign_types, "types")
        .register_fallible(move |t: Table| transform_dates(t, reference), "dates")
        .register(transform_names, "names")
        .compile();
    Ok(pipe)
}
