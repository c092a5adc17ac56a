//! Split / merge: un splitter separa la tabla por `gender`, cada grupo se
//! ordena por `height` y un merger concatena los grupos. Ambos pipes van
//! anidados como steps de un sequencer.

use pipetory_core::{Dataset, Pipe};
use serde_json::Value;

use super::table::{Record, Table};

pub type Tables = Dataset<Table>;

/// Grupos por valor de `column`, en orden de primera aparición.
pub fn split_by(tables: Tables, column: &str) -> Tables {
    let mut groups: Vec<(Value, Table)> = Vec::new();
    for r in tables.into_vec().into_iter().flatten() {
        let key = r.get(column).cloned().unwrap_or(Value::Null);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(r),
            None => groups.push((key, vec![r])),
        }
    }
    Dataset::Multi(groups.into_iter().map(|(_, t)| t).collect())
}

fn height(r: &Record) -> i64 {
    r.get("height").and_then(Value::as_i64).unwrap_or_default()
}

pub fn sort_groups_by_height(tables: Tables) -> Tables {
    let sorted = tables.into_vec()
                       .into_iter()
                       .map(|mut t| {
                           t.sort_by_key(height);
                           t
                       })
                       .collect();
    Dataset::Multi(sorted)
}

pub fn concat(tables: Tables) -> Tables {
    Dataset::Single(tables.into_vec().concat())
}

/// Sequencer `by_gender`: `split` (splitter) -> `sort` -> `merge` (merger).
pub fn gender_pipe() -> Pipe<Tables> {
    let mut splitter = Pipe::splitter("gender_split");
    splitter.register(|t: Tables| split_by(t, "gender"), "split");

    let mut merger = Pipe::merger("gender_merge");
    merger.register(concat, "concat");

    let mut pipe = Pipe::sequencer("by_gender");
    pipe.register_pipe(splitter, "split")
        .register(sort_groups_by_height, "sort")
        .register_pipe(merger, "merge")
        .compile();
    pipe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::table::{assign_types, sample_people};

    fn names(t: &Table) -> Vec<&str> {
        t.iter().filter_map(|r| r.get("name").and_then(Value::as_str)).collect()
    }

    #[test]
    fn split_keeps_first_appearance_order() {
        let groups = split_by(Dataset::Single(sample_people()), "gender").into_multi().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(names(&groups[0]), vec!["John", "Lucal"]);
        assert_eq!(names(&groups[1]), vec!["Jane", "Mary"]);
    }

    #[test]
    fn split_sort_merge() {
        let pipe = gender_pipe();
        let typed = assign_types(sample_people()).unwrap();
        let out = pipe.run(Dataset::Single(typed)).unwrap().into_single().unwrap();
        assert_eq!(names(&out), vec!["John", "Lucal", "Jane", "Mary"]);
        assert_eq!(pipe.step_pipe("merge").map(|p| p.repr()), Some("Merger(name=gender_merge)".to_string()));
    }
}
