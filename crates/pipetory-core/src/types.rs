//! Tipos compartidos: variantes de pipe, contrato de aridad y `Dataset`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PipeError;

/// Number of datasets a pipe consumes or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    One,
    Many,
}

/// Variantes de pipe. Comparten el mismo motor de composición y se
/// diferencian sólo por el contrato de aridad declarado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeKind {
    /// 1 -> 1
    Sequential,
    /// n -> 1
    Merger,
    /// 1 -> n
    Splitter,
}

impl PipeKind {
    pub const ALL: [PipeKind; 3] = [PipeKind::Sequential, PipeKind::Merger, PipeKind::Splitter];

    pub fn input_arity(&self) -> Arity {
        match self {
            PipeKind::Sequential | PipeKind::Splitter => Arity::One,
            PipeKind::Merger => Arity::Many,
        }
    }

    pub fn output_arity(&self) -> Arity {
        match self {
            PipeKind::Sequential | PipeKind::Merger => Arity::One,
            PipeKind::Splitter => Arity::Many,
        }
    }

    /// Name used by `repr`: `Sequencer`, `Merger` or `Splitter`.
    pub fn variant_name(&self) -> &'static str {
        match self {
            PipeKind::Sequential => "Sequencer",
            PipeKind::Merger => "Merger",
            PipeKind::Splitter => "Splitter",
        }
    }

    fn member_name(&self) -> &'static str {
        match self {
            PipeKind::Sequential => "SEQUENTIAL",
            PipeKind::Merger => "MERGER",
            PipeKind::Splitter => "SPLITTER",
        }
    }
}

impl fmt::Display for PipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.member_name())
    }
}

impl FromStr for PipeKind {
    type Err = PipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        PipeKind::ALL.into_iter()
                     .find(|k| k.member_name() == upper)
                     .ok_or_else(|| PipeError::UndefinedPipeKind(s.to_string()))
    }
}

/// Anything the factory accepts as a pipe kind: the enum itself or its
/// case-insensitive name.
pub trait IntoPipeKind {
    fn into_pipe_kind(self) -> Result<PipeKind, PipeError>;
}

impl IntoPipeKind for PipeKind {
    fn into_pipe_kind(self) -> Result<PipeKind, PipeError> {
        Ok(self)
    }
}

impl IntoPipeKind for &str {
    fn into_pipe_kind(self) -> Result<PipeKind, PipeError> {
        self.parse()
    }
}

impl IntoPipeKind for String {
    fn into_pipe_kind(self) -> Result<PipeKind, PipeError> {
        self.parse()
    }
}

/// Uno o varios datasets. Tipo de dato conveniente para pipes que mezclan
/// aridades (splitters y mergers anidados dentro de un sequencer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Dataset<T> {
    Single(T),
    Multi(Vec<T>),
}

impl<T> Dataset<T> {
    pub fn arity(&self) -> Arity {
        match self {
            Dataset::Single(_) => Arity::One,
            Dataset::Multi(_) => Arity::Many,
        }
    }

    pub fn as_single(&self) -> Option<&T> {
        match self {
            Dataset::Single(t) => Some(t),
            Dataset::Multi(_) => None,
        }
    }

    pub fn into_single(self) -> Option<T> {
        match self {
            Dataset::Single(t) => Some(t),
            Dataset::Multi(_) => None,
        }
    }

    pub fn into_multi(self) -> Option<Vec<T>> {
        match self {
            Dataset::Single(_) => None,
            Dataset::Multi(v) => Some(v),
        }
    }

    /// Flattens to a list: a single dataset becomes a one-element list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Dataset::Single(t) => vec![t],
            Dataset::Multi(v) => v,
        }
    }
}

impl<T> From<T> for Dataset<T> {
    fn from(value: T) -> Self {
        Dataset::Single(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitive() {
        assert_eq!("sequential".parse::<PipeKind>().unwrap(), PipeKind::Sequential);
        assert_eq!("Merger".parse::<PipeKind>().unwrap(), PipeKind::Merger);
        assert_eq!("SPLITTER".parse::<PipeKind>().unwrap(), PipeKind::Splitter);
        assert_eq!("bogus".parse::<PipeKind>(), Err(PipeError::UndefinedPipeKind("bogus".into())));
        assert_eq!(" sequential ".parse::<PipeKind>(),
                   Err(PipeError::UndefinedPipeKind(" sequential ".into())));
    }

    #[test]
    fn arity_contract_per_kind() {
        assert_eq!((PipeKind::Sequential.input_arity(), PipeKind::Sequential.output_arity()),
                   (Arity::One, Arity::One));
        assert_eq!((PipeKind::Merger.input_arity(), PipeKind::Merger.output_arity()), (Arity::Many, Arity::One));
        assert_eq!((PipeKind::Splitter.input_arity(), PipeKind::Splitter.output_arity()),
                   (Arity::One, Arity::Many));
    }

    #[test]
    fn dataset_accessors() {
        let d: Dataset<i32> = 3.into();
        assert_eq!(d.arity(), Arity::One);
        assert_eq!(d.as_single(), Some(&3));
        assert_eq!(Dataset::Multi(vec![1, 2]).into_single(), None);
        assert_eq!(Dataset::Single(1).into_vec(), vec![1]);
        assert_eq!(Dataset::Multi(vec![1, 2]).into_multi(), Some(vec![1, 2]));
    }
}
