//! Factory de pipes a partir de un `PipeKind` o su nombre.

use log::debug;

use crate::errors::PipeError;
use crate::pipe::Pipe;
use crate::types::IntoPipeKind;

/// Creates an empty pipe of the requested kind.
///
/// `kind` is a `PipeKind` or its case-insensitive name (`"sequential"`,
/// `"merger"`, `"splitter"`); anything else fails with
/// `PipeError::UndefinedPipeKind`.
pub fn factory<D, K>(kind: K, name: &str) -> Result<Pipe<D>, PipeError>
    where K: IntoPipeKind
{
    let kind = kind.into_pipe_kind()?;
    debug!("factory kind={kind} name={name}");
    Ok(Pipe::new(kind, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PipeKind;

    #[test]
    fn builds_each_kind_from_enum() {
        for kind in PipeKind::ALL {
            let p: Pipe<i32> = factory(kind, "p").unwrap();
            assert_eq!(p.kind(), kind);
            assert!(p.is_empty());
        }
    }

    #[test]
    fn owned_string_kind() {
        let p: Pipe<i32> = factory(String::from("Splitter"), "s").unwrap();
        assert_eq!(p.repr(), "Splitter(name=s)");
    }
}
