use portrait_core::error::{ErrorKind, ViewerError};

/// Commands share exit codes by family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandFamily {
    /// `load`, `filter`, `export`: not found 1, load 2, validation 3, other 4.
    Loader,
    /// `grid`, `viewport`, `config`: validation 1, other 2.
    Geometry,
}

/// The first [`ViewerError`] in the context chain decides the code; anything
/// else counts as unexpected.
pub fn exit_code(family: CommandFamily, err: &anyhow::Error) -> u8 {
    let kind = err
        .chain()
        .find_map(|e| e.downcast_ref::<ViewerError>())
        .map(ViewerError::kind)
        .unwrap_or(ErrorKind::Other);
    code_for(family, kind)
}

fn code_for(family: CommandFamily, kind: ErrorKind) -> u8 {
    match (family, kind) {
        (CommandFamily::Loader, ErrorKind::NotFound) => 1,
        (CommandFamily::Loader, ErrorKind::Load) => 2,
        (CommandFamily::Loader, ErrorKind::Validation) => 3,
        (CommandFamily::Loader, ErrorKind::Other) => 4,
        (CommandFamily::Geometry, ErrorKind::Validation) => 1,
        (CommandFamily::Geometry, _) => 2,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use anyhow::Context;

    use super::*;

    fn wrapped(err: ViewerError) -> anyhow::Error {
        Err::<(), _>(err).context("Failed to load input").unwrap_err()
    }

    #[test]
    fn test_loader_codes() {
        let fam = CommandFamily::Loader;
        assert_eq!(
            exit_code(fam, &wrapped(ViewerError::FileNotFound(PathBuf::from("x")))),
            1
        );
        assert_eq!(
            exit_code(fam, &wrapped(ViewerError::CorruptData("bad".into()))),
            2
        );
        assert_eq!(
            exit_code(
                fam,
                &wrapped(ViewerError::Timeout {
                    url: "http://x".into(),
                    secs: 1.0
                })
            ),
            2
        );
        assert_eq!(exit_code(fam, &wrapped(ViewerError::NoImageData)), 3);
        assert_eq!(
            exit_code(
                fam,
                &wrapped(ViewerError::UnsupportedExportFormat(PathBuf::from("out.xyz")))
            ),
            3
        );
        assert_eq!(exit_code(fam, &anyhow::anyhow!("boom")), 4);
    }

    #[test]
    fn test_geometry_codes() {
        let fam = CommandFamily::Geometry;
        assert_eq!(exit_code(fam, &wrapped(ViewerError::OutOfRangeZoom(20.0))), 1);
        assert_eq!(
            exit_code(fam, &wrapped(ViewerError::OutOfRangeSubdivision(99))),
            1
        );
        assert_eq!(
            exit_code(
                fam,
                &wrapped(ViewerError::InvalidDimension {
                    axis: "image width",
                    value: -1
                })
            ),
            1
        );
        assert_eq!(
            exit_code(
                fam,
                &wrapped(ViewerError::GridTooDense {
                    columns: f64::INFINITY,
                    rows: 1.0
                })
            ),
            1
        );
        assert_eq!(
            exit_code(fam, &wrapped(ViewerError::Encode("x".into()))),
            2
        );
        assert_eq!(exit_code(fam, &anyhow::anyhow!("boom")), 2);
    }

    #[test]
    fn test_unwrapped_error_is_found() {
        let err = anyhow::Error::new(ViewerError::InvalidColor("x".into()));
        assert_eq!(exit_code(CommandFamily::Loader, &err), 3);
    }
}
