//! Attach the local file path to I/O failures

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Turn an I/O error into [`ApplicationError::OperationFailed`] reading
    /// `"<action>: <path>: <cause>"`.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{action}: {}", path.display()),
            source: source.into(),
        })
    }
}
