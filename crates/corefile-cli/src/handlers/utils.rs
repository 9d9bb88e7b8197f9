//! Shared utilities for command handlers

use crate::error::{Error, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read Corefile text from a path, or from stdin when the path is `-`
pub fn read_corefile(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(path = %path.display(), "reading Corefile");
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::corefile;

    #[test]
    fn test_read_corefile() {
        let (_dir, path) = corefile(".:53 {\n    whoami\n}\n");
        assert_eq!(read_corefile(&path).unwrap(), ".:53 {\n    whoami\n}\n");

        let missing = path.with_file_name("Missing");
        assert!(matches!(
            read_corefile(&missing),
            Err(Error::FileNotFound { path }) if path == missing
        ));
    }
}
