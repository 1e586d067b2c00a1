use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PathError {
    #[error("Failed to get current directory: {source}")]
    #[diagnostic(code(sourcectl_utils::path::current_dir))]
    CurrentDir { source: std::io::Error },

    #[error("Path is empty")]
    #[diagnostic(
        code(sourcectl_utils::path::empty),
        help("Provide a non-empty file path")
    )]
    Empty,

    #[error("Environment variable `{var}` not set in `{input}`")]
    #[diagnostic(
        code(sourcectl_utils::path::missing_env_var),
        help("Set the variable or use an absolute path")
    )]
    MissingEnvVar { var: String, input: String },

    #[error("Unclosed variable expression starting at `{input}`")]
    #[diagnostic(code(sourcectl_utils::path::unclosed_variable))]
    UnclosedVariable { input: String },
}

#[derive(Error, Diagnostic, Debug)]
pub enum FileSystemError {
    #[error("Failed to {action} file `{}`: {source}", .path.display())]
    #[diagnostic(
        code(sourcectl_utils::fs::file),
        help("Check file permissions and disk space")
    )]
    File {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    #[error("Failed to {action} directory `{}`: {source}", .path.display())]
    #[diagnostic(
        code(sourcectl_utils::fs::directory),
        help("Check directory permissions")
    )]
    Directory {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    #[error("`{}` is not a directory", .path.display())]
    #[diagnostic(code(sourcectl_utils::fs::not_a_directory))]
    NotADirectory { path: PathBuf },
}

#[derive(Error, Diagnostic, Debug)]
pub enum UtilsError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FileSystem(#[from] FileSystemError),
}

pub type FileSystemResult<T> = std::result::Result<T, FileSystemError>;
pub type PathResult<T> = std::result::Result<T, PathError>;

#[cfg(test)]
mod tests {
    use std::{error::Error, io};

    use super::*;

    #[test]
    fn test_path_error_display_and_source() {
        let current_dir_error = PathError::CurrentDir {
            source: io::Error::other("some error"),
        };
        assert_eq!(
            current_dir_error.to_string(),
            "Failed to get current directory: some error"
        );
        assert!(current_dir_error.source().is_some());

        assert_eq!(PathError::Empty.to_string(), "Path is empty");
        assert!(PathError::Empty.source().is_none());

        let missing = PathError::MissingEnvVar {
            var: "VAR".to_string(),
            input: "$VAR".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "Environment variable `VAR` not set in `$VAR`"
        );

        let unclosed = PathError::UnclosedVariable {
            input: "${VAR".to_string(),
        };
        assert_eq!(
            unclosed.to_string(),
            "Unclosed variable expression starting at `${VAR`"
        );
    }

    #[test]
    fn test_file_system_error_display_and_source() {
        let file_error = FileSystemError::File {
            path: PathBuf::from("/sources.json"),
            action: "write",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            file_error.to_string(),
            "Failed to write file `/sources.json`: permission denied"
        );
        assert!(file_error.source().is_some());

        let dir_error = FileSystemError::Directory {
            path: PathBuf::from("/exports"),
            action: "create",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            dir_error.to_string(),
            "Failed to create directory `/exports`: permission denied"
        );

        let not_a_dir = FileSystemError::NotADirectory {
            path: PathBuf::from("/path"),
        };
        assert_eq!(not_a_dir.to_string(), "`/path` is not a directory");
        assert!(not_a_dir.source().is_none());
    }

    #[test]
    fn test_utils_error_from() {
        let err = UtilsError::from(PathError::Empty);
        assert_eq!(err.to_string(), "Path is empty");

        let err = UtilsError::from(FileSystemError::NotADirectory {
            path: PathBuf::from("/path"),
        });
        assert!(matches!(err, UtilsError::FileSystem(_)));
    }
}
