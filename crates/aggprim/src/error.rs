// We follow the same approach as the rest of the workspace: the no_std crate
// defines a tiny `Copy` error (`InternalError`) that can be built inside of
// kernels, and this crate wraps it inside of an opaque `Error` type alongside
// the errors that only the host can produce (i.e. runtime failures).
//
// There is no retry logic anywhere: every error is fatal to the current call
// and is handed back to the orchestration layer.

use aggprim_nostd_internal::{DataType, InternalError};

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug)]
enum ErrorKind {
    /// The accelerator runtime reported an error after an operation
    Runtime(RuntimeError),
    /// A primitive received an input outside of its domain (e.g. a data type
    /// without a fixed width)
    InvalidArgument(InvalidArgumentError),
}

// define constructor methods for Error
impl Error {
    /// produce an error wrapping a failure reported by the runtime
    pub(crate) fn runtime(context: String, message: String) -> Self {
        Error {
            kind: ErrorKind::Runtime(RuntimeError { context, message }),
        }
    }

    /// produce an error indicating that a primitive received an invalid
    /// argument
    pub(crate) fn invalid_argument(err: InternalError) -> Self {
        Error {
            kind: ErrorKind::InvalidArgument(InvalidArgumentError(err)),
        }
    }

    /// `true` when the error originates from the accelerator runtime
    pub fn is_runtime(&self) -> bool {
        matches!(self.kind, ErrorKind::Runtime(_))
    }

    /// `true` when the error stems from a data type outside the supported set
    pub fn is_unsupported_type(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidArgument(InvalidArgumentError(
                InternalError::UnsupportedType(_) | InternalError::UnknownTypeCode(_)
            ))
        )
    }

    /// The data type that triggered the error, if there was one
    pub fn data_type(&self) -> Option<DataType> {
        match self.kind {
            ErrorKind::InvalidArgument(InvalidArgumentError(
                InternalError::UnsupportedType(dtype),
            )) => Some(dtype),
            _ => None,
        }
    }

    /// The wrapped error from the no_std primitives, if there is one
    pub fn internal(&self) -> Option<InternalError> {
        match self.kind {
            ErrorKind::InvalidArgument(InvalidArgumentError(err)) => Some(err),
            ErrorKind::Runtime(_) => None,
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Error::invalid_argument(err)
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for ErrorKind {}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::Runtime(ref err) => err.fmt(f),
            ErrorKind::InvalidArgument(ref err) => err.fmt(f),
        }
    }
}

/// An error reported by the accelerator runtime
#[derive(Clone, Debug)]
struct RuntimeError {
    /// what we were doing when the runtime reported the error
    context: String,
    message: String,
}

impl std::error::Error for RuntimeError {}

impl core::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let context = self.context.as_str();
        let message = self.message.as_str();
        write!(f, "ERROR when calling {context}: {message}")
    }
}

/// An out-of-domain input to one of the primitives
#[derive(Clone, Debug)]
struct InvalidArgumentError(InternalError);

impl std::error::Error for InvalidArgumentError {}

impl core::fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

/// Checks the outcome of an accelerator runtime operation.
///
/// Any error reported by the runtime is converted into an [`Error`] that
/// records `context` (usually the name of the runtime call). Call this right
/// after each runtime operation: kernel launches are asynchronous, so this is
/// also where the failure of an earlier launch surfaces.
pub fn check_runtime<T, E>(result: Result<T, E>, context: &str) -> Result<T, Error>
where
    E: core::fmt::Display,
{
    result.map_err(|err| {
        let error = Error::runtime(context.to_owned(), err.to_string());
        tracing::warn!(%error, "accelerator runtime reported an error");
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_message() {
        let result: Result<(), &str> = Err("out of memory");
        let err = check_runtime(result, "cudaMalloc").unwrap_err();
        assert!(err.is_runtime());
        assert!(err.internal().is_none());
        assert_eq!(err.to_string(), "ERROR when calling cudaMalloc: out of memory");
    }

    #[test]
    fn passes_through_ok() {
        let result: Result<u32, &str> = Ok(7);
        assert_eq!(check_runtime(result, "unused").unwrap(), 7);
    }

    #[test]
    fn wraps_internal() {
        let err = Error::from(InternalError::UnsupportedType(DataType::GeoShape));
        assert!(err.is_unsupported_type());
        assert_eq!(err.data_type(), Some(DataType::GeoShape));
        assert!(err.to_string().starts_with("invalid argument:"));
    }
}
