use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn field_not_found(name: impl Into<String>) -> Error {
        Error(ErrorKind::FieldNotFound { name: name.into() }.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("field '{name}' does not exist in the schema")]
    FieldNotFound { name: String },

    #[error("invalid storage data for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_roundtrip() {
        let err = Error::field_not_found("int32_field");
        assert!(matches!(err.kind(), ErrorKind::FieldNotFound { name } if name == "int32_field"));

        let err = Error::invalid_format("column 'x'", "truncated value buffer");
        match err.into_kind() {
            ErrorKind::InvalidFormat { element, message } => {
                assert_eq!(element, "column 'x'");
                assert_eq!(message, "truncated value buffer");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_operation("read_row on closed reader");
        assert_eq!(
            err.to_string(),
            "invalid operation read_row on closed reader"
        );
    }
}
