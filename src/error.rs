/// Broad category of a failure, used to pick the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad grid bounds or step.
    InvalidRange,
    /// A value feeding a logarithm is out of its domain (diameter, GSD, MMAD).
    Domain,
    /// Zero denominator or non-finite result during bias aggregation.
    Math,
    /// Unrecognised option value or malformed parameter file.
    Configuration,
    /// Statistics requested over a field with no unmasked cells.
    Undefined,
    /// Filesystem or format errors while reading/writing outputs.
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::InvalidRange => 3,
            ErrorKind::Domain => 4,
            ErrorKind::Math => 5,
            ErrorKind::Undefined => 6,
            ErrorKind::Io => 7,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRange, message)
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Domain, message)
    }

    pub fn math(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Math, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn undefined(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Undefined, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
