/// What went wrong while reading a table, as far as the backend can tell.
///
/// A scan never retries on its own; the kind only shapes how the failure
/// is reported (log field, `Debug` prefix) once the invocation is aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The table cannot be reached as configured: unknown table name,
    /// missing region, malformed endpoint.
    Config,
    /// The request never got a usable answer: timeout, dropped connection,
    /// unreadable response.
    Io,
    /// The service refused the page for exceeding provisioned or account
    /// throughput.
    Throttled,
    /// The backend handed back something it cannot page on, such as a
    /// stale cursor.
    Format,
    /// The service answered with an error that fits none of the above.
    Logic,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::Throttled => "throttled",
            ErrorKind::Format => "format",
            ErrorKind::Logic => "logic",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single `TableStore::scan_page` call.
///
/// The message names the failing request; callers stack their own
/// position on top with `with_context` (`"table 'movies': scan page 3: ..."`).
#[derive(Clone)]
pub struct StoreError {
    kind: ErrorKind,
    message: String,
}

impl StoreError {
    fn of(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self { kind, message: msg.into() }
    }

    /// Service-side rejection with no more specific kind.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::of(ErrorKind::Logic, msg)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::of(ErrorKind::Config, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::of(ErrorKind::Io, msg)
    }

    pub fn throttled(msg: impl Into<String>) -> Self {
        Self::of(ErrorKind::Throttled, msg)
    }

    pub fn format_err(msg: impl Into<String>) -> Self {
        Self::of(ErrorKind::Format, msg)
    }

    /// Prefix the message with `ctx`. The kind is left untouched.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        Self::of(self.kind, format!("{ctx}: {}", self.message))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}

/// A payload that does not decode is a bad page, not a transport failure.
impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::format_err(e.to_string())
    }
}
