use colored::*;
use instant_assistant_core::Error as CoreError;
use instant_assistant_core::error::{ApiError, IoErrorKind, ValidationError};
use std::error::Error as StdError;
use std::fmt;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Network,
    Filesystem,
    Configuration,
}

/// Semantic exit codes for the CLI
///
/// `Misuse` is reported for command-line parse errors, before any
/// `CliError` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    NetworkError = 3,
    FilesystemError = 4,
    ConfigurationError = 5,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
    fn with_source(self, source: Box<dyn StdError + Send + Sync>) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a network error
    pub fn network(message: &str) -> Self {
        Self::new(message, ErrorCategory::Network)
            .with_suggestion("Check your internet connection")
            .with_suggestion("Check the service status at https://status.openai.com")
    }

    /// Create a filesystem error
    pub fn filesystem(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Filesystem);

        // Add specific suggestions based on the message
        if message.contains("not found") {
            error
                .suggestions
                .push("Check if the directory exists".to_string());
        } else if message.contains("not a directory") {
            error
                .suggestions
                .push("Pass the directory that holds your documents".to_string());
        } else if message.contains("permission") || message.contains("denied") {
            error.suggestions.push("Check file permissions".to_string());
        }

        error
    }

    /// Create a configuration error
    pub fn configuration(message: &str) -> Self {
        Self::new(message, ErrorCategory::Configuration)
    }

    /// Map a core library error onto a category
    pub fn from_core_error(error: CoreError) -> Self {
        let message = error.to_string();
        let cli_error = match &error {
            CoreError::Io(io_error) => {
                let mut cli_error = Self::filesystem(&message);
                if let Some(path) = &io_error.path {
                    cli_error = cli_error.with_context("path", &path.display().to_string());
                }
                if io_error.kind == IoErrorKind::Other {
                    cli_error.category = ErrorCategory::General;
                }
                cli_error
            }
            CoreError::Api(ApiError::Status { status: 401, .. }) => {
                Self::configuration(&message).with_suggestion("Check the value of OPENAI_API_KEY")
            }
            CoreError::Api(_) => Self::network(&message),
            CoreError::Validation(ValidationError::MissingCredential { variable }) => {
                Self::configuration(&message)
                    .with_suggestion(&format!("export {variable}=<your API key>"))
            }
            CoreError::Validation(_) => Self::configuration(&message),
        };

        cli_error.with_source(Box::new(error))
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Network => ExitCode::NetworkError,
            ErrorCategory::Filesystem => ExitCode::FilesystemError,
            ErrorCategory::Configuration => ExitCode::ConfigurationError,
        }
    }

    fn label(&self) -> &'static str {
        match self.category {
            ErrorCategory::General => "Error",
            ErrorCategory::Network => "Network Error",
            ErrorCategory::Filesystem => "File Error",
            ErrorCategory::Configuration => "Configuration Error",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        // Main error message
        let prefix = match self.category {
            ErrorCategory::Configuration => self.label().yellow(),
            _ => self.label().red(),
        };

        output.push_str(&format!("{}: {}\n", prefix, self.message));

        // Context information
        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        // Error chain in debug mode
        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        // Suggestions
        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message)?;

        // Include context in display
        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        Self::from_core_error(error)
    }
}

/// Convert anyhow errors to CLI errors
///
/// A core error anywhere in the chain decides the category; the outermost
/// context becomes the message.
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let message = format!("{error:#}");
        match error.downcast::<CoreError>() {
            Ok(core) => {
                let mut cli_error = Self::from_core_error(core);
                cli_error.message = message;
                cli_error
            }
            Err(error) => match error.downcast::<CliError>() {
                Ok(cli_error) => cli_error,
                Err(_) => Self::general(&message),
            },
        }
    }
}
