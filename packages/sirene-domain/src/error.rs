pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// User input rejected before any query is built. The message is shown to the caller as is.
	#[error("{message}")]
	Validation { message: String },
	#[error("Failed to read label file at {path:?}.")]
	ReadLabels { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse label file at {path:?}.")]
	ParseLabels { path: std::path::PathBuf, source: serde_json::Error },
}
impl Error {
	pub fn validation(message: impl Into<String>) -> Self {
		Self::Validation { message: message.into() }
	}
}
