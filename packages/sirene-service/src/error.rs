pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	Validation { message: String },
	#[error("{message}")]
	Execution { message: String },
}
impl From<sirene_domain::Error> for Error {
	fn from(err: sirene_domain::Error) -> Self {
		match err {
			sirene_domain::Error::Validation { message } => Self::Validation { message },
			other => Self::Execution { message: other.to_string() },
		}
	}
}

impl From<sirene_elastic::Error> for Error {
	fn from(err: sirene_elastic::Error) -> Self {
		Self::Execution { message: err.to_string() }
	}
}
