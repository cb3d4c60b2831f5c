pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures reported by the search accessors.
///
/// `Clone` so a failed execution reports the identical error on every later call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Transport error: {message}")]
	Transport { message: String },
	#[error("Search engine error: {message}")]
	Engine { message: String },
	#[error("Invalid document: {message}")]
	InvalidDocument { message: String },
	#[error("Invalid catalog: {message}")]
	Catalog { message: String },
}
impl Error {
	/// True for failures reaching or reported by the search engine.
	pub fn is_io(&self) -> bool {
		matches!(self, Self::Transport { .. } | Self::Engine { .. })
	}
}
impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Transport { message: err.to_string() }
	}
}

impl From<gleaner_domain::Error> for Error {
	fn from(err: gleaner_domain::Error) -> Self {
		match err {
			gleaner_domain::Error::InvalidDocument { message } => Self::InvalidDocument { message },
			other => Self::Catalog { message: other.to_string() },
		}
	}
}
