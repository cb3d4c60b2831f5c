pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Invalid boost: {message}")]
	InvalidBoost { message: String },
	#[error("Duplicate boost for {field}={value}.")]
	DuplicateBoost { field: String, value: String },
	#[error("Duplicate element {name}.")]
	DuplicateElement { name: String },
	#[error("Invalid element: {message}")]
	InvalidElement { message: String },
	#[error("Invalid document: {message}")]
	InvalidDocument { message: String },
}
