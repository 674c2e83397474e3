use std::path::PathBuf;

pub type Result<T, E = CoverageError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
	#[error("failed to access `{}`: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse JSON in `{}`: {source}", path.display())]
	Json {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("failed to read sheet `{}`: {source}", path.display())]
	Csv {
		path: PathBuf,
		#[source]
		source: csv::Error,
	},

	#[error("failed to serialize word pairs: {0}")]
	Serialize(#[source] serde_json::Error),

	#[error("failed to start logger: {0}")]
	Logging(String),
}

impl CoverageError {
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		CoverageError::Io {
			path: path.into(),
			source,
		}
	}
}
