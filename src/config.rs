use std::path::PathBuf;

/// Number of fully covered words echoed in the report.
pub const SAMPLE_SIZE: usize = 40;
/// Number of missing characters shown in the preview line.
pub const MISSING_PREVIEW: usize = 50;
/// Number of missing characters listed in the unlock ranking.
pub const UNLOCK_RANKING_SIZE: usize = 20;
/// A learner needs at least this many word pairs to play the word match drill.
pub const MIN_DRILL_PAIRS: usize = 5;

pub const OUTPUT_VERSION: &str = "1.0.0";
pub const OUTPUT_SOURCE: &str = "CCCC_Vocabulary_2022 + dictionary_expansion_v2";
pub const OUTPUT_DESCRIPTION: &str = "Word pairs where BOTH characters have Zhuyin in dictionary";

pub struct Config {
	/// Dictionary documents in merge order, later sources win on collision.
	pub dictionary_sources: Vec<PathBuf>,
	/// Directory holding one `<level>.csv` export per vocabulary sheet.
	pub vocabulary_dir: PathBuf,
	/// Sheet levels in processing order.
	pub levels: Vec<String>,
	/// Rows above the data in every sheet (title row + column header row).
	pub header_rows: usize,
	pub output_file: PathBuf,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			dictionary_sources: vec![
				PathBuf::from("data/dictionary_expansion_v2.json"),
				PathBuf::from("data/dictionary_seed_v1.json"),
			],
			vocabulary_dir: PathBuf::from("data sets for drills/CCCC_Vocabulary_2022"),
			levels: vec![
				"萌芽級".to_string(),
				"成長級".to_string(),
				"茁壯級".to_string(),
			],
			header_rows: 2,
			output_file: PathBuf::from("data/word_pairs_cccc_usable.json"),
		}
	}
}

impl Config {
	pub fn sheet_path(&self, level: &str) -> PathBuf {
		self.vocabulary_dir.join(format!("{level}.csv"))
	}
}
