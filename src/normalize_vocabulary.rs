use crate::config::Config;
use crate::errors::{CoverageError, Result};
use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use std::path::Path;

lazy_static! {
	// 哥(哥): a character followed by its variant in parentheses
	static ref VARIANT_PAIR: Regex = Regex::new(r"(.)\((.)\)").expect("valid variant-pair pattern");
}

/// One row of a vocabulary sheet. Columns are, in order: Category,
/// Subcategory, Traditional, Simplified, Pinyin, POS, English, Read, Write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VocabularyWord {
	pub category: Option<String>,
	pub subcategory: Option<String>,
	pub traditional_raw: Option<String>,
	pub simplified_raw: Option<String>,
	pub pinyin: Option<String>,
	pub part_of_speech: Option<String>,
	pub english: Option<String>,
	pub read: Option<String>,
	pub write: Option<String>,
	pub level: String,
	pub traditional_clean: String,
	pub simplified_clean: String,
}

impl VocabularyWord {
	/// Builds a word from one sheet row. Cells are taken by position; empty
	/// or missing cells are absent.
	pub fn from_cells<'a, I>(cells: I, level: &str) -> VocabularyWord
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut cells = cells.into_iter().map(|cell| {
			if cell.is_empty() {
				None
			} else {
				Some(cell.to_string())
			}
		});
		let mut next = || cells.next().flatten();
		let category = next();
		let subcategory = next();
		let traditional_raw = next();
		let simplified_raw = next();
		let pinyin = next();
		let part_of_speech = next();
		let english = next();
		let read = next();
		let write = next();
		let traditional_clean = clean_word(traditional_raw.as_deref());
		let simplified_clean = clean_word(simplified_raw.as_deref());
		VocabularyWord {
			category,
			subcategory,
			traditional_raw,
			simplified_raw,
			pinyin,
			part_of_speech,
			english,
			read,
			write,
			level: level.to_string(),
			traditional_clean,
			simplified_clean,
		}
	}

	pub fn is_two_char(&self) -> bool {
		self.traditional_clean.chars().count() == 2
	}
}

/// Normalizes a vocabulary cell: `哥(哥)` becomes `哥哥`, stray parentheses
/// are dropped and only the first of several `/` alternatives is kept.
pub fn clean_word(raw: Option<&str>) -> String {
	let raw = match raw {
		Some(raw) => raw,
		None => return String::new(),
	};
	let word = VARIANT_PAIR.replace_all(raw, "$1$2").replace(['(', ')'], "");
	match word.split_once('/') {
		Some((first, _)) => first.trim().to_string(),
		None => word.trim().to_string(),
	}
}

/// Reads one sheet export, skipping its preamble rows.
pub fn read_sheet<P: AsRef<Path>>(
	file_name: P,
	level: &str,
	header_rows: usize,
) -> Result<Vec<VocabularyWord>> {
	let path = file_name.as_ref();
	let csv_error = |source| CoverageError::Csv {
		path: path.to_path_buf(),
		source,
	};
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.from_path(path)
		.map_err(csv_error)?;
	let mut words = Vec::new();
	for result in reader.records().skip(header_rows) {
		let record = result.map_err(csv_error)?;
		words.push(VocabularyWord::from_cells(record.iter(), level));
	}
	Ok(words)
}

/// Loads every sheet in the configured level order and concatenates them.
pub fn load_vocabulary(config: &Config) -> Result<Vec<VocabularyWord>> {
	let mut vocabulary = Vec::new();
	for level in &config.levels {
		let words = read_sheet(config.sheet_path(level), level, config.header_rows)?;
		info!("event=sheet_loaded level={} rows={}", level, words.len());
		vocabulary.extend(words);
	}
	Ok(vocabulary)
}

/// Keeps the words whose cleaned traditional form is exactly two characters.
pub fn two_char_words(vocabulary: Vec<VocabularyWord>) -> Vec<VocabularyWord> {
	vocabulary
		.into_iter()
		.filter(VocabularyWord::is_two_char)
		.collect()
}
