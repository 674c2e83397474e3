use crate::classify_coverage::{
	calculate_coverage, usable_word_records, CoverageClass, UsableWordRecord, WordPairsDocument,
};
use crate::config::{Config, OUTPUT_DESCRIPTION, OUTPUT_SOURCE, OUTPUT_VERSION};
use crate::errors::{CoverageError, Result};
use crate::load_dictionary::load_dictionary;
use crate::normalize_vocabulary::{load_vocabulary, two_char_words};
use crate::report_coverage::{
	report_dictionary, report_results, report_saved, report_summary, report_vocabulary,
};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct CoverageSummary {
	pub two_char_words: usize,
	pub both: usize,
	pub usable_for_drill: usize,
	pub missing_chars: usize,
	pub saved_words: usize,
}

/// Writes the word pairs document, replacing any previous file.
pub fn write_word_pairs<P: AsRef<Path>>(output_file: P, words: &[UsableWordRecord]) -> Result<()> {
	let path = output_file.as_ref();
	let document = WordPairsDocument {
		version: OUTPUT_VERSION,
		source: OUTPUT_SOURCE,
		description: OUTPUT_DESCRIPTION,
		total_words: words.len(),
		words,
	};
	let file = File::create(path).map_err(|source| CoverageError::io(path, source))?;
	let mut writer = BufWriter::new(file);
	serde_json::to_writer_pretty(&mut writer, &document).map_err(CoverageError::Serialize)?;
	writer.flush().map_err(|source| CoverageError::io(path, source))?;
	info!(
		"event=word_pairs_written path={} words={}",
		path.display(),
		words.len()
	);
	Ok(())
}

/// Runs load, normalize, classify, write and report in order. Every input is
/// read before anything is classified or written.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<CoverageSummary> {
	let console = |source| CoverageError::io("<report>", source);

	let index = load_dictionary(&config.dictionary_sources)?;
	let vocabulary = load_vocabulary(config)?;

	report_dictionary(out, &index, &config.dictionary_sources).map_err(console)?;
	let total_entries = vocabulary.len();
	let words = two_char_words(vocabulary);
	report_vocabulary(out, total_entries, words.len()).map_err(console)?;

	let stats = calculate_coverage(&index.char_to_zhuyin, &words);
	info!(
		"event=coverage_classified words={} both={} usable={}",
		stats.total(),
		stats.count(CoverageClass::Both),
		stats.usable_for_drill()
	);
	report_results(out, &stats).map_err(console)?;

	let usable_words = usable_word_records(&index.char_to_zhuyin, &stats);
	write_word_pairs(&config.output_file, &usable_words)?;
	report_saved(out, usable_words.len(), &config.output_file).map_err(console)?;
	report_summary(out, &stats).map_err(console)?;

	Ok(CoverageSummary {
		two_char_words: stats.total(),
		both: stats.count(CoverageClass::Both),
		usable_for_drill: stats.usable_for_drill(),
		missing_chars: stats.missing_chars().len(),
		saved_words: usable_words.len(),
	})
}
