use crate::classify_coverage::{CoverageClass, CoverageStats};
use crate::config::{MIN_DRILL_PAIRS, MISSING_PREVIEW, SAMPLE_SIZE, UNLOCK_RANKING_SIZE};
use crate::load_dictionary::DictionaryIndex;
use itertools::Itertools;
use std::io::{self, Write};
use std::path::Path;

const RULE: &str = "==================================================";

/// Integer percentage, truncated. An empty total gives 0.
pub fn percent(numerator: usize, denominator: usize) -> usize {
	if denominator == 0 {
		0
	} else {
		100 * numerator / denominator
	}
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
	writeln!(out, "{RULE}\n{title}\n{RULE}")
}

fn cell(value: &Option<String>) -> &str {
	value.as_deref().unwrap_or("")
}

pub fn report_dictionary<W: Write, P: AsRef<Path>>(
	out: &mut W,
	index: &DictionaryIndex,
	sources: &[P],
) -> io::Result<()> {
	writeln!(out, "Loading Hanzi Dojo dictionary...")?;
	for (source, entries) in sources.iter().zip(&index.entries_per_source) {
		writeln!(out, "  {}: {} entries", source.as_ref().display(), entries)?;
	}
	writeln!(out, "  Combined: {}", index.total_entries())?;
	if index.conflicts > 0 {
		writeln!(
			out,
			"  Conflicting annotations (later source kept): {}",
			index.conflicts
		)?;
	}
	writeln!(out, "\nCharacters with Zhuyin: {}\n", index.len())
}

pub fn report_vocabulary<W: Write>(out: &mut W, total_entries: usize, two_char_words: usize) -> io::Result<()> {
	writeln!(
		out,
		"Loading CCCC vocabulary...\
		\n  Total CCCC entries: {}\
		\n  2-character words: {}\n",
		total_entries, two_char_words
	)
}

pub fn report_results<W: Write>(out: &mut W, stats: &CoverageStats) -> io::Result<()> {
	heading(out, "COVERAGE ANALYSIS RESULTS")?;
	writeln!(out)?;
	// largest class first, like a frequency table
	for (class, count) in stats
		.counts
		.iter()
		.filter(|(_, count)| **count > 0)
		.sorted_by(|(_, n1), (_, n2)| n2.cmp(n1))
	{
		writeln!(out, "{class}\t{count}")?;
	}
	writeln!(
		out,
		"\n✅ IMMEDIATELY USABLE (both chars have Zhuyin): {} words\
		\n⚠️  Char1 only has Zhuyin: {} words\
		\n⚠️  Char2 only has Zhuyin: {} words\
		\n❌ Neither char has Zhuyin: {} words\n",
		stats.count(CoverageClass::Both),
		stats.count(CoverageClass::Char1Only),
		stats.count(CoverageClass::Char2Only),
		stats.count(CoverageClass::Neither),
	)?;
	writeln!(
		out,
		"📊 USABLE FOR DRILL C (at least 1 char): {} words\n",
		stats.usable_for_drill()
	)?;

	heading(out, "COVERAGE BY LEVEL")?;
	writeln!(
		out,
		"Level\t{}",
		CoverageClass::COUNTED.iter().join("\t")
	)?;
	for (level, counts) in stats.counts_by_level() {
		writeln!(out, "{}\t{}", level, counts.values().join("\t"))?;
	}
	writeln!(out)?;

	heading(out, "SAMPLE IMMEDIATELY USABLE WORDS (both chars)")?;
	writeln!(out, "\tCleanTrad\tCleanSimp\tPinyin\tEnglish\tLevel")?;
	for (i, word) in stats
		.words_of(CoverageClass::Both)
		.take(SAMPLE_SIZE)
		.enumerate()
	{
		writeln!(
			out,
			"{}\t{}\t{}\t{}\t{}\t{}",
			i,
			word.traditional_clean,
			word.simplified_clean,
			cell(&word.pinyin),
			cell(&word.english),
			word.level
		)?;
	}
	writeln!(out)?;

	heading(out, "WORDS MISSING CHAR2 ZHUYIN (need dictionary expansion)")?;
	let missing_chars = stats.missing_chars();
	writeln!(
		out,
		"Missing chars that would unlock more words: {}\
		\nChars: {}...",
		missing_chars.len(),
		missing_chars.iter().take(MISSING_PREVIEW).collect::<String>()
	)?;
	let ranking = stats.unlock_ranking();
	if !ranking.is_empty() {
		writeln!(
			out,
			"Most unlocking chars: {}",
			ranking
				.iter()
				.take(UNLOCK_RANKING_SIZE)
				.map(|(c, n)| format!("{c} ({n})"))
				.join(", ")
		)?;
	}
	writeln!(out)
}

pub fn report_saved<W: Write>(out: &mut W, total_words: usize, output_file: &Path) -> io::Result<()> {
	writeln!(
		out,
		"✅ Saved {} usable word pairs to {}\n",
		total_words,
		output_file.display()
	)
}

pub fn report_summary<W: Write>(out: &mut W, stats: &CoverageStats) -> io::Result<()> {
	let total = stats.total();
	let both = stats.count(CoverageClass::Both);
	let usable = stats.usable_for_drill();
	let neither = stats.count(CoverageClass::Neither);
	heading(out, "SUMMARY FOR DRILL C IMPLEMENTATION")?;
	writeln!(
		out,
		"Total 2-char words in CCCC: {}\
		\nWords with BOTH chars having Zhuyin: {} ({}%)\
		\nWords with at least ONE char: {} ({}%)\
		\nWords with NO char: {} ({}%)\n",
		total,
		both,
		percent(both, total),
		usable,
		percent(usable, total),
		neither,
		percent(neither, total),
	)?;
	writeln!(
		out,
		"For a kid with N saved characters:\
		\n  - They can play if we find {}+ word pairs where one char is saved",
		MIN_DRILL_PAIRS
	)?;
	if usable >= MIN_DRILL_PAIRS {
		writeln!(out, "  - With {} usable words, coverage should be excellent", usable)
	} else {
		writeln!(
			out,
			"  - Only {} usable words, the drill cannot start yet",
			usable
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::classify_coverage::calculate_coverage;
	use crate::load_dictionary::CharToZhuyin;
	use crate::normalize_vocabulary::VocabularyWord;
	use serde_json::json;

	#[test]
	fn percent_truncates_and_guards_zero() {
		assert_eq!(percent(2, 3), 66);
		assert_eq!(percent(1, 1), 100);
		assert_eq!(percent(0, 0), 0);
	}

	#[test]
	fn summary_on_empty_vocabulary_reports_zero_percent() {
		let char_to_zhuyin = CharToZhuyin::new();
		let stats = calculate_coverage(&char_to_zhuyin, &[]);
		let mut out = Vec::new();
		report_summary(&mut out, &stats).unwrap();
		let text = String::from_utf8(out).unwrap();
		assert!(text.contains("Total 2-char words in CCCC: 0"));
		assert!(text.contains("Words with BOTH chars having Zhuyin: 0 (0%)"));
		assert!(text.contains("the drill cannot start yet"));
	}

	#[test]
	fn results_list_sample_and_missing_chars() {
		let char_to_zhuyin: CharToZhuyin = vec![("大".to_string(), json!("ㄉㄚˋ"))]
			.into_iter()
			.collect();
		let words = vec![
			VocabularyWord::from_cells(["", "", "大大", "大大", "dàdà", "Adj", "big"], "萌芽級"),
			VocabularyWord::from_cells(["", "", "大象", "大象"], "萌芽級"),
		];
		let stats = calculate_coverage(&char_to_zhuyin, &words);
		let mut out = Vec::new();
		report_results(&mut out, &stats).unwrap();
		let text = String::from_utf8(out).unwrap();
		assert!(text.contains("0\t大大\t大大\tdàdà\tbig\t萌芽級"));
		assert!(text.contains("Missing chars that would unlock more words: 1\nChars: 象..."));
		assert!(text.contains("Most unlocking chars: 象 (1)"));
		assert!(text.contains("萌芽級\t1\t1\t0\t0"));
		assert!(text.contains("\nboth\t1\n"));
		assert!(!text.contains("\nchar2_only\t"));
		assert!(!text.contains("\nneither\t"));
	}

	#[test]
	fn summary_counts_half_covered_words_towards_drill_readiness() {
		let char_to_zhuyin: CharToZhuyin = vec![("大".to_string(), json!("ㄉㄚˋ"))]
			.into_iter()
			.collect();
		let words: Vec<VocabularyWord> = ["大大", "大象", "大人", "大家", "大門", "大海"]
			.iter()
			.map(|word| VocabularyWord::from_cells(["", "", *word], "萌芽級"))
			.collect();
		let stats = calculate_coverage(&char_to_zhuyin, &words);
		assert_eq!(stats.count(CoverageClass::Both), 1);
		let mut out = Vec::new();
		report_summary(&mut out, &stats).unwrap();
		let text = String::from_utf8(out).unwrap();
		assert!(text.contains("Words with at least ONE char: 6 (100%)"));
		assert!(text.contains("With 6 usable words, coverage should be excellent"));
		assert!(!text.contains("cannot start yet"));
	}
}
