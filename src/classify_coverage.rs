use crate::load_dictionary::CharToZhuyin;
use crate::normalize_vocabulary::VocabularyWord;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverageClass {
	Both,
	Char1Only,
	Char2Only,
	Neither,
	// the word is not two characters long and takes part in no count
	Invalid,
}

impl CoverageClass {
	pub const COUNTED: [CoverageClass; 4] = [
		CoverageClass::Both,
		CoverageClass::Char1Only,
		CoverageClass::Char2Only,
		CoverageClass::Neither,
	];

	/// A word can be drilled once the learner knows at least one of its characters.
	pub fn is_usable_for_drill(&self) -> bool {
		matches!(
			self,
			CoverageClass::Both | CoverageClass::Char1Only | CoverageClass::Char2Only
		)
	}
}

impl fmt::Display for CoverageClass {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let name = match self {
			CoverageClass::Both => "both",
			CoverageClass::Char1Only => "char1_only",
			CoverageClass::Char2Only => "char2_only",
			CoverageClass::Neither => "neither",
			CoverageClass::Invalid => "invalid",
		};
		write!(f, "{}", name)
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
	Found(&'a Value),
	NotFound,
}

impl<'a> Lookup<'a> {
	pub fn or_else<F: FnOnce() -> Lookup<'a>>(self, f: F) -> Lookup<'a> {
		match self {
			Lookup::Found(_) => self,
			Lookup::NotFound => f(),
		}
	}

	pub fn found(self) -> Option<&'a Value> {
		match self {
			Lookup::Found(zhuyin) => Some(zhuyin),
			Lookup::NotFound => None,
		}
	}
}

pub fn lookup<'a>(char_to_zhuyin: &'a CharToZhuyin, character: &str) -> Lookup<'a> {
	match char_to_zhuyin.get(character) {
		Some(zhuyin) => Lookup::Found(zhuyin),
		None => Lookup::NotFound,
	}
}

/// Traditional form first, simplified form as fallback.
pub fn lookup_char<'a>(char_to_zhuyin: &'a CharToZhuyin, trad: &str, simp: &str) -> Lookup<'a> {
	lookup(char_to_zhuyin, trad).or_else(|| lookup(char_to_zhuyin, simp))
}

fn char_at(word: &str, position: usize) -> Option<String> {
	word.chars().nth(position).map(String::from)
}

pub struct Coverage<'a> {
	pub class: CoverageClass,
	pub char1_zhuyin: Lookup<'a>,
	pub char2_zhuyin: Lookup<'a>,
}

pub fn classify<'a>(char_to_zhuyin: &'a CharToZhuyin, word: &VocabularyWord) -> Coverage<'a> {
	let trad: Vec<String> = word.traditional_clean.chars().map(String::from).collect();
	if trad.len() != 2 {
		return Coverage {
			class: CoverageClass::Invalid,
			char1_zhuyin: Lookup::NotFound,
			char2_zhuyin: Lookup::NotFound,
		};
	}
	let char1_s = char_at(&word.simplified_clean, 0).unwrap_or_default();
	let char2_s = char_at(&word.simplified_clean, 1).unwrap_or_default();
	let char1_zhuyin = lookup_char(char_to_zhuyin, &trad[0], &char1_s);
	let char2_zhuyin = lookup_char(char_to_zhuyin, &trad[1], &char2_s);
	use Lookup::*;
	let class = match (char1_zhuyin, char2_zhuyin) {
		(Found(_), Found(_)) => CoverageClass::Both,
		(Found(_), NotFound) => CoverageClass::Char1Only,
		(NotFound, Found(_)) => CoverageClass::Char2Only,
		(NotFound, NotFound) => CoverageClass::Neither,
	};
	Coverage {
		class,
		char1_zhuyin,
		char2_zhuyin,
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsableWordRecord {
	pub word_trad: String,
	pub word_simp: String,
	pub char1_trad: String,
	pub char1_simp: String,
	pub char1_zhuyin: Value,
	pub char2_trad: String,
	pub char2_simp: String,
	pub char2_zhuyin: Value,
	pub pinyin: Option<String>,
	pub english: Option<String>,
	pub category: Option<String>,
	pub level: String,
}

#[derive(Debug, Serialize)]
pub struct WordPairsDocument<'a> {
	pub version: &'a str,
	pub source: &'a str,
	pub description: &'a str,
	pub total_words: usize,
	pub words: &'a [UsableWordRecord],
}

pub struct ClassifiedWord<'w> {
	pub word: &'w VocabularyWord,
	pub class: CoverageClass,
}

pub struct CoverageStats<'w> {
	pub words: Vec<ClassifiedWord<'w>>,
	pub counts: IndexMap<CoverageClass, usize>,
}

impl<'w> CoverageStats<'w> {
	pub fn count(&self, class: CoverageClass) -> usize {
		self.counts.get(&class).copied().unwrap_or(0)
	}

	/// Number of two-character words that were classified.
	pub fn total(&self) -> usize {
		CoverageClass::COUNTED.iter().map(|class| self.count(*class)).sum()
	}

	pub fn usable_for_drill(&self) -> usize {
		CoverageClass::COUNTED
			.iter()
			.filter(|class| class.is_usable_for_drill())
			.map(|class| self.count(*class))
			.sum()
	}

	pub fn words_of(&self, class: CoverageClass) -> impl Iterator<Item = &'w VocabularyWord> + '_ {
		self.words
			.iter()
			.filter(move |classified| classified.class == class)
			.map(|classified| classified.word)
	}

	/// Coverage counts per vocabulary level, levels in order of appearance.
	pub fn counts_by_level(&self) -> IndexMap<&'w str, IndexMap<CoverageClass, usize>> {
		let mut by_level: IndexMap<&'w str, IndexMap<CoverageClass, usize>> = IndexMap::new();
		for classified in &self.words {
			let word: &'w VocabularyWord = classified.word;
			*by_level
				.entry(word.level.as_str())
				.or_insert_with(empty_counts)
				.entry(classified.class)
				.or_insert(0) += 1;
		}
		by_level
	}

	/// Characters without zhuyin in words where the other character has
	/// one, sorted by code point.
	pub fn missing_chars(&self) -> BTreeSet<char> {
		self.unlockable_chars().collect()
	}

	/// Missing characters with the number of half-covered words each one
	/// would complete, most words first.
	pub fn unlock_ranking(&self) -> Vec<(char, usize)> {
		let mut unlocks: IndexMap<char, usize> = IndexMap::new();
		for c in self.unlockable_chars() {
			*unlocks.entry(c).or_insert(0) += 1;
		}
		let mut ranking: Vec<(char, usize)> = unlocks.into_iter().collect();
		ranking.sort_by(|(c1, n1), (c2, n2)| n2.cmp(n1).then(c1.cmp(c2)));
		ranking
	}

	fn unlockable_chars(&self) -> impl Iterator<Item = char> + '_ {
		self.words.iter().filter_map(|classified| {
			let mut chars = classified.word.traditional_clean.chars();
			let (char1, char2) = (chars.next()?, chars.next()?);
			match classified.class {
				CoverageClass::Char1Only => Some(char2),
				CoverageClass::Char2Only => Some(char1),
				_ => None,
			}
		})
	}
}

fn empty_counts() -> IndexMap<CoverageClass, usize> {
	CoverageClass::COUNTED.iter().map(|class| (*class, 0)).collect()
}

/// Classifies every word. Invalid words are kept out of the counts.
pub fn calculate_coverage<'w>(
	char_to_zhuyin: &CharToZhuyin,
	words: &'w [VocabularyWord],
) -> CoverageStats<'w> {
	let mut counts = empty_counts();
	let mut classified_words = Vec::with_capacity(words.len());
	for word in words {
		let class = classify(char_to_zhuyin, word).class;
		if class == CoverageClass::Invalid {
			continue;
		}
		*counts.entry(class).or_insert(0) += 1;
		classified_words.push(ClassifiedWord { word, class });
	}
	CoverageStats {
		words: classified_words,
		counts,
	}
}

/// Builds the output record of a fully covered word, or `None` when either
/// character lacks zhuyin.
pub fn usable_word_record(char_to_zhuyin: &CharToZhuyin, word: &VocabularyWord) -> Option<UsableWordRecord> {
	let trad = &word.traditional_clean;
	let simp = &word.simplified_clean;
	let char1_trad = char_at(trad, 0)?;
	let char2_trad = char_at(trad, 1)?;
	let char1_simp = char_at(simp, 0).unwrap_or_else(|| char1_trad.clone());
	let char2_simp = char_at(simp, 1).unwrap_or_else(|| char2_trad.clone());
	let char1_zhuyin = lookup_char(char_to_zhuyin, &char1_trad, &char1_simp).found()?;
	let char2_zhuyin = lookup_char(char_to_zhuyin, &char2_trad, &char2_simp).found()?;
	Some(UsableWordRecord {
		word_trad: trad.clone(),
		word_simp: if simp.is_empty() { trad.clone() } else { simp.clone() },
		char1_trad,
		char1_simp,
		char1_zhuyin: char1_zhuyin.clone(),
		char2_trad,
		char2_simp,
		char2_zhuyin: char2_zhuyin.clone(),
		pinyin: word.pinyin.clone(),
		english: word.english.clone(),
		category: word.category.clone(),
		level: word.level.clone(),
	})
}

pub fn usable_word_records(char_to_zhuyin: &CharToZhuyin, stats: &CoverageStats) -> Vec<UsableWordRecord> {
	stats
		.words_of(CoverageClass::Both)
		.filter_map(|word| usable_word_record(char_to_zhuyin, word))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn word(trad: &str, simp: &str) -> VocabularyWord {
		VocabularyWord::from_cells(["", "", trad, simp], "萌芽級")
	}

	fn index(chars: &[(&str, Value)]) -> CharToZhuyin {
		chars
			.iter()
			.map(|(c, zhuyin)| (c.to_string(), zhuyin.clone()))
			.collect()
	}

	#[test]
	fn traditional_lookup_is_tried_first() {
		let char_to_zhuyin = index(&[("你", json!("ㄋㄧˇ"))]);
		let coverage = classify(&char_to_zhuyin, &word("你們", "你们"));
		assert_eq!(coverage.class, CoverageClass::Char1Only);
		assert_eq!(coverage.char1_zhuyin, Lookup::Found(&json!("ㄋㄧˇ")));
		assert_eq!(coverage.char2_zhuyin, Lookup::NotFound);
	}

	#[test]
	fn simplified_lookup_is_the_fallback() {
		let char_to_zhuyin = index(&[("们", json!("ㄇㄣ˙")), ("們", json!("other"))]);
		let coverage = classify(&char_to_zhuyin, &word("你們", "你们"));
		assert_eq!(coverage.class, CoverageClass::Char2Only);
		assert_eq!(coverage.char2_zhuyin.found(), Some(&json!("other")));

		let char_to_zhuyin = index(&[("们", json!("ㄇㄣ˙"))]);
		let coverage = classify(&char_to_zhuyin, &word("你們", "你们"));
		assert_eq!(coverage.char2_zhuyin.found(), Some(&json!("ㄇㄣ˙")));
	}

	#[test]
	fn short_simplified_form_does_not_fail_the_row() {
		let char_to_zhuyin = index(&[("書", json!("ㄕㄨ"))]);
		let coverage = classify(&char_to_zhuyin, &word("書包", ""));
		assert_eq!(coverage.class, CoverageClass::Char1Only);
	}

	#[test]
	fn non_two_char_words_are_invalid() {
		let char_to_zhuyin = index(&[("好", json!("ㄏㄠˇ"))]);
		assert_eq!(classify(&char_to_zhuyin, &word("好", "好")).class, CoverageClass::Invalid);
		assert_eq!(
			classify(&char_to_zhuyin, &word("好好好", "好好好")).class,
			CoverageClass::Invalid
		);
	}

	#[test]
	fn counts_are_complete_and_monotonic() {
		let char_to_zhuyin = index(&[("大", json!("ㄉㄚˋ")), ("人", json!("ㄖㄣˊ"))]);
		let words = vec![
			word("大人", "大人"),
			word("大象", "大象"),
			word("老人", "老人"),
			word("老虎", "老虎"),
			word("大", "大"),
		];
		let stats = calculate_coverage(&char_to_zhuyin, &words);
		assert_eq!(stats.count(CoverageClass::Both), 1);
		assert_eq!(stats.count(CoverageClass::Char1Only), 1);
		assert_eq!(stats.count(CoverageClass::Char2Only), 1);
		assert_eq!(stats.count(CoverageClass::Neither), 1);
		assert_eq!(stats.count(CoverageClass::Invalid), 0);
		assert_eq!(stats.total(), 4);
		assert_eq!(stats.usable_for_drill(), 3);
		assert!(stats.usable_for_drill() >= stats.count(CoverageClass::Both));
		assert_eq!(stats.missing_chars().into_iter().collect::<String>(), "老象");
	}

	#[test]
	fn unlock_ranking_orders_by_words_completed() {
		let char_to_zhuyin = index(&[("大", json!("ㄉㄚˋ")), ("人", json!("ㄖㄣˊ"))]);
		let words = vec![word("大象", ""), word("老人", ""), word("小象", ""), word("象人", "")];
		let stats = calculate_coverage(&char_to_zhuyin, &words);
		assert_eq!(stats.unlock_ranking(), vec![('象', 2), ('老', 1)]);
	}

	#[test]
	fn counts_by_level_keep_sheet_order() {
		let char_to_zhuyin = index(&[("大", json!("ㄉㄚˋ"))]);
		let words = vec![
			VocabularyWord::from_cells(["", "", "大象"], "成長級"),
			VocabularyWord::from_cells(["", "", "老虎"], "萌芽級"),
			VocabularyWord::from_cells(["", "", "大人"], "成長級"),
		];
		let stats = calculate_coverage(&char_to_zhuyin, &words);
		let by_level = stats.counts_by_level();
		assert_eq!(by_level.keys().copied().collect::<Vec<_>>(), vec!["成長級", "萌芽級"]);
		assert_eq!(by_level["成長級"][&CoverageClass::Char1Only], 2);
		assert_eq!(by_level["萌芽級"][&CoverageClass::Neither], 1);
		assert_eq!(by_level["萌芽級"][&CoverageClass::Both], 0);
	}

	#[test]
	fn record_falls_back_to_traditional_when_simplified_is_missing() {
		let char_to_zhuyin = index(&[("書", json!("ㄕㄨ")), ("包", json!("ㄅㄠ"))]);
		let record = usable_word_record(&char_to_zhuyin, &word("書包", "")).unwrap();
		assert_eq!(record.word_simp, "書包");
		assert_eq!(record.char1_simp, "書");
		assert_eq!(record.char2_simp, "包");
		assert_eq!(record.char1_zhuyin, json!("ㄕㄨ"));
		assert!(usable_word_record(&char_to_zhuyin, &word("書本", "书本")).is_none());
	}
}
