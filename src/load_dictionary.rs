use crate::errors::{CoverageError, Result};
use indexmap::IndexMap;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One character of a dictionary document. Any field may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct DictionaryEntry {
	#[serde(default)]
	pub simp: Option<String>,
	#[serde(default)]
	pub trad: Option<String>,
	#[serde(default)]
	pub zhuyin: Option<Value>,
}

/// Character glyph -> zhuyin annotation, in insertion order.
pub type CharToZhuyin = IndexMap<String, Value>;

pub struct DictionaryIndex {
	pub char_to_zhuyin: CharToZhuyin,
	/// Entries read per source, in merge order.
	pub entries_per_source: Vec<usize>,
	/// Keys overwritten with a different annotation by a later entry.
	pub conflicts: usize,
}

impl DictionaryIndex {
	pub fn len(&self) -> usize {
		self.char_to_zhuyin.len()
	}

	pub fn is_empty(&self) -> bool {
		self.char_to_zhuyin.is_empty()
	}

	pub fn total_entries(&self) -> usize {
		self.entries_per_source.iter().sum()
	}
}

/// An annotation counts as present when it is truthy: null, false, 0,
/// empty strings, empty arrays and empty objects are all absent.
pub fn is_present(zhuyin: &Value) -> bool {
	match zhuyin {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(a) => !a.is_empty(),
		Value::Object(o) => !o.is_empty(),
	}
}

/// Reads a dictionary document and returns its entries. A missing or
/// malformed `entries` field yields no entries, and so does each entry
/// that cannot be read as a [DictionaryEntry].
pub fn read_dictionary_entries<P: AsRef<Path>>(file_name: P) -> Result<Vec<DictionaryEntry>> {
	let path = file_name.as_ref();
	let file = File::open(path).map_err(|source| CoverageError::io(path, source))?;
	let document: Value =
		serde_json::from_reader(BufReader::new(file)).map_err(|source| CoverageError::Json {
			path: path.to_path_buf(),
			source,
		})?;
	Ok(entries_of(document))
}

fn entries_of(document: Value) -> Vec<DictionaryEntry> {
	match document {
		Value::Object(mut fields) => match fields.remove("entries") {
			Some(Value::Array(entries)) => entries
				.into_iter()
				.filter_map(|entry| serde_json::from_value(entry).ok())
				.collect(),
			_ => Vec::new(),
		},
		_ => Vec::new(),
	}
}

/// Merges dictionary sources into one lookup keyed by both simplified and
/// traditional forms. Sources are applied in order; the last write wins.
pub fn build_char_to_zhuyin(sources: Vec<Vec<DictionaryEntry>>) -> DictionaryIndex {
	let mut char_to_zhuyin = CharToZhuyin::new();
	let mut entries_per_source = Vec::with_capacity(sources.len());
	let mut conflicts = 0;
	for entries in sources {
		entries_per_source.push(entries.len());
		for entry in entries {
			let zhuyin = match entry.zhuyin {
				Some(zhuyin) if is_present(&zhuyin) => zhuyin,
				_ => continue,
			};
			let simp = entry.simp.filter(|simp| !simp.is_empty());
			let trad = entry
				.trad
				.filter(|trad| !trad.is_empty() && Some(trad) != simp.as_ref());
			for character in simp.into_iter().chain(trad) {
				if let Some(previous) = char_to_zhuyin.insert(character.clone(), zhuyin.clone()) {
					if previous != zhuyin {
						conflicts += 1;
						warn!(
							"event=dictionary_conflict char={} previous={} replacement={}",
							character, previous, zhuyin
						);
					}
				}
			}
		}
	}
	DictionaryIndex {
		char_to_zhuyin,
		entries_per_source,
		conflicts,
	}
}

/// Loads every configured dictionary source and merges them. Fails on the
/// first source that is missing or is not valid JSON.
pub fn load_dictionary<P: AsRef<Path>>(file_names: &[P]) -> Result<DictionaryIndex> {
	let mut sources = Vec::with_capacity(file_names.len());
	for file_name in file_names {
		let entries = read_dictionary_entries(file_name)?;
		info!(
			"event=dictionary_source_loaded path={} entries={}",
			file_name.as_ref().display(),
			entries.len()
		);
		sources.push(entries);
	}
	let index = build_char_to_zhuyin(sources);
	if index.is_empty() {
		warn!("event=dictionary_empty sources={}", file_names.len());
	}
	info!(
		"event=dictionary_merged chars={} conflicts={}",
		index.len(),
		index.conflicts
	);
	Ok(index)
}
