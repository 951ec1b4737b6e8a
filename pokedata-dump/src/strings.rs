//! Localized string tables (`dump_strings_{lang}.xml`).

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DumpError;

/// String id → text for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    strings: BTreeMap<String, String>,
}

impl StringTable {
    /// Parse `<string id="...">text</string>` elements at any depth.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, DumpError> {
        let mut xml = Reader::from_reader(reader);
        let mut buf = Vec::new();
        let mut strings = BTreeMap::new();
        let mut current: Option<(String, String)> = None;

        loop {
            match xml.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.name().as_ref() == b"string" => {
                    current = Some((string_id(e, xml.buffer_position())?, String::new()));
                }
                Event::Empty(ref e) if e.name().as_ref() == b"string" => {
                    strings.insert(string_id(e, xml.buffer_position())?, String::new());
                }
                Event::Text(ref e) => {
                    if let Some((_, ref mut text)) = current {
                        text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(ref e) => {
                    if let Some((_, ref mut text)) = current {
                        text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Event::End(ref e) if e.name().as_ref() == b"string" => {
                    if let Some((id, text)) = current.take() {
                        strings.insert(id, text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    pub fn load(path: &Path) -> Result<Self, DumpError> {
        if !path.exists() {
            return Err(DumpError::Missing(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        Self::parse(std::io::BufReader::new(file))
    }

    /// Like [`StringTable::load`], but a missing file gives an empty table.
    pub fn load_or_empty(path: &Path) -> Result<Self, DumpError> {
        if !path.exists() {
            log::debug!("No string table at {}", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.strings.get(id).map(String::as_str)
    }

    /// Text for `id`, or `""` when the id is unknown.
    pub fn lookup(&self, id: &str) -> &str {
        self.get(id).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

fn string_id(e: &BytesStart<'_>, position: impl std::fmt::Display) -> Result<String, DumpError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"id" {
            return Ok(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    Err(DumpError::invalid_strings(format!(
        "<string> element without an id near byte {position}"
    )))
}

/// String tables for several languages.
#[derive(Debug, Clone, Default)]
pub struct StringTables {
    tables: BTreeMap<String, StringTable>,
}

impl StringTables {
    /// Load `dump_strings_{lang}.xml` from `dir` for each language. Missing
    /// files yield empty tables.
    pub fn load<S: AsRef<str>>(dir: &Path, languages: &[S]) -> Result<Self, DumpError> {
        let mut tables = BTreeMap::new();
        for language in languages {
            let language = language.as_ref();
            let path = dir.join(format!("dump_strings_{language}.xml"));
            let table = StringTable::load_or_empty(&path)?;
            log::debug!("Loaded {} strings for {language}", table.len());
            tables.insert(language.to_string(), table);
        }
        Ok(Self { tables })
    }

    pub fn insert(&mut self, language: impl Into<String>, table: StringTable) {
        self.tables.insert(language.into(), table);
    }

    /// Text for `id` in `language`; `""` for unknown ids or languages.
    pub fn lookup(&self, language: &str, id: &str) -> &str {
        self.tables.get(language).map_or("", |t| t.lookup(id))
    }
}

#[cfg(test)]
#[path = "tests/strings_tests.rs"]
mod tests;
