//! The element directory: a read-only collection of [`ElementRecord`]s
//! loaded once at startup from a JSON file, with case-insensitive lookup by
//! symbol or by full name.
//!
//! The backing file has the shape produced by the Quimikey data exporter:
//!
//! ```text
//! {"elements": [{"symbol": "H", "name": "Hydrogen", ...}, ...]}
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    fs,
    path::Path,
};

/// One chemical element, as stored in the data file. Immutable after load;
/// the directory is the sole owner of every record.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ElementRecord {
    /// Chemical symbol, e.g. `"Au"`. Unique within the file.
    #[serde(default)]
    pub symbol: String,
    /// Full element name, e.g. `"Gold"`.
    pub name: String,
    /// Atomic number.
    pub atomic_number: u32,
    /// Atomic mass. Some exporters write this as a number, some as a string
    /// with uncertainty digits, so both are accepted.
    pub atomic_mass: AtomicMass,
    /// Category, e.g. `"transition metal"`.
    pub category: String,
    /// Phase at standard conditions, e.g. `"Solid"`.
    pub phase: String,
    /// URL of a 3D model for the browser-side viewer, when one exists.
    #[serde(rename = "model3D", default, skip_serializing_if = "Option::is_none")]
    pub model_3d: Option<String>,
    /// URL of a 2D image fallback, when one exists.
    #[serde(rename = "image2D", default, skip_serializing_if = "Option::is_none")]
    pub image_2d: Option<String>,
}

/// Atomic mass as found in the data file, either numeric or textual.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AtomicMass {
    /// A plain number, e.g. `196.966569`.
    Value(f64),
    /// A textual mass, e.g. `"196.966569(4)"` or `"[294]"`.
    Text(String),
}

impl fmt::Display for AtomicMass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AtomicMass::Value(v) => write!(f, "{}", v),
            AtomicMass::Text(s) => write!(f, "{}", s),
        }
    }
}

// The on-disk wrapper object around the record array.
#[derive(Debug, Deserialize, Serialize)]
struct ElementFile {
    elements: Vec<ElementRecord>,
}

/// Things that can go wrong while loading the element data file. All of
/// them are fatal to the load; the directory is never partially populated.
#[derive(Debug)]
pub enum DirectoryError {
    /// The file is missing or unreadable.
    Io(std::io::Error),
    /// The file is not valid JSON, or not the expected shape.
    Parse(serde_json::Error),
    /// A record has no symbol, which would make it unaddressable.
    MissingSymbol {
        /// Position of the offending record in file order.
        index: usize,
    },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            DirectoryError::Io(error) => Cow::from(format!("io error: {}", error)),
            DirectoryError::Parse(error) => Cow::from(format!("parse error: {}", error)),
            DirectoryError::MissingSymbol { index } => {
                Cow::from(format!("element record {} has no symbol", index))
            }
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for DirectoryError {}

impl From<std::io::Error> for DirectoryError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// The loaded element collection. Read-only after [`ElementDirectory::load`],
/// so it needs no synchronization and can be shared freely across threads.
#[derive(Debug)]
pub struct ElementDirectory {
    elements: Vec<ElementRecord>,
    // Lowercased symbol and name, each mapping to a position in `elements`.
    // Symbols are inserted before names so a symbol match always shadows a
    // name match, and `entry().or_insert()` keeps the first occurrence in
    // file order when the data contains duplicates.
    index: HashMap<String, usize>,
}

impl ElementDirectory {
    /// Reads and validates the element data file at `path`. Fails if the
    /// file is missing or malformed, or if any record lacks a symbol.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let raw = fs::read_to_string(path)?;
        let file: ElementFile = serde_json::from_str(&raw)?;

        for (index, element) in file.elements.iter().enumerate() {
            if element.symbol.is_empty() {
                return Err(DirectoryError::MissingSymbol { index });
            }
        }

        let mut index = HashMap::new();
        for (i, element) in file.elements.iter().enumerate() {
            index.entry(element.symbol.to_lowercase()).or_insert(i);
        }
        for (i, element) in file.elements.iter().enumerate() {
            index.entry(element.name.to_lowercase()).or_insert(i);
        }

        debug!("loaded {} element records", file.elements.len());

        Ok(ElementDirectory {
            elements: file.elements,
            index,
        })
    }

    /// Looks up an element by symbol or full name, case-insensitively.
    /// Symbol matches win over name matches; the first record in file order
    /// wins among duplicates. Returns `None` for unknown identifiers.
    pub fn find(&self, identifier: &str) -> Option<&ElementRecord> {
        self.index
            .get(&identifier.to_lowercase())
            .map(|&i| &self.elements[i])
    }

    /// All records, in file order.
    pub fn records(&self) -> &[ElementRecord] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_json() -> &'static str {
        r#"{"elements": [
            {"symbol": "H", "name": "Hydrogen", "atomic_number": 1,
             "atomic_mass": 1.008, "category": "diatomic nonmetal",
             "phase": "Gas", "model3D": "models/h.glb"},
            {"symbol": "Fe", "name": "Iron", "atomic_number": 26,
             "atomic_mass": "55.845(2)", "category": "transition metal",
             "phase": "Solid", "image2D": "images/fe.png"},
            {"symbol": "Au", "name": "Gold", "atomic_number": 79,
             "atomic_mass": 196.966569, "category": "transition metal",
             "phase": "Solid"}
        ]}"#
    }

    fn load_sample() -> ElementDirectory {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_json().as_bytes()).unwrap();
        ElementDirectory::load(file.path()).unwrap()
    }

    #[test]
    fn find_by_symbol_any_case() {
        let dir = load_sample();
        for id in ["au", "AU", "Au"] {
            let record = dir.find(id).expect("gold should resolve");
            assert_eq!(record.name, "Gold");
            assert_eq!(record.atomic_number, 79);
        }
    }

    #[test]
    fn symbol_and_name_resolve_to_the_same_record() {
        let dir = load_sample();
        assert_eq!(dir.find("Fe"), dir.find("Iron"));
        assert_eq!(dir.find("fe"), dir.find("IRON"));
    }

    #[test]
    fn unknown_identifier_is_none() {
        let dir = load_sample();
        assert!(dir.find("Unobtainium").is_none());
        assert!(dir.find("").is_none());
    }

    #[test]
    fn optional_urls_survive_the_round_trip() {
        let dir = load_sample();
        assert_eq!(dir.find("H").unwrap().model_3d.as_deref(), Some("models/h.glb"));
        assert_eq!(dir.find("H").unwrap().image_2d, None);
        assert_eq!(dir.find("Fe").unwrap().image_2d.as_deref(), Some("images/fe.png"));
    }

    #[test]
    fn textual_and_numeric_masses_both_parse() {
        let dir = load_sample();
        assert_eq!(
            dir.find("Fe").unwrap().atomic_mass,
            AtomicMass::Text("55.845(2)".to_owned())
        );
        assert_eq!(dir.find("H").unwrap().atomic_mass, AtomicMass::Value(1.008));
    }

    #[test]
    fn record_without_symbol_fails_the_whole_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"elements": [
                {"symbol": "H", "name": "Hydrogen", "atomic_number": 1,
                 "atomic_mass": 1.008, "category": "diatomic nonmetal", "phase": "Gas"},
                {"name": "Nameless", "atomic_number": 0,
                 "atomic_mass": 0.0, "category": "unknown", "phase": "Gas"}
            ]}"#,
        )
        .unwrap();

        match ElementDirectory::load(file.path()) {
            Err(DirectoryError::MissingSymbol { index }) => assert_eq!(index, 1),
            other => panic!("expected MissingSymbol, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-file.json");
        assert!(matches!(
            ElementDirectory::load(path),
            Err(DirectoryError::Io(_))
        ));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"elements\": [oops").unwrap();
        assert!(matches!(
            ElementDirectory::load(file.path()),
            Err(DirectoryError::Parse(_))
        ));
    }

    #[test]
    fn first_record_wins_among_duplicates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"elements": [
                {"symbol": "X", "name": "First", "atomic_number": 1,
                 "atomic_mass": 1.0, "category": "unknown", "phase": "Gas"},
                {"symbol": "X", "name": "Second", "atomic_number": 2,
                 "atomic_mass": 2.0, "category": "unknown", "phase": "Gas"}
            ]}"#,
        )
        .unwrap();

        let dir = ElementDirectory::load(file.path()).unwrap();
        assert_eq!(dir.find("X").unwrap().name, "First");
    }

    #[test]
    fn symbol_match_beats_name_match() {
        // "He" is both helium's symbol and (hypothetically) another
        // record's name; the symbol must win.
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"elements": [
                {"symbol": "Q", "name": "He", "atomic_number": 1,
                 "atomic_mass": 1.0, "category": "unknown", "phase": "Gas"},
                {"symbol": "He", "name": "Helium", "atomic_number": 2,
                 "atomic_mass": 4.0026, "category": "noble gas", "phase": "Gas"}
            ]}"#,
        )
        .unwrap();

        let dir = ElementDirectory::load(file.path()).unwrap();
        assert_eq!(dir.find("He").unwrap().name, "Helium");
    }
}
