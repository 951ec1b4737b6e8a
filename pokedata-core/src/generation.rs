use serde::{Deserialize, Serialize};

/// A numbered era of the main series, tagged on every catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Generation {
    I,
    Ii,
    Iii,
    Iv,
    V,
    Vi,
    Vii,
    Viii,
    Ix,
}

/// Error returned when a generation label or number is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown generation: {0}")]
pub struct GenerationParseError(pub String);

impl Generation {
    /// Returns all generations in release order.
    pub fn all() -> &'static [Generation] {
        &[
            Self::I,
            Self::Ii,
            Self::Iii,
            Self::Iv,
            Self::V,
            Self::Vi,
            Self::Vii,
            Self::Viii,
            Self::Ix,
        ]
    }

    /// Returns the 1-based generation number.
    pub fn number(&self) -> u8 {
        match self {
            Self::I => 1,
            Self::Ii => 2,
            Self::Iii => 3,
            Self::Iv => 4,
            Self::V => 5,
            Self::Vi => 6,
            Self::Vii => 7,
            Self::Viii => 8,
            Self::Ix => 9,
        }
    }

    /// Returns the catalog slug (e.g., "generation-iv").
    pub fn slug(&self) -> &'static str {
        match self {
            Self::I => "generation-i",
            Self::Ii => "generation-ii",
            Self::Iii => "generation-iii",
            Self::Iv => "generation-iv",
            Self::V => "generation-v",
            Self::Vi => "generation-vi",
            Self::Vii => "generation-vii",
            Self::Viii => "generation-viii",
            Self::Ix => "generation-ix",
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::all().iter().copied().find(|g| g.number() == n)
    }

    /// Parse the trailing numeric id of a generation resource URL,
    /// e.g. `https://pokeapi.co/api/v2/generation/4/`.
    pub fn from_resource_url(url: &str) -> Option<Self> {
        let id = url.trim_end_matches('/').rsplit('/').next()?;
        id.parse::<u8>().ok().and_then(Self::from_number)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for Generation {
    type Err = GenerationParseError;

    /// Accepts the slug (`generation-iii`), the bare numeral (`iii`) or the
    /// number (`3`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let label = lower.strip_prefix("generation-").unwrap_or(lower.as_str());
        let found = match label.parse::<u8>() {
            Ok(n) => Self::from_number(n),
            Err(_) => Self::all()
                .iter()
                .copied()
                .find(|g| g.slug().strip_prefix("generation-") == Some(label)),
        };
        found.ok_or_else(|| GenerationParseError(s.to_string()))
    }
}

impl TryFrom<u8> for Generation {
    type Error = GenerationParseError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or_else(|| GenerationParseError(n.to_string()))
    }
}

impl From<Generation> for u8 {
    fn from(g: Generation) -> u8 {
        g.number()
    }
}

/// Inclusive range of generations an entity must debut in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRange {
    pub min: Generation,
    pub max: Generation,
}

impl Default for GenerationRange {
    /// Generations I through V.
    fn default() -> Self {
        Self {
            min: Generation::I,
            max: Generation::V,
        }
    }
}

impl GenerationRange {
    pub fn new(min: Generation, max: Generation) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, generation: Generation) -> bool {
        self.min <= generation && generation <= self.max
    }
}

#[cfg(test)]
#[path = "tests/generation_tests.rs"]
mod tests;
