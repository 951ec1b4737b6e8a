/// Species gender ratio, stored in the Pokémon dataset as eighths female
/// (`0..=8`) or `-1` for genderless species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenderRate {
    Genderless,
    Eighths(u8),
}

impl GenderRate {
    /// Returns all ten rates, genderless first.
    pub fn all() -> impl Iterator<Item = GenderRate> {
        std::iter::once(Self::Genderless).chain((0..=8).map(Self::Eighths))
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Self::Genderless),
            0..=8 => Some(Self::Eighths(code as u8)),
            _ => None,
        }
    }

    pub fn code(&self) -> i8 {
        match self {
            Self::Genderless => -1,
            Self::Eighths(n) => *n as i8,
        }
    }

    pub fn female_percentage(&self) -> f64 {
        match self {
            Self::Genderless => 0.0,
            Self::Eighths(n) => f64::from(*n) * 12.5,
        }
    }

    pub fn male_percentage(&self) -> f64 {
        match self {
            Self::Genderless => 0.0,
            Self::Eighths(n) => 100.0 - f64::from(*n) * 12.5,
        }
    }

    /// Human-readable label, e.g. "12.5% Female, 87.5% Male".
    pub fn label(&self) -> String {
        match self {
            Self::Genderless => "Genderless".to_string(),
            Self::Eighths(_) => format!(
                "{}% Female, {}% Male",
                self.female_percentage(),
                self.male_percentage()
            ),
        }
    }
}

impl std::fmt::Display for GenderRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
