use std::fmt;
use std::str::FromStr;

/// Light requirement choices offered by the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightOption {
    FullSun,
    PartialSun,
    PartialShade,
    FullShade,
}

impl LightOption {
    pub const ALL: [LightOption; 4] = [
        LightOption::FullSun,
        LightOption::PartialSun,
        LightOption::PartialShade,
        LightOption::FullShade,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LightOption::FullSun => "Full Sun",
            LightOption::PartialSun => "Partial Sun",
            LightOption::PartialShade => "Partial Shade",
            LightOption::FullShade => "Full Shade",
        }
    }
}

impl fmt::Display for LightOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LightOption {
    type Err = String;

    /// Exact, case-sensitive match against the option labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LightOption::ALL
            .into_iter()
            .find(|option| option.label() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid light option '{}'. Valid options: Full Sun, Partial Sun, Partial Shade, Full Shade",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy)]
enum LightPattern {
    Contains(&'static str),
    Exact(&'static str),
}

impl LightPattern {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            LightPattern::Contains(needle) => lowered.contains(needle),
            LightPattern::Exact(word) => lowered == *word,
        }
    }
}

/// Synonyms for light values found in imported catalogs, checked in order
/// against the lowercased value. The first match wins.
const LIGHT_SYNONYMS: &[(LightPattern, LightOption)] = &[
    (LightPattern::Contains("sun or shade"), LightOption::PartialSun),
    (LightPattern::Contains("sun and shade"), LightOption::PartialSun),
    (LightPattern::Contains("mostly sunny"), LightOption::FullSun),
    (LightPattern::Exact("sunny"), LightOption::FullSun),
    (LightPattern::Contains("mostly shady"), LightOption::PartialShade),
    (LightPattern::Contains("mostly shade"), LightOption::PartialShade),
    (LightPattern::Exact("shade"), LightOption::FullShade),
    (LightPattern::Contains("full shade"), LightOption::FullShade),
    (LightPattern::Exact("sun"), LightOption::FullSun),
    (LightPattern::Contains("full sun"), LightOption::FullSun),
];

/// What the light selector shows after loading a record's light value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightChoice {
    /// Empty value; the placeholder stays selected.
    Unset,
    /// A known option, matched exactly or through a synonym.
    Known(LightOption),
    /// No option matched; a temporary option carrying the literal value.
    Custom(String),
}

impl LightChoice {
    /// Resolves a stored light value to a selector choice.
    ///
    /// Exact label matches win, then the synonym table. Anything else passes
    /// through verbatim as a custom choice.
    pub fn resolve(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return LightChoice::Unset;
        }

        if let Ok(option) = trimmed.parse::<LightOption>() {
            return LightChoice::Known(option);
        }

        let lowered = trimmed.to_lowercase();
        LIGHT_SYNONYMS
            .iter()
            .find(|(pattern, _)| pattern.matches(&lowered))
            .map(|(_, option)| LightChoice::Known(*option))
            .unwrap_or_else(|| LightChoice::Custom(trimmed.to_string()))
    }

    /// The value placed in the form's light field.
    pub fn value(&self) -> &str {
        match self {
            LightChoice::Unset => "",
            LightChoice::Known(option) => option.label(),
            LightChoice::Custom(value) => value,
        }
    }

    /// Label of the injected temporary option, if one is needed.
    pub fn custom_label(&self) -> Option<String> {
        match self {
            LightChoice::Custom(value) => Some(format!("{} (from data)", value)),
            _ => None,
        }
    }
}
