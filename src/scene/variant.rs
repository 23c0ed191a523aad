use std::fmt;
use std::str::FromStr;

/// Visual theme of the interactive space
///
/// Fixed for the lifetime of a mounted renderer; switching rebuilds the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Variant {
    /// Glass sphere with wireframe core, tilted ring and fog (home hero)
    #[default]
    #[value(alias = "hero")]
    Primary,
    /// Bronze cube with edge overlay and wireframe core (interior section)
    #[value(alias = "interior")]
    Secondary,
    /// Faceted cyan octahedron with orbiting ring (graphic section)
    #[value(alias = "graphic")]
    Tertiary,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Primary, Variant::Secondary, Variant::Tertiary];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Primary => "primary",
            Variant::Secondary => "secondary",
            Variant::Tertiary => "tertiary",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant '{0}' (expected primary, secondary or tertiary)")]
pub struct ParseVariantError(pub String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" | "hero" => Ok(Variant::Primary),
            "secondary" | "interior" => Ok(Variant::Secondary),
            "tertiary" | "graphic" => Ok(Variant::Tertiary),
            other => Err(ParseVariantError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for variant in Variant::ALL {
            assert_eq!(variant.name().parse::<Variant>(), Ok(variant));
        }
    }

    #[test]
    fn test_parse_page_aliases() {
        assert_eq!("hero".parse::<Variant>(), Ok(Variant::Primary));
        assert_eq!("Interior".parse::<Variant>(), Ok(Variant::Secondary));
        assert_eq!(" graphic ".parse::<Variant>(), Ok(Variant::Tertiary));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "quaternary".parse::<Variant>().unwrap_err();
        assert!(err.to_string().contains("quaternary"));
    }

    #[test]
    fn test_default_is_primary() {
        assert_eq!(Variant::default(), Variant::Primary);
        assert_eq!(Variant::Tertiary.to_string(), "tertiary");
    }
}
