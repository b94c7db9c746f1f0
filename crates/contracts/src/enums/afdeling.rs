use serde::{Deserialize, Serialize};

/// Estate divisions recognised on the plantation map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AfdelingKey {
    Setro,
    Klepu,
    Jatiroenggo,
    Gebugan,
}

/// Stroke/fill pair used when drawing a block of this afdeling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AfdelingStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
}

pub const UNKNOWN_AFDELING_LABEL: &str = "Tidak diketahui";

impl AfdelingKey {
    /// Lower-case key sent to `/api/dashboard?afdeling=`
    pub fn code(&self) -> &'static str {
        match self {
            AfdelingKey::Setro => "setro",
            AfdelingKey::Klepu => "klepu",
            AfdelingKey::Jatiroenggo => "jatiroenggo",
            AfdelingKey::Gebugan => "gebugan",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AfdelingKey::Setro => "Setro",
            AfdelingKey::Klepu => "Klepu",
            AfdelingKey::Jatiroenggo => "Jatiroenggo",
            AfdelingKey::Gebugan => "Gebugan",
        }
    }

    pub fn style(&self) -> AfdelingStyle {
        match self {
            AfdelingKey::Setro => AfdelingStyle {
                color: "#ff0000",
                fill_color: "#ffaaaa",
            },
            AfdelingKey::Klepu => AfdelingStyle {
                color: "#00b300",
                fill_color: "#aaffaa",
            },
            AfdelingKey::Jatiroenggo => AfdelingStyle {
                color: "#0000ff",
                fill_color: "#aaaaff",
            },
            AfdelingKey::Gebugan => AfdelingStyle {
                color: "#ffa500",
                fill_color: "#ffe5b4",
            },
        }
    }

    pub fn all() -> Vec<AfdelingKey> {
        vec![
            AfdelingKey::Setro,
            AfdelingKey::Klepu,
            AfdelingKey::Jatiroenggo,
            AfdelingKey::Gebugan,
        ]
    }

    /// Case-insensitive lookup by key or label
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::all().into_iter().find(|k| k.code() == code)
    }
}

impl AfdelingStyle {
    pub const UNKNOWN: AfdelingStyle = AfdelingStyle {
        color: "#555",
        fill_color: "#ddd",
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_ignores_case_and_whitespace() {
        assert_eq!(AfdelingKey::from_code(" Klepu "), Some(AfdelingKey::Klepu));
        assert_eq!(AfdelingKey::from_code("GEBUGAN"), Some(AfdelingKey::Gebugan));
        assert_eq!(AfdelingKey::from_code("ngobo"), None);
    }

    #[test]
    fn test_serializes_as_lowercase_key() {
        let json = serde_json::to_string(&AfdelingKey::Jatiroenggo).unwrap();
        assert_eq!(json, "\"jatiroenggo\"");
    }
}
