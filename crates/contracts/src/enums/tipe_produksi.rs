use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Types the backend accepts, as an `{success, data: [code]}` envelope
pub const TIPE_PRODUKSI_PATH: &str = "/api/tipe-produksi";

/// Production type of a baku entry / mandor group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TipeProduksi {
    #[default]
    Baku,
    BakuBorong,
    BakuEksternal,
    BakuInternal,
    TetesLanjut,
    BakuMinggu,
    /// A type the backend knows and this client does not yet
    Other(String),
}

impl TipeProduksi {
    /// Wire code as stored by the backend
    pub fn code(&self) -> &str {
        match self {
            TipeProduksi::Baku => "BAKU",
            TipeProduksi::BakuBorong => "BAKU_BORONG",
            TipeProduksi::BakuEksternal => "BAKU_EKSTERNAL",
            TipeProduksi::BakuInternal => "BAKU_INTERNAL",
            TipeProduksi::TetesLanjut => "TETES_LANJUT",
            TipeProduksi::BakuMinggu => "BAKU_MINGGU",
            TipeProduksi::Other(code) => code,
        }
    }

    /// Label for selects and table captions ("BAKU BORONG")
    pub fn display_name(&self) -> String {
        self.code().replace('_', " ").to_uppercase()
    }

    pub fn all() -> Vec<TipeProduksi> {
        vec![
            TipeProduksi::Baku,
            TipeProduksi::BakuBorong,
            TipeProduksi::BakuEksternal,
            TipeProduksi::BakuInternal,
            TipeProduksi::TetesLanjut,
            TipeProduksi::BakuMinggu,
        ]
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "BAKU" => TipeProduksi::Baku,
            "BAKU_BORONG" => TipeProduksi::BakuBorong,
            "BAKU_EKSTERNAL" => TipeProduksi::BakuEksternal,
            "BAKU_INTERNAL" => TipeProduksi::BakuInternal,
            "TETES_LANJUT" => TipeProduksi::TetesLanjut,
            "BAKU_MINGGU" => TipeProduksi::BakuMinggu,
            _ => TipeProduksi::Other(code.trim().to_string()),
        }
    }
}

impl fmt::Display for TipeProduksi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for TipeProduksi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for TipeProduksi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(TipeProduksi::default());
        }
        Ok(TipeProduksi::from_code(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_round_trip_through_json() {
        let json = serde_json::to_string(&TipeProduksi::BakuBorong).unwrap();
        assert_eq!(json, "\"BAKU_BORONG\"");
        let back: TipeProduksi = serde_json::from_str("\"baku_minggu\"").unwrap();
        assert_eq!(back, TipeProduksi::BakuMinggu);
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let tipe: TipeProduksi = serde_json::from_str("\"SADAP_MALAM\"").unwrap();
        assert_eq!(tipe, TipeProduksi::Other("SADAP_MALAM".to_string()));
        assert_eq!(tipe.display_name(), "SADAP MALAM");
    }

    #[test]
    fn test_empty_code_defaults_to_baku() {
        let tipe: TipeProduksi = serde_json::from_str("\"\"").unwrap();
        assert_eq!(tipe, TipeProduksi::Baku);
    }
}
