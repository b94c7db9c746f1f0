//! Afdeling detection from a map feature name.
//!
//! Block codes on the estate map follow loose per-division naming habits
//! ("ST-..", "KLP-..", "FM-IE10-12-AR3"). Rules are tried in order and the
//! first hit wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::enums::{AfdelingKey, UNKNOWN_AFDELING_LABEL};

static RULES: Lazy<Vec<(Regex, AfdelingKey)>> = Lazy::new(|| {
    [
        (r"(?i)set|st|setro", AfdelingKey::Setro),
        (r"(?i)klp|klepu|yp-ie10-17-klsg[0-9]+", AfdelingKey::Klepu),
        (r"(?i)jr|jtr|jatirung|jatiroenggo", AfdelingKey::Jatiroenggo),
        (
            r"(?i)geb|gb|gebug|fm-ie10-\d{2}-ar\d+|fi-ie10-\d{2}-ar\d+|yp-ie10-19-gesr[0-9]+|fm-ie10-\d{2}-ro\d+",
            AfdelingKey::Gebugan,
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, key)| match Regex::new(pattern) {
        Ok(re) => Some((re, key)),
        Err(e) => {
            log::error!("invalid afdeling rule {}: {}", pattern, e);
            None
        }
    })
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedAfdeling {
    pub key: Option<AfdelingKey>,
    pub label: String,
}

pub fn detect_afdeling(feature_name: &str) -> DetectedAfdeling {
    let name = feature_name.trim();
    match RULES.iter().find(|(re, _)| re.is_match(name)) {
        Some((_, key)) => DetectedAfdeling {
            key: Some(*key),
            label: key.label().to_string(),
        },
        None => DetectedAfdeling {
            key: None,
            label: UNKNOWN_AFDELING_LABEL.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> Option<AfdelingKey> {
        detect_afdeling(name).key
    }

    #[test]
    fn test_prefix_rules() {
        assert_eq!(key("ST-12"), Some(AfdelingKey::Setro));
        assert_eq!(key("klp 03"), Some(AfdelingKey::Klepu));
        assert_eq!(key("YP-IE10-17-KLSG4"), Some(AfdelingKey::Klepu));
        assert_eq!(key("JTR-1"), Some(AfdelingKey::Jatiroenggo));
        assert_eq!(key("FI-IE10-07-AR12"), Some(AfdelingKey::Gebugan));
        assert_eq!(key("YP-IE10-19-GESR2"), Some(AfdelingKey::Gebugan));
    }

    #[test]
    fn test_first_rule_wins() {
        // "gebugan setro" hits the setro rule before the gebugan one
        assert_eq!(key("Gebugan Setro"), Some(AfdelingKey::Setro));
    }

    #[test]
    fn test_unknown_name() {
        let d = detect_afdeling("BLOK-9");
        assert_eq!(d.key, None);
        assert_eq!(d.label, "Tidak diketahui");
    }
}
