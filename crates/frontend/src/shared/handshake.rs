//! Dashboard ↔ block map liveness check.
//!
//! The dashboard publishes [`RekapPing`], waits for a [`PetaPong`] and then
//! decides which afdeling to load with [`resolve`].

use std::sync::{Arc, Mutex};

use contracts::shared::events::{AfdelingClicked, PetaPong, RekapPing};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

use crate::shared::config::HandshakeConfig;
use crate::shared::date_utils::now_ms;
use crate::shared::event_bus::AppBus;

/// What the block page knows, shared so the dashboard can fall back to it
/// when the page does not answer.
#[derive(Clone, Copy)]
pub struct MapState {
    pub last_detected: RwSignal<Option<AfdelingClicked>>,
}

impl MapState {
    pub fn new() -> Self {
        Self {
            last_detected: RwSignal::new(None),
        }
    }
}

impl Default for MapState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_map_state() -> MapState {
    use_context::<MapState>().expect("MapState not found in context")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    Pong,
    LastKnown,
    Click,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HandshakeOutcome {
    Load { event: AfdelingClicked, via: Via },
    /// A block was picked but its afdeling could not be classified
    Unclassified(String),
    /// The map answered but nothing has been clicked yet
    AwaitingClick,
    NotConnected,
}

impl HandshakeOutcome {
    pub fn notice(&self) -> Option<String> {
        match self {
            HandshakeOutcome::Load { .. } => None,
            HandshakeOutcome::Unclassified(name) => {
                Some(format!("Afdeling untuk blok \"{}\" tidak dikenali", name))
            }
            HandshakeOutcome::AwaitingClick => {
                Some("Klik blok pada peta untuk menampilkan rekap afdeling".to_string())
            }
            HandshakeOutcome::NotConnected => {
                Some("Peta tidak terhubung. Buka halaman peta lalu pilih blok.".to_string())
            }
        }
    }
}

fn classify(event: &AfdelingClicked, via: Via) -> HandshakeOutcome {
    if event.afdeling_key.is_some() {
        HandshakeOutcome::Load {
            event: event.clone(),
            via,
        }
    } else {
        HandshakeOutcome::Unclassified(event.name.clone())
    }
}

/// Pong afdeling first, then the last afdeling the map reported
pub fn resolve(pong: Option<&PetaPong>, last_known: Option<&AfdelingClicked>) -> HandshakeOutcome {
    if let Some(event) = pong.and_then(|p| p.last_detected_afdeling.as_ref()) {
        return classify(event, Via::Pong);
    }
    if let Some(event) = last_known {
        return classify(event, Via::LastKnown);
    }
    if pong.is_some() {
        HandshakeOutcome::AwaitingClick
    } else {
        HandshakeOutcome::NotConnected
    }
}

/// A click always reloads the dashboard
pub fn on_click(event: &AfdelingClicked) -> HandshakeOutcome {
    classify(event, Via::Click)
}

/// Publishes a ping and waits up to `timeout_ms` for the answer
pub async fn run_handshake(
    bus: &AppBus,
    map: MapState,
    config: &HandshakeConfig,
) -> HandshakeOutcome {
    let received: Arc<Mutex<Option<PetaPong>>> = Arc::new(Mutex::new(None));
    let _subscription = {
        let received = Arc::clone(&received);
        bus.peta_pong.subscribe(move |pong| {
            if let Ok(mut slot) = received.lock() {
                *slot = Some(pong.clone());
            }
        })
    };
    bus.rekap_ping.publish(&RekapPing {
        requested_at: now_ms(),
    });

    let step = config.poll_step_ms.max(1);
    let mut waited = 0;
    let pong = loop {
        let answer = received.lock().ok().and_then(|mut slot| slot.take());
        if answer.is_some() || waited >= config.timeout_ms {
            break answer;
        }
        TimeoutFuture::new(step).await;
        waited += step;
    };
    if pong.is_none() {
        log::info!("handshake: no petaPong after {} ms, using fallback", config.timeout_ms);
    }
    resolve(pong.as_ref(), map.last_detected.get_untracked().as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::AfdelingKey;

    fn clicked(key: Option<AfdelingKey>) -> AfdelingClicked {
        AfdelingClicked {
            afdeling: key.map(|k| k.label().to_string()).unwrap_or_default(),
            afdeling_key: key,
            name: "Blok A1".to_string(),
            feature_id: None,
        }
    }

    fn pong(afdeling: Option<AfdelingClicked>) -> PetaPong {
        PetaPong {
            ready: true,
            has_map: true,
            last_detected_afdeling: afdeling,
            ts: 0.0,
        }
    }

    #[test]
    fn test_pong_afdeling_wins_over_last_known() {
        let from_pong = clicked(Some(AfdelingKey::Klepu));
        let last = clicked(Some(AfdelingKey::Setro));
        let outcome = resolve(Some(&pong(Some(from_pong.clone()))), Some(&last));
        assert_eq!(
            outcome,
            HandshakeOutcome::Load {
                event: from_pong,
                via: Via::Pong
            }
        );
    }

    #[test]
    fn test_no_pong_falls_back_to_last_known() {
        let last = clicked(Some(AfdelingKey::Gebugan));
        assert_eq!(
            resolve(None, Some(&last)),
            HandshakeOutcome::Load {
                event: last,
                via: Via::LastKnown
            }
        );
    }

    #[test]
    fn test_nothing_known_is_not_connected() {
        let outcome = resolve(None, None);
        assert_eq!(outcome, HandshakeOutcome::NotConnected);
        assert!(outcome.notice().unwrap().starts_with("Peta tidak terhubung"));
    }

    #[test]
    fn test_live_map_without_click_waits() {
        assert_eq!(resolve(Some(&pong(None)), None), HandshakeOutcome::AwaitingClick);
    }

    #[test]
    fn test_unclassified_block_is_reported() {
        assert_eq!(
            on_click(&clicked(None)),
            HandshakeOutcome::Unclassified("Blok A1".to_string())
        );
    }
}
