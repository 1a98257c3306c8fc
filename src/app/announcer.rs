// src/app/announcer.rs
//! Spoken output for the virtual quiz master.

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

use crate::config::Locale;
use crate::error::describe_js;

const SPEECH_RATE: f32 = 0.8;
const SPEECH_PITCH: f32 = 1.0;
const SPEECH_VOLUME: f32 = 1.0;

/// Speech output. `speak` queues behind whatever is already playing; call `stop`
/// first to interrupt.
pub trait Announcer {
    fn speak(&self, text: &str, locale: Locale);
    fn stop(&self);
    fn is_speaking(&self) -> bool;
}

/// Used when the browser has no speech synthesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn speak(&self, text: &str, _locale: Locale) {
        debug!("(silent) {}", text);
    }

    fn stop(&self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}

pub struct WebSpeechAnnouncer {
    synth: SpeechSynthesis,
}

impl WebSpeechAnnouncer {
    pub fn new() -> Option<Self> {
        let synth = web_sys::window()?.speech_synthesis().ok()?;
        Some(Self { synth })
    }

    fn voices(&self) -> Vec<SpeechSynthesisVoice> {
        self.synth
            .get_voices()
            .iter()
            .filter_map(|voice| voice.dyn_into::<SpeechSynthesisVoice>().ok())
            .collect()
    }
}

impl Announcer for WebSpeechAnnouncer {
    fn speak(&self, text: &str, locale: Locale) {
        let utterance = match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => utterance,
            Err(e) => {
                warn!("Could not create utterance: {}", describe_js(&e));
                return;
            }
        };
        utterance.set_lang(locale.speech_tag());
        utterance.set_rate(SPEECH_RATE);
        utterance.set_pitch(SPEECH_PITCH);
        utterance.set_volume(SPEECH_VOLUME);

        let voices = self.voices();
        let labels: Vec<(String, String)> = voices.iter().map(|v| (v.name(), v.lang())).collect();
        if let Some(index) = preferred_voice(&labels, locale) {
            debug!("Speaking with voice {} ({})", labels[index].0, labels[index].1);
            utterance.set_voice(Some(&voices[index]));
        }
        self.synth.speak(&utterance);
    }

    fn stop(&self) {
        self.synth.cancel();
    }

    fn is_speaking(&self) -> bool {
        self.synth.speaking()
    }
}

/// Index of the best voice for `locale` among `(name, lang)` pairs.
///
/// Telugu: `te-IN`, any `te*`, a voice named "telugu", any Indian voice, then the
/// first voice. English: Indian English, then any English voice.
pub fn preferred_voice(voices: &[(String, String)], locale: Locale) -> Option<usize> {
    match locale {
        Locale::Te => position_of(voices, |_, lang| lang == "te-IN")
            .or_else(|| position_of(voices, |_, lang| lang.starts_with("te")))
            .or_else(|| position_of(voices, |name, _| name.to_lowercase().contains("telugu")))
            .or_else(|| position_of(voices, |_, lang| lang.ends_with("-IN")))
            .or(if voices.is_empty() { None } else { Some(0) }),
        Locale::En => position_of(voices, |_, lang| lang == "en-IN")
            .or_else(|| position_of(voices, |_, lang| lang.starts_with("en"))),
    }
}

fn position_of(voices: &[(String, String)], pred: impl Fn(&str, &str) -> bool) -> Option<usize> {
    voices.iter().position(|(name, lang)| pred(name.as_str(), lang.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter().map(|(n, l)| (n.to_string(), l.to_string())).collect()
    }

    #[test]
    fn telugu_prefers_exact_tag_then_fallbacks() {
        let all = voices(&[("Alex", "en-US"), ("Lekha", "hi-IN"), ("Geeta", "te-IN")]);
        assert_eq!(preferred_voice(&all, Locale::Te), Some(2));

        let named = voices(&[("Alex", "en-US"), ("Google Telugu", "und")]);
        assert_eq!(preferred_voice(&named, Locale::Te), Some(1));

        let indian = voices(&[("Alex", "en-US"), ("Lekha", "hi-IN")]);
        assert_eq!(preferred_voice(&indian, Locale::Te), Some(1));

        let other = voices(&[("Alex", "en-US")]);
        assert_eq!(preferred_voice(&other, Locale::Te), Some(0));
        assert_eq!(preferred_voice(&[], Locale::Te), None);
    }

    #[test]
    fn english_prefers_indian_english() {
        let all = voices(&[("Thomas", "fr-FR"), ("Alex", "en-US"), ("Rishi", "en-IN")]);
        assert_eq!(preferred_voice(&all, Locale::En), Some(2));

        let us_only = voices(&[("Thomas", "fr-FR"), ("Alex", "en-US")]);
        assert_eq!(preferred_voice(&us_only, Locale::En), Some(1));

        let none = voices(&[("Thomas", "fr-FR")]);
        assert_eq!(preferred_voice(&none, Locale::En), None);
    }

    #[test]
    fn silent_announcer_never_speaks() {
        let announcer = SilentAnnouncer;
        announcer.speak("hello", Locale::En);
        assert!(!announcer.is_speaking());
    }
}
