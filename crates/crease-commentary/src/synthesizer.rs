//! Event sequence to commentary text.

use crease_models::{Event, EventKind, Language};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::templates::{Pool, TemplateTable};
use crate::transcript::{Fragment, Transcript};

/// Picks commentary lines for events.
///
/// Line choice is random; seed the generator for reproducible output.
#[derive(Debug, Clone)]
pub struct CommentarySynthesizer<R: Rng = StdRng> {
    rng: R,
    wicket_calls: bool,
}

impl CommentarySynthesizer<StdRng> {
    /// Synthesizer seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Synthesizer with reproducible line choice.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for CommentarySynthesizer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> CommentarySynthesizer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            wicket_calls: false,
        }
    }

    /// Narrate wicket events too (off by default).
    pub fn with_wicket_calls(mut self, enabled: bool) -> Self {
        self.wicket_calls = enabled;
        self
    }

    /// Commentary for `events` in the language named by `language`.
    ///
    /// Unsupported language codes get English. Never fails; with nothing to
    /// narrate the language's idle line is returned.
    pub fn generate_commentary(&mut self, events: &[Event], language: &str) -> String {
        self.generate_transcript(events, Language::from_code_or_default(language))
            .text()
    }

    /// Commentary for `events` as a transcript, in input order.
    pub fn generate_transcript(&mut self, events: &[Event], language: Language) -> Transcript {
        let table = TemplateTable::for_language(language);
        let mut fragments = Vec::with_capacity(events.len());

        for event in events {
            let Some(text) = self.narrate(table, &event.kind) else {
                continue;
            };
            fragments.push(Fragment {
                language,
                text,
                frame: Some(event.frame),
            });
        }

        debug!(
            language = %language,
            events = events.len(),
            fragments = fragments.len(),
            "Commentary generated"
        );

        if fragments.is_empty() {
            Transcript::idle(language, table.default_line)
        } else {
            Transcript::new(language, fragments)
        }
    }

    fn narrate(&mut self, table: &TemplateTable, kind: &EventKind) -> Option<String> {
        match kind {
            EventKind::ShotPlayed(label) => {
                let transition = self.pick(table.transitions)?;
                let line = self.pick(table.shot_pool(*label))?;
                Some(format!("{}{}", transition, line))
            }
            EventKind::Boundary(boundary) => self.pick(table.boundary_pool(*boundary)).map(str::to_string),
            EventKind::Wicket(mode) if self.wicket_calls => {
                self.pick(table.wicket_pool(*mode)).map(str::to_string)
            }
            EventKind::Wicket(_) | EventKind::Other { .. } => None,
        }
    }

    fn pick(&mut self, pool: Pool) -> Option<&'static str> {
        pool.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crease_models::{BoundaryKind, DismissalMode, ShotLabel};

    const EN_DEFAULT: &str =
        "The batsman takes guard as the tension builds in the stadium. The crowd waits in anticipation.";

    fn en() -> &'static TemplateTable {
        TemplateTable::for_language(Language::En)
    }

    #[test]
    fn test_empty_events_give_default_line() {
        let mut synth = CommentarySynthesizer::seeded(1);
        assert_eq!(synth.generate_commentary(&[], "en"), EN_DEFAULT);
        assert_eq!(synth.generate_commentary(&[], "xx"), EN_DEFAULT);
        assert_eq!(
            synth.generate_commentary(&[], "ta"),
            TemplateTable::for_language(Language::Ta).default_line
        );
    }

    #[test]
    fn test_boundary_is_verbatim_without_transition() {
        let mut synth = CommentarySynthesizer::seeded(7);
        let events = [Event::boundary(BoundaryKind::Four, 0.8, 1.0, 30)];
        let text = synth.generate_commentary(&events, "en");
        assert!(en().boundary_pool(BoundaryKind::Four).contains(&text.as_str()));
    }

    #[test]
    fn test_shot_gets_transition_prefix() {
        let mut synth = CommentarySynthesizer::seeded(3);
        let events = [Event::shot_played(ShotLabel::CoverDrive, 0.9, 2.0, 60)];
        let text = synth.generate_commentary(&events, "en");

        let transition = en()
            .transitions
            .iter()
            .find(|t| text.starts_with(*t))
            .expect("transition prefix");
        let rest = &text[transition.len()..];
        assert!(en().shot_pool(ShotLabel::CoverDrive).contains(&rest));
    }

    #[test]
    fn test_unknown_stroke_uses_generic_pool() {
        let mut synth = CommentarySynthesizer::seeded(5);
        let events = [Event::shot_played(ShotLabel::Unknown, 0.5, 0.0, 0)];
        let text = synth.generate_commentary(&events, "en");
        assert!(en()
            .shot_pool(ShotLabel::Generic)
            .iter()
            .any(|line| text.ends_with(line)));
    }

    #[test]
    fn test_same_seed_same_commentary() {
        let events = [
            Event::shot_played(ShotLabel::PullShot, 0.9, 1.0, 30),
            Event::boundary(BoundaryKind::Four, 0.81, 1.5, 45),
            Event::boundary(BoundaryKind::Six, 0.8, 5.0, 150),
        ];
        let a = CommentarySynthesizer::seeded(42).generate_commentary(&events, "en");
        let b = CommentarySynthesizer::seeded(42).generate_commentary(&events, "en");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fragments_follow_input_order() {
        let events = [
            Event::boundary(BoundaryKind::Six, 0.8, 9.0, 270),
            Event::boundary(BoundaryKind::Four, 0.8, 1.0, 30),
        ];
        let transcript = CommentarySynthesizer::seeded(0).generate_transcript(&events, Language::En);
        let frames: Vec<Option<u64>> = transcript.fragments().iter().map(|f| f.frame).collect();
        assert_eq!(frames, vec![Some(270), Some(30)]);
        assert_eq!(
            transcript.text(),
            format!("{} {}", transcript.fragments()[0].text, transcript.fragments()[1].text)
        );
    }

    #[test]
    fn test_wickets_are_opt_in() {
        let events = [Event::wicket(DismissalMode::Bowled, 0.7, 3.0, 90)];

        let mut quiet = CommentarySynthesizer::seeded(9);
        let transcript = quiet.generate_transcript(&events, Language::En);
        assert!(transcript.is_idle());
        assert_eq!(transcript.text(), EN_DEFAULT);

        let mut loud = CommentarySynthesizer::seeded(9).with_wicket_calls(true);
        let text = loud.generate_commentary(&events, "en");
        assert!(en().wicket_pool(DismissalMode::Bowled).contains(&text.as_str()));
    }

    #[test]
    fn test_unrecognized_kinds_are_skipped() {
        let other = Event::new(
            EventKind::Other {
                kind: "no_ball".to_string(),
                subtype: None,
            },
            0.5,
            1.0,
            30,
        );
        let six = Event::boundary(BoundaryKind::Six, 0.8, 2.0, 60);
        let transcript = CommentarySynthesizer::seeded(2).generate_transcript(&[other, six], Language::En);
        assert_eq!(transcript.fragments().len(), 1);
    }

    #[test]
    fn test_tamil_uses_tamil_pools() {
        let ta = TemplateTable::for_language(Language::Ta);
        let mut synth = CommentarySynthesizer::seeded(11);

        let four = synth.generate_commentary(&[Event::boundary(BoundaryKind::Four, 0.8, 0.0, 0)], "ta");
        assert!(ta.boundary_pool(BoundaryKind::Four).contains(&four.as_str()));

        let shot = synth.generate_commentary(&[Event::shot_played(ShotLabel::SweepShot, 0.8, 0.0, 0)], "ta");
        assert!(ta.transitions.iter().any(|t| shot.starts_with(t)));
        assert!(ta.shot_pool(ShotLabel::Generic).iter().any(|line| shot.ends_with(line)));
    }

    #[test]
    fn test_hindi_borrows_english_lines() {
        let hi = TemplateTable::for_language(Language::Hi);
        let mut synth = CommentarySynthesizer::seeded(4);
        let text = synth.generate_commentary(&[Event::shot_played(ShotLabel::FlickShot, 0.7, 0.0, 0)], "hi");
        assert!(hi.transitions.iter().any(|t| text.starts_with(t)));
        assert!(en().shot_pool(ShotLabel::FlickShot).iter().any(|line| text.ends_with(line)));
    }
}
