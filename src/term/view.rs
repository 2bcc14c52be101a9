//! View: maps an engine snapshot into styled text lines.
//!
//! Pure (no I/O), so the whole layout can be unit-tested. The engine never
//! formats time or renders artwork; both happen here.

use crate::core::snapshot::GameSnapshot;
use crate::storage::SoundSettings;
use crate::types::{Artwork, Card, CardStatus, GameStatus};

/// Cards per grid row.
pub const GRID_COLS: usize = 5;

/// Interior width of a card box, in characters.
const CARD_INNER_W: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Plain,
    Title,
    Dim,
    Accent,
    CardBack,
    CardFace,
    CardMatched,
    Cursor,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        let mut line = Self::default();
        line.push(text, style);
        line
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::Plain)
    }

    pub fn push(&mut self, text: impl Into<String>, style: TextStyle) {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
    }

    /// Concatenated text without styling (test helper).
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Modal layers owned by the frontend, not the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    HowTo,
    Resume,
}

#[derive(Debug, Clone)]
pub struct UiState {
    /// Index into the snapshot's card list.
    pub cursor: usize,
    pub overlay: Overlay,
    pub sound: SoundSettings,
}

pub fn render(snapshot: &GameSnapshot, ui: &UiState) -> Vec<Line> {
    let mut lines = Vec::new();
    lines.push(Line::styled("MEMORY MATCH", TextStyle::Title));
    lines.push(hud_line(snapshot));
    lines.push(mode_line(snapshot, &ui.sound));
    lines.push(Line::empty());

    match ui.overlay {
        Overlay::HowTo => {
            lines.extend(how_to_lines());
            return lines;
        }
        Overlay::Resume => {
            lines.extend(resume_lines(snapshot));
            return lines;
        }
        Overlay::None => {}
    }

    lines.extend(grid_lines(snapshot, ui));
    lines.push(Line::empty());

    if snapshot.status == GameStatus::Finished {
        lines.extend(finished_lines(snapshot));
    } else if snapshot.resume_available {
        lines.push(Line::styled(
            "saved round available: [y] resume  [x] discard",
            TextStyle::Accent,
        ));
    }

    lines.push(Line::styled(
        "←↑↓→ move · space flip · h hint · r restart · 1/2/3 difficulty · t theme · m/b sound · z reset · q quit",
        TextStyle::Dim,
    ));
    lines
}

/// `mm:ss`, or `--:--` for untimed rounds.
pub fn format_clock(remaining_ms: Option<u32>) -> String {
    match remaining_ms {
        None => "--:--".to_string(),
        Some(ms) => {
            let secs = ms / 1000;
            format!("{:02}:{:02}", secs / 60, secs % 60)
        }
    }
}

fn hud_line(snapshot: &GameSnapshot) -> Line {
    let mut line = Line::empty();
    line.push("SCORE ", TextStyle::Dim);
    line.push(format!("{:<6}", snapshot.score), TextStyle::Plain);
    line.push("BEST ", TextStyle::Dim);
    line.push(format!("{:<6}", snapshot.best_score), TextStyle::Plain);
    line.push("PAIRS ", TextStyle::Dim);
    line.push(
        format!("{}/{:<4}", snapshot.matched_pairs, snapshot.total_pairs),
        TextStyle::Plain,
    );
    line.push("TIME ", TextStyle::Dim);
    let clock_style = match snapshot.remaining_time_ms {
        Some(ms) if ms <= 10_000 => TextStyle::Alert,
        _ => TextStyle::Plain,
    };
    line.push(format_clock(snapshot.remaining_time_ms), clock_style);
    line
}

fn mode_line(snapshot: &GameSnapshot, sound: &SoundSettings) -> Line {
    let mut line = Line::empty();
    line.push("MODE ", TextStyle::Dim);
    line.push(snapshot.difficulty.as_str(), TextStyle::Plain);
    line.push("  THEME ", TextStyle::Dim);
    line.push(snapshot.theme.as_str(), TextStyle::Plain);
    line.push("  HINT ", TextStyle::Dim);
    let hint = if !snapshot.hint_available {
        ("-", TextStyle::Dim)
    } else if snapshot.is_hint_previewing {
        ("LOOK!", TextStyle::Accent)
    } else if snapshot.hint_used {
        ("used", TextStyle::Dim)
    } else {
        ("ready [h]", TextStyle::Plain)
    };
    line.push(hint.0, hint.1);
    line.push("  SFX ", TextStyle::Dim);
    line.push(if sound.sfx { "on" } else { "off" }, TextStyle::Plain);
    line.push("  BGM ", TextStyle::Dim);
    line.push(if sound.bgm { "on" } else { "off" }, TextStyle::Plain);
    line
}

fn grid_lines(snapshot: &GameSnapshot, ui: &UiState) -> Vec<Line> {
    let mut lines = Vec::new();
    for (row_idx, row) in snapshot.cards.chunks(GRID_COLS).enumerate() {
        let mut top = Line::empty();
        let mut mid = Line::empty();
        let mut bottom = Line::empty();

        for (col_idx, card) in row.iter().enumerate() {
            let index = row_idx * GRID_COLS + col_idx;
            let selected = index == ui.cursor;
            let revealed = card.status != CardStatus::Hidden || snapshot.is_hint_previewing;

            let border = if selected {
                TextStyle::Cursor
            } else if card.status == CardStatus::Matched {
                TextStyle::CardMatched
            } else if revealed {
                TextStyle::CardFace
            } else {
                TextStyle::CardBack
            };
            let face_style = if card.status == CardStatus::Matched {
                TextStyle::CardMatched
            } else if revealed {
                TextStyle::CardFace
            } else {
                TextStyle::CardBack
            };

            top.push(format!("╭{}╮ ", "─".repeat(CARD_INNER_W)), border);
            mid.push("│", border);
            mid.push(center(&face_text(card, revealed), CARD_INNER_W), face_style);
            mid.push("│ ", border);
            bottom.push(format!("╰{}╯ ", "─".repeat(CARD_INNER_W)), border);
        }

        lines.push(top);
        lines.push(mid);
        lines.push(bottom);
    }
    lines
}

/// What a card shows: its front when revealed, a back pattern otherwise.
/// Image artwork renders as its label; real image drawing is out of scope
/// for a terminal.
fn face_text(card: &Card, revealed: bool) -> String {
    if !revealed {
        return "▒".repeat(CARD_INNER_W);
    }
    match &card.front {
        Artwork::Emoji { glyph, .. } => glyph.clone(),
        Artwork::Image { label, .. } => label.chars().take(CARD_INNER_W).collect(),
    }
}

/// Char-count centering; emoji double-width drift is acceptable.
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn finished_lines(snapshot: &GameSnapshot) -> Vec<Line> {
    let won = snapshot.matched_pairs == snapshot.total_pairs;
    let mut lines = Vec::new();
    let headline = if won {
        Line::styled(
            format!("ROUND COMPLETE! score {}", snapshot.score),
            TextStyle::Accent,
        )
    } else {
        Line::styled(
            format!("TIME UP! score {}", snapshot.score),
            TextStyle::Alert,
        )
    };
    lines.push(headline);
    if snapshot.has_new_best {
        lines.push(Line::styled("NEW RECORD!", TextStyle::Accent));
    }
    lines.push(Line::styled(
        "press r for a new round",
        TextStyle::Dim,
    ));
    lines
}

fn how_to_lines() -> Vec<Line> {
    vec![
        Line::styled("HOW TO PLAY", TextStyle::Title),
        Line::plain("Flip two cards; matching fronts stay up and score 30 points."),
        Line::plain("A mismatch flips back after a moment and costs 5 points."),
        Line::plain("Match every pair to finish the round. Timed modes end at 00:00."),
        Line::plain("Easy mode grants one hint per round: every card is revealed briefly."),
        Line::plain("Your progress is saved automatically; quit any time and resume later."),
        Line::empty(),
        Line::styled("press any key to start", TextStyle::Dim),
    ]
}

fn resume_lines(snapshot: &GameSnapshot) -> Vec<Line> {
    let mut lines = vec![Line::styled("CONTINUE SAVED ROUND?", TextStyle::Title)];
    if let Some(pending) = &snapshot.pending_session {
        lines.push(Line::plain(format!(
            "{} · {} · score {} · {}/{} pairs · {}",
            pending.difficulty.as_str(),
            pending.theme.as_str(),
            pending.score,
            pending.matched_pairs,
            pending.total_pairs,
            format_clock(pending.remaining_time_ms),
        )));
    }
    lines.push(Line::empty());
    lines.push(Line::styled(
        "[y] resume · [x] discard and keep playing",
        TextStyle::Dim,
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameEngine;
    use crate::storage::MemoryStore;

    fn snapshot() -> GameSnapshot {
        GameEngine::new(12345, Box::new(MemoryStore::new())).snapshot()
    }

    fn ui() -> UiState {
        UiState {
            cursor: 0,
            overlay: Overlay::None,
            sound: SoundSettings::default(),
        }
    }

    fn full_text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(None), "--:--");
        assert_eq!(format_clock(Some(60_000)), "01:00");
        assert_eq!(format_clock(Some(90_000)), "01:30");
        assert_eq!(format_clock(Some(999)), "00:00");
    }

    #[test]
    fn test_center_pads_both_sides() {
        assert_eq!(center("ab", 5), " ab  ");
        assert_eq!(center("abcde", 5), "abcde");
        assert_eq!(center("abcdefg", 5), "abcdefg");
    }

    #[test]
    fn test_render_shows_hud_and_hidden_grid() {
        let text = full_text(&render(&snapshot(), &ui()));
        assert!(text.contains("SCORE"));
        assert!(text.contains("PAIRS 0/5"));
        assert!(text.contains("--:--"));
        assert!(text.contains("▒▒▒▒▒"));
    }

    #[test]
    fn test_hint_preview_reveals_faces() {
        let mut engine = GameEngine::new(7, Box::new(MemoryStore::new()));
        let first = engine.cards()[0].id;
        engine.flip_card(first);
        engine.use_hint();
        let text = full_text(&render(&engine.snapshot(), &ui()));
        assert!(!text.contains('▒'), "hint preview must reveal every card");
        assert!(text.contains("LOOK!"));
    }

    #[test]
    fn test_overlays_replace_grid() {
        let howto = full_text(&render(
            &snapshot(),
            &UiState {
                overlay: Overlay::HowTo,
                ..ui()
            },
        ));
        assert!(howto.contains("HOW TO PLAY"));
        assert!(!howto.contains('▒'));

        let resume = full_text(&render(
            &snapshot(),
            &UiState {
                overlay: Overlay::Resume,
                ..ui()
            },
        ));
        assert!(resume.contains("CONTINUE SAVED ROUND?"));
    }

    #[test]
    fn test_finished_round_shows_score_panel() {
        let mut engine = GameEngine::new(5, Box::new(MemoryStore::new()));
        let pairs: Vec<(u8, u8)> = {
            let mut seen: Vec<String> = Vec::new();
            let mut out = Vec::new();
            for card in engine.cards() {
                if seen.contains(&card.pair_id) {
                    continue;
                }
                seen.push(card.pair_id.clone());
                let partner = engine
                    .cards()
                    .iter()
                    .find(|c| c.pair_id == card.pair_id && c.id != card.id)
                    .unwrap();
                out.push((card.id, partner.id));
            }
            out
        };
        for (a, b) in pairs {
            engine.flip_card(a);
            engine.flip_card(b);
        }

        let text = full_text(&render(&engine.snapshot(), &ui()));
        assert!(text.contains("ROUND COMPLETE! score 150"));
        assert!(text.contains("NEW RECORD!"));
    }
}
