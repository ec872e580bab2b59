//! Fallback demo generator.
//!
//! When the host streams nothing, the display shows randomly chosen 1-D
//! elementary cellular automata. Each cycle announces the rule number over a
//! label bitmap, seeds an initial row, then runs generations until the
//! pattern freezes or a frame cap expires, and picks the next rule.

use crate::assets::{
    DIGIT_BYTE_OFFSETS, DIGIT_COLUMNS, DIGIT_GLYPHS, KNOWN_GOOD_RULES, LABEL_BITMAP, LABEL_COLUMNS,
};
use crate::column::{self, Column, BLANK_COLUMN};
use crate::config::{DemoOptions, VERTICAL_PIXELS};
use crate::rng::XorShift32;

/// Demo sub-state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoPhase {
    /// Choosing the next automaton rule
    PickRule,
    /// Scrolling the rule announcement bitmap
    Text,
    /// Seeding the first generation
    InitialState,
    /// Running generations
    Run,
}

/// Compute one automaton generation.
///
/// Each cell's successor is looked up in the 8-entry rule table indexed by
/// the (upper, center, lower) neighborhood bits; neighbors beyond the column
/// ends read as dead.
pub fn next_generation(rule: u8, current: &Column, next: &mut Column) {
    for y in 0..VERTICAL_PIXELS {
        let upper = y > 0 && column::get_cell(current, y - 1);
        let center = column::get_cell(current, y);
        let lower = y + 1 < VERTICAL_PIXELS && column::get_cell(current, y + 1);
        let index = (upper as u8) << 2 | (center as u8) << 1 | lower as u8;
        column::set_cell(next, y, rule >> index & 1 != 0);
    }
}

/// Persistent state of the demo generator
#[derive(Debug, Clone)]
pub struct DemoState {
    phase: DemoPhase,
    /// Elementary automaton rule in play
    rule: u8,
    /// Columns emitted in the current phase
    frame: u16,
    /// Current generation
    current: Column,
    /// Scratch for the next generation (always the same length as `current`)
    next: Column,
    rng: XorShift32,
    options: DemoOptions,
}

impl DemoState {
    pub fn new(seed: u32, options: DemoOptions) -> Self {
        Self {
            phase: DemoPhase::PickRule,
            rule: 0,
            frame: 0,
            current: BLANK_COLUMN,
            next: BLANK_COLUMN,
            rng: XorShift32::new(seed),
            options,
        }
    }

    pub fn phase(&self) -> DemoPhase {
        self.phase
    }

    /// Rule chosen by the most recent `PickRule`
    pub fn rule(&self) -> u8 {
        self.rule
    }

    /// Abandon the current cycle and start over with a fresh rule
    pub fn restart(&mut self) {
        self.phase = DemoPhase::PickRule;
        self.frame = 0;
    }

    /// Called when real buffered content was displayed instead of the demo.
    /// Restarts the cycle when configured to, otherwise the demo resumes
    /// where it left off.
    pub fn content_shown(&mut self) {
        if self.options.reset_on_content {
            self.restart();
        }
    }

    /// Produce the next demo column
    pub fn next_column(&mut self) -> Column {
        match self.phase {
            DemoPhase::PickRule => {
                self.rule = self.pick_rule();
                self.frame = 0;
                self.phase = DemoPhase::Text;
                BLANK_COLUMN
            }
            DemoPhase::Text => {
                let mut col = LABEL_BITMAP[self.frame as usize];
                if (self.frame as usize) < DIGIT_COLUMNS {
                    self.overlay_rule_digits(&mut col, self.frame as usize);
                }
                self.frame += 1;
                if self.frame as usize == LABEL_COLUMNS {
                    self.phase = DemoPhase::InitialState;
                }
                col
            }
            DemoPhase::InitialState => {
                let mut seed = BLANK_COLUMN;
                if self.rng.next_u32() & 1 == 0 {
                    for byte in seed.iter_mut() {
                        *byte = self.rng.next_u8();
                    }
                } else {
                    column::set_cell(&mut seed, VERTICAL_PIXELS / 2, true);
                }
                self.current = seed;
                self.frame = 0;
                self.phase = DemoPhase::Run;
                seed
            }
            DemoPhase::Run => {
                next_generation(self.rule, &self.current, &mut self.next);
                let fixed_point = self.next == self.current;
                core::mem::swap(&mut self.current, &mut self.next);
                self.frame += 1;

                let col = self.current;
                if self.frame > self.options.frame_cap
                    || (fixed_point && self.frame > self.options.min_frames)
                {
                    self.restart();
                }
                col
            }
        }
    }

    /// 75% a curated rule, 25% anything
    fn pick_rule(&mut self) -> u8 {
        if self.rng.next_u32() & 0x3 != 0 {
            KNOWN_GOOD_RULES[self.rng.next_u32() as usize % KNOWN_GOOD_RULES.len()]
        } else {
            self.rng.next_u8()
        }
    }

    /// OR the rule's decimal digits into `col`, one byte row per digit,
    /// skipping leading zeros.
    fn overlay_rule_digits(&self, col: &mut Column, text_column: usize) {
        let rule = self.rule as usize;
        let digits = [rule / 100, rule / 10 % 10, rule % 10];
        for (place, &digit) in digits.iter().enumerate() {
            // Skip leading-zero glyphs for 1- and 2-digit rules
            let significant = match place {
                0 => rule >= 100,
                1 => rule >= 10,
                _ => true,
            };
            if significant {
                col[DIGIT_BYTE_OFFSETS[place]] |= DIGIT_GLYPHS[digit][text_column];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COLUMN_BYTES;

    fn demo(seed: u32) -> DemoState {
        DemoState::new(seed, DemoOptions::default())
    }

    #[test]
    fn test_cycle_walks_all_four_phases() {
        let mut demo = demo(7);
        assert_eq!(demo.phase(), DemoPhase::PickRule);

        // Picking a rule emits one blank column
        assert_eq!(demo.next_column(), BLANK_COLUMN);
        assert_eq!(demo.phase(), DemoPhase::Text);

        for _ in 0..LABEL_COLUMNS {
            demo.next_column();
        }
        assert_eq!(demo.phase(), DemoPhase::InitialState);

        demo.next_column();
        assert_eq!(demo.phase(), DemoPhase::Run);
    }

    #[test]
    fn test_rule_zero_converges_to_dark() {
        // Rule 0 maps every neighborhood to dead
        let mut current: Column = [0xA5; COLUMN_BYTES];
        let mut next = BLANK_COLUMN;
        let mut generations = 0;
        while current != BLANK_COLUMN {
            next_generation(0, &current, &mut next);
            core::mem::swap(&mut current, &mut next);
            generations += 1;
            assert!(generations <= VERTICAL_PIXELS / 2 + 1);
        }
    }

    #[test]
    fn test_rule_255_converges_to_lit() {
        let all_on: Column = [0xFF; COLUMN_BYTES];
        let mut current = BLANK_COLUMN;
        let mut next = BLANK_COLUMN;
        let mut generations = 0;
        while current != all_on {
            next_generation(255, &current, &mut next);
            core::mem::swap(&mut current, &mut next);
            generations += 1;
            assert!(generations <= VERTICAL_PIXELS / 2 + 1);
        }
    }

    #[test]
    fn test_rule_90_from_center_seed_is_symmetric() {
        let mut current = BLANK_COLUMN;
        column::set_cell(&mut current, VERTICAL_PIXELS / 2, true);
        let mut next = BLANK_COLUMN;
        for _ in 0..10 {
            next_generation(90, &current, &mut next);
            core::mem::swap(&mut current, &mut next);
        }
        // Rule 90 is left/right symmetric, so a centered seed stays mirrored
        for offset in 0..VERTICAL_PIXELS / 2 {
            assert_eq!(
                column::get_cell(&current, VERTICAL_PIXELS / 2 - offset),
                column::get_cell(&current, VERTICAL_PIXELS / 2 + offset),
            );
        }
    }

    #[test]
    fn test_fixed_point_returns_to_pick_rule() {
        let mut demo = DemoState::new(3, DemoOptions {
            min_frames: 2,
            ..DemoOptions::default()
        });
        demo.rule = 0; // freezes after the first generation
        demo.phase = DemoPhase::Run;
        demo.current = BLANK_COLUMN;

        // Already at a fixed point; must still honor the minimum frame floor
        demo.next_column();
        demo.next_column();
        assert_eq!(demo.phase(), DemoPhase::Run);
        demo.next_column();
        assert_eq!(demo.phase(), DemoPhase::PickRule);
    }

    #[test]
    fn test_frame_cap_ends_a_lively_rule() {
        let mut demo = DemoState::new(11, DemoOptions {
            frame_cap: 16,
            ..DemoOptions::default()
        });
        demo.rule = 30; // chaotic, never freezes at this size
        demo.phase = DemoPhase::InitialState;
        demo.next_column();

        let mut frames = 0;
        while demo.phase() == DemoPhase::Run {
            demo.next_column();
            frames += 1;
            assert!(frames <= 17);
        }
    }

    #[test]
    fn test_rule_digits_overlay_text_columns() {
        let mut demo = demo(1);
        demo.next_column(); // PickRule -> Text
        demo.rule = 184;

        let col = demo.next_column();
        let lit_digit_rows = DIGIT_BYTE_OFFSETS
            .iter()
            .filter(|&&row| col[row] != 0)
            .count();
        // 184 has three digits; "1" has a blank leading glyph column, so at
        // least the other two rows must be lit in the very first column
        assert!(lit_digit_rows >= 2);
    }

    #[test]
    fn test_two_digit_rule_skips_leading_zero() {
        let mut demo = demo(1);
        demo.next_column();
        demo.rule = 90;

        // Across the whole digit strip, the hundreds row stays dark
        for _ in 0..DIGIT_COLUMNS {
            let col = demo.next_column();
            assert_eq!(col[DIGIT_BYTE_OFFSETS[0]], 0);
        }
    }

    #[test]
    fn test_rule_choice_prefers_curated_list() {
        let mut demo = demo(0xDEAD_BEEF);
        let mut curated = 0;
        for _ in 0..64 {
            let rule = demo.pick_rule();
            if KNOWN_GOOD_RULES.contains(&rule) {
                curated += 1;
            }
        }
        // Deterministic sequence; three quarters of picks come from the list
        assert!(curated >= 40);
    }

    #[test]
    fn test_content_shown_only_resets_when_configured() {
        let mut resuming = demo(5);
        resuming.next_column();
        resuming.content_shown();
        assert_eq!(resuming.phase(), DemoPhase::Text);

        let mut resetting = DemoState::new(5, DemoOptions {
            reset_on_content: true,
            ..DemoOptions::default()
        });
        resetting.next_column();
        resetting.content_shown();
        assert_eq!(resetting.phase(), DemoPhase::PickRule);
    }
}
