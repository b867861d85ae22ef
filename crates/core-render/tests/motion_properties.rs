//! Property-based checks that emitted motion and style deltas actually
//! reach their targets when interpreted.

use core_cell::Style;
use core_render::{CursorTracker, SgrTracker};
use proptest::prelude::*;

/// Minimal interpreter for the motion encodings the tracker may emit.
fn apply_motion(mut pos: (usize, usize), bytes: &[u8]) -> (usize, usize) {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                pos.1 = 0;
                i += 1;
            }
            b'\n' => {
                pos.0 += 1;
                i += 1;
            }
            0x1b => {
                assert_eq!(bytes[i + 1], b'[');
                let mut j = i + 2;
                while bytes[j].is_ascii_digit() || bytes[j] == b';' {
                    j += 1;
                }
                let params = std::str::from_utf8(&bytes[i + 2..j]).unwrap();
                let mut nums = params.split(';').map(|p| p.parse::<usize>().unwrap_or(1));
                match bytes[j] {
                    b'A' => pos.0 -= nums.next().unwrap_or(1).max(1),
                    b'B' => pos.0 += nums.next().unwrap_or(1).max(1),
                    b'C' => pos.1 += nums.next().unwrap_or(1).max(1),
                    b'D' => pos.1 -= nums.next().unwrap_or(1).max(1),
                    b'H' => {
                        let row = nums.next().unwrap_or(1).max(1);
                        let col = nums.next().unwrap_or(1).max(1);
                        pos = (row - 1, col - 1);
                    }
                    other => panic!("unexpected motion final byte {other}"),
                }
                i = j + 1;
            }
            other => panic!("unexpected motion byte {other}"),
        }
    }
    pos
}

proptest! {
    // Interpreting the emitted bytes lands exactly on the target, and never
    // costs more than plain absolute addressing.
    #[test]
    fn emitted_motion_reaches_target(r0 in 0usize..40, c0 in 0usize..120,
                                     r1 in 0usize..40, c1 in 0usize..120) {
        let mut tracker = CursorTracker::at(r0, c0);
        let mut out = Vec::new();
        tracker.move_to(&mut out, r1, c1);
        prop_assert_eq!(apply_motion((r0, c0), &out), (r1, c1));
        prop_assert_eq!(tracker.position(), Some((r1, c1)));

        let absolute = format!("\x1b[{};{}H", r1 + 1, c1 + 1);
        prop_assert!(out.len() <= absolute.len());
    }

    // Applying the emitted SGR delta to the previous style reproduces the
    // target style exactly.
    #[test]
    fn emitted_sgr_delta_reaches_target(from in sgr_params(), to in sgr_params()) {
        let mut current = Style::default();
        current.apply_sgr(&from);
        let mut target = Style::default();
        target.apply_sgr(&to);

        let mut tracker = SgrTracker::new();
        let mut scratch = Vec::new();
        tracker.transition(&mut scratch, &current);

        let mut out = Vec::new();
        tracker.transition(&mut out, &target);
        prop_assert_eq!(tracker.current(), target);

        let mut replay = current;
        if !out.is_empty() {
            let text = std::str::from_utf8(&out).unwrap();
            prop_assert!(text.starts_with("\x1b[") && text.ends_with('m'));
            replay.apply_sgr(&text[2..text.len() - 1]);
        }
        prop_assert_eq!(replay, target);
    }
}

/// Random parameter strings drawn from the codes the style model knows.
fn sgr_params() -> impl Strategy<Value = String> {
    let code = prop_oneof![
        Just("0".to_string()),
        (1u16..=9).prop_map(|c| c.to_string()),
        (22u16..=29).prop_map(|c| c.to_string()),
        (30u16..=37).prop_map(|c| c.to_string()),
        (90u16..=97).prop_map(|c| c.to_string()),
        (40u16..=47).prop_map(|c| c.to_string()),
        (100u16..=107).prop_map(|c| c.to_string()),
        Just("39".to_string()),
        Just("49".to_string()),
        (0u8..=255).prop_map(|n| format!("38;5;{n}")),
        (0u8..=255).prop_map(|n| format!("48;5;{n}")),
        (0u8..=255, 0u8..=255, 0u8..=255).prop_map(|(r, g, b)| format!("38;2;{r};{g};{b}")),
    ];
    proptest::collection::vec(code, 0..5).prop_map(|codes| codes.join(";"))
}
