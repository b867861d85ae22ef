//! Property-based stress: arbitrary byte streams must never break the
//! engine's structural invariants.

use proptest::prelude::*;
use termgrid::Screen;

/// Byte soup biased toward escape introducers and newlines so sequences
/// actually form.
fn terminal_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(
        prop_oneof![
            4 => any::<u8>(),
            2 => Just(0x1b_u8),
            1 => Just(b'\n'),
            1 => Just(b'['),
            1 => Just(b'm'),
            1 => Just(b';'),
            1 => b'0'..=b'9',
        ],
        0..512,
    )
}

proptest! {
    #[test]
    fn cursor_stays_inside_the_viewport(chunks in proptest::collection::vec(terminal_bytes(), 1..6)) {
        let mut screen = Screen::new(13, 4);
        for chunk in &chunks {
            screen.write(chunk);
            let (row, col) = screen.cursor();
            let top = screen.lines_off_screen();
            prop_assert!(col <= screen.width());
            prop_assert!(row >= top);
            prop_assert!(row < top + screen.height());
        }
    }

    #[test]
    fn seq_is_monotone_over_arbitrary_input(chunks in proptest::collection::vec(terminal_bytes(), 1..6)) {
        let mut screen = Screen::new(13, 4);
        let mut last = screen.current_seq();
        for chunk in &chunks {
            screen.write(chunk);
            let now = screen.current_seq();
            prop_assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn render_since_now_is_always_empty(bytes in terminal_bytes()) {
        let mut screen = Screen::new(13, 4);
        screen.write(&bytes);
        prop_assert!(screen.render_since(screen.current_seq()).is_empty());
    }

    #[test]
    fn continuation_cells_follow_wide_clusters(text in "[a-z漢字あ ]{0,60}") {
        let mut screen = Screen::new(9, 3);
        screen.write(text.as_bytes());
        let snap = screen.snapshot();
        for row in 0..3 {
            for col in 0..9 {
                if snap.cell(row, col).is_continuation() {
                    prop_assert!(col > 0, "continuation cannot sit in column 0");
                    let left = snap.cell(row, col - 1);
                    prop_assert_eq!(termgrid::cluster_width(&left.cluster), 2);
                }
            }
        }
    }

    #[test]
    fn render_never_panics_and_stays_relative(bytes in terminal_bytes()) {
        let mut screen = Screen::new(13, 4);
        screen.write(&bytes);
        let frame = screen.render();
        // The relative form never hard-positions: CUP only appears as the
        // 3-byte home in saved-origin framing, which render never emits.
        let text = String::from_utf8_lossy(&frame);
        prop_assert!(!text.contains("\x1b[1;1H"));
    }
}
