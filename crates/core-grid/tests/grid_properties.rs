//! Property-based checks on wide-pair integrity under random writes.

use core_grid::{TextGrid, cluster_width};
use proptest::prelude::*;

const WIDTH: usize = 12;

#[derive(Debug, Clone)]
enum Op {
    Narrow { row: usize, col: usize },
    Wide { row: usize, col: usize },
    Truncate { row: usize, len: usize },
    Fill { row: usize, start: usize, len: usize },
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (0usize..4, 0usize..WIDTH).prop_map(|(row, col)| Op::Narrow { row, col }),
        (0usize..4, 0usize..WIDTH - 1).prop_map(|(row, col)| Op::Wide { row, col }),
        (0usize..4, 0usize..=WIDTH).prop_map(|(row, len)| Op::Truncate { row, len }),
        (0usize..4, 0usize..WIDTH, 0usize..6)
            .prop_map(|(row, start, len)| Op::Fill { row, start, len }),
    ];
    proptest::collection::vec(op, 0..60)
}

proptest! {
    // After any sequence of writes, every continuation cell sits directly
    // right of a width-2 cluster, and no row exceeds the grid width.
    #[test]
    fn wide_pairs_stay_paired(ops in ops()) {
        let mut grid = TextGrid::new(WIDTH);
        for op in ops {
            match op {
                Op::Narrow { row, col } => grid.set_cluster(row, col, "x", 1),
                Op::Wide { row, col } => grid.set_cluster(row, col, "漢", 2),
                Op::Truncate { row, len } => grid.truncate_row(row, len),
                Op::Fill { row, start, len } => {
                    grid.fill_blank(row, start, (start + len).min(WIDTH))
                }
            }
        }

        for row in 0..grid.row_count() {
            let len = grid.row_len(row);
            prop_assert!(len <= WIDTH);
            for col in 0..len {
                let cluster = grid.cluster_at(row, col).unwrap();
                if cluster.is_empty() {
                    prop_assert!(col > 0, "continuation in column 0");
                    let left = grid.cluster_at(row, col - 1).unwrap();
                    prop_assert_eq!(
                        cluster_width(left), 2,
                        "continuation must follow a wide cluster (row {}, col {})", row, col
                    );
                }
            }
            // A wide cluster is always followed by its continuation cell.
            for col in 0..len {
                let cluster = grid.cluster_at(row, col).unwrap();
                if cluster_width(cluster) == 2 {
                    prop_assert_eq!(grid.cluster_at(row, col + 1), Some(""));
                }
            }
        }
    }
}
