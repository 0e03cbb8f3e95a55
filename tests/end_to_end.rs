use bimaru::{is_complete, solve, solve_easiest, Board, Puzzle, Value};

const EXAMPLES: &str = include_str!("../puzzles/examples.txt");

fn solved_grid(board: &Board, expected: &[&str]) {
    for (r, row) in expected.iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            assert_eq!(
                board.value(r, c),
                Value::from_char(ch).unwrap(),
                "at ({r},{c})"
            );
        }
    }
}

#[test]
fn test_example_file_parses() {
    let puzzles = Puzzle::parse_all(EXAMPLES).unwrap();
    assert_eq!(puzzles.len(), 2);
    assert_eq!(puzzles[0].name, "1");
    assert_eq!(puzzles[0].size, 10);
    assert_eq!(puzzles[1].name, "2");
}

#[test]
fn test_solve_ten_by_ten() {
    let puzzles = Puzzle::parse_all(EXAMPLES).unwrap();
    let mut board = puzzles[0].to_board().unwrap();
    let level = solve(&mut board).unwrap();
    assert_eq!(level, 2);
    assert!(is_complete(&board));
    solved_grid(
        &board,
        &[
            "<-->=<->==",
            "==========",
            "^=<>=<>=^=",
            "|=======v=",
            "v=========",
            "==========",
            "O=O=O=O===",
            "==========",
            "==========",
            "==========",
        ],
    );
    // the finished fleet is exactly one 4, two 3s, three 2s, four subs
    let fleet = board.fleet();
    for size in 1..=4 {
        assert_eq!(fleet.confirmed(size).len(), fleet.required(size), "size {size}");
        assert!(fleet.potential(size).is_empty(), "size {size}");
    }
    assert!(!board.journal().is_empty());
}

#[test]
fn test_solve_easiest_suffices_for_ten_by_ten() {
    let puzzles = Puzzle::parse_all(EXAMPLES).unwrap();
    let mut board = puzzles[0].to_board().unwrap();
    solve_easiest(&mut board).unwrap();
    assert!(is_complete(&board));
}

#[test]
fn test_solve_four_by_four() {
    let puzzles = Puzzle::parse_all(EXAMPLES).unwrap();
    let mut board = puzzles[1].to_board().unwrap();
    let level = solve(&mut board).unwrap();
    assert_eq!(level, 2);
    assert!(is_complete(&board));
    solved_grid(&board, &["<>==", "====", "=O=O", "===="]);
}
