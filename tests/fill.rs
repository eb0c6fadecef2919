use crossword_csp::{
    complete, consistent, render_grid, solve, Crossword, Direction, FillFailure, SolverConfig,
    Variable,
};
use std::path::Path;

fn data_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn configs() -> [SolverConfig; 2] {
    [
        SolverConfig::default(),
        SolverConfig {
            maintain_arc_consistency: true,
        },
    ]
}

fn crossing(words: &[&str]) -> Crossword {
    Crossword::from_variables(
        vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(0, 1, Direction::Down, 3),
        ],
        words,
    )
    .unwrap()
}

/// _____
/// _#_#_
/// _____
#[test]
fn test_fill_bundled_puzzle() {
    let crossword =
        Crossword::from_files(&data_path("structure0.txt"), &data_path("words0.txt")).unwrap();
    assert_eq!(crossword.variables().len(), 5);

    for config in configs() {
        let result = solve(&crossword, &config).expect("Failed to find a fill");

        assert!(complete(&crossword, &result.assignment));
        assert!(consistent(&crossword, &result.assignment));

        let rendered = render_grid(&crossword, &result.assignment);
        println!("{:?}", result.statistics);
        println!("{}", rendered);

        let lines: Vec<Vec<char>> = rendered.lines().map(|line| line.chars().collect()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1][1], '█');
        assert_eq!(lines[1][3], '█');
        assert!(lines.iter().flatten().all(|&c| c != ' '));
    }
}

/// ___
/// ___
/// ___
#[test]
fn test_fill_3x3_square() {
    let crossword = Crossword::from_template_str(
        "___\n___\n___\n",
        "cat\nore\nwed\ncow\nare\nted\ndog\nrat\near\ntoe\nowe\n",
    )
    .unwrap();

    for config in configs() {
        let result = solve(&crossword, &config).expect("Failed to find a fill");

        assert!(complete(&crossword, &result.assignment));
        assert!(consistent(&crossword, &result.assignment));
        println!("{}", render_grid(&crossword, &result.assignment));
    }
}

#[test]
fn test_fill_crossing_slots() {
    let crossword = crossing(&["cat", "arc", "dog"]);

    for config in configs() {
        let result = solve(&crossword, &config).expect("Failed to find a fill");
        let words: Vec<&str> = result
            .words(&crossword)
            .into_iter()
            .map(|(_, word)| word)
            .collect();

        assert_eq!(words, vec!["CAT", "ARC"]);
    }
}

#[test]
fn test_fill_fails_gracefully() {
    for words in [&["cat", "car", "dog"][..], &["cat", "fox"][..]] {
        let crossword = crossing(words);

        for config in configs() {
            let result = solve(&crossword, &config);

            assert!(matches!(
                result,
                Err(FillFailure::UnsatisfiableByPropagation { .. })
            ));
        }
    }
}

#[test]
fn test_fill_fails_after_search() {
    let crossword =
        Crossword::from_template_str("____\n_##_\n", "abca\nacda\naa\nba\n").unwrap();

    for config in configs() {
        let result = solve(&crossword, &config);

        assert!(matches!(result, Err(FillFailure::NoSolutionFound { .. })));
    }
}
