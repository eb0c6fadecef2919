use crate::crossword::Crossword;
use crate::types::Assignment;

/// The character used for blocked cells in rendered output.
pub const BLOCK: char = '█';

/// Turn an assignment into a grid of letters, with `None` for cells no assigned word covers.
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width]; crossword.height];

    for (&variable_id, &word_id) in assignment {
        let cells = crossword.variable(variable_id).cells();
        for ((row, col), &glyph) in cells.into_iter().zip(&crossword.word(word_id).chars) {
            letters[row][col] = Some(glyph);
        }
    }

    letters
}

/// Turn the given crossword and assignment into a rendered string: one line per row, blocks drawn
/// as `█` and open cells without a letter as spaces.
pub fn render_grid(crossword: &Crossword, assignment: &Assignment) -> String {
    letter_grid(crossword, assignment)
        .into_iter()
        .enumerate()
        .map(|(row, letters)| {
            letters
                .into_iter()
                .enumerate()
                .map(|(col, letter)| {
                    if crossword.is_open(row, col) {
                        letter.unwrap_or(' ')
                    } else {
                        BLOCK
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
