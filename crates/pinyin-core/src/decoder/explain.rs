use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::beam::Beam;
use super::DecodedPath;

/// Full diagnostic result for one syllable sequence.
#[derive(Debug, Serialize)]
pub struct Explanation {
    pub syllables: Vec<String>,
    pub positions: Vec<ExplainPosition>,
    /// `None` when the final beam was empty or the input was empty.
    pub path: Option<DecodedPath>,
}

/// The pruned beam at one position.
#[derive(Debug, Serialize)]
pub struct ExplainPosition {
    pub syllable: String,
    pub cells: Vec<ExplainCell>,
}

#[derive(Debug, Serialize)]
pub struct ExplainCell {
    pub ch: String,
    pub score: f64,
    /// Predecessor character in the previous position's beam.
    pub prev: Option<String>,
}

impl Explanation {
    pub(crate) fn new(syllables: &[&str], beams: &[Beam<'_>], path: Option<DecodedPath>) -> Self {
        let positions = syllables
            .iter()
            .zip(beams)
            .enumerate()
            .map(|(pos, (syllable, beam))| ExplainPosition {
                syllable: syllable.to_string(),
                cells: beam
                    .cells()
                    .iter()
                    .map(|cell| ExplainCell {
                        ch: cell.ch.to_string(),
                        score: cell.score,
                        prev: cell
                            .prev
                            .zip(pos.checked_sub(1))
                            .and_then(|(idx, p)| beams[p].get(idx))
                            .map(|c| c.ch.to_string()),
                    })
                    .collect(),
            })
            .collect();
        Self {
            syllables: syllables.iter().map(|s| s.to_string()).collect(),
            positions,
            path,
        }
    }

    pub fn text(&self) -> String {
        self.path.as_ref().map(DecodedPath::text).unwrap_or_default()
    }
}

/// Render an explanation as human-readable text, keeping at most `top`
/// cells per position.
pub fn format_text(result: &Explanation, top: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Beams for \"{}\" ({} syllables) ===\n",
        result.syllables.join(" "),
        result.syllables.len(),
    ));

    for (pos, position) in result.positions.iter().enumerate() {
        out.push_str(&format!(
            "  Position {} [{}] ({} cells):\n",
            pos,
            position.syllable,
            position.cells.len()
        ));
        if position.cells.is_empty() {
            out.push_str("    (empty)\n");
            continue;
        }
        for cell in position.cells.iter().take(top) {
            // Pad by display width so CJK characters line up.
            let pad = 4usize.saturating_sub(cell.ch.width());
            let prev = cell
                .prev
                .as_deref()
                .map(|p| format!("  <- {p}"))
                .unwrap_or_default();
            out.push_str(&format!(
                "    {}{}score={:.4}{}\n",
                cell.ch,
                " ".repeat(pad),
                cell.score,
                prev,
            ));
        }
        if position.cells.len() > top {
            out.push_str(&format!("    ... {} more\n", position.cells.len() - top));
        }
    }

    match &result.path {
        Some(path) => out.push_str(&format!(
            "\n=== Best path ===\n  {}  (score={:.4})\n",
            path.text(),
            path.score
        )),
        None => out.push_str("\nNo path found.\n"),
    }
    out
}
