use std::fs;

use serde::Serialize;

/// Agreement between expected and decoded output files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    /// Number of expected lines.
    pub sentences: usize,
    pub exact_sentences: usize,
    /// Characters compared, over the shorter line of each pair.
    pub chars: usize,
    pub matching_chars: usize,
}

impl AccuracyReport {
    pub fn sentence_accuracy(&self) -> f64 {
        ratio(self.exact_sentences, self.sentences)
    }

    pub fn char_accuracy(&self) -> f64 {
        ratio(self.matching_chars, self.chars)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Compare line by line. Lines are trimmed; surplus lines on either side
/// are unpaired and count as misses against the expected total.
pub fn compare(expected: &str, actual: &str) -> AccuracyReport {
    let expected: Vec<&str> = expected.lines().map(str::trim).collect();
    let actual: Vec<&str> = actual.lines().map(str::trim).collect();

    let mut report = AccuracyReport {
        sentences: expected.len(),
        exact_sentences: 0,
        chars: 0,
        matching_chars: 0,
    };
    for (want, got) in expected.iter().zip(&actual) {
        if want == got {
            report.exact_sentences += 1;
        }
        for (w, g) in want.chars().zip(got.chars()) {
            report.chars += 1;
            if w == g {
                report.matching_chars += 1;
            }
        }
    }
    report
}

pub fn accuracy(expected_file: &str, actual_file: &str, json: bool) {
    let expected = die!(
        fs::read_to_string(expected_file),
        "Error reading {expected_file}: {}"
    );
    let actual = die!(
        fs::read_to_string(actual_file),
        "Error reading {actual_file}: {}"
    );
    let report = compare(&expected, &actual);

    if json {
        let out = serde_json::json!({
            "sentences": report.sentences,
            "exact_sentences": report.exact_sentences,
            "sentence_accuracy": report.sentence_accuracy(),
            "chars": report.chars,
            "matching_chars": report.matching_chars,
            "char_accuracy": report.char_accuracy(),
        });
        println!("{}", die!(serde_json::to_string_pretty(&out), "Error: {}"));
    } else {
        println!(
            "Sentence accuracy: {:.2}% ({}/{})",
            report.sentence_accuracy() * 100.0,
            report.exact_sentences,
            report.sentences
        );
        println!(
            "Character accuracy: {:.2}% ({}/{})",
            report.char_accuracy() * 100.0,
            report.matching_chars,
            report.chars
        );
    }
}
