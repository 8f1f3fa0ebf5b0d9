use std::io;
use std::path::Path;

use pinyin_core::decoder::explain::format_text;
use pinyin_core::Decoder;

use super::{load_or_die, ModelSource};
use crate::driver;

/// Decode stdin to stdout, one line at a time.
pub fn decode_stdin(source: &ModelSource, config: Option<&Path>, jobs: usize) {
    let (model, settings) = load_or_die(source, config);
    let decoder = Decoder::new(&model, &settings);
    let stdin = io::stdin();
    let stdout = io::stdout();
    die!(
        driver::decode_stream(stdin.lock(), stdout.lock(), &decoder, jobs),
        "Error: {}"
    );
}

pub fn decode_cmd(source: &ModelSource, config: Option<&Path>, syllables: &[String]) {
    let (model, settings) = load_or_die(source, config);
    let decoder = Decoder::new(&model, &settings);
    match decoder.decode_path(syllables) {
        Some(path) => println!("{}\t{:.4}", path.text(), path.score),
        None => println!("(no path)"),
    }
}

pub fn explain_cmd(
    source: &ModelSource,
    config: Option<&Path>,
    syllables: &[String],
    top: usize,
    json: bool,
) {
    let (model, settings) = load_or_die(source, config);
    let result = Decoder::new(&model, &settings).explain(syllables);
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&result), "Error: {}")
        );
    } else {
        print!("{}", format_text(&result, top));
    }
}
