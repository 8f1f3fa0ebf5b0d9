use std::path::Path;

use pinyin_core::LanguageModel;

pub fn compile(unigram_file: &str, bigram_file: &str, output_file: &str) {
    let model = die!(
        LanguageModel::open(Path::new(unigram_file), Path::new(bigram_file)),
        "Error loading tables: {}"
    );
    die!(
        model.save(Path::new(output_file)),
        "Error writing {output_file}: {}"
    );
    eprintln!(
        "Compiled {} syllables, {} syllable pairs -> {output_file}",
        model.unigram.vocab_size(),
        model.bigram.pair_count()
    );
}

pub fn info(file: &str) {
    let model = die!(
        LanguageModel::open_snapshot(Path::new(file)),
        "Error opening model: {}"
    );
    println!("{}", summary(&model));
}

fn summary(model: &LanguageModel) -> String {
    format!(
        "syllables:       {}\n\
         unigram entries: {}\n\
         syllable pairs:  {}\n\
         bigram entries:  {}",
        model.unigram.vocab_size(),
        model.unigram.entry_count(),
        model.bigram.pair_count(),
        model.bigram.entry_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let model = LanguageModel::from_json_strs(
            r#"{"ni": {"words": ["你", "尼"], "counts": [3, 1]}, "kong": {"words": [], "counts": []}}"#,
            r#"{"ni hao": {"words": ["你 好"], "counts": [2]}}"#,
        )
        .unwrap();
        let text = summary(&model);
        assert!(text.contains("syllables:       2"));
        assert!(text.contains("unigram entries: 2"));
        assert!(text.contains("syllable pairs:  1"));
        assert!(text.contains("bigram entries:  1"));
    }
}
