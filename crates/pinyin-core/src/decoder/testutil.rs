use crate::model::{BigramTable, LanguageModel, UnigramTable};
use crate::settings::Settings;

pub(crate) fn unigram(entries: Vec<(&str, Vec<(&str, u64)>)>) -> UnigramTable {
    UnigramTable::from_entries(entries.into_iter().map(|(syl, words)| {
        (
            syl.to_string(),
            words
                .into_iter()
                .map(|(ch, n)| (ch.to_string(), n))
                .collect(),
        )
    }))
    .unwrap()
}

pub(crate) fn bigram(entries: Vec<((&str, &str), Vec<((&str, &str), u64)>)>) -> BigramTable {
    BigramTable::from_entries(entries.into_iter().map(|((s1, s2), words)| {
        (
            (s1.to_string(), s2.to_string()),
            words
                .into_iter()
                .map(|((c1, c2), n)| ((c1.to_string(), c2.to_string()), n))
                .collect(),
        )
    }))
    .unwrap()
}

/// `ni`/`hao` unigrams with no bigram evidence.
pub(crate) fn unigram_only_model() -> LanguageModel {
    LanguageModel::new(
        unigram(vec![
            ("ni", vec![("你", 100), ("尼", 1)]),
            ("hao", vec![("好", 100), ("号", 1)]),
        ]),
        BigramTable::default(),
    )
}

/// Same unigrams, plus bigram evidence favouring 尼→好.
pub(crate) fn bigram_model() -> LanguageModel {
    LanguageModel::new(
        unigram_only_model().unigram,
        bigram(vec![(("ni", "hao"), vec![(("你", "好"), 5), (("尼", "好"), 50)])]),
    )
}

/// A small sentence-level model: "wo men shi zhong guo ren".
pub(crate) fn sentence_model() -> LanguageModel {
    LanguageModel::new(
        unigram(vec![
            ("wo", vec![("我", 500), ("握", 20), ("窝", 10)]),
            ("men", vec![("们", 300), ("门", 200), ("闷", 5)]),
            ("shi", vec![("是", 800), ("时", 400), ("市", 300), ("事", 250)]),
            ("zhong", vec![("中", 600), ("种", 200), ("重", 150)]),
            ("guo", vec![("国", 500), ("过", 450), ("果", 60)]),
            ("ren", vec![("人", 700), ("任", 90), ("认", 80)]),
            ("kong", vec![]),
        ]),
        bigram(vec![
            (("wo", "men"), vec![(("我", "们"), 250)]),
            (("men", "shi"), vec![(("们", "是"), 80), (("门", "市"), 40)]),
            (("shi", "zhong"), vec![(("是", "中"), 30), (("市", "中"), 10)]),
            (("zhong", "guo"), vec![(("中", "国"), 400), (("种", "过"), 5)]),
            (("guo", "ren"), vec![(("国", "人"), 200), (("过", "任"), 3)]),
        ]),
    )
}

pub(crate) fn settings_with(f: impl FnOnce(&mut Settings)) -> Settings {
    let mut s = Settings::default();
    f(&mut s);
    s
}
