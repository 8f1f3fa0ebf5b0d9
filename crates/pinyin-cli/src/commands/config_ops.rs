use std::fs;

use pinyin_core::settings::{default_toml, parse_settings_toml};

pub fn settings_export() {
    print!("{}", default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: decoder.lm_weight={}, decoder.interpolation={}, decoder.beam_width={}, fallback.syllables={}",
        s.decoder.lm_weight,
        s.decoder.interpolation,
        s.decoder.beam_width,
        s.fallback.len()
    );
}
