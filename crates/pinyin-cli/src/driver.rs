//! Line-oriented decoding: one syllable sequence per input line, one decoded
//! line per output line, in input order.

use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use rayon::prelude::*;
use tracing::{debug, warn};

use pinyin_core::Decoder;

/// Lines handed to the thread pool at a time.
const CHUNK_LINES: usize = 1024;

/// Decode one whitespace-separated line.
pub fn decode_line(decoder: &Decoder<'_>, line: &str) -> String {
    let syllables: Vec<&str> = line.split_whitespace().collect();
    decoder.decode(&syllables)
}

/// Next line without its terminator, or `None` at EOF. Invalid UTF-8 is
/// replaced with U+FFFD so one bad line cannot end the stream.
fn read_line_lossy<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    let line = match String::from_utf8_lossy(&buf[..]) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => {
            warn!("input line is not valid UTF-8");
            s
        }
    };
    Ok(Some(line))
}

/// Decode `reader` to `writer` until EOF. Returns the number of lines.
///
/// With `jobs > 1` each chunk of lines is decoded on a dedicated rayon pool;
/// output order still equals input order.
pub fn decode_stream<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    decoder: &Decoder<'_>,
    jobs: usize,
) -> io::Result<usize> {
    let mut buf = Vec::new();
    let mut count = 0;
    if jobs <= 1 {
        while let Some(line) = read_line_lossy(&mut reader, &mut buf)? {
            writeln!(writer, "{}", decode_line(decoder, &line))?;
            count += 1;
        }
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(io::Error::other)?;
        let mut chunk = Vec::with_capacity(CHUNK_LINES);
        loop {
            chunk.clear();
            while chunk.len() < CHUNK_LINES {
                match read_line_lossy(&mut reader, &mut buf)? {
                    Some(line) => chunk.push(line),
                    None => break,
                }
            }
            if chunk.is_empty() {
                break;
            }
            let decoded: Vec<String> = pool.install(|| {
                chunk
                    .par_iter()
                    .map(|line| decode_line(decoder, line))
                    .collect()
            });
            for out in &decoded {
                writeln!(writer, "{out}")?;
            }
            count += chunk.len();
            if chunk.len() < CHUNK_LINES {
                break;
            }
        }
    }
    writer.flush()?;
    debug!(lines = count, jobs, "stream decoded");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pinyin_core::{LanguageModel, Settings};

    use super::*;

    fn model() -> LanguageModel {
        LanguageModel::from_json_strs(
            r#"{
                "ni": {"words": ["你", "尼"], "counts": [100, 1]},
                "hao": {"words": ["好", "号"], "counts": [100, 1]},
                "wo": {"words": ["我"], "counts": [50]}
            }"#,
            r#"{"ni hao": {"words": ["你 好", "尼 好"], "counts": [5, 50]}}"#,
        )
        .unwrap()
    }

    fn run(input: &str, jobs: usize) -> (String, usize) {
        let model = model();
        let settings = Settings::default();
        let decoder = Decoder::new(&model, &settings);
        let mut out = Vec::new();
        let n = decode_stream(Cursor::new(input), &mut out, &decoder, jobs).unwrap();
        (String::from_utf8(out).unwrap(), n)
    }

    #[test]
    fn test_one_output_line_per_input_line() {
        let (out, n) = run("ni hao\n\nwo\n  xyz123  \n", 1);
        assert_eq!(n, 4);
        assert_eq!(out, "你好\n\n我\n?\n");
    }

    #[test]
    fn test_missing_trailing_newline() {
        let (out, n) = run("wo\nni hao", 1);
        assert_eq!(n, 2);
        assert_eq!(out, "我\n你好\n");
    }

    #[test]
    fn test_crlf_and_tabs() {
        let (out, _) = run("ni\thao\r\n", 1);
        assert_eq!(out, "你好\n");
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_stream() {
        let model = model();
        let settings = Settings::default();
        let decoder = Decoder::new(&model, &settings);
        for jobs in [1, 3] {
            let mut out = Vec::new();
            let input: &[u8] = b"ni\n\xff\xfe\nhao\n";
            let n = decode_stream(input, &mut out, &decoder, jobs).unwrap();
            assert_eq!(n, 3);
            assert_eq!(String::from_utf8(out).unwrap(), "你\n?\n好\n");
        }
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let input: String = (0..3000)
            .map(|i| match i % 4 {
                0 => "ni hao\n",
                1 => "wo\n",
                2 => "\n",
                _ => "hao wo ni\n",
            })
            .collect();
        let (seq, n_seq) = run(&input, 1);
        let (par, n_par) = run(&input, 4);
        assert_eq!(n_seq, 3000);
        assert_eq!(n_par, 3000);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_empty_input() {
        let (out, n) = run("", 4);
        assert_eq!(n, 0);
        assert!(out.is_empty());
    }
}
