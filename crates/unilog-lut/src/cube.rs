//! `.cube` 3D LUT format.
//!
//! The plain-text format read by Resolve, Premiere, Final Cut and most
//! other grading tools.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "S-Log3_to_LogC4"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.000000 0.000000 0.000000
//! ...
//! 1.000000 1.000000 1.000000
//! ```
//!
//! Body lines are in R-fastest order, matching [`Lut3D::data`].
//! `LUT_3D_INPUT_RANGE lo hi` is accepted as a shorthand for a uniform
//! domain. Unknown keywords are skipped; 1D files are rejected.
//!
//! # Example
//!
//! ```rust,no_run
//! use unilog_lut::cube;
//!
//! let lut = cube::read("grade.cube")?;
//! let rgb = lut.apply([0.5, 0.3, 0.2]);
//! cube::write("grade_copy.cube", &lut)?;
//! # Ok::<(), unilog_lut::LutError>(())
//! ```

use crate::{Lut3D, LutError, LutResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{trace, warn};

/// File extension used for directory listings.
pub const EXTENSION: &str = "cube";

/// Reads a 3D LUT from a `.cube` file.
pub fn read<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    let path = path.as_ref();
    trace!(path = %path.display(), "cube::read");
    let file = File::open(path)?;
    parse(BufReader::new(file))
}

/// Parses a 3D LUT from a reader.
pub fn parse<R: BufRead>(reader: R) -> LutResult<Lut3D> {
    let mut size: Option<usize> = None;
    let mut title: Option<String> = None;
    let mut domain_min = [0.0_f32; 3];
    let mut domain_max = [1.0_f32; 3];
    let mut data: Vec<[f32; 3]> = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = n + 1;
        let trimmed = line.trim();

        // Titles may contain '#', so they are taken before comment stripping.
        if let Some(rest) = trimmed.strip_prefix("TITLE") {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                title = Some(parse_title(rest, line_no)?);
                continue;
            }
        }

        let content = match trimmed.find('#') {
            Some(i) => trimmed[..i].trim_end(),
            None => trimmed,
        };
        let mut tokens = content.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };

        if !is_keyword(first) {
            data.push(parse_rgb(content, line_no)?);
            continue;
        }

        let args: Vec<&str> = tokens.collect();
        match first {
            "LUT_3D_SIZE" => {
                if size.is_some() {
                    return Err(malformed(line_no, "duplicate LUT_3D_SIZE"));
                }
                let n = parse_size(&args, line_no)?;
                if let Some(count) = n.checked_mul(n).and_then(|s| s.checked_mul(n)) {
                    data.reserve(count.min(1 << 24));
                }
                size = Some(n);
            }
            "LUT_1D_SIZE" => {
                return Err(malformed(line_no, "1D LUTs are not supported"));
            }
            "DOMAIN_MIN" => domain_min = parse_triple(&args, line_no, first)?,
            "DOMAIN_MAX" => domain_max = parse_triple(&args, line_no, first)?,
            "LUT_3D_INPUT_RANGE" => {
                let [lo, hi] = parse_floats::<2>(&args, line_no, first)?;
                domain_min = [lo; 3];
                domain_max = [hi; 3];
            }
            other => {
                warn!(line = line_no, keyword = other, "skipping unknown .cube keyword");
            }
        }
    }

    let size = size.ok_or_else(|| LutError::Malformed("missing LUT_3D_SIZE".into()))?;
    let expected = size
        .checked_mul(size)
        .and_then(|s| s.checked_mul(size))
        .ok_or_else(|| LutError::Malformed(format!("LUT_3D_SIZE {size} is too large")))?;
    if data.len() != expected {
        return Err(LutError::SizeMismatch {
            expected,
            found: data.len(),
        });
    }

    let mut lut = Lut3D::from_data(data, size)?.with_domain(domain_min, domain_max);
    lut.title = title;
    lut.validate()?;
    Ok(lut)
}

/// Writes a 3D LUT to a `.cube` file.
///
/// The file is written to a temporary sibling and renamed into place, so
/// a failure never leaves a partial file at `path`.
pub fn write<P: AsRef<Path>>(path: P, lut: &Lut3D) -> LutResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), size = lut.size, "cube::write");
    lut.validate()?;
    unilog_core::write_atomic(path, |w| write_to(w, lut))
}

/// Serializes a 3D LUT to any writer.
pub fn write_to<W: Write>(mut writer: W, lut: &Lut3D) -> LutResult<()> {
    writeln!(writer, "# Generated by unilog")?;
    if let Some(title) = &lut.title {
        writeln!(writer, "TITLE \"{}\"", title.replace('"', "'"))?;
    }
    writeln!(writer, "LUT_3D_SIZE {}", lut.size)?;

    if !lut.has_unit_domain() {
        let (min, max) = (lut.domain_min, lut.domain_max);
        writeln!(
            writer,
            "DOMAIN_MIN {} {} {}",
            format_value(min[0]),
            format_value(min[1]),
            format_value(min[2])
        )?;
        writeln!(
            writer,
            "DOMAIN_MAX {} {} {}",
            format_value(max[0]),
            format_value(max[1]),
            format_value(max[2])
        )?;
    }
    writeln!(writer)?;

    for rgb in &lut.data {
        writeln!(
            writer,
            "{} {} {}",
            format_value(rgb[0]),
            format_value(rgb[1]),
            format_value(rgb[2])
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Formats a value with at least six decimals that parses back to the
/// same `f32`.
pub fn format_value(v: f32) -> String {
    let shortest = v.to_string();
    let decimals = shortest.split_once('.').map_or(0, |(_, frac)| frac.len());
    if decimals >= 6 {
        shortest
    } else {
        format!("{v:.6}")
    }
}

fn is_keyword(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_uppercase())
        && token.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && token.parse::<f32>().is_err()
}

fn malformed(line_no: usize, what: impl std::fmt::Display) -> LutError {
    LutError::Malformed(format!("{what} at line {line_no}"))
}

fn parse_title(rest: &str, line_no: usize) -> LutResult<String> {
    let rest = rest.trim();
    match rest.strip_prefix('"') {
        Some(inner) => inner
            .strip_suffix('"')
            .map(str::to_string)
            .ok_or_else(|| malformed(line_no, "unterminated TITLE")),
        None => Ok(rest.to_string()),
    }
}

fn parse_size(args: &[&str], line_no: usize) -> LutResult<usize> {
    let [arg] = args else {
        return Err(malformed(line_no, "LUT_3D_SIZE needs exactly one value"));
    };
    match arg.parse::<usize>() {
        Ok(n) if n >= 2 => Ok(n),
        Ok(n) => Err(malformed(line_no, format!("LUT_3D_SIZE {n} is below 2"))),
        Err(_) => Err(malformed(line_no, format!("invalid LUT_3D_SIZE '{arg}'"))),
    }
}

fn parse_float(token: &str, line_no: usize) -> LutResult<f32> {
    let v: f32 = token
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid number '{token}'")))?;
    if !v.is_finite() {
        return Err(LutError::NonFinite(format!("'{token}' at line {line_no}")));
    }
    Ok(v)
}

fn parse_floats<const N: usize>(args: &[&str], line_no: usize, keyword: &str) -> LutResult<[f32; N]> {
    if args.len() != N {
        return Err(malformed(
            line_no,
            format!("{keyword} needs {N} values, found {}", args.len()),
        ));
    }
    let mut out = [0.0_f32; N];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = parse_float(token, line_no)?;
    }
    Ok(out)
}

fn parse_triple(args: &[&str], line_no: usize, keyword: &str) -> LutResult<[f32; 3]> {
    parse_floats::<3>(args, line_no, keyword)
}

fn parse_rgb(content: &str, line_no: usize) -> LutResult<[f32; 3]> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(malformed(
            line_no,
            format!("expected 3 values, found {}", tokens.len()),
        ));
    }
    parse_floats::<3>(&tokens, line_no, "table entry")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use unilog_core::{Classify, ErrorKind};

    const IDENTITY_2: &str = "\
# Test LUT
TITLE \"Test # Grade\"
LUT_3D_SIZE 2
DOMAIN_MIN 0.0 0.0 0.0
DOMAIN_MAX 1.0 1.0 1.0

0.0 0.0 0.0
1.0 0.0 0.0
0.0 1.0 0.0
1.0 1.0 0.0
0.0 0.0 1.0
1.0 0.0 1.0
0.0 1.0 1.0
1.0 1.0 1.0
";

    fn parse_str(s: &str) -> LutResult<Lut3D> {
        parse(Cursor::new(s))
    }

    fn kind_of(s: &str) -> ErrorKind {
        parse_str(s).unwrap_err().kind()
    }

    #[test]
    fn parses_identity() {
        let lut = parse_str(IDENTITY_2).unwrap();
        assert_eq!(lut.size, 2);
        assert_eq!(lut.title.as_deref(), Some("Test # Grade"));
        assert_eq!(lut.node(1, 0, 0), [1.0, 0.0, 0.0]);
        assert_eq!(lut.node(0, 0, 1), [0.0, 0.0, 1.0]);
        assert_eq!(lut.apply([0.5, 0.5, 0.5]), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn inline_comments_and_unknown_keywords() {
        let text = IDENTITY_2.replace("LUT_3D_SIZE 2", "LUT_3D_SIZE 2 # grid\nLUT_IN_VIDEO_RANGE");
        assert_eq!(parse_str(&text).unwrap().size, 2);
    }

    #[test]
    fn input_range_sets_domain() {
        let text = IDENTITY_2
            .replace("DOMAIN_MIN 0.0 0.0 0.0\n", "")
            .replace("DOMAIN_MAX 1.0 1.0 1.0\n", "LUT_3D_INPUT_RANGE -0.5 2.0\n");
        let lut = parse_str(&text).unwrap();
        assert_eq!(lut.domain_min, [-0.5; 3]);
        assert_eq!(lut.domain_max, [2.0; 3]);
    }

    #[test]
    fn missing_size_is_malformed() {
        let text = IDENTITY_2.replace("LUT_3D_SIZE 2\n", "");
        assert_eq!(kind_of(&text), ErrorKind::MalformedFile);
    }

    #[test]
    fn bad_size_is_malformed() {
        for bad in ["LUT_3D_SIZE", "LUT_3D_SIZE two", "LUT_3D_SIZE 1", "LUT_3D_SIZE 2 2"] {
            let text = IDENTITY_2.replace("LUT_3D_SIZE 2", bad);
            assert_eq!(kind_of(&text), ErrorKind::MalformedFile, "{bad}");
        }
    }

    #[test]
    fn one_dimensional_is_rejected() {
        let text = "LUT_1D_SIZE 2\n0 0 0\n1 1 1\n";
        assert_eq!(kind_of(text), ErrorKind::MalformedFile);
    }

    #[test]
    fn short_body_is_size_mismatch() {
        let text = IDENTITY_2.replace("\n1.0 1.0 1.0\n", "\n");
        let err = parse_str(&text).unwrap_err();
        assert!(matches!(err, LutError::SizeMismatch { expected: 8, found: 7 }));
    }

    #[test]
    fn wrong_arity_reports_line() {
        let text = IDENTITY_2.replace("1.0 1.0 0.0", "1.0 1.0");
        let err = parse_str(&text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFile);
        assert!(err.to_string().contains("line 10"), "{err}");
    }

    #[test]
    fn non_finite_reports_line() {
        for bad in ["nan 0 0", "0 inf 0", "0 0 1e39"] {
            let text = IDENTITY_2.replace("0.0 1.0 1.0", bad);
            let err = parse_str(&text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NonFiniteValue, "{bad}");
            assert!(err.to_string().contains("line 13"), "{err}");
        }
    }

    #[test]
    fn format_keeps_precision() {
        assert_eq!(format_value(0.5), "0.500000");
        assert_eq!(format_value(1.0), "1.000000");
        for v in [0.1_f32, 1.0 / 3.0, 1e-7, 123.456_79, -0.000_123_4] {
            assert_eq!(format_value(v).parse::<f32>().unwrap(), v);
        }
    }

    #[test]
    fn serialized_form_parses_back_exactly() {
        let lut = Lut3D::from_fn(5, [-0.25, 0.0, 0.0], [1.25, 1.0, 2.0], |c| {
            [c[0].sin(), c[1] / 3.0, c[2] * c[0] + 1e-5]
        })
        .unwrap()
        .with_title("odd values");

        let mut buf = Vec::new();
        write_to(&mut buf, &lut).unwrap();
        let back = parse(Cursor::new(buf)).unwrap();
        assert_eq!(back, lut);
    }

    #[test]
    fn unit_domain_is_omitted() {
        let mut buf = Vec::new();
        write_to(&mut buf, &Lut3D::identity(2).unwrap()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("DOMAIN_MIN"));
        assert!(text.contains("LUT_3D_SIZE 2\n"));
    }

    #[test]
    fn write_and_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.cube");
        write(&path, &Lut3D::identity(4).unwrap()).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back, Lut3D::identity(4).unwrap());
    }

    #[test]
    fn missing_file_classifies() {
        let err = read("/no/such/file.cube").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }
}
