use crate::domain::model::AttributeMap;
use crate::utils::error::{FixError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Knobs for the per-line transform. The defaults reproduce the historical
/// behavior: marker `rect`, scale factor 500.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    pub scale: f64,
    pub marker: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            scale: 500.0,
            marker: "rect".to_string(),
        }
    }
}

fn attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"([A-Za-z_:][A-Za-z0-9_:.-]*)\s*=\s*"([^"]*)""#).unwrap())
}

/// Parse all `name="value"` pairs on a line into an ordered attribute map.
pub fn parse_attributes(line: &str) -> AttributeMap {
    let entries = attr_regex()
        .captures_iter(line)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect();
    AttributeMap::new(entries)
}

fn numeric_attribute(attrs: &AttributeMap, name: &str, number: usize) -> Result<f64> {
    let raw = attrs
        .get(name)
        .ok_or_else(|| FixError::MissingAttribute {
            line: number,
            attribute: name.to_string(),
        })?;

    raw.trim()
        .parse::<f64>()
        .map_err(|_| FixError::InvalidNumber {
            line: number,
            attribute: name.to_string(),
            value: raw.to_string(),
        })
}

fn anchor(line: &str, marker: &str, number: usize) -> Result<usize> {
    line.find(marker).ok_or_else(|| FixError::MissingMarker {
        line: number,
        marker: marker.to_string(),
    })
}

/// Rewrite a single line.
///
/// Returns `Ok(None)` when the line does not contain the marker substring and
/// must pass through byte-identical. On a marker line the `x` and `y`
/// attribute values (last occurrence wins) are scaled and re-emitted with
/// six-decimal precision, and every `'0'` after the first literal `fill` is
/// replaced with `'1'`. The rebuilt line is the text before the first `x=`,
/// then `x="sx" y ="sy" `, then `fill` plus the mutated remainder; the stray
/// space in `y ="` is part of the output contract.
pub fn rewrite_line(number: usize, line: &str, opts: &RewriteOptions) -> Result<Option<String>> {
    if !line.contains(opts.marker.as_str()) {
        return Ok(None);
    }

    let attrs = parse_attributes(line);
    let x = numeric_attribute(&attrs, "x", number)?;
    let y = numeric_attribute(&attrs, "y", number)?;

    let x_at = anchor(line, "x=", number)?;
    let fill_at = anchor(line, "fill", number)?;
    let suffix = &line[fill_at + "fill".len()..];

    let mut out = String::with_capacity(line.len() + 24);
    out.push_str(&line[..x_at]);
    out.push_str(&format!(
        "x=\"{:.6}\" y =\"{:.6}\" ",
        x * opts.scale,
        y * opts.scale
    ));
    out.push_str("fill");
    out.push_str(&suffix.replace('0', "1"));

    Ok(Some(out))
}
