use super::error::EncoderError;
use nalgebra::Point3;
use std::fmt::Write as _;

/// Built-in per-record line format: species name then three coordinates.
pub const DEFAULT_LINE_FORMAT: &str = "%s %g %g %g";

const DEFAULT_PRECISION: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberStyle {
    /// `%g`: shortest round-trip display form.
    General,
    /// `%f` / `%.Nf`: fixed decimal notation.
    Fixed { precision: usize },
    /// `%e` / `%.Ne`: scientific notation.
    Scientific { precision: usize },
}

impl NumberStyle {
    fn render(&self, out: &mut String, value: f64) {
        // Writing into a String cannot fail.
        let _ = match *self {
            NumberStyle::General => write!(out, "{value}"),
            NumberStyle::Fixed { precision } => write!(out, "{value:.precision$}"),
            NumberStyle::Scientific { precision } => write!(out, "{value:.precision$e}"),
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Name,
    Coord(NumberStyle),
}

/// A compiled per-record line template.
///
/// Parsed once at encoder initialization from a printf-style format line
/// and immutable afterwards. Exactly one `%s` (the species name) followed
/// by exactly three numeric conversions (`%g`, `%f`, `%e`, optional
/// precision for the latter two) is accepted; the compiled template always
/// ends in a newline, one record per line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTemplate {
    segments: Vec<Segment>,
}

impl LineTemplate {
    /// The built-in `"%s %g %g %g"` template.
    pub fn default_line() -> Self {
        Self::compile(DEFAULT_LINE_FORMAT).expect("built-in line format must compile")
    }

    /// Compiles a printf-style format line.
    ///
    /// # Errors
    ///
    /// Returns `EncoderError::InvalidFormat` for unsupported conversions or
    /// a slot arrangement other than one `%s` followed by three numeric
    /// conversions.
    pub fn compile(format: &str) -> Result<Self, EncoderError> {
        let invalid = |reason: String| EncoderError::InvalidFormat {
            format: format.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }

            let mut precision = None;
            if chars.peek() == Some(&'.') {
                chars.next();
                let mut digits = String::new();
                while chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                    digits.push(chars.next().expect("peeked digit"));
                }
                if digits.is_empty() {
                    return Err(invalid("missing precision digits after '%.'".to_string()));
                }
                precision = Some(
                    digits
                        .parse::<usize>()
                        .map_err(|_| invalid(format!("precision '{digits}' is out of range")))?,
                );
            }

            let conversion = chars
                .next()
                .ok_or_else(|| invalid("dangling '%' at end of format".to_string()))?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            match conversion {
                's' if precision.is_none() => segments.push(Segment::Name),
                'g' if precision.is_none() => segments.push(Segment::Coord(NumberStyle::General)),
                'f' => segments.push(Segment::Coord(NumberStyle::Fixed {
                    precision: precision.unwrap_or(DEFAULT_PRECISION),
                })),
                'e' => segments.push(Segment::Coord(NumberStyle::Scientific {
                    precision: precision.unwrap_or(DEFAULT_PRECISION),
                })),
                's' | 'g' => {
                    return Err(invalid(format!(
                        "precision is not supported for '%{conversion}' conversions"
                    )));
                }
                other => return Err(invalid(format!("unsupported conversion '%{other}'"))),
            }
        }

        literal.push('\n');
        segments.push(Segment::Literal(literal));

        Self::validate_slots(&segments).map_err(invalid)?;
        Ok(Self { segments })
    }

    fn validate_slots(segments: &[Segment]) -> Result<(), String> {
        let slots: Vec<&Segment> = segments
            .iter()
            .filter(|s| !matches!(s, Segment::Literal(_)))
            .collect();

        let names = slots.iter().filter(|s| matches!(s, Segment::Name)).count();
        if names != 1 {
            return Err(format!("expected exactly one %s conversion, found {names}"));
        }
        let coords = slots.len() - 1;
        if coords != 3 {
            return Err(format!(
                "expected exactly three numeric conversions, found {coords}"
            ));
        }
        if !matches!(slots[0], Segment::Name) {
            return Err("the %s conversion must come before the coordinates".to_string());
        }
        Ok(())
    }

    /// Renders one record line: species name and the coordinate triple.
    pub fn render(&self, out: &mut String, name: &str, position: &Point3<f64>) {
        let mut coords = [position.x, position.y, position.z].into_iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Name => out.push_str(name),
                Segment::Coord(style) => {
                    let value = coords
                        .next()
                        .expect("compiled template has exactly three coordinate slots");
                    style.render(out, value);
                }
            }
        }
    }
}

impl Default for LineTemplate {
    fn default() -> Self {
        Self::default_line()
    }
}
