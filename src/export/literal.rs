//! Rust constructor literal export.

use serde::{Deserialize, Serialize};

use crate::model::{EventType, HapticCurve, HapticEvent, HapticPattern};

/// Formatting options for [`Exporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

/// Prints patterns as Rust source that rebuilds them.
///
/// The output is an expression against this crate's public API, meant to be
/// pasted into a program. Ids are not part of the output, so two patterns with
/// equal values export to the same text.
///
/// # Examples
///
/// ```
/// use haptic_playground::{EventType, ExportOptions, Exporter, HapticEvent, HapticPattern};
///
/// let pattern = HapticPattern::new(
///     vec![HapticEvent::new(0.4, 0.2, 0.0, EventType::Transient)],
///     vec![],
/// );
/// let text = Exporter::with_options(ExportOptions { indent: 2 }).export(&pattern);
///
/// let expected = "\
/// HapticPattern::new(
///   vec![
///     HapticEvent::new(0.4, 0.2, 0.0, EventType::Transient),
///   ],
///   vec![],
/// )";
/// assert_eq!(text, expected);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Exports `pattern`. Pure and deterministic.
    pub fn export(&self, pattern: &HapticPattern) -> String {
        let mut out = Output::new(self.options.indent);

        out.open("HapticPattern::new(");
        if pattern.events().is_empty() {
            out.line("vec![],");
        } else {
            out.open("vec![");
            for event in pattern.events() {
                out.line(&format!("{},", event_literal(event)));
            }
            out.close("],");
        }
        if pattern.curves().is_empty() {
            out.line("vec![],");
        } else {
            out.open("vec![");
            for curve in pattern.curves() {
                write_curve(&mut out, curve);
            }
            out.close("],");
        }
        out.close(")");

        out.finish()
    }
}

/// Exports `pattern` with default options.
pub fn export(pattern: &HapticPattern) -> String {
    Exporter::new().export(pattern)
}

fn event_literal(event: &HapticEvent) -> String {
    let event_type = match event.event_type() {
        EventType::Transient => "EventType::Transient".to_string(),
        EventType::Continuous { duration } => {
            format!("EventType::Continuous {{ duration: {} }}", f64_literal(duration))
        }
    };
    format!(
        "HapticEvent::new({}, {}, {}, {})",
        f32_literal(event.intensity()),
        f32_literal(event.sharpness()),
        f64_literal(event.relative_time()),
        event_type
    )
}

fn write_curve(out: &mut Output, curve: &HapticCurve) {
    out.open("HapticCurve::from_array(");
    out.line(&format!("ParameterId::{},", curve.parameter().case_name()));
    out.open("[");
    for point in curve.control_points() {
        out.line(&format!(
            "ControlPoint::new({}, {}),",
            f64_literal(point.relative_time),
            f32_literal(point.value)
        ));
    }
    out.close("],");
    out.line(&format!("{},", f64_literal(curve.time())));
    out.close("),");
}

// `{:?}` is the shortest text that parses back to the same value and always
// carries a decimal point or an exponent, so it is a valid float literal.
fn f64_literal(value: f64) -> String {
    if value.is_nan() {
        "f64::NAN".to_string()
    } else if value == f64::INFINITY {
        "f64::INFINITY".to_string()
    } else if value == f64::NEG_INFINITY {
        "f64::NEG_INFINITY".to_string()
    } else {
        format!("{value:?}")
    }
}

fn f32_literal(value: f32) -> String {
    if value.is_nan() {
        "f32::NAN".to_string()
    } else if value == f32::INFINITY {
        "f32::INFINITY".to_string()
    } else if value == f32::NEG_INFINITY {
        "f32::NEG_INFINITY".to_string()
    } else {
        format!("{value:?}")
    }
}

/// Line buffer tracking the nesting depth.
struct Output {
    text: String,
    indent: usize,
    depth: usize,
}

impl Output {
    fn new(indent: usize) -> Self {
        Self {
            text: String::new(),
            indent,
            depth: 0,
        }
    }

    fn line(&mut self, content: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(&" ".repeat(self.indent * self.depth));
        self.text.push_str(content);
    }

    fn open(&mut self, content: &str) {
        self.line(content);
        self.depth += 1;
    }

    fn close(&mut self, content: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(content);
    }

    fn finish(self) -> String {
        self.text
    }
}
