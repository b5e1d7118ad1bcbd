//! Collect-all decoding from JSON values into typed records.
//!
//! Decoders never return early on the first bad field. Every problem is
//! pushed into the [`DecodeContext`] together with the path of the field, and
//! a decoder yields `None` when anything below it failed. Record decoders read
//! all of their fields before combining the results, so sibling fields are
//! always checked.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use smartlearn_utils::SecretString;

use crate::config::ValidationConfig;
use crate::error::{Constraint, ValidationError, Violation};

/// Post-decode check applied to a scalar field.
pub type Check<T> = fn(T) -> Result<(), Constraint>;

/// Scores, confidences and relevances: `[0.0, 1.0]`.
///
/// # Errors
/// Returns a range constraint when `v` lies outside the unit interval.
pub fn unit_interval(v: f64) -> Result<(), Constraint> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(Constraint::range(0.0, 1.0))
    }
}

/// Ratings: integers in `[1, 5]`.
///
/// # Errors
/// Returns a range constraint when `v` is not between 1 and 5.
pub fn rating(v: i64) -> Result<(), Constraint> {
    if (1..=5).contains(&v) {
        Ok(())
    } else {
        Err(Constraint::range(1.0, 5.0))
    }
}

/// Fractional durations (seconds): `>= 0`.
///
/// # Errors
/// Returns a range constraint when `v` is negative.
pub fn non_negative(v: f64) -> Result<(), Constraint> {
    if v >= 0.0 {
        Ok(())
    } else {
        Err(Constraint::at_least(0.0))
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Accumulates violations and tracks the current field path.
#[derive(Debug)]
pub struct DecodeContext {
    config: ValidationConfig,
    path: Vec<Segment>,
    violations: Vec<Violation>,
}

impl DecodeContext {
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            path: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Current path rendered with dots for fields, `[i]` for indices and
    /// `["key"]` for map keys, the key written as a JSON string literal.
    /// The payload root renders as `$`.
    #[must_use]
    pub fn path(&self) -> String {
        if self.path.is_empty() {
            return "$".to_owned();
        }
        let mut out = String::new();
        for segment in &self.path {
            out = match segment {
                Segment::Field(name) if out.is_empty() => name.clone(),
                Segment::Field(name) => format!("{out}.{name}"),
                Segment::Index(i) => format!("{out}[{i}]"),
                Segment::Key(key) => format!("{out}[{}]", Value::String(key.clone())),
            };
        }
        out
    }

    /// Records a violation at the current path.
    pub fn report(&mut self, value: Option<&Value>, constraint: Constraint) {
        let violation = Violation::new(self.path(), value.cloned(), constraint);
        self.violations.push(violation);
    }

    fn scoped<T>(&mut self, segment: Segment, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(segment);
        let out = f(self);
        self.path.pop();
        out
    }

    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Turns the decoded value and collected violations into a result.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when any violation was recorded or no
    /// value was produced.
    pub fn finish<T>(self, record: &'static str, out: Option<T>) -> Result<T, ValidationError> {
        match out {
            Some(value) if self.violations.is_empty() => Ok(value),
            _ => Err(ValidationError::new(record, self.violations)),
        }
    }
}

/// Types that can be decoded from a JSON value with collect-all reporting.
pub trait Decode: Sized {
    /// Decodes `value`, reporting every violation into `cx`.
    /// Returns `None` when at least one violation was found.
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self>;
}

fn mismatch<T>(value: &Value, cx: &mut DecodeContext, expected: &'static str) -> Option<T> {
    cx.report(Some(value), Constraint::expected(expected));
    None
}

impl Decode for String {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        match value.as_str() {
            Some(s) => Some(s.to_owned()),
            None => mismatch(value, cx, "string"),
        }
    }
}

impl Decode for SecretString {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        String::decode(value, cx).map(SecretString::from)
    }
}

impl Decode for bool {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        match value.as_bool() {
            Some(b) => Some(b),
            None => mismatch(value, cx, "boolean"),
        }
    }
}

impl Decode for f64 {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        match value.as_f64() {
            Some(n) => Some(n),
            None => mismatch(value, cx, "number"),
        }
    }
}

/// Integer carried by `value`. A float with no fractional part (`5.0`)
/// counts as an integer; `3.5` does not.
fn integral(value: &Value) -> Option<i128> {
    if let Some(n) = value.as_i64() {
        return Some(i128::from(n));
    }
    if let Some(n) = value.as_u64() {
        return Some(i128::from(n));
    }
    let f = value.as_f64()?;
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    // saturates beyond i128, which every caller reports as out of range
    #[allow(clippy::cast_possible_truncation)]
    Some(f as i128)
}

#[allow(clippy::cast_precision_loss)] // bounds are only reported
fn integer_range(min: i128, max: i128) -> Constraint {
    Constraint::range(min as f64, max as f64)
}

impl Decode for i64 {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        let Some(n) = integral(value) else {
            return mismatch(value, cx, "integer");
        };
        if let Ok(n) = Self::try_from(n) {
            Some(n)
        } else {
            cx.report(
                Some(value),
                integer_range(Self::MIN.into(), Self::MAX.into()),
            );
            None
        }
    }
}

/// Whole-number durations (minutes, hours).
impl Decode for u32 {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        let Some(n) = integral(value) else {
            return mismatch(value, cx, "integer");
        };
        if n < 0 {
            cx.report(Some(value), Constraint::at_least(0.0));
            return None;
        }
        if let Ok(n) = Self::try_from(n) {
            Some(n)
        } else {
            cx.report(Some(value), Constraint::range(0.0, f64::from(Self::MAX)));
            None
        }
    }
}

/// Whole-number durations in seconds.
impl Decode for u64 {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        let Some(n) = integral(value) else {
            return mismatch(value, cx, "integer");
        };
        if n < 0 {
            cx.report(Some(value), Constraint::at_least(0.0));
            return None;
        }
        if let Ok(n) = Self::try_from(n) {
            Some(n)
        } else {
            cx.report(Some(value), integer_range(0, Self::MAX.into()));
            None
        }
    }
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// ISO 8601 timestamps as Python services write them, normalized to UTC.
///
/// Accepted: `T`, `t` or a space between date and time; seconds and
/// fractions optional; offsets as `Z`, `+hh:mm`, `+hhmm` or `+hh`. A value
/// without an offset is taken as UTC, and a bare date as midnight UTC.
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let mut normalized = s.to_owned();
    if matches!(s.as_bytes().get(10), Some(b' ' | b't')) {
        normalized.replace_range(10..11, "T");
    }
    if let Some(stripped) = normalized.strip_suffix(['Z', 'z']) {
        normalized = format!("{stripped}+00:00");
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Decode for DateTime<Utc> {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        match value.as_str().and_then(parse_datetime) {
            Some(dt) => Some(dt),
            None => mismatch(value, cx, "ISO-8601 datetime"),
        }
    }
}

/// Arbitrary JSON, kept as-is.
impl Decode for Value {
    fn decode(value: &Value, _cx: &mut DecodeContext) -> Option<Self> {
        Some(value.clone())
    }
}

/// Arbitrary JSON object with string keys.
impl Decode for Map<String, Value> {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        match value.as_object() {
            Some(obj) => Some(obj.clone()),
            None => mismatch(value, cx, "object"),
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        let Some(items) = value.as_array() else {
            return mismatch(value, cx, "array");
        };
        let mut out = Vec::with_capacity(items.len());
        let mut valid = true;
        for (i, item) in items.iter().enumerate() {
            match cx.scoped(Segment::Index(i), |cx| T::decode(item, cx)) {
                Some(decoded) => out.push(decoded),
                None => valid = false,
            }
        }
        valid.then_some(out)
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_map(value, cx, T::decode)
    }
}

fn decode_map<T>(
    value: &Value,
    cx: &mut DecodeContext,
    decode_item: impl Fn(&Value, &mut DecodeContext) -> Option<T>,
) -> Option<BTreeMap<String, T>> {
    let Some(entries) = value.as_object() else {
        return mismatch(value, cx, "object");
    };
    let mut out = BTreeMap::new();
    let mut valid = true;
    for (key, item) in entries {
        match cx.scoped(Segment::Key(key.clone()), |cx| decode_item(item, cx)) {
            Some(decoded) => {
                out.insert(key.clone(), decoded);
            }
            None => valid = false,
        }
    }
    valid.then_some(out)
}

fn decode_checked<T: Decode + Copy>(
    value: &Value,
    cx: &mut DecodeContext,
    check: Check<T>,
) -> Option<T> {
    let decoded = T::decode(value, cx)?;
    match check(decoded) {
        Ok(()) => Some(decoded),
        Err(constraint) => {
            cx.report(Some(value), constraint);
            None
        }
    }
}

/// Field-by-field reader over a JSON object.
///
/// Each accessor returns `None` when the field is invalid (after reporting
/// why). Optional accessors return `Some(None)` for an absent field.
pub struct ObjectReader<'a> {
    object: &'a Map<String, Value>,
    cx: &'a mut DecodeContext,
    seen: Vec<&'static str>,
}

impl ObjectReader<'_> {
    fn field<T>(
        &mut self,
        name: &'static str,
        read: impl FnOnce(Option<&Value>, &mut DecodeContext) -> Option<T>,
    ) -> Option<T> {
        self.seen.push(name);
        let value = self.object.get(name);
        self.cx
            .scoped(Segment::Field(name.to_owned()), |cx| read(value, cx))
    }

    fn require<T>(
        value: Option<&Value>,
        cx: &mut DecodeContext,
        decode: impl FnOnce(&Value, &mut DecodeContext) -> Option<T>,
    ) -> Option<T> {
        if let Some(value) = value {
            decode(value, cx)
        } else {
            cx.report(None, Constraint::Required);
            None
        }
    }

    /// Required field.
    pub fn required<T: Decode>(&mut self, name: &'static str) -> Option<T> {
        self.field(name, |value, cx| Self::require(value, cx, T::decode))
    }

    /// Required field with a post-decode check.
    pub fn required_with<T: Decode + Copy>(
        &mut self,
        name: &'static str,
        check: Check<T>,
    ) -> Option<T> {
        self.field(name, |value, cx| {
            Self::require(value, cx, |v, cx| decode_checked(v, cx, check))
        })
    }

    /// Optional field: absent or `null` means `None`.
    pub fn optional<T: Decode>(&mut self, name: &'static str) -> Option<Option<T>> {
        self.field(name, |value, cx| match value {
            None | Some(Value::Null) => Some(None),
            Some(v) => T::decode(v, cx).map(Some),
        })
    }

    /// Optional field holding arbitrary JSON: an explicit `null` is kept.
    pub fn optional_json(&mut self, name: &'static str) -> Option<Option<Value>> {
        self.field(name, |value, _cx| Some(value.cloned()))
    }

    /// Field with a default: absent means `T::default()`, `null` is rejected.
    pub fn or_default<T: Decode + Default>(&mut self, name: &'static str) -> Option<T> {
        self.field(name, |value, cx| match value {
            None => Some(T::default()),
            Some(v) => T::decode(v, cx),
        })
    }

    /// Field with an explicit default value.
    pub fn or_else<T: Decode>(&mut self, name: &'static str, default: impl FnOnce() -> T) -> Option<T> {
        self.field(name, |value, cx| match value {
            None => Some(default()),
            Some(v) => T::decode(v, cx),
        })
    }

    /// Field with an explicit default value and a post-decode check.
    pub fn or_else_with<T: Decode + Copy>(
        &mut self,
        name: &'static str,
        default: T,
        check: Check<T>,
    ) -> Option<T> {
        self.field(name, |value, cx| match value {
            None => Some(default),
            Some(v) => decode_checked(v, cx, check),
        })
    }

    /// Map field defaulting to empty, with every value checked.
    pub fn map_or_default_with<T: Decode + Copy>(
        &mut self,
        name: &'static str,
        check: Check<T>,
    ) -> Option<BTreeMap<String, T>> {
        self.field(name, |value, cx| match value {
            None => Some(BTreeMap::new()),
            Some(v) => decode_map(v, cx, |item, cx| decode_checked(item, cx, check)),
        })
    }

    fn finish(self) {
        if !self.cx.config.deny_unknown_fields {
            return;
        }
        for (key, value) in self.object {
            if !self.seen.iter().any(|seen| *seen == key.as_str()) {
                self.cx.scoped(Segment::Field(key.clone()), |cx| {
                    cx.report(Some(value), Constraint::UnknownField);
                });
            }
        }
    }
}

/// Decodes a JSON object with `read`, which pulls each declared field.
///
/// Undeclared keys are reported afterwards when the config denies them.
pub fn decode_object<T>(
    value: &Value,
    cx: &mut DecodeContext,
    read: impl FnOnce(&mut ObjectReader<'_>) -> Option<T>,
) -> Option<T> {
    let Some(object) = value.as_object() else {
        return mismatch(value, cx, "object");
    };
    let mut reader = ObjectReader {
        object,
        cx,
        seen: Vec::new(),
    };
    let out = read(&mut reader);
    reader.finish();
    out
}
