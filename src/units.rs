use crate::error::Error;

/// A single unit of a recurrence rule.
///
/// For interval rules, this is a period, e.g., `2` in "every 2 weeks". For
/// calendar rules, this is a position within a calendar cycle, e.g., `-1` for
/// "the last day of the month" or `fri` for "Fridays".
///
/// No range checking is done on units at this level. Labels are resolved
/// (and checked) only when a rule is built.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum UnitValue {
    /// An integer. Negative integers count backwards from the end for
    /// measures that support it.
    Int(i64),
    /// A label, e.g., a weekday or month name.
    Label(String),
}

impl UnitValue {
    /// Returns this unit as an integer, if it is one or if it is a label
    /// that parses as one.
    pub(crate) fn to_integer(&self) -> Option<i64> {
        match *self {
            UnitValue::Int(n) => Some(n),
            UnitValue::Label(ref label) => label.trim().parse().ok(),
        }
    }
}

impl From<i64> for UnitValue {
    fn from(n: i64) -> UnitValue {
        UnitValue::Int(n)
    }
}

impl From<i32> for UnitValue {
    fn from(n: i32) -> UnitValue {
        UnitValue::Int(i64::from(n))
    }
}

impl From<&str> for UnitValue {
    fn from(label: &str) -> UnitValue {
        UnitValue::Label(label.to_string())
    }
}

impl From<String> for UnitValue {
    fn from(label: String) -> UnitValue {
        UnitValue::Label(label)
    }
}

impl std::fmt::Display for UnitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            UnitValue::Int(n) => write!(f, "{n}"),
            UnitValue::Label(ref label) => f.write_str(label),
        }
    }
}

/// The units given when building a recurrence rule, before normalization.
///
/// Use [`normalize`] to turn this into a flat list of units.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UnitsInput {
    /// A single number or label.
    Scalar(UnitValue),
    /// An ordered list of numbers or labels.
    Sequence(Vec<UnitValue>),
    /// A set of labels, each with a membership flag.
    ///
    /// Only the presence of a label matters. The flag is not consulted, so
    /// a label with a `false` flag is still selected.
    LabelSet(Vec<(UnitValue, bool)>),
}

impl UnitsInput {
    /// Build a label set from the given pairs, in iteration order.
    pub fn label_set<K: Into<UnitValue>>(
        pairs: impl IntoIterator<Item = (K, bool)>,
    ) -> UnitsInput {
        UnitsInput::LabelSet(
            pairs.into_iter().map(|(key, on)| (key.into(), on)).collect(),
        )
    }

    /// Convert an arbitrary JSON value into units.
    ///
    /// `null` is treated as absent units. Numbers (which must be integral)
    /// and strings become scalars, arrays of numbers or strings become
    /// sequences and objects become label sets whose keys are in the
    /// object's order. Integral object keys, e.g. `"15"`, become integer
    /// units. The values of an object must be booleans, but are otherwise
    /// ignored. Anything else (booleans, fractional numbers, nested arrays
    /// or objects, non-boolean set members) is an error.
    pub fn from_json(value: &serde_json::Value) -> Result<UnitsInput, Error> {
        use serde_json::Value;

        match *value {
            Value::Null => Err(Error::MissingUnits),
            Value::Array(ref items) => {
                let units = items
                    .iter()
                    .map(json_scalar)
                    .collect::<Result<Vec<UnitValue>, Error>>()?;
                Ok(UnitsInput::Sequence(units))
            }
            Value::Object(ref map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (key, flag) in map.iter() {
                    let Value::Bool(flag) = *flag else {
                        let found =
                            format!("{} for `{key}`", describe(flag));
                        return Err(Error::InvalidUnitsShape { found });
                    };
                    let unit = match key.parse::<i64>() {
                        Ok(n) => UnitValue::Int(n),
                        Err(_) => UnitValue::Label(key.clone()),
                    };
                    pairs.push((unit, flag));
                }
                Ok(UnitsInput::LabelSet(pairs))
            }
            _ => json_scalar(value).map(UnitsInput::Scalar),
        }
    }
}

impl From<UnitValue> for UnitsInput {
    fn from(unit: UnitValue) -> UnitsInput {
        UnitsInput::Scalar(unit)
    }
}

impl From<i64> for UnitsInput {
    fn from(n: i64) -> UnitsInput {
        UnitsInput::Scalar(UnitValue::from(n))
    }
}

impl From<i32> for UnitsInput {
    fn from(n: i32) -> UnitsInput {
        UnitsInput::Scalar(UnitValue::from(n))
    }
}

impl From<&str> for UnitsInput {
    fn from(label: &str) -> UnitsInput {
        UnitsInput::Scalar(UnitValue::from(label))
    }
}

impl From<Vec<UnitValue>> for UnitsInput {
    fn from(units: Vec<UnitValue>) -> UnitsInput {
        UnitsInput::Sequence(units)
    }
}

impl<T: Into<UnitValue>> FromIterator<T> for UnitsInput {
    fn from_iter<I: IntoIterator<Item = T>>(it: I) -> UnitsInput {
        UnitsInput::Sequence(it.into_iter().map(Into::into).collect())
    }
}

/// Normalize the given units into a flat list.
///
/// Absent units return a [`Error::MissingUnits`] error. Otherwise, this
/// never fails. In particular, an empty sequence or an empty label set
/// normalizes to an empty list. Whether that's acceptable is decided when a
/// rule is built.
pub fn normalize(units: Option<UnitsInput>) -> Result<Vec<UnitValue>, Error> {
    let Some(units) = units else { return Err(Error::MissingUnits) };
    let units = match units {
        UnitsInput::Scalar(unit) => vec![unit],
        UnitsInput::Sequence(units) => units,
        UnitsInput::LabelSet(pairs) => {
            pairs.into_iter().map(|(unit, _)| unit).collect()
        }
    };
    Ok(units)
}

fn json_scalar(value: &serde_json::Value) -> Result<UnitValue, Error> {
    use serde_json::Value;

    match *value {
        Value::String(ref s) => Ok(UnitValue::Label(s.clone())),
        Value::Number(ref n) => match n.as_i64() {
            Some(n) => Ok(UnitValue::Int(n)),
            None => Err(Error::InvalidUnitsShape { found: describe(value) }),
        },
        _ => Err(Error::InvalidUnitsShape { found: describe(value) }),
    }
}

/// Returns a short description of a JSON value for error messages.
fn describe(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match *value {
        Value::String(ref s) => format!("string `{s}`"),
        Value::Number(ref n) => format!("number `{n}`"),
        Value::Bool(b) => format!("boolean `{b}`"),
        Value::Null => "`null`".to_string(),
        Value::Array(_) => "nested list".to_string(),
        Value::Object(_) => "nested set".to_string(),
    }
}
