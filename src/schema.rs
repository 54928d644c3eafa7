use crate::finding::quote;
use crate::pointer::{resolve_tracked, Visited};
use crate::{Context, ContractError, ContractResult, DocumentPair, Finding, FindingKind};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

pub fn compare_schemas(
    base_schema: &Value,
    current_schema: &Value,
    documents: DocumentPair<'_>,
    context: &Context,
) -> ContractResult<Vec<Finding>> {
    let comparator = SchemaComparator { documents };
    let mut findings = Vec::new();
    comparator.compare(
        Side::new(base_schema, Visited::new()),
        Side::new(current_schema, Visited::new()),
        context,
        &mut findings,
    )?;
    Ok(findings)
}

struct Side<'v> {
    schema: &'v Value,
    visited: Visited,
}

impl<'v> Side<'v> {
    fn new(schema: &'v Value, visited: Visited) -> Self {
        Self { schema, visited }
    }
}

struct SchemaComparator<'a> {
    documents: DocumentPair<'a>,
}

impl SchemaComparator<'_> {
    fn compare(
        &self,
        base: Side<'_>,
        current: Side<'_>,
        context: &Context,
        findings: &mut Vec<Finding>,
    ) -> ContractResult<()> {
        let (base_node, base_visited) =
            resolve_tracked(base.schema, self.documents.base, base.visited);
        let (current_node, current_visited) =
            resolve_tracked(current.schema, self.documents.current, current.visited);
        let (Value::Object(base_map), Value::Object(current_map)) = (base_node, current_node)
        else {
            tracing::debug!(context = %context, "schema nodes are not comparable");
            return Ok(());
        };

        let base_type = declared_type(base_map);
        let current_type = declared_type(current_map);
        if let (Some(from), Some(to)) = (base_type, current_type) {
            if from != to {
                findings.push(Finding::new(
                    FindingKind::SchemaTypeChanged,
                    context,
                    format!(
                        "schema type changed from {} to {}",
                        render_type(from),
                        render_type(to)
                    ),
                ));
                return Ok(());
            }
        }

        if let (Some(Value::Array(base_enum)), Some(Value::Array(current_enum))) =
            (base_map.get("enum"), current_map.get("enum"))
        {
            let base_members = enum_members(base_enum, context)?;
            let current_members = enum_members(current_enum, context)?;
            let removed = base_members
                .difference(&current_members)
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            if !removed.is_empty() {
                findings.push(Finding::new(
                    FindingKind::EnumValuesRemoved,
                    context,
                    format!("enum values removed: [{}]", removed.join(", ")),
                ));
            }
        }

        // Object handling keys off the base side only. A required field leaving
        // the required set is reported for request and response bodies alike.
        if is_type(base_type, "object") || base_map.contains_key("properties") {
            let base_required = required_names(base_map);
            let current_required = required_names(current_map);
            let removed_required = base_required
                .difference(&current_required)
                .copied()
                .collect::<Vec<_>>();
            if !removed_required.is_empty() {
                findings.push(Finding::new(
                    FindingKind::RequiredFieldsRemoved,
                    context,
                    format!(
                        "required fields removed: {}",
                        crate::render_names(&removed_required)
                    ),
                ));
            }

            let empty = Map::new();
            let base_props = properties(base_map).unwrap_or(&empty);
            let current_props = properties(current_map).unwrap_or(&empty);
            let mut removed_props = base_props
                .keys()
                .filter(|name| !current_props.contains_key(*name))
                .map(String::as_str)
                .collect::<Vec<_>>();
            removed_props.sort_unstable();
            if !removed_props.is_empty() {
                findings.push(Finding::new(
                    FindingKind::PropertiesRemoved,
                    context,
                    format!(
                        "response properties removed: {}",
                        crate::render_names(&removed_props)
                    ),
                ));
            }

            let shared = base_props
                .keys()
                .filter(|name| current_props.contains_key(*name))
                .collect::<BTreeSet<_>>();
            for name in shared {
                self.compare(
                    Side::new(&base_props[name], base_visited.clone()),
                    Side::new(&current_props[name], current_visited.clone()),
                    &context.property(name),
                    findings,
                )?;
            }
        }

        if is_type(base_type, "array") && is_type(current_type, "array") {
            let empty = Value::Object(Map::new());
            let base_items = items(base_map).unwrap_or(&empty);
            let current_items = items(current_map).unwrap_or(&empty);
            self.compare(
                Side::new(base_items, base_visited),
                Side::new(current_items, current_visited),
                &context.items(),
                findings,
            )?;
        }

        Ok(())
    }
}

fn declared_type(schema: &Map<String, Value>) -> Option<&Value> {
    match schema.get("type") {
        Some(value @ Value::String(text)) if !text.is_empty() => Some(value),
        Some(value @ Value::Array(list)) if !list.is_empty() => Some(value),
        _ => None,
    }
}

fn is_type(declared: Option<&Value>, expected: &str) -> bool {
    matches!(declared, Some(Value::String(text)) if text == expected)
}

fn render_type(declared: &Value) -> String {
    match declared {
        Value::String(text) => text.clone(),
        Value::Array(list) => {
            let items = list
                .iter()
                .map(|item| match item {
                    Value::String(text) => quote(text),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}

fn required_names(schema: &Map<String, Value>) -> BTreeSet<&str> {
    match schema.get("required") {
        Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
        _ => BTreeSet::new(),
    }
}

fn properties(schema: &Map<String, Value>) -> Option<&Map<String, Value>> {
    schema.get("properties").and_then(Value::as_object)
}

fn items(schema: &Map<String, Value>) -> Option<&Value> {
    schema.get("items").filter(|value| !value.is_null())
}

fn enum_members(values: &[Value], context: &Context) -> ContractResult<BTreeSet<EnumMember>> {
    values
        .iter()
        .map(|value| EnumMember::from_value(value, context))
        .collect()
}

#[derive(Debug, Clone)]
enum EnumMember {
    Null,
    Bool(bool),
    Number { key: NumberKey, text: String },
    Text(String),
}

// Integers, and floats with no fractional part, compare exactly as `Int`.
#[derive(Debug, Clone, Copy)]
enum NumberKey {
    Int(i128),
    Float(f64),
}

const EXACT_FLOAT_LIMIT: f64 = 1e38;

impl NumberKey {
    fn from_number(number: &serde_json::Number) -> Self {
        if let Some(value) = number.as_i64() {
            return NumberKey::Int(i128::from(value));
        }
        if let Some(value) = number.as_u64() {
            return NumberKey::Int(i128::from(value));
        }
        let value = number.as_f64().unwrap_or(f64::NAN);
        if value.is_finite() && value.fract() == 0.0 && value.abs() < EXACT_FLOAT_LIMIT {
            NumberKey::Int(value as i128)
        } else {
            NumberKey::Float(value)
        }
    }

    fn compare(self, other: NumberKey) -> Ordering {
        match (self, other) {
            (NumberKey::Int(left), NumberKey::Int(right)) => left.cmp(&right),
            (NumberKey::Float(left), NumberKey::Float(right)) => left.total_cmp(&right),
            (NumberKey::Int(left), NumberKey::Float(right)) => int_float_cmp(left, right),
            (NumberKey::Float(left), NumberKey::Int(right)) => {
                int_float_cmp(right, left).reverse()
            }
        }
    }
}

// `float` is never integral inside the exact range, so the two never compare equal.
fn int_float_cmp(int: i128, float: f64) -> Ordering {
    if float.is_finite() && float.abs() < EXACT_FLOAT_LIMIT {
        if int <= float.floor() as i128 {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    } else {
        (int as f64).total_cmp(&float)
    }
}

impl EnumMember {
    fn from_value(value: &Value, context: &Context) -> ContractResult<Self> {
        match value {
            Value::Null => Ok(EnumMember::Null),
            Value::Bool(flag) => Ok(EnumMember::Bool(*flag)),
            Value::Number(number) => Ok(EnumMember::Number {
                key: NumberKey::from_number(number),
                text: number.to_string(),
            }),
            Value::String(text) => Ok(EnumMember::Text(text.clone())),
            Value::Array(_) | Value::Object(_) => Err(ContractError::NonScalarEnumMember {
                context: context.to_string(),
                value: value.to_string(),
            }),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            EnumMember::Null => 0,
            EnumMember::Bool(_) => 1,
            EnumMember::Number { .. } => 2,
            EnumMember::Text(_) => 3,
        }
    }
}

impl Ord for EnumMember {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (EnumMember::Bool(left), EnumMember::Bool(right)) => left.cmp(right),
            (EnumMember::Number { key: left, .. }, EnumMember::Number { key: right, .. }) => {
                left.compare(*right)
            }
            (EnumMember::Text(left), EnumMember::Text(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for EnumMember {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EnumMember {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EnumMember {}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumMember::Null => f.write_str("null"),
            EnumMember::Bool(flag) => write!(f, "{flag}"),
            EnumMember::Number { text, .. } => f.write_str(text),
            EnumMember::Text(text) => f.write_str(&quote(text)),
        }
    }
}
