use crate::Context;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    PathRemoved,
    OperationRemoved,
    RequiredParameterAdded,
    RequestBodyRequired,
    SuccessResponseRemoved,
    MediaTypeRemoved,
    SchemaTypeChanged,
    EnumValuesRemoved,
    RequiredFieldsRemoved,
    PropertiesRemoved,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Document,
    Operation,
    Schema,
}

impl FindingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingKind::PathRemoved => "path_removed",
            FindingKind::OperationRemoved => "operation_removed",
            FindingKind::RequiredParameterAdded => "required_parameter_added",
            FindingKind::RequestBodyRequired => "request_body_required",
            FindingKind::SuccessResponseRemoved => "success_response_removed",
            FindingKind::MediaTypeRemoved => "media_type_removed",
            FindingKind::SchemaTypeChanged => "schema_type_changed",
            FindingKind::EnumValuesRemoved => "enum_values_removed",
            FindingKind::RequiredFieldsRemoved => "required_fields_removed",
            FindingKind::PropertiesRemoved => "properties_removed",
        }
    }

    pub fn scope(self) -> Scope {
        match self {
            FindingKind::PathRemoved | FindingKind::OperationRemoved => Scope::Document,
            FindingKind::RequiredParameterAdded
            | FindingKind::RequestBodyRequired
            | FindingKind::SuccessResponseRemoved
            | FindingKind::MediaTypeRemoved => Scope::Operation,
            FindingKind::SchemaTypeChanged
            | FindingKind::EnumValuesRemoved
            | FindingKind::RequiredFieldsRemoved
            | FindingKind::PropertiesRemoved => Scope::Schema,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    pub context: String,
    pub description: String,
}

impl Finding {
    pub fn new(kind: FindingKind, context: &Context, description: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.to_string(),
            description: description.into(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.kind.scope()
    }

    pub fn message(&self) -> String {
        match self.scope() {
            Scope::Schema => format!("{}: {}", self.context, self.description),
            Scope::Document | Scope::Operation => self.description.clone(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

pub fn render_names<S: AsRef<str>>(names: &[S]) -> String {
    let items = names
        .iter()
        .map(|name| quote(name.as_ref()))
        .collect::<Vec<_>>();
    format!("[{}]", items.join(", "))
}

pub(crate) fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            ch if ch == delimiter => {
                quoted.push('\\');
                quoted.push(ch);
            }
            ch if (ch as u32) < 0x20 || ch as u32 == 0x7f => {
                quoted.push_str(&format!("\\x{:02x}", ch as u32));
            }
            ch => quoted.push(ch),
        }
    }
    quoted.push(delimiter);
    quoted
}
