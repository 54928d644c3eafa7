use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context(String);

impl Context {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        if label.is_empty() {
            return Context("$".to_string());
        }
        Context(label)
    }

    pub fn operation(method: &str, path: &str) -> Self {
        Context::new(format!("{} {path}", method.to_uppercase()))
    }

    pub fn response(method: &str, path: &str, code: &str) -> Self {
        Context::new(format!("{} {path} {code}", method.to_uppercase()))
    }

    pub fn media_type(method: &str, path: &str, code: &str, media_type: &str) -> Self {
        Context::new(format!(
            "{} {path} {code} [{media_type}]",
            method.to_uppercase()
        ))
    }

    pub fn property(&self, name: &str) -> Self {
        Context(format!("{}.{name}", self.0))
    }

    pub fn items(&self) -> Self {
        Context(format!("{}[]", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Context> for String {
    fn from(context: Context) -> Self {
        context.0
    }
}
