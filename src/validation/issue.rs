use serde::{Serialize, Serializer};
use std::fmt;

/// 字段路径中的一段
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// 字段路径，显示为 `singleChoiceOptions.2.name`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Key(name.into())])
    }

    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(name.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    /// 在路径前面加上前缀
    pub fn prefixed(self, prefix: &FieldPath) -> Self {
        let mut segments = prefix.0.clone();
        segments.extend(self.0);
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                PathSegment::Key(name) => f.write_str(name)?,
                PathSegment::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 单条校验问题
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Issue {
    pub path: FieldPath,
    pub message: String,
}

impl Issue {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display_and_prefix() {
        let path = FieldPath::field("singleChoiceOptions").index(2).key("name");
        assert_eq!(path.to_string(), "singleChoiceOptions.2.name");

        let prefixed = path.prefixed(&FieldPath::field("questions").index(0));
        assert_eq!(prefixed.to_string(), "questions.0.singleChoiceOptions.2.name");
    }

    #[test]
    fn test_issue_serializes_path_as_string() {
        let issue = Issue::new(FieldPath::field("validAnswers"), "must have at least one valid answer");
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["path"], "validAnswers");
        assert_eq!(value["message"], "must have at least one valid answer");
    }
}
