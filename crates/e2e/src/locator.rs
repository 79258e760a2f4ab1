//! Element locators
//!
//! A `Locator` is plain data: a chain of selector parts that the driver
//! resolves left to right (`page.getByTestId(..).getByText(..)`). It never
//! touches the browser on its own; pass it to a `Page` method.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "by", rename_all = "camelCase")]
pub enum LocatorPart {
    Css {
        selector: String,
    },
    TestId {
        id: String,
    },
    Text {
        text: String,
    },
    Role {
        role: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Locator {
    parts: Vec<LocatorPart>,
}

impl Locator {
    fn from_part(part: LocatorPart) -> Self {
        Self { parts: vec![part] }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_part(LocatorPart::Css {
            selector: selector.into(),
        })
    }

    /// `[data-testid="<id>"]`
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::from_part(LocatorPart::TestId { id: id.into() })
    }

    /// Substring, case-insensitive text match
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_part(LocatorPart::Text { text: text.into() })
    }

    pub fn role(role: impl Into<String>, name: Option<&str>) -> Self {
        Self::from_part(LocatorPart::Role {
            role: role.into(),
            name: name.map(str::to_string),
        })
    }

    fn push(mut self, part: LocatorPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn locator(self, selector: impl Into<String>) -> Self {
        self.push(LocatorPart::Css {
            selector: selector.into(),
        })
    }

    pub fn get_by_test_id(self, id: impl Into<String>) -> Self {
        self.push(LocatorPart::TestId { id: id.into() })
    }

    pub fn get_by_text(self, text: impl Into<String>) -> Self {
        self.push(LocatorPart::Text { text: text.into() })
    }

    pub fn parts(&self) -> &[LocatorPart] {
        &self.parts
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            match part {
                LocatorPart::Css { selector } => write!(f, "{}", selector)?,
                LocatorPart::TestId { id } => write!(f, "testId={}", id)?,
                LocatorPart::Text { text } => write!(f, "text={:?}", text)?,
                LocatorPart::Role { role, name: Some(name) } => {
                    write!(f, "role={}[name={:?}]", role, name)?
                }
                LocatorPart::Role { role, name: None } => write!(f, "role={}", role)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chained_locator_serializes_in_order() {
        let radio = Locator::test_id("limit-radio").get_by_text("Day");
        assert_eq!(
            serde_json::to_value(&radio).unwrap(),
            json!([
                {"by": "testId", "id": "limit-radio"},
                {"by": "text", "text": "Day"}
            ])
        );
    }

    #[test]
    fn test_role_without_name_omits_field() {
        let value = serde_json::to_value(Locator::role("textbox", None)).unwrap();
        assert_eq!(value, json!([{"by": "role", "role": "textbox"}]));
    }

    #[test]
    fn test_display_is_readable() {
        let editor = Locator::role("textbox", Some("rdw-editor"));
        assert_eq!(editor.to_string(), r#"role=textbox[name="rdw-editor"]"#);
        assert_eq!(
            Locator::css("form").get_by_test_id("submit").to_string(),
            "form >> testId=submit"
        );
    }
}
