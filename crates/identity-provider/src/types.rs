//! Identity provider record types.

/// Attribute name for the user's display name.
pub const ATTR_NAME: &str = "name";

/// Attribute name for the user's email address.
pub const ATTR_EMAIL: &str = "email";

/// Attribute name for the user's phone number (E.164).
pub const ATTR_PHONE_NUMBER: &str = "phone_number";

/// A single user attribute as stored by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

impl UserAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A user record as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityRecord {
    /// Pool-scoped username. Registration keys every write on the request
    /// email, so this is informational only.
    pub username: String,

    /// Attributes present on the record
    pub attributes: Vec<UserAttribute>,
}

impl IdentityRecord {
    /// Look up an attribute value by name, for inspecting lookup results.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let record = IdentityRecord {
            username: "maria@example.com".into(),
            attributes: vec![
                UserAttribute::new(ATTR_NAME, "Maria"),
                UserAttribute::new(ATTR_EMAIL, "maria@example.com"),
            ],
        };

        assert_eq!(record.attribute(ATTR_NAME), Some("Maria"));
        assert_eq!(record.attribute(ATTR_EMAIL), Some("maria@example.com"));
        assert_eq!(record.attribute(ATTR_PHONE_NUMBER), None);
    }
}
