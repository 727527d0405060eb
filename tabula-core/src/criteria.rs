use crate::{Parameters, Value};
use std::borrow::Cow;

/// Filter and ordering of a list query.
///
/// `condition` and `order_by` are raw SQL fragments written in terms of field
/// names, they get rewritten to column names but are otherwise copied as they
/// are. Never build them from untrusted input, bind values with
/// [`Criteria::bind`] instead.
///
/// ```
/// use tabula_core::Criteria;
/// let criteria = Criteria::new()
///     .condition("BlogId = @blog AND Title LIKE @title")
///     .bind("blog", 1)
///     .bind("title", "%rust%")
///     .order_by("PostNum DESC");
/// assert_eq!(criteria.params.len(), 2);
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Criteria {
    pub condition: String,
    pub order_by: String,
    pub params: Parameters,
}

impl Criteria {
    /// No filter and no ordering: every row.
    pub fn new() -> Self {
        Self::default()
    }
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }
    pub fn bind(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.params.insert(name, value.into());
        self
    }
    pub fn has_condition(&self) -> bool {
        !self.condition.trim().is_empty()
    }
    pub fn has_order(&self) -> bool {
        !self.order_by.trim().is_empty()
    }
}

impl From<&str> for Criteria {
    fn from(value: &str) -> Self {
        Criteria::new().condition(value)
    }
}

impl From<String> for Criteria {
    fn from(value: String) -> Self {
        Criteria::new().condition(value)
    }
}
