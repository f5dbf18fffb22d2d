//! The parsed-reference value types (§3 `ParsedRef`).

use crate::model::{NoexceptInfo, OperatorKind, ReferenceKind};

/// One `::`-separated piece of a reference string, e.g. `b<T>` in
/// `a::b<T>::c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRefComponent {
    pub name: String,
    pub has_template_arguments: bool,
    pub template_arguments: Vec<TemplateArgument>,
    pub operator: OperatorKind,
    /// Present when this component is a conversion-function-id
    /// (`operator T`); mutually exclusive with `operator` being
    /// non-`None`.
    pub conversion_type: Option<String>,
}

impl ParsedRefComponent {
    pub fn plain(name: impl Into<String>) -> Self {
        ParsedRefComponent {
            name: name.into(),
            has_template_arguments: false,
            template_arguments: Vec::new(),
            operator: OperatorKind::None,
            conversion_type: None,
        }
    }

    pub fn is_operator(&self) -> bool {
        self.operator != OperatorKind::None
    }

    pub fn is_conversion(&self) -> bool {
        self.conversion_type.is_some()
    }

    pub fn is_specialization(&self) -> bool {
        self.has_template_arguments && !self.template_arguments.is_empty()
    }
}

/// A single `<...>` template argument. The parser keeps these as
/// opaque token text (§1 Non-goals: no expression evaluation), except
/// for the nesting structure needed to find the matching `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateArgument {
    pub text: String,
}

impl TemplateArgument {
    pub fn new(text: impl Into<String>) -> Self {
        TemplateArgument { text: text.into() }
    }
}

/// A fully parsed reference string (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRef {
    /// Whether the string began with a leading `::`.
    pub is_fully_qualified: bool,
    pub components: Vec<ParsedRefComponent>,
    pub has_function_parameters: bool,
    pub function_parameters: Vec<String>,
    pub is_variadic: bool,
    pub is_explicit_object_member_function: bool,
    pub kind: ReferenceKind,
    pub is_const: bool,
    pub is_volatile: bool,
    pub exception_spec: NoexceptInfo,
}

impl ParsedRef {
    /// The final component, which carries the entity the reference
    /// ultimately names; every earlier component is a qualifying scope.
    pub fn last_component(&self) -> Option<&ParsedRefComponent> {
        self.components.last()
    }
}
