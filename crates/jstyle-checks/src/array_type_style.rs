//! Check for the position of array brackets in declarations.
//!
//! # Rationale
//!
//! `int[] a` keeps the whole type in one place; `int a[]` is a C holdover
//! that splits it around the name. Mixing both in one code base hurts
//! readability.
//!
//! # Detected Patterns
//!
//! - Java style (default): brackets after a variable, parameter or method name
//! - C style: brackets after the type of such a declaration
//!
//! # Configuration
//!
//! - `java_style`: require Java-style brackets (default: true)

use jstyle_core::{Check, CheckConfig, CheckContext, CheckResult, Node, TokenType};

/// Check name.
pub const NAME: &str = "ArrayTypeStyle";

/// Message key.
pub const MSG_KEY: &str = "array.type.style";

/// Declarations whose name may carry trailing brackets.
const DECLARATIONS: &[TokenType] = &[
    TokenType::VariableDef,
    TokenType::ParameterDef,
    TokenType::MethodDef,
    TokenType::RecordComponentDef,
    TokenType::AnnotationFieldDef,
];

/// Enforces one array bracket style.
#[derive(Debug, Clone)]
pub struct ArrayTypeStyle {
    java_style: bool,
}

impl Default for ArrayTypeStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayTypeStyle {
    /// Creates the check requiring Java-style brackets.
    #[must_use]
    pub fn new() -> Self {
        Self { java_style: true }
    }

    /// Chooses between Java style (`true`) and C style (`false`).
    #[must_use]
    pub fn java_style(mut self, java_style: bool) -> Self {
        self.java_style = java_style;
        self
    }

    /// Reads `java_style` from a check configuration.
    #[must_use]
    pub fn from_config(config: &CheckConfig) -> Self {
        Self::new().java_style(config.get_bool("java_style", true))
    }
}

/// Where a bracket pair sits relative to its declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    AfterType,
    AfterName,
}

fn placement(node: Node<'_, TokenType>) -> Option<Placement> {
    let parent = node.parent()?;
    if DECLARATIONS.contains(&parent.kind()) {
        return Some(Placement::AfterName);
    }
    // Java-style dims nest inside the declaration's TYPE.
    let owner = node
        .ancestors()
        .find(|a| a.kind() != TokenType::ArrayDeclarator)?;
    let declaration = owner.parent()?;
    (owner.kind() == TokenType::Type && DECLARATIONS.contains(&declaration.kind()))
        .then_some(Placement::AfterType)
}

impl Check for ArrayTypeStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn default_tokens(&self) -> &'static [TokenType] {
        &[TokenType::ArrayDeclarator]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
        let illegal = if self.java_style {
            Placement::AfterName
        } else {
            Placement::AfterType
        };
        if placement(node) == Some(illegal) {
            ctx.log(node, MSG_KEY, "Array brackets at illegal position.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::verify;

    const SOURCE: &str = "class A {\n\
        int[] a;\n\
        int b[];\n\
        String[][] c, d[];\n\
        int m(int[] x, int y[]) { return new int[y.length].length; }\n\
        int n()[] { return null; }\n\
        }\n";

    #[test]
    fn java_style_flags_brackets_after_names() {
        let found = verify(ArrayTypeStyle::new(), SOURCE);
        let lines: Vec<_> = found.iter().map(|(line, _, _)| *line).collect();
        assert_eq!(lines, [3, 4, 5, 6]);
        assert!(found.iter().all(|(_, _, key)| key == MSG_KEY));
        assert_eq!(found[0].1, 6);
    }

    #[test]
    fn c_style_flags_brackets_after_types() {
        let found = verify(ArrayTypeStyle::new().java_style(false), SOURCE);
        let lines: Vec<_> = found.iter().map(|(line, _, _)| *line).collect();
        // `String[][]` counts both pairs; `new int[..]` is not a declaration.
        assert_eq!(lines, [2, 4, 4, 5]);
    }

    #[test]
    fn casts_and_generics_are_ignored() {
        let found = verify(
            ArrayTypeStyle::new().java_style(false),
            "class A { Object f(Object o) { return (int[]) o; } java.util.List<String[]> l; }",
        );
        assert!(found.is_empty());
    }
}
