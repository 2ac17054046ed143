/// Classification of a syntax node, as far as log insertion is concerned.
///
/// Scope-like kinds carry their declared name when the source has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'t> {
    /// A bare name token: variable, property, or shorthand property name.
    Identifier,
    /// Dotted or bracketed access chain (`a.b.c`, `a[b]`).
    MemberExpression,
    /// Single binding of a declaration (`x = 1`).
    VariableDeclarator,
    /// Whole `var`/`let`/`const` statement.
    VariableStatement,
    /// Object property or class field.
    Property(Option<&'t str>),
    /// Method of an object literal or a class.
    FunctionProperty(Option<&'t str>),
    /// Function declaration or function expression.
    Function(Option<&'t str>),
    /// Class declaration or class expression.
    Class(Option<&'t str>),
    Other,
}

impl<'t> NodeKind<'t> {
    #[inline]
    pub fn is_identifier(self) -> bool {
        matches!(self, Self::Identifier)
    }

    /// Returns the name this node contributes to a scope breadcrumb.
    pub fn scope_name(self) -> Option<&'t str> {
        match self {
            Self::Property(name)
            | Self::FunctionProperty(name)
            | Self::Function(name)
            | Self::Class(name) => name,
            Self::Identifier
            | Self::MemberExpression
            | Self::VariableDeclarator
            | Self::VariableStatement
            | Self::Other => None,
        }
    }
}
