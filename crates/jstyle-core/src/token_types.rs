//! The token and node taxonomy of the Java syntax tree.
//!
//! Terminal kinds are produced by the lexer; non-terminal kinds only appear
//! on composite tree nodes. Contextual keywords (`record`, `sealed`, `yield`,
//! `when`, module directives, ...) are lexed as [`TokenType::Ident`] and
//! relabelled by the parser where the grammar gives them keyword meaning.

use crate::kind::{node_kinds, NodeKind};

node_kinds! {
    /// Kind of a Java token or syntax-tree node.
    pub enum TokenType {
        Eof => "EOF",

        // Trivia
        Whitespace => "WHITESPACE",
        Newline => "NEWLINE",
        SingleLineComment => "SINGLE_LINE_COMMENT",
        BlockCommentBegin => "BLOCK_COMMENT_BEGIN",
        BlockCommentEnd => "BLOCK_COMMENT_END",
        CommentContent => "COMMENT_CONTENT",

        // Identifiers and literals
        Ident => "IDENT",
        NumInt => "NUM_INT",
        NumLong => "NUM_LONG",
        NumFloat => "NUM_FLOAT",
        NumDouble => "NUM_DOUBLE",
        CharLiteral => "CHAR_LITERAL",
        StringLiteral => "STRING_LITERAL",
        TextBlockLiteralBegin => "TEXT_BLOCK_LITERAL_BEGIN",
        TextBlockContent => "TEXT_BLOCK_CONTENT",
        TextBlockLiteralEnd => "TEXT_BLOCK_LITERAL_END",
        LiteralTrue => "LITERAL_TRUE",
        LiteralFalse => "LITERAL_FALSE",
        LiteralNull => "LITERAL_NULL",

        // Keywords
        Abstract => "ABSTRACT",
        Final => "FINAL",
        Strictfp => "STRICTFP",
        Enum => "ENUM",
        LiteralAssert => "LITERAL_ASSERT",
        LiteralBoolean => "LITERAL_BOOLEAN",
        LiteralBreak => "LITERAL_BREAK",
        LiteralByte => "LITERAL_BYTE",
        LiteralCase => "LITERAL_CASE",
        LiteralCatch => "LITERAL_CATCH",
        LiteralChar => "LITERAL_CHAR",
        LiteralClass => "LITERAL_CLASS",
        LiteralConst => "LITERAL_CONST",
        LiteralContinue => "LITERAL_CONTINUE",
        LiteralDefault => "LITERAL_DEFAULT",
        LiteralDo => "LITERAL_DO",
        LiteralDouble => "LITERAL_DOUBLE",
        LiteralElse => "LITERAL_ELSE",
        LiteralExtends => "LITERAL_EXTENDS",
        LiteralFinally => "LITERAL_FINALLY",
        LiteralFloat => "LITERAL_FLOAT",
        LiteralFor => "LITERAL_FOR",
        LiteralGoto => "LITERAL_GOTO",
        LiteralIf => "LITERAL_IF",
        LiteralImplements => "LITERAL_IMPLEMENTS",
        LiteralImport => "LITERAL_IMPORT",
        LiteralInstanceof => "LITERAL_INSTANCEOF",
        LiteralInt => "LITERAL_INT",
        LiteralInterface => "LITERAL_INTERFACE",
        LiteralLong => "LITERAL_LONG",
        LiteralNative => "LITERAL_NATIVE",
        LiteralNew => "LITERAL_NEW",
        LiteralPackage => "LITERAL_PACKAGE",
        LiteralPrivate => "LITERAL_PRIVATE",
        LiteralProtected => "LITERAL_PROTECTED",
        LiteralPublic => "LITERAL_PUBLIC",
        LiteralReturn => "LITERAL_RETURN",
        LiteralShort => "LITERAL_SHORT",
        LiteralStatic => "LITERAL_STATIC",
        LiteralSuper => "LITERAL_SUPER",
        LiteralSwitch => "LITERAL_SWITCH",
        LiteralSynchronized => "LITERAL_SYNCHRONIZED",
        LiteralThis => "LITERAL_THIS",
        LiteralThrow => "LITERAL_THROW",
        LiteralThrows => "LITERAL_THROWS",
        LiteralTransient => "LITERAL_TRANSIENT",
        LiteralTry => "LITERAL_TRY",
        LiteralVoid => "LITERAL_VOID",
        LiteralVolatile => "LITERAL_VOLATILE",
        LiteralWhile => "LITERAL_WHILE",

        // Contextual keywords (relabelled identifiers)
        LiteralRecord => "LITERAL_RECORD",
        LiteralSealed => "LITERAL_SEALED",
        LiteralNonSealed => "LITERAL_NON_SEALED",
        LiteralPermits => "LITERAL_PERMITS",
        LiteralYield => "LITERAL_YIELD",
        LiteralWhen => "LITERAL_WHEN",
        LiteralVar => "LITERAL_VAR",
        LiteralModule => "LITERAL_MODULE",
        LiteralOpen => "LITERAL_OPEN",
        LiteralRequires => "LITERAL_REQUIRES",
        LiteralTransitive => "LITERAL_TRANSITIVE",
        LiteralExports => "LITERAL_EXPORTS",
        LiteralOpens => "LITERAL_OPENS",
        LiteralTo => "LITERAL_TO",
        LiteralUses => "LITERAL_USES",
        LiteralProvides => "LITERAL_PROVIDES",
        LiteralWith => "LITERAL_WITH",

        // Separators
        LParen => "LPAREN",
        RParen => "RPAREN",
        LCurly => "LCURLY",
        RCurly => "RCURLY",
        LBrack => "LBRACK",
        RBrack => "RBRACK",
        Semi => "SEMI",
        Comma => "COMMA",
        Dot => "DOT",
        Ellipsis => "ELLIPSIS",
        At => "AT",
        DoubleColon => "DOUBLE_COLON",
        Lambda => "LAMBDA",

        // Operators
        Assign => "ASSIGN",
        Gt => "GT",
        Lt => "LT",
        Lnot => "LNOT",
        Bnot => "BNOT",
        Question => "QUESTION",
        Colon => "COLON",
        Equal => "EQUAL",
        Le => "LE",
        Ge => "GE",
        NotEqual => "NOT_EQUAL",
        Land => "LAND",
        Lor => "LOR",
        Inc => "INC",
        Dec => "DEC",
        Plus => "PLUS",
        Minus => "MINUS",
        Star => "STAR",
        Div => "DIV",
        Band => "BAND",
        Bor => "BOR",
        Bxor => "BXOR",
        Mod => "MOD",
        Sl => "SL",
        Sr => "SR",
        Bsr => "BSR",
        PlusAssign => "PLUS_ASSIGN",
        MinusAssign => "MINUS_ASSIGN",
        StarAssign => "STAR_ASSIGN",
        DivAssign => "DIV_ASSIGN",
        BandAssign => "BAND_ASSIGN",
        BorAssign => "BOR_ASSIGN",
        BxorAssign => "BXOR_ASSIGN",
        ModAssign => "MOD_ASSIGN",
        SlAssign => "SL_ASSIGN",
        SrAssign => "SR_ASSIGN",
        BsrAssign => "BSR_ASSIGN",

        // Compilation unit structure
        CompilationUnit => "COMPILATION_UNIT",
        PackageDef => "PACKAGE_DEF",
        Import => "IMPORT",
        StaticImport => "STATIC_IMPORT",
        ModuleDef => "MODULE_DEF",
        RequiresDirective => "REQUIRES_DIRECTIVE",
        ExportsDirective => "EXPORTS_DIRECTIVE",
        OpensDirective => "OPENS_DIRECTIVE",
        UsesDirective => "USES_DIRECTIVE",
        ProvidesDirective => "PROVIDES_DIRECTIVE",

        // Declarations
        ClassDef => "CLASS_DEF",
        InterfaceDef => "INTERFACE_DEF",
        EnumDef => "ENUM_DEF",
        RecordDef => "RECORD_DEF",
        AnnotationDef => "ANNOTATION_DEF",
        ObjBlock => "OBJBLOCK",
        Modifiers => "MODIFIERS",
        Annotations => "ANNOTATIONS",
        Annotation => "ANNOTATION",
        AnnotationMemberValuePair => "ANNOTATION_MEMBER_VALUE_PAIR",
        AnnotationArrayInit => "ANNOTATION_ARRAY_INIT",
        AnnotationFieldDef => "ANNOTATION_FIELD_DEF",
        TypeParameters => "TYPE_PARAMETERS",
        TypeParameter => "TYPE_PARAMETER",
        TypeUpperBounds => "TYPE_UPPER_BOUNDS",
        TypeLowerBounds => "TYPE_LOWER_BOUNDS",
        TypeArguments => "TYPE_ARGUMENTS",
        TypeArgument => "TYPE_ARGUMENT",
        WildcardType => "WILDCARD_TYPE",
        TypeExtensionAnd => "TYPE_EXTENSION_AND",
        GenericStart => "GENERIC_START",
        GenericEnd => "GENERIC_END",
        ExtendsClause => "EXTENDS_CLAUSE",
        ImplementsClause => "IMPLEMENTS_CLAUSE",
        PermitsClause => "PERMITS_CLAUSE",
        Type => "TYPE",
        ArrayDeclarator => "ARRAY_DECLARATOR",
        VariableDef => "VARIABLE_DEF",
        MethodDef => "METHOD_DEF",
        CtorDef => "CTOR_DEF",
        CompactCtorDef => "COMPACT_CTOR_DEF",
        RecordComponents => "RECORD_COMPONENTS",
        RecordComponentDef => "RECORD_COMPONENT_DEF",
        Parameters => "PARAMETERS",
        ParameterDef => "PARAMETER_DEF",
        EnumConstantDef => "ENUM_CONSTANT_DEF",
        InstanceInit => "INSTANCE_INIT",
        StaticInit => "STATIC_INIT",

        // Statements
        Slist => "SLIST",
        EmptyStat => "EMPTY_STAT",
        LabeledStat => "LABELED_STAT",
        DoWhile => "DO_WHILE",
        CaseGroup => "CASE_GROUP",
        SwitchRule => "SWITCH_RULE",
        ForInit => "FOR_INIT",
        ForCondition => "FOR_CONDITION",
        ForIterator => "FOR_ITERATOR",
        ForEachClause => "FOR_EACH_CLAUSE",
        ResourceSpecification => "RESOURCE_SPECIFICATION",
        Resources => "RESOURCES",
        Resource => "RESOURCE",
        SuperCtorCall => "SUPER_CTOR_CALL",
        CtorCall => "CTOR_CALL",

        // Expressions
        Expr => "EXPR",
        Elist => "ELIST",
        MethodCall => "METHOD_CALL",
        MethodRef => "METHOD_REF",
        Typecast => "TYPECAST",
        IndexOp => "INDEX_OP",
        PostInc => "POST_INC",
        PostDec => "POST_DEC",
        UnaryMinus => "UNARY_MINUS",
        UnaryPlus => "UNARY_PLUS",
        ArrayInit => "ARRAY_INIT",

        // Patterns
        PatternVariableDef => "PATTERN_VARIABLE_DEF",
        RecordPatternDef => "RECORD_PATTERN_DEF",
        RecordPatternComponents => "RECORD_PATTERN_COMPONENTS",
        PatternDef => "PATTERN_DEF",
        UnnamedPatternDef => "UNNAMED_PATTERN_DEF",
    }
}

impl NodeKind for TokenType {
    fn name(self) -> &'static str {
        TokenType::name(self)
    }

    fn index(self) -> usize {
        self as usize
    }

    fn is_comment(self) -> bool {
        matches!(
            self,
            Self::SingleLineComment
                | Self::BlockCommentBegin
                | Self::BlockCommentEnd
                | Self::CommentContent
        )
    }
}

impl TokenType {
    /// Whether this kind is whitespace or a comment, i.e. skipped by the grammar.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::Newline | Self::SingleLineComment | Self::BlockCommentBegin
        )
    }

    /// Whether this kind is a primitive type keyword (including `void`).
    #[must_use]
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::LiteralBoolean
                | Self::LiteralByte
                | Self::LiteralChar
                | Self::LiteralShort
                | Self::LiteralInt
                | Self::LiteralLong
                | Self::LiteralFloat
                | Self::LiteralDouble
                | Self::LiteralVoid
        )
    }

    /// Whether this kind is a literal value token.
    #[must_use]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumInt
                | Self::NumLong
                | Self::NumFloat
                | Self::NumDouble
                | Self::CharLiteral
                | Self::StringLiteral
                | Self::TextBlockLiteralBegin
                | Self::LiteralTrue
                | Self::LiteralFalse
                | Self::LiteralNull
        )
    }

    /// Whether this kind is a plain or compound assignment operator.
    #[must_use]
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::PlusAssign
                | Self::MinusAssign
                | Self::StarAssign
                | Self::DivAssign
                | Self::BandAssign
                | Self::BorAssign
                | Self::BxorAssign
                | Self::ModAssign
                | Self::SlAssign
                | Self::SrAssign
                | Self::BsrAssign
        )
    }

    /// Whether this kind is a type, method or field modifier keyword.
    #[must_use]
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::LiteralPublic
                | Self::LiteralProtected
                | Self::LiteralPrivate
                | Self::LiteralStatic
                | Self::Abstract
                | Self::Final
                | Self::Strictfp
                | Self::LiteralTransient
                | Self::LiteralVolatile
                | Self::LiteralSynchronized
                | Self::LiteralNative
                | Self::LiteralDefault
                | Self::LiteralSealed
                | Self::LiteralNonSealed
        )
    }

    /// Whether this kind is a type declaration node.
    #[must_use]
    pub fn is_type_def(self) -> bool {
        matches!(
            self,
            Self::ClassDef
                | Self::InterfaceDef
                | Self::EnumDef
                | Self::RecordDef
                | Self::AnnotationDef
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_for_every_kind() {
        for kind in TokenType::ALL {
            assert_eq!(TokenType::from_name(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn index_is_dense() {
        for (i, kind) in TokenType::ALL.iter().enumerate() {
            assert_eq!(NodeKind::index(*kind), i);
        }
        assert_eq!(TokenType::COUNT, TokenType::ALL.len());
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(TokenType::from_name("NOT_A_TOKEN"), None);
    }

    #[test]
    fn comment_kinds_are_flagged() {
        assert!(NodeKind::is_comment(TokenType::SingleLineComment));
        assert!(NodeKind::is_comment(TokenType::CommentContent));
        assert!(!NodeKind::is_comment(TokenType::Ident));
    }
}
