//! The shading-language token table.
//!
//! This is configuration layered on the generic engine: the closed kind set,
//! the reserved built-in type names, the identifier reclassification
//! callback, and the ordered rule table. Keywords carry a trailing word
//! boundary so that `int` is one identifier rather than the keyword `in`
//! followed by `t`, and hexadecimal literal rules precede the decimal and
//! octal ones so that `0x1F` is a single constant.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::lexing::{LexicalRule, RuleError, RuleTable};
use crate::token::TokenKind;

/// Token kinds of the shading language, including the three reserved
/// sentinels as dedicated variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GlslKind {
    Ignore,
    Reject,
    Eof,

    Attribute,
    Const,
    Break,
    Continue,
    Do,
    Else,
    For,
    If,
    Discard,
    Return,
    Switch,
    Case,
    Default,
    Subroutine,
    Centroid,
    In,
    Out,
    Inout,
    Uniform,
    Varying,
    Patch,
    Sample,
    Noperspective,
    Flat,
    Smooth,
    Layout,
    Struct,
    Void,
    While,

    LeftOp,
    RightOp,
    IncOp,
    DecOp,
    LeOp,
    GeOp,
    EqOp,
    NeOp,
    AndOp,
    OrOp,
    XorOp,
    MulAssign,
    DivAssign,
    AddAssign,
    ModAssign,
    LeftAssign,
    RightAssign,
    AndAssign,
    XorAssign,
    OrAssign,
    SubAssign,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Dot,
    Comma,
    Colon,
    Equal,
    Semicolon,
    Bang,
    Dash,
    Tilde,
    Plus,
    Star,
    Slash,
    Percent,
    LeftAngle,
    RightAngle,
    VerticalBar,
    Caret,
    Ampersand,
    Question,

    Invariant,
    HighPrecision,
    MediumPrecision,
    LowPrecision,
    Precision,

    BoolConstant,
    Identifier,
    FloatConstant,
    UintConstant,
    IntConstant,

    /// An identifier naming a known type, per the [`TypeRegistry`].
    TypeName,
}

impl TokenKind for GlslKind {
    const IGNORE: Self = GlslKind::Ignore;
    const REJECT: Self = GlslKind::Reject;
    const EOF: Self = GlslKind::Eof;
}

/// The built-in type names of the language.
pub const RESERVED_TYPES: &[&str] = &[
    "bool",
    "float",
    "double",
    "int",
    "uint",
    "bvec2",
    "bvec3",
    "bvec4",
    "ivec2",
    "ivec3",
    "ivec4",
    "uvec2",
    "uvec3",
    "uvec4",
    "vec2",
    "vec3",
    "vec4",
    "mat2",
    "mat3",
    "mat4",
    "dvec2",
    "dvec3",
    "dvec4",
    "dmat2",
    "dmat3",
    "dmat4",
    "mat2x2",
    "mat2x3",
    "mat2x4",
    "mat3x2",
    "mat3x3",
    "mat3x4",
    "mat4x2",
    "mat4x3",
    "mat4x4",
    "dmat2x2",
    "dmat2x3",
    "dmat2x4",
    "dmat3x2",
    "dmat3x3",
    "dmat3x4",
    "dmat4x2",
    "dmat4x3",
    "dmat4x4",
    "sampler1D",
    "sampler2D",
    "sampler3D",
    "samplerCube",
    "sampler1DShadow",
    "sampler2DShadow",
    "samplerCubeShadow",
    "sampler1DArray",
    "sampler2DArray",
    "sampler1DArrayShadow",
    "sampler2DArrayShadow",
    "isampler1D",
    "isampler2D",
    "isampler3D",
    "isamplerCube",
    "isampler1DArray",
    "isampler2DArray",
    "usampler1D",
    "usampler2D",
    "usampler3D",
    "usamplerCube",
    "usampler1DArray",
    "usampler2DArray",
    "sampler2DRect",
    "sampler2DRectShadow",
    "isampler2DRect",
    "usampler2DRect",
    "samplerBuffer",
    "isamplerBuffer",
    "usamplerBuffer",
    "samplerCubeArray",
    "samplerCubeArrayShadow",
    "isamplerCubeArray",
    "usamplerCubeArray",
    "sampler2DMS",
    "isampler2DMS",
    "usampler2DMS",
    "sampler2DMSArray",
    "isampler2DMSArray",
    "usampler2DMSArray",
];

static BUILTIN_TYPES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| RESERVED_TYPES.iter().copied().collect());

/// Whether `name` is one of the language's built-in types.
pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(name)
}

/// The set of known type names, threaded as the parser context into
/// identifier reclassification. Grows as declarations introduce new types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    types: HashSet<String>,
}

impl TypeRegistry {
    /// An empty registry: only what the caller registers is a type.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with every built-in type.
    pub fn with_builtins() -> Self {
        Self {
            types: BUILTIN_TYPES.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>) {
        self.types.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Reclassify an identifier that names a known type.
fn classify_identifier(text: &str, default: GlslKind, registry: &TypeRegistry) -> GlslKind {
    if registry.contains(text) {
        GlslKind::TypeName
    } else {
        default
    }
}

/// Build the ordered rule table for the shading language.
pub fn rules() -> Result<RuleTable<GlslKind, TypeRegistry>, RuleError> {
    use GlslKind::*;

    RuleTable::new(vec![
        LexicalRule::new(r"[ \t\n]+", Ignore),
        LexicalRule::new(r"attribute\b", Attribute),
        LexicalRule::new(r"const\b", Const),
        LexicalRule::new(r"break\b", Break),
        LexicalRule::new(r"continue\b", Continue),
        LexicalRule::new(r"do\b", Do),
        LexicalRule::new(r"else\b", Else),
        LexicalRule::new(r"for\b", For),
        LexicalRule::new(r"if\b", If),
        LexicalRule::new(r"discard\b", Discard),
        LexicalRule::new(r"return\b", Return),
        LexicalRule::new(r"switch\b", Switch),
        LexicalRule::new(r"case\b", Case),
        LexicalRule::new(r"default\b", Default),
        LexicalRule::new(r"subroutine\b", Subroutine),
        LexicalRule::new(r"centroid\b", Centroid),
        LexicalRule::new(r"in\b", In),
        LexicalRule::new(r"out\b", Out),
        LexicalRule::new(r"inout\b", Inout),
        LexicalRule::new(r"uniform\b", Uniform),
        LexicalRule::new(r"varying\b", Varying),
        LexicalRule::new(r"patch\b", Patch),
        LexicalRule::new(r"sample\b", Sample),
        LexicalRule::new(r"noperspective\b", Noperspective),
        LexicalRule::new(r"flat\b", Flat),
        LexicalRule::new(r"smooth\b", Smooth),
        LexicalRule::new(r"layout\b", Layout),
        LexicalRule::new(r"struct\b", Struct),
        LexicalRule::new(r"void\b", Void),
        LexicalRule::new(r"while\b", While),
        LexicalRule::new(r"<<=", LeftAssign),
        LexicalRule::new(r">>=", RightAssign),
        LexicalRule::new(r"<<", LeftOp),
        LexicalRule::new(r">>", RightOp),
        LexicalRule::new(r"\+\+", IncOp),
        LexicalRule::new(r"--", DecOp),
        LexicalRule::new(r"<=", LeOp),
        LexicalRule::new(r">=", GeOp),
        LexicalRule::new(r"==", EqOp),
        LexicalRule::new(r"!=", NeOp),
        LexicalRule::new(r"&&", AndOp),
        LexicalRule::new(r"\|\|", OrOp),
        LexicalRule::new(r"\^\^", XorOp),
        LexicalRule::new(r"\*=", MulAssign),
        LexicalRule::new(r"/=", DivAssign),
        LexicalRule::new(r"\+=", AddAssign),
        LexicalRule::new(r"%=", ModAssign),
        LexicalRule::new(r"&=", AndAssign),
        LexicalRule::new(r"\^=", XorAssign),
        LexicalRule::new(r"\|=", OrAssign),
        LexicalRule::new(r"-=", SubAssign),
        LexicalRule::new(r"\(", LeftParen),
        LexicalRule::new(r"\)", RightParen),
        LexicalRule::new(r"\[", LeftBracket),
        LexicalRule::new(r"\]", RightBracket),
        LexicalRule::new(r"\{", LeftBrace),
        LexicalRule::new(r"\}", RightBrace),
        LexicalRule::new(r"\.", Dot),
        LexicalRule::new(r",", Comma),
        LexicalRule::new(r":", Colon),
        LexicalRule::new(r"=", Equal),
        LexicalRule::new(r";", Semicolon),
        LexicalRule::new(r"!", Bang),
        LexicalRule::new(r"-", Dash),
        LexicalRule::new(r"~", Tilde),
        LexicalRule::new(r"\+", Plus),
        LexicalRule::new(r"\*", Star),
        LexicalRule::new(r"/", Slash),
        LexicalRule::new(r"%", Percent),
        LexicalRule::new(r"<", LeftAngle),
        LexicalRule::new(r">", RightAngle),
        LexicalRule::new(r"\|", VerticalBar),
        LexicalRule::new(r"\^", Caret),
        LexicalRule::new(r"&", Ampersand),
        LexicalRule::new(r"\?", Question),
        LexicalRule::new(r"invariant\b", Invariant),
        LexicalRule::new(r"highp\b", HighPrecision),
        LexicalRule::new(r"mediump\b", MediumPrecision),
        LexicalRule::new(r"lowp\b", LowPrecision),
        LexicalRule::new(r"precision\b", Precision),
        LexicalRule::new(r"(?:false|true)\b", BoolConstant),
        LexicalRule::with_callback(r"[_a-zA-Z][_a-zA-Z0-9]*", Identifier, classify_identifier),
        LexicalRule::new(r"[0-9]+\.[0-9]*(?:[eE][-+]?[0-9]+)?[fF]?", FloatConstant),
        LexicalRule::new(r"[0-9]*\.[0-9]+(?:[eE][-+]?[0-9]+)?[fF]?", FloatConstant),
        LexicalRule::new(r"[0-9]+[eE][-+]?[0-9]+[fF]?", FloatConstant),
        LexicalRule::new(r"0[xX][0-9a-fA-F]+[uU]", UintConstant),
        LexicalRule::new(r"0[xX][0-9a-fA-F]+", IntConstant),
        LexicalRule::new(r"[1-9][0-9]*[uU]", UintConstant),
        LexicalRule::new(r"[1-9][0-9]*", IntConstant),
        LexicalRule::new(r"[0-7]+[uU]", UintConstant),
        LexicalRule::new(r"[0-7]+", IntConstant),
        LexicalRule::new(r".", Reject),
    ])
}
