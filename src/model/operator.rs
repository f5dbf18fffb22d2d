//! The closed overloadable-operator enumeration and its helpers (§9).
//!
//! `*`, `&`, `+`, `-` are both unary and binary in C++, so the "readable
//! name" and arity classification need an explicit arity parameter
//! rather than being derivable from the kind alone.

use serde::{Deserialize, Serialize};

/// Every operator C++ allows a class to overload, plus `None` meaning
/// "this component is not an operator".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum OperatorKind {
    None,
    New,
    Delete,
    ArrayNew,
    ArrayDelete,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Pipe,
    Tilde,
    Exclaim,
    Equal,
    Less,
    Greater,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    CaretEqual,
    AmpEqual,
    PipeEqual,
    LessLess,
    GreaterGreater,
    LessLessEqual,
    GreaterGreaterEqual,
    EqualEqual,
    ExclaimEqual,
    LessEqual,
    GreaterEqual,
    Spaceship,
    AmpAmp,
    PipePipe,
    PlusPlus,
    MinusMinus,
    Comma,
    ArrowStar,
    Arrow,
    Call,
    Subscript,
    Coawait,
    Conditional,
}

impl Default for OperatorKind {
    fn default() -> Self {
        OperatorKind::None
    }
}

impl OperatorKind {
    /// The spelling used when reconstructing `operator<spelling>`, e.g.
    /// `Plus` -> `"+"`.
    pub fn spelling(self) -> &'static str {
        use OperatorKind::*;
        match self {
            None => "",
            New => "new",
            Delete => "delete",
            ArrayNew => "new[]",
            ArrayDelete => "delete[]",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Caret => "^",
            Amp => "&",
            Pipe => "|",
            Tilde => "~",
            Exclaim => "!",
            Equal => "=",
            Less => "<",
            Greater => ">",
            PlusEqual => "+=",
            MinusEqual => "-=",
            StarEqual => "*=",
            SlashEqual => "/=",
            PercentEqual => "%=",
            CaretEqual => "^=",
            AmpEqual => "&=",
            PipeEqual => "|=",
            LessLess => "<<",
            GreaterGreater => ">>",
            LessLessEqual => "<<=",
            GreaterGreaterEqual => ">>=",
            EqualEqual => "==",
            ExclaimEqual => "!=",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Spaceship => "<=>",
            AmpAmp => "&&",
            PipePipe => "||",
            PlusPlus => "++",
            MinusMinus => "--",
            Comma => ",",
            ArrowStar => "->*",
            Arrow => "->",
            Call => "()",
            Subscript => "[]",
            Coawait => "co_await",
            Conditional => "?",
        }
    }

    /// Fully spelled `operator<spelling>` token, e.g. `"operator+"`.
    pub fn operator_name(self) -> String {
        format!("operator{}", self.spelling())
    }

    /// A human-readable name suitable for overload-set brief synthesis
    /// (§4.G step 9), e.g. `"Addition"` for `Plus` at binary arity.
    ///
    /// `arity` disambiguates tokens that are both unary and binary;
    /// for tokens with only one possible arity it is ignored.
    pub fn readable_name(self, arity: Arity) -> &'static str {
        use Arity::*;
        use OperatorKind::*;
        match (self, arity) {
            (New, _) => "new",
            (Delete, _) => "delete",
            (ArrayNew, _) => "array new",
            (ArrayDelete, _) => "array delete",
            (Plus, Unary) => "unary plus",
            (Plus, Binary) => "addition",
            (Minus, Unary) => "unary minus",
            (Minus, Binary) => "subtraction",
            (Star, Unary) => "dereference",
            (Star, Binary) => "multiplication",
            (Slash, _) => "division",
            (Percent, _) => "modulo",
            (Caret, _) => "bitwise XOR",
            (Amp, Unary) => "address-of",
            (Amp, Binary) => "bitwise AND",
            (Pipe, _) => "bitwise OR",
            (Tilde, _) => "bitwise NOT",
            (Exclaim, _) => "logical NOT",
            (Equal, _) => "assignment",
            (Less, _) => "less-than",
            (Greater, _) => "greater-than",
            (PlusEqual, _) => "addition assignment",
            (MinusEqual, _) => "subtraction assignment",
            (StarEqual, _) => "multiplication assignment",
            (SlashEqual, _) => "division assignment",
            (PercentEqual, _) => "modulo assignment",
            (CaretEqual, _) => "XOR assignment",
            (AmpEqual, _) => "AND assignment",
            (PipeEqual, _) => "OR assignment",
            (LessLess, _) => "stream insertion",
            (GreaterGreater, _) => "stream extraction",
            (LessLessEqual, _) => "left-shift assignment",
            (GreaterGreaterEqual, _) => "right-shift assignment",
            (EqualEqual, _) => "equality",
            (ExclaimEqual, _) => "inequality",
            (LessEqual, _) => "less-equal",
            (GreaterEqual, _) => "greater-equal",
            (Spaceship, _) => "three-way comparison",
            (AmpAmp, _) => "logical AND",
            (PipePipe, _) => "logical OR",
            (PlusPlus, _) => "increment",
            (MinusMinus, _) => "decrement",
            (Comma, _) => "comma",
            (ArrowStar, _) => "member-pointer access",
            (Arrow, _) => "member access",
            (Call, _) => "function call",
            (Subscript, _) => "subscript",
            (Coawait, _) => "co_await",
            (Conditional, _) => "conditional",
            (None, _) => "",
        }
    }

    /// `true` for operators that can be declared with zero parameters
    /// (as a member) — i.e. ones with a meaningful unary reading.
    pub fn is_unary_operator(self) -> bool {
        use OperatorKind::*;
        matches!(
            self,
            Plus | Minus | Star | Amp | Tilde | Exclaim | PlusPlus | MinusMinus
        )
    }

    /// `true` for operators that can be declared with one parameter (as
    /// a member) — i.e. ones with a meaningful binary reading.
    pub fn is_binary_operator(self) -> bool {
        use OperatorKind::*;
        !matches!(
            self,
            None | New | Delete | ArrayNew | ArrayDelete | Tilde | Exclaim | Call | Coawait
        )
    }

    /// Relational/comparison operators, used by the member sorter
    /// (§4.H rule 4) to group and order them.
    pub fn is_relational(self) -> bool {
        use OperatorKind::*;
        matches!(
            self,
            EqualEqual | ExclaimEqual | Less | Greater | LessEqual | GreaterEqual | Spaceship
        )
    }

    /// The relative order used among relational operators (§4.H rule 4).
    pub fn relational_order(self) -> u8 {
        use OperatorKind::*;
        match self {
            Spaceship => 0,
            EqualEqual => 1,
            ExclaimEqual => 2,
            Less => 3,
            LessEqual => 4,
            Greater => 5,
            GreaterEqual => 6,
            _ => u8::MAX,
        }
    }
}

/// Disambiguates operator arity for [`OperatorKind::readable_name`] and
/// the unary/binary predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_array_new_are_distinct() {
        assert_ne!(OperatorKind::New.spelling(), OperatorKind::ArrayNew.spelling());
        assert_ne!(
            OperatorKind::Delete.spelling(),
            OperatorKind::ArrayDelete.spelling()
        );
    }

    #[test]
    fn star_is_both_unary_and_binary() {
        assert!(OperatorKind::Star.is_unary_operator());
        assert!(OperatorKind::Star.is_binary_operator());
        assert_eq!(OperatorKind::Star.readable_name(Arity::Unary), "dereference");
        assert_eq!(
            OperatorKind::Star.readable_name(Arity::Binary),
            "multiplication"
        );
    }

    #[test]
    fn call_is_not_binary() {
        assert!(!OperatorKind::Call.is_binary_operator());
        assert!(!OperatorKind::Call.is_unary_operator());
    }

    #[test]
    fn relational_ordering_is_total_among_relational_operators() {
        let mut ops = vec![
            OperatorKind::GreaterEqual,
            OperatorKind::EqualEqual,
            OperatorKind::Spaceship,
        ];
        ops.sort_by_key(|o| o.relational_order());
        assert_eq!(
            ops,
            vec![
                OperatorKind::Spaceship,
                OperatorKind::EqualEqual,
                OperatorKind::GreaterEqual,
            ]
        );
    }
}
