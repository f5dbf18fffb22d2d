//! The recursive-descent reference-string parser (§4.B).
//!
//! Single-token lookahead over a byte cursor, the same shape as the
//! original hand-written parser: one function per grammar production,
//! no external parser-generator dependency.

use super::cursor::Cursor;
use super::model::{ParsedRef, ParsedRefComponent, TemplateArgument};
use crate::error::{Error, ParseFailureReason, Result};
use crate::model::{NoexceptInfo, OperatorKind, ReferenceKind};

/// Every overloadable operator's spelling, longest first so greedy
/// matching never stops one character short (e.g. `<=>` before `<=`
/// before `<`).
const OPERATOR_SPELLINGS: &[(OperatorKind, &str)] = &[
    (OperatorKind::LessLessEqual, "<<="),
    (OperatorKind::GreaterGreaterEqual, ">>="),
    (OperatorKind::Spaceship, "<=>"),
    (OperatorKind::ArrowStar, "->*"),
    (OperatorKind::LessLess, "<<"),
    (OperatorKind::GreaterGreater, ">>"),
    (OperatorKind::PlusEqual, "+="),
    (OperatorKind::MinusEqual, "-="),
    (OperatorKind::StarEqual, "*="),
    (OperatorKind::SlashEqual, "/="),
    (OperatorKind::PercentEqual, "%="),
    (OperatorKind::CaretEqual, "^="),
    (OperatorKind::AmpEqual, "&="),
    (OperatorKind::PipeEqual, "|="),
    (OperatorKind::EqualEqual, "=="),
    (OperatorKind::ExclaimEqual, "!="),
    (OperatorKind::LessEqual, "<="),
    (OperatorKind::GreaterEqual, ">="),
    (OperatorKind::AmpAmp, "&&"),
    (OperatorKind::PipePipe, "||"),
    (OperatorKind::PlusPlus, "++"),
    (OperatorKind::MinusMinus, "--"),
    (OperatorKind::Arrow, "->"),
    (OperatorKind::Call, "()"),
    (OperatorKind::Subscript, "[]"),
    (OperatorKind::Plus, "+"),
    (OperatorKind::Minus, "-"),
    (OperatorKind::Star, "*"),
    (OperatorKind::Slash, "/"),
    (OperatorKind::Percent, "%"),
    (OperatorKind::Caret, "^"),
    (OperatorKind::Amp, "&"),
    (OperatorKind::Pipe, "|"),
    (OperatorKind::Tilde, "~"),
    (OperatorKind::Exclaim, "!"),
    (OperatorKind::Equal, "="),
    (OperatorKind::Less, "<"),
    (OperatorKind::Greater, ">"),
    (OperatorKind::Comma, ","),
];

/// Parse a reference string (§4.B) into a [`ParsedRef`].
pub fn parse(text: &str) -> Result<ParsedRef> {
    let mut cur = Cursor::new(text);
    cur.skip_whitespace();
    if cur.is_at_end() {
        return Err(Error::ParseFailure {
            text: text.to_string(),
            offset: 0,
            reason: ParseFailureReason::EmptyInput,
        });
    }

    let is_fully_qualified = cur.eat("::");

    let mut components = Vec::new();
    loop {
        let component = parse_component(&mut cur, text)?;
        components.push(component);
        cur.skip_whitespace();
        if cur.eat("::") {
            continue;
        }
        break;
    }

    for component in &components[..components.len().saturating_sub(1)] {
        if component.is_operator() {
            return Err(Error::ParseFailure {
                text: text.to_string(),
                offset: cur.offset(),
                reason: ParseFailureReason::TrailingComponentAfterOperator,
            });
        }
        if component.is_conversion() {
            return Err(Error::ParseFailure {
                text: text.to_string(),
                offset: cur.offset(),
                reason: ParseFailureReason::TrailingComponentAfterConversion,
            });
        }
    }

    let (has_function_parameters, function_parameters, is_variadic) =
        parse_function_parameters(&mut cur, text)?;

    let (is_const, is_volatile) = parse_cv_qualifiers(&mut cur, text)?;

    let is_explicit_object_member_function = function_parameters
        .first()
        .map(|p| p.trim_start() == "this" || p.trim_start().starts_with("this "))
        .unwrap_or(false);

    let exception_spec = parse_exception_spec(&mut cur, text);

    let is_deduction_guide = {
        cur.skip_whitespace();
        cur.starts_with("->")
    };
    if is_deduction_guide {
        cur.eat("->");
        // The deduced-type text is carried through unparsed; resolving
        // it against the corpus is lookup's job (§4.D), not the
        // string grammar's.
        while !cur.is_at_end() {
            cur.bump();
        }
    }

    let last = components.last().expect("at least one component parsed");
    let kind = if last.name.starts_with('~') {
        ReferenceKind::Destructor
    } else if is_deduction_guide {
        ReferenceKind::DeductionGuide
    } else if last.is_operator() {
        ReferenceKind::Operator
    } else if last.is_conversion() {
        ReferenceKind::Conversion
    } else {
        ReferenceKind::Identifier
    };

    cur.skip_whitespace();
    if !cur.is_at_end() && !is_deduction_guide {
        return Err(Error::ParseFailure {
            text: text.to_string(),
            offset: cur.offset(),
            reason: ParseFailureReason::InvalidDeclarator,
        });
    }

    Ok(ParsedRef {
        is_fully_qualified,
        components,
        has_function_parameters,
        function_parameters,
        is_variadic,
        is_explicit_object_member_function,
        kind,
        is_const,
        is_volatile,
        exception_spec,
    })
}

fn parse_component(cur: &mut Cursor<'_>, text: &str) -> Result<ParsedRefComponent> {
    cur.skip_whitespace();

    if cur.eat("operator") {
        return parse_operator_or_conversion_component(cur, text);
    }

    if cur.peek() == Some(b'~') {
        cur.bump();
        let ident = cur.eat_identifier().ok_or_else(|| Error::ParseFailure {
            text: text.to_string(),
            offset: cur.offset(),
            reason: ParseFailureReason::ExpectedIdentifier,
        })?;
        let mut component = ParsedRefComponent::plain(format!("~{ident}"));
        attach_template_arguments(cur, text, &mut component)?;
        return Ok(component);
    }

    let ident = cur.eat_identifier().ok_or_else(|| Error::ParseFailure {
        text: text.to_string(),
        offset: cur.offset(),
        reason: ParseFailureReason::ExpectedIdentifier,
    })?;
    let mut component = ParsedRefComponent::plain(ident);
    attach_template_arguments(cur, text, &mut component)?;
    Ok(component)
}

fn parse_operator_or_conversion_component(
    cur: &mut Cursor<'_>,
    text: &str,
) -> Result<ParsedRefComponent> {
    cur.skip_whitespace();

    if cur.eat("new") {
        let op = if cur.eat("[]") {
            OperatorKind::ArrayNew
        } else {
            OperatorKind::New
        };
        return Ok(operator_component(op));
    }
    if cur.eat("delete") {
        let op = if cur.eat("[]") {
            OperatorKind::ArrayDelete
        } else {
            OperatorKind::Delete
        };
        return Ok(operator_component(op));
    }
    if cur.eat("co_await") {
        return Ok(operator_component(OperatorKind::Coawait));
    }
    if cur.eat("\"\"") {
        // user-defined literal suffix, e.g. `operator""_km`; not one
        // of the closed overloadable operators (§9), carried as a
        // plain named component instead of an OperatorKind.
        let ident = cur.eat_identifier().ok_or_else(|| Error::ParseFailure {
            text: text.to_string(),
            offset: cur.offset(),
            reason: ParseFailureReason::ExpectedIdentifier,
        })?;
        return Ok(ParsedRefComponent::plain(format!("operator\"\"{ident}")));
    }

    for (kind, spelling) in OPERATOR_SPELLINGS {
        if cur.starts_with(spelling) {
            let rest_after = &cur.rest()[spelling.len()..];
            // Don't let `<` steal the first angle bracket of an
            // operator's own template-argument list, e.g.
            // `operator<<T>` naming `operator<` specialized on `T`.
            if *kind == OperatorKind::Less && rest_after.starts_with('=') {
                continue;
            }
            for _ in 0..spelling.len() {
                cur.bump();
            }
            return Ok(operator_component(*kind));
        }
    }

    // Not a recognized operator token: this is a conversion-function-id,
    // `operator <type-id>`. The type-id runs until the next top-level
    // `::`, `(`, or end of input.
    let start = cur.offset();
    let mut depth: i32 = 0;
    loop {
        match cur.peek() {
            None => break,
            Some(b'<' | b'(' | b'[') => {
                depth += 1;
                cur.bump();
            }
            Some(b'>' | b')' | b']') => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                cur.bump();
            }
            Some(b':') if depth == 0 && cur.starts_with("::") => break,
            _ => {
                cur.bump();
            }
        }
    }
    let type_text = text[start..cur.offset()].trim().to_string();
    if type_text.is_empty() {
        return Err(Error::ParseFailure {
            text: text.to_string(),
            offset: cur.offset(),
            reason: ParseFailureReason::ExpectedIdentifier,
        });
    }
    Ok(ParsedRefComponent {
        name: format!("operator {type_text}"),
        has_template_arguments: false,
        template_arguments: Vec::new(),
        operator: OperatorKind::None,
        conversion_type: Some(type_text),
    })
}

fn operator_component(op: OperatorKind) -> ParsedRefComponent {
    ParsedRefComponent {
        name: op.operator_name(),
        has_template_arguments: false,
        template_arguments: Vec::new(),
        operator: op,
        conversion_type: None,
    }
}

fn attach_template_arguments(
    cur: &mut Cursor<'_>,
    text: &str,
    component: &mut ParsedRefComponent,
) -> Result<()> {
    cur.skip_whitespace();
    if cur.peek() != Some(b'<') {
        return Ok(());
    }
    cur.bump();
    component.has_template_arguments = true;

    let mut depth: i32 = 1;
    let mut arg_start = cur.offset();
    loop {
        match cur.peek() {
            None => {
                return Err(Error::ParseFailure {
                    text: text.to_string(),
                    offset: cur.offset(),
                    reason: ParseFailureReason::UnbalancedParameterList,
                })
            }
            Some(b'<' | b'(' | b'[') => {
                depth += 1;
                cur.bump();
            }
            Some(b'>') => {
                depth -= 1;
                let end = cur.offset();
                cur.bump();
                if depth == 0 {
                    push_template_argument(component, &text[arg_start..end]);
                    break;
                }
            }
            Some(b')' | b']') => {
                depth -= 1;
                cur.bump();
            }
            Some(b',') if depth == 1 => {
                let end = cur.offset();
                push_template_argument(component, &text[arg_start..end]);
                cur.bump();
                arg_start = cur.offset();
            }
            _ => {
                cur.bump();
            }
        }
    }
    Ok(())
}

fn push_template_argument(component: &mut ParsedRefComponent, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        component
            .template_arguments
            .push(TemplateArgument::new(trimmed));
    }
}

fn parse_function_parameters(
    cur: &mut Cursor<'_>,
    text: &str,
) -> Result<(bool, Vec<String>, bool)> {
    cur.skip_whitespace();
    if cur.peek() != Some(b'(') {
        return Ok((false, Vec::new(), false));
    }
    cur.bump();

    let mut params = Vec::new();
    let mut is_variadic = false;
    let mut depth: i32 = 1;
    let mut part_start = cur.offset();

    loop {
        match cur.peek() {
            None => {
                return Err(Error::ParseFailure {
                    text: text.to_string(),
                    offset: cur.offset(),
                    reason: ParseFailureReason::UnbalancedParameterList,
                })
            }
            Some(b'(' | b'<' | b'[') => {
                depth += 1;
                cur.bump();
            }
            Some(b')') => {
                depth -= 1;
                let end = cur.offset();
                cur.bump();
                if depth == 0 {
                    push_param(&mut params, &mut is_variadic, &text[part_start..end]);
                    break;
                }
            }
            Some(b'>' | b']') => {
                depth -= 1;
                cur.bump();
            }
            Some(b',') if depth == 1 => {
                let end = cur.offset();
                push_param(&mut params, &mut is_variadic, &text[part_start..end]);
                cur.bump();
                part_start = cur.offset();
            }
            _ => {
                cur.bump();
            }
        }
    }

    Ok((true, params, is_variadic))
}

fn push_param(params: &mut Vec<String>, is_variadic: &mut bool, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    if trimmed == "..." {
        *is_variadic = true;
        return;
    }
    params.push(trimmed.to_string());
}

fn parse_cv_qualifiers(cur: &mut Cursor<'_>, text: &str) -> Result<(bool, bool)> {
    let mut is_const = false;
    let mut is_volatile = false;
    loop {
        cur.skip_whitespace();
        if cur.starts_with("const") && !next_is_identifier_continuation(cur, "const") {
            if is_const {
                return Err(Error::ParseFailure {
                    text: text.to_string(),
                    offset: cur.offset(),
                    reason: ParseFailureReason::DuplicateCvQualifier,
                });
            }
            cur.eat("const");
            is_const = true;
            continue;
        }
        if cur.starts_with("volatile") && !next_is_identifier_continuation(cur, "volatile") {
            if is_volatile {
                return Err(Error::ParseFailure {
                    text: text.to_string(),
                    offset: cur.offset(),
                    reason: ParseFailureReason::DuplicateCvQualifier,
                });
            }
            cur.eat("volatile");
            is_volatile = true;
            continue;
        }
        break;
    }
    Ok((is_const, is_volatile))
}

fn next_is_identifier_continuation(cur: &Cursor<'_>, keyword: &str) -> bool {
    matches!(cur.peek_at(keyword.len()), Some(b) if b.is_ascii_alphanumeric() || b == b'_')
}

fn parse_exception_spec(cur: &mut Cursor<'_>, text: &str) -> NoexceptInfo {
    cur.skip_whitespace();
    if !cur.eat("noexcept") {
        return NoexceptInfo::None;
    }
    cur.skip_whitespace();
    if cur.peek() != Some(b'(') {
        return NoexceptInfo::True;
    }
    cur.bump();
    let start = cur.offset();
    let mut depth: i32 = 1;
    while depth > 0 {
        match cur.peek() {
            None => break,
            Some(b'(') => {
                depth += 1;
                cur.bump();
            }
            Some(b')') => {
                depth -= 1;
                if depth == 0 {
                    let end = cur.offset();
                    cur.bump();
                    return match text[start..end].trim() {
                        "true" => NoexceptInfo::True,
                        "false" => NoexceptInfo::False,
                        other => NoexceptInfo::Dependent(other.to_string()),
                    };
                }
                cur.bump();
            }
            _ => {
                cur.bump();
            }
        }
    }
    NoexceptInfo::True
}
