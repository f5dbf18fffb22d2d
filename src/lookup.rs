//! Unqualified and qualified name lookup (§4.D).
//!
//! Mirrors C++ scope rules: unqualified lookup walks outward through
//! enclosing scopes, searching each scope's own members (and the
//! members of any *transparent* nested scope — an inline namespace or
//! an unscoped enum — as if they were hoisted into it) before trying
//! the next scope out. Qualified lookup (resolving the later
//! components of a `ParsedRef`) only ever searches the immediately
//! preceding component's own members.
//!
//! Member matching runs a four-priority cascade per component: first
//! requiring both a matching template-argument count and a matching
//! function-parameter count, then parameters alone, then template
//! arguments alone, then falling back to a bare name/operator/
//! conversion-type match. Each of the first three branches is only
//! attempted when the component/reference actually carries that kind
//! of information to match against.

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::model::{FunctionClass, Info, OperatorKind, SymbolId};
use crate::parse_ref::{ParsedRef, ParsedRefComponent};
use fnv::FnvHashMap;

/// Two-level cache keyed on `(context, component signature)`, including
/// negative entries (`None`) so a repeatedly-failing lookup doesn't
/// re-walk the scope chain every time (§4.D, §9).
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: FnvHashMap<(SymbolId, String), Option<SymbolId>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A signature distinguishing what a component, together with an
/// optional function-parameter tail, could match — distinct
/// overloads of the same name must not collide in the cache.
fn cache_key(component: &ParsedRefComponent, function_parameters: Option<&[String]>) -> String {
    format!(
        "{}#{:?}#{}#tpl{}#params{}",
        component.name,
        component.operator,
        component.conversion_type.as_deref().unwrap_or(""),
        component.template_arguments.len(),
        function_parameters.map(|p| p.len() as isize).unwrap_or(-1)
    )
}

/// Unqualified lookup of `component`, starting at `context` and
/// walking outward through enclosing scopes until one of them has a
/// matching member (or transparently-reachable member).
pub fn lookup_unqualified(
    corpus: &Corpus,
    cache: &mut LookupCache,
    context: SymbolId,
    component: &ParsedRefComponent,
    function_parameters: Option<&[String]>,
) -> Option<SymbolId> {
    let key = (context, cache_key(component, function_parameters));
    if let Some(cached) = cache.entries.get(&key) {
        return *cached;
    }

    let mut current = Some(context);
    let mut result = None;
    while let Some(id) = current {
        if let Some(found) = find_member_match(corpus, id, component, function_parameters) {
            result = Some(found);
            break;
        }
        current = corpus.get(id).and_then(Info::parent);
    }

    cache.entries.insert(key, result);
    result
}

/// Qualified lookup: search only `scope`'s own members (and
/// transparent nested scopes), never the enclosing scope chain.
pub fn lookup_qualified(
    corpus: &Corpus,
    cache: &mut LookupCache,
    scope: SymbolId,
    component: &ParsedRefComponent,
    function_parameters: Option<&[String]>,
) -> Option<SymbolId> {
    let key = (scope, format!("::{}", cache_key(component, function_parameters)));
    if let Some(cached) = cache.entries.get(&key) {
        return *cached;
    }
    let result = find_member_match(corpus, scope, component, function_parameters);
    cache.entries.insert(key, result);
    result
}

/// Runs the four-priority member-matching cascade (§4.D) against
/// `scope_id`'s members. A branch is attempted only when the
/// component/reference actually specifies the information it checks:
/// the template-argument branches require `component.is_specialization()`,
/// the parameter branches require a non-empty `function_parameters`.
fn find_member_match(
    corpus: &Corpus,
    scope_id: SymbolId,
    component: &ParsedRefComponent,
    function_parameters: Option<&[String]>,
) -> Option<SymbolId> {
    let check_template = component.is_specialization();
    let check_params = function_parameters.is_some_and(|params| !params.is_empty());

    if check_template && check_params {
        if let Some(found) = search_scope(corpus, scope_id, component, function_parameters, true, true) {
            return Some(found);
        }
    }
    if check_params {
        if let Some(found) = search_scope(corpus, scope_id, component, function_parameters, false, true) {
            return Some(found);
        }
    }
    if check_template {
        if let Some(found) = search_scope(corpus, scope_id, component, function_parameters, true, false) {
            return Some(found);
        }
    }
    search_scope(corpus, scope_id, component, function_parameters, false, false)
}

/// One pass over `scope_id`'s members with a fixed `(check_template,
/// check_params)` predicate. Every member that folds into an
/// `Overloads` entity is searched both as its constituents (so a
/// specific overload can be picked out by its parameter count) and, on
/// its own, as the overload set entity itself (so an unqualified
/// reference to the set as a whole still resolves). Transparent
/// members (inline namespaces, unscoped enums) are searched as if
/// their own members were hoisted into `scope_id`.
fn search_scope(
    corpus: &Corpus,
    scope_id: SymbolId,
    component: &ParsedRefComponent,
    function_parameters: Option<&[String]>,
    check_template: bool,
    check_params: bool,
) -> Option<SymbolId> {
    let info = corpus.get(scope_id)?;
    for child_id in info.children() {
        let Some(child) = corpus.get(child_id) else {
            continue;
        };

        if let Info::Overloads(overloads) = child {
            for member_id in overloads.members.ids() {
                let Some(member) = corpus.get(member_id) else {
                    continue;
                };
                if member_matches(member, component, function_parameters, check_template, check_params) {
                    return Some(member_id);
                }
            }
        }

        if member_matches(child, component, function_parameters, check_template, check_params) {
            return Some(child_id);
        }

        if is_transparent(child) {
            if let Some(found) = search_scope(
                corpus,
                child_id,
                component,
                function_parameters,
                check_template,
                check_params,
            ) {
                return Some(found);
            }
        }
    }
    None
}

/// Tests one candidate member against a component under a fixed
/// `(check_template, check_params)` predicate (§4.D "Member matching
/// (per component)").
fn member_matches(
    member: &Info,
    component: &ParsedRefComponent,
    function_parameters: Option<&[String]>,
    check_template: bool,
    check_params: bool,
) -> bool {
    if !names_match(member, component) {
        return false;
    }

    if check_template {
        match template_param_count(member) {
            Some(count) => {
                if count != component.template_arguments.len() {
                    return false;
                }
            }
            None => return false,
        }
    }

    if check_params {
        let wanted = function_parameters.unwrap_or(&[]);
        match member {
            Info::Function(f) => {
                if f.params.len() != wanted.len() {
                    return false;
                }
            }
            _ => return false,
        }
    }

    true
}

/// The name/operator/conversion-kind comparison every member-matching
/// predicate starts with. Operator components compare the candidate's
/// `OperatorKind` (only `Function`/`Overloads` carry one); conversion
/// components compare the candidate's conversion target type (only a
/// `Function` carries a concrete one, so a folded `Overloads` entity
/// only matches a conversion component by falling through to its
/// constituents); everything else compares by plain name.
fn names_match(member: &Info, component: &ParsedRefComponent) -> bool {
    if component.is_operator() {
        return match operator_of(member) {
            Some(op) => op == component.operator,
            None => false,
        };
    }
    if component.is_conversion() {
        return matches!(
            member,
            Info::Function(f)
                if f.class == FunctionClass::Conversion
                    && f.conversion_type.as_ref().map(|t| t.name.as_str())
                        == component.conversion_type.as_deref()
        );
    }
    member.name() == component.name
}

fn operator_of(member: &Info) -> Option<OperatorKind> {
    match member {
        Info::Function(f) => Some(f.operator),
        Info::Overloads(o) => Some(o.operator),
        _ => None,
    }
}

/// The member's own template-parameter count, or `None` for a kind
/// that carries no template head at all (a hard mismatch, not a
/// skipped check, per §4.D).
fn template_param_count(member: &Info) -> Option<usize> {
    match member {
        Info::Function(f) => f.template.as_ref().map(|t| t.params.len()),
        Info::Record(r) => r.template.as_ref().map(|t| t.params.len()),
        Info::Guide(g) => g.template.as_ref().map(|t| t.params.len()),
        Info::Typedef(t) => t.template.as_ref().map(|t| t.params.len()),
        Info::Variable(v) => v.template.as_ref().map(|t| t.params.len()),
        _ => None,
    }
}

/// An inline namespace or unscoped enum contributes its members
/// directly to the enclosing scope's name space (§4.D).
fn is_transparent(info: &Info) -> bool {
    match info {
        Info::Namespace(ns) => ns.is_inline,
        Info::Enum(e) => !e.is_scoped,
        _ => false,
    }
}

/// Resolve a fully parsed reference (§4.B output) against the corpus,
/// starting unqualified lookup of the first component from `context`
/// (or from [`SymbolId::GLOBAL`] when the reference began with `::`),
/// then qualified lookup for every later component. The reference's
/// function-parameter tail, if any, only ever disambiguates the final
/// component — every earlier component is purely a qualifying scope.
pub fn resolve(
    corpus: &Corpus,
    cache: &mut LookupCache,
    context: SymbolId,
    parsed: &ParsedRef,
) -> Result<SymbolId> {
    if !corpus.contains(context) && !parsed.is_fully_qualified {
        return Err(Error::ContextNotFound(context));
    }

    let mut components = parsed.components.iter().peekable();
    let first = components.next().ok_or_else(|| Error::SymbolNotFound {
        name: String::new(),
        context: context.to_hex(),
    })?;

    let first_params = function_params_for(parsed, components.peek().is_none());
    let mut current = if parsed.is_fully_qualified {
        lookup_qualified(corpus, cache, SymbolId::GLOBAL, first, first_params)
    } else {
        lookup_unqualified(corpus, cache, context, first, first_params)
    }
    .ok_or_else(|| Error::SymbolNotFound {
        name: first.name.clone(),
        context: context.to_hex(),
    })?;

    while let Some(component) = components.next() {
        let params = function_params_for(parsed, components.peek().is_none());
        current = lookup_qualified(corpus, cache, current, component, params).ok_or_else(|| {
            Error::SymbolNotFound {
                name: component.name.clone(),
                context: current.to_hex(),
            }
        })?;
    }

    Ok(current)
}

fn function_params_for(parsed: &ParsedRef, is_last_component: bool) -> Option<&[String]> {
    if is_last_component && parsed.has_function_parameters {
        Some(parsed.function_parameters.as_slice())
    } else {
        None
    }
}
