//! Pass G: Javadoc finalization (§4.G).
//!
//! The last pass, so every member list it looks at (to decide whether
//! an overload set needs a synthesized brief, or whether a function's
//! parameters match its documented ones) is already in its final
//! shape. Runs, per entity, in this order: resolve `@ref`/autolink
//! targets, resolve `@relates` back-references, resolve
//! `@copydoc`/`@copybrief`/`@copydetails`, trim and prune empty blocks,
//! synthesize a brief when none was written, unindent code blocks,
//! synthesize missing function metadata, sync the side-channel lists
//! from block-level commands, then synthesize briefs for folded
//! overload sets.

use crate::config::Config;
use crate::corpus::Corpus;
use crate::diagnostic::{Diagnostics, Severity};
use crate::error::Result;
use crate::lookup::{self, LookupCache};
use crate::model::{
    Arity, Block, CopyParts, FunctionClass, Inline, Javadoc, OperatorKind, OverloadsInfo,
    Param as DocParam, Returns, SymbolId, TParam, Throws,
};
use crate::parse_ref;
use std::collections::HashMap;

pub fn run(
    corpus: &mut Corpus,
    config: &Config,
    cache: &mut LookupCache,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    resolve_references(corpus, cache, config, diagnostics);
    resolve_relates_directives(corpus, cache, config, diagnostics);
    resolve_copy_directives(corpus, cache, config, diagnostics);
    trim_and_prune_blocks(corpus);
    if config.auto_brief {
        synthesize_briefs(corpus);
    }
    unindent_code_blocks(corpus);
    if config.auto_function_metadata {
        synthesize_function_metadata(corpus);
    }
    sync_side_channels(corpus);
    synthesize_overload_briefs(corpus);
    Ok(())
}

fn diagnose(diagnostics: &mut Diagnostics, config: &Config, subject: SymbolId, message: String) {
    let severity = if config.warnings_as_errors {
        Severity::Error
    } else {
        Severity::Warn
    };
    diagnostics.push_about(severity, Some(subject), "javadoc", message);
}

// --- step 1: reference resolution --------------------------------------

fn resolve_references(
    corpus: &mut Corpus,
    cache: &mut LookupCache,
    config: &Config,
    diagnostics: &mut Diagnostics,
) {
    let ids: Vec<SymbolId> = corpus.ids().collect();
    for id in ids {
        let texts: Vec<String> = match corpus.get(id).and_then(|info| info.javadoc()) {
            Some(doc) => collect_reference_texts(doc),
            None => continue,
        };
        if texts.is_empty() {
            continue;
        }

        let mut resolved: HashMap<String, SymbolId> = HashMap::new();
        for text in &texts {
            if resolved.contains_key(text) {
                continue;
            }
            let outcome = parse_ref::parse(text).and_then(|parsed| lookup::resolve(corpus, cache, id, &parsed));
            match outcome {
                Ok(target) => {
                    resolved.insert(text.clone(), target);
                }
                Err(_) => diagnose(diagnostics, config, id, format!("unresolved reference '{text}'")),
            }
        }

        if let Some(info) = corpus.get_mut(id) {
            if let Some(doc) = info.header_mut().javadoc.as_mut() {
                for block in all_blocks_mut(doc) {
                    for inline in block.inline_children_mut() {
                        if let Inline::Reference { text, id: ref_id } = inline {
                            if let Some(target) = resolved.get(text) {
                                *ref_id = *target;
                            }
                        }
                    }
                }
            }
        }
    }
}

fn collect_reference_texts(doc: &Javadoc) -> Vec<String> {
    let mut texts = Vec::new();
    for block in all_blocks(doc) {
        for inline in block.inline_children() {
            if let Inline::Reference { text, id } = inline {
                if id.is_invalid() {
                    texts.push(text.clone());
                }
            }
        }
    }
    texts
}

// --- step 2: @relates ----------------------------------------------------

/// `@relates` only makes sense on a function: it names some other
/// (usually non-function) entity the function should be cross-linked
/// from. Resolves each target, rejects the directive outright when the
/// subject isn't a function, and maintains the bidirectional
/// `relates`/`related` edge pair. Unresolved targets are dropped
/// silently (§4.G step 2 "keep only entries whose id resolved"); every
/// `Block::Relates` is removed from `blocks` once processed, whether or
/// not it resolved.
fn resolve_relates_directives(
    corpus: &mut Corpus,
    cache: &mut LookupCache,
    config: &Config,
    diagnostics: &mut Diagnostics,
) {
    let ids: Vec<SymbolId> = corpus.ids().collect();
    for id in ids {
        let targets: Vec<String> = match corpus.get(id).and_then(|info| info.javadoc()) {
            Some(doc) => collect_relates_targets(doc),
            None => continue,
        };
        if targets.is_empty() {
            continue;
        }

        let is_function = matches!(corpus.get(id), Some(crate::model::Info::Function(_)));
        if !is_function {
            diagnose(
                diagnostics,
                config,
                id,
                "@relates is only valid on a function".to_string(),
            );
            remove_relates_blocks(corpus, id);
            continue;
        }

        let mut resolved_targets = Vec::new();
        for text in &targets {
            match parse_ref::parse(text).and_then(|parsed| lookup::resolve(corpus, cache, id, &parsed)) {
                Ok(target_id) => resolved_targets.push(target_id),
                Err(_) => diagnose(diagnostics, config, id, format!("unresolved @relates target '{text}'")),
            }
        }

        for target_id in &resolved_targets {
            if let Some(info) = corpus.get_mut(id) {
                if let Some(doc) = info.header_mut().javadoc.as_mut() {
                    if !doc.relates.contains(target_id) {
                        doc.relates.push(*target_id);
                    }
                }
            }
            if let Some(target) = corpus.get_mut(*target_id) {
                if let Some(doc) = target.header_mut().javadoc.as_mut() {
                    if !doc.related.contains(&id) {
                        doc.related.push(id);
                    }
                } else {
                    let mut doc = Javadoc::default();
                    doc.related.push(id);
                    target.header_mut().javadoc = Some(doc);
                }
            }
        }

        remove_relates_blocks(corpus, id);
    }
}

fn collect_relates_targets(doc: &Javadoc) -> Vec<String> {
    doc.blocks
        .iter()
        .filter_map(|block| match block {
            Block::Relates(target) => Some(target.clone()),
            _ => None,
        })
        .collect()
}

fn remove_relates_blocks(corpus: &mut Corpus, id: SymbolId) {
    if let Some(info) = corpus.get_mut(id) {
        if let Some(doc) = info.header_mut().javadoc.as_mut() {
            doc.blocks.retain(|b| !matches!(b, Block::Relates(_)));
        }
    }
}

// --- step 3: @copydoc / @copybrief / @copydetails -----------------------

/// Everything a `@copydoc`/`@copybrief`/`@copydetails` directive can
/// pull in from its target, beyond the brief and the block tree (§3
/// "Copy directives", §4.G step 3).
struct CopyImport {
    brief: Option<Block>,
    blocks: Vec<Block>,
    returns: Vec<Returns>,
    params: Vec<DocParam>,
    tparams: Vec<TParam>,
    exceptions: Vec<Throws>,
    sees: Vec<Block>,
    preconditions: Vec<Block>,
    postconditions: Vec<Block>,
}

fn resolve_copy_directives(
    corpus: &mut Corpus,
    cache: &mut LookupCache,
    config: &Config,
    diagnostics: &mut Diagnostics,
) {
    let ids: Vec<SymbolId> = corpus.ids().collect();
    let mut finalized: std::collections::HashSet<SymbolId> = std::collections::HashSet::new();
    for id in ids {
        resolve_copy_directives_for(corpus, cache, config, diagnostics, id, &mut finalized, &mut Vec::new());
    }
}

/// Resolves `id`'s own copy directives, first recursively resolving
/// whatever copy directives its targets carry, so a chain of
/// `@copydoc`s always imports fully-merged documentation rather than a
/// target's still-unresolved directive text (§4.G step 3). `stack`
/// guards against a `@copydoc` cycle; a target already on it is
/// reported and skipped rather than recursed into.
fn resolve_copy_directives_for(
    corpus: &mut Corpus,
    cache: &mut LookupCache,
    config: &Config,
    diagnostics: &mut Diagnostics,
    id: SymbolId,
    finalized: &mut std::collections::HashSet<SymbolId>,
    stack: &mut Vec<SymbolId>,
) {
    if finalized.contains(&id) {
        return;
    }

    let directives: Vec<(String, CopyParts)> = match corpus.get(id).and_then(|info| info.javadoc()) {
        Some(doc) => collect_copy_directives(doc),
        None => {
            finalized.insert(id);
            return;
        }
    };
    if directives.is_empty() {
        finalized.insert(id);
        return;
    }

    stack.push(id);
    let mut imports: HashMap<String, CopyImport> = HashMap::new();
    for (target_text, _) in &directives {
        if imports.contains_key(target_text) {
            continue;
        }
        let target_id = match parse_ref::parse(target_text).and_then(|parsed| {
            lookup::resolve(corpus, cache, id, &parsed)
        }) {
            Ok(target_id) => target_id,
            Err(_) => {
                diagnose(diagnostics, config, id, format!("copy target '{target_text}' could not be resolved"));
                continue;
            }
        };

        if stack.contains(&target_id) {
            diagnose(diagnostics, config, id, format!("copy target '{target_text}' forms a cycle"));
            continue;
        }
        resolve_copy_directives_for(corpus, cache, config, diagnostics, target_id, finalized, stack);

        match corpus.get(target_id).and_then(|info| info.javadoc()) {
            Some(target_doc) => {
                imports.insert(target_text.clone(), CopyImport {
                    brief: target_doc.brief.clone(),
                    blocks: target_doc.blocks.clone(),
                    returns: target_doc.returns.clone(),
                    params: target_doc.params.clone(),
                    tparams: target_doc.tparams.clone(),
                    exceptions: target_doc.exceptions.clone(),
                    sees: target_doc.sees.clone(),
                    preconditions: target_doc.preconditions.clone(),
                    postconditions: target_doc.postconditions.clone(),
                });
            }
            None => diagnose(
                diagnostics,
                config,
                id,
                format!("copy target '{target_text}' has no documentation"),
            ),
        }
    }
    stack.pop();

    let own_param_names = own_param_names(corpus, id);
    let own_tparam_names = own_tparam_names(corpus, id);

    if let Some(info) = corpus.get_mut(id) {
        if let Some(doc) = info.header_mut().javadoc.as_mut() {
            apply_copy_directives(doc, &imports, &own_param_names, &own_tparam_names);
        }
    }
    finalized.insert(id);
}

fn own_param_names(corpus: &Corpus, id: SymbolId) -> Vec<String> {
    match corpus.get(id) {
        Some(crate::model::Info::Function(f)) => f.params.iter().map(|p| p.name.clone()).collect(),
        _ => Vec::new(),
    }
}

fn own_tparam_names(corpus: &Corpus, id: SymbolId) -> Vec<String> {
    let template = match corpus.get(id) {
        Some(crate::model::Info::Function(f)) => f.template.as_ref(),
        Some(crate::model::Info::Record(r)) => r.template.as_ref(),
        Some(crate::model::Info::Typedef(t)) => t.template.as_ref(),
        Some(crate::model::Info::Variable(v)) => v.template.as_ref(),
        Some(crate::model::Info::Guide(g)) => g.template.as_ref(),
        _ => None,
    };
    template.map(|t| t.params.clone()).unwrap_or_default()
}

fn collect_copy_directives(doc: &Javadoc) -> Vec<(String, CopyParts)> {
    let mut out = Vec::new();
    for block in all_blocks(doc) {
        if let Some((target, parts)) = extract_single_copied(block) {
            out.push((target, parts));
        }
    }
    out
}

fn extract_single_copied(block: &Block) -> Option<(String, CopyParts)> {
    let children = block.inline_children();
    if children.len() == 1 {
        if let Inline::Copied { target, parts, .. } = &children[0] {
            return Some((target.clone(), *parts));
        }
    }
    None
}

fn apply_copy_directives(
    doc: &mut Javadoc,
    imports: &HashMap<String, CopyImport>,
    own_param_names: &[String],
    own_tparam_names: &[String],
) {
    let mut new_blocks = Vec::with_capacity(doc.blocks.len());
    let mut merged: Vec<&CopyImport> = Vec::new();
    for block in doc.blocks.drain(..) {
        match extract_single_copied(&block) {
            Some((target, parts)) => {
                if let Some(import) = imports.get(&target) {
                    match parts {
                        CopyParts::All => {
                            if doc.brief.is_none() {
                                doc.brief = import.brief.clone();
                            }
                            new_blocks.extend(import.blocks.clone());
                            merged.push(import);
                        }
                        CopyParts::Brief => {
                            if doc.brief.is_none() {
                                doc.brief = import.brief.clone();
                            }
                        }
                        CopyParts::Description => {
                            new_blocks.extend(import.blocks.clone());
                            merged.push(import);
                        }
                    }
                }
                // The directive itself never survives finalization,
                // whether or not its target resolved.
            }
            None => new_blocks.push(block),
        }
    }
    doc.blocks = new_blocks;

    for import in merged {
        merge_side_channels(doc, import, own_param_names, own_tparam_names);
    }
}

/// Merges an imported target's side-channel documentation (everything
/// besides brief/blocks) into `doc`: a `@param`/`@tparam` is only
/// imported when it names one of this entity's own
/// parameters/template-parameters and isn't already documented;
/// `returns`/`exceptions` are imported wholesale only if `doc` doesn't
/// already document them; `sees`/`preconditions`/`postconditions` are
/// unioned with dedup (§4.G step 3).
fn merge_side_channels(
    doc: &mut Javadoc,
    import: &CopyImport,
    own_param_names: &[String],
    own_tparam_names: &[String],
) {
    for param in &import.params {
        if own_param_names.iter().any(|n| n == &param.name)
            && !doc.params.iter().any(|p| p.name == param.name)
        {
            doc.params.push(param.clone());
        }
    }
    for tparam in &import.tparams {
        if own_tparam_names.iter().any(|n| n == &tparam.name)
            && !doc.tparams.iter().any(|p| p.name == tparam.name)
        {
            doc.tparams.push(tparam.clone());
        }
    }
    if doc.returns.is_empty() {
        doc.returns.extend(import.returns.iter().cloned());
    }
    for exception in &import.exceptions {
        if !doc
            .exceptions
            .iter()
            .any(|e| e.exception_name == exception.exception_name)
        {
            doc.exceptions.push(exception.clone());
        }
    }
    for block in &import.sees {
        if !doc.sees.contains(block) {
            doc.sees.push(block.clone());
        }
    }
    for block in &import.preconditions {
        if !doc.preconditions.contains(block) {
            doc.preconditions.push(block.clone());
        }
    }
    for block in &import.postconditions {
        if !doc.postconditions.contains(block) {
            doc.postconditions.push(block.clone());
        }
    }
}

// --- step 4: trim and prune empty blocks --------------------------------

fn trim_and_prune_blocks(corpus: &mut Corpus) {
    let ids: Vec<SymbolId> = corpus.ids().collect();
    for id in ids {
        if let Some(info) = corpus.get_mut(id) {
            if let Some(doc) = info.header_mut().javadoc.as_mut() {
                trim_javadoc(doc);
            }
        }
    }
}

fn trim_javadoc(doc: &mut Javadoc) {
    trim_blocks(&mut doc.blocks);
    if let Some(brief) = doc.brief.as_mut() {
        trim_block(brief);
    }
    for p in doc.params.iter_mut() {
        trim_blocks(&mut p.description);
    }
    for p in doc.tparams.iter_mut() {
        trim_blocks(&mut p.description);
    }
    for r in doc.returns.iter_mut() {
        trim_blocks(&mut r.description);
    }
    for t in doc.exceptions.iter_mut() {
        trim_blocks(&mut t.description);
    }
    trim_blocks(&mut doc.sees);
    trim_blocks(&mut doc.preconditions);
    trim_blocks(&mut doc.postconditions);
}

fn trim_blocks(blocks: &mut Vec<Block>) {
    for block in blocks.iter_mut() {
        trim_block(block);
    }
    blocks.retain(|b| !b.is_effectively_empty());
}

fn trim_block(block: &mut Block) {
    if let Block::UnorderedList(items) = block {
        trim_blocks(items);
        return;
    }
    let is_code = block.is_code();
    let children = block.inline_children_mut();
    if !is_code {
        for inline in children.iter_mut() {
            if let Some(text) = inline.text_mut() {
                *text = collapse_whitespace(text);
            }
        }
    }
    children.retain(|inline| !inline.is_empty_text());
}

fn collapse_whitespace(s: &str) -> String {
    let leading = s.starts_with(char::is_whitespace);
    let trailing = s.len() > 1 && s.ends_with(char::is_whitespace);
    let mut collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if leading && !collapsed.is_empty() {
        collapsed.insert(0, ' ');
    }
    if trailing && !collapsed.is_empty() {
        collapsed.push(' ');
    }
    collapsed
}

// --- step 5: auto-brief synthesis ---------------------------------------

fn synthesize_briefs(corpus: &mut Corpus) {
    let ids: Vec<SymbolId> = corpus.ids().collect();
    for id in ids {
        if let Some(info) = corpus.get_mut(id) {
            if let Some(doc) = info.header_mut().javadoc.as_mut() {
                if doc.brief.is_none() {
                    if let Some(source) = doc
                        .blocks
                        .iter()
                        .find(|b| matches!(b, Block::Paragraph(_) | Block::Details(_)))
                    {
                        doc.brief = Some(brief_from_block(source));
                    }
                }
            }
        }
    }
}

fn brief_from_block(block: &Block) -> Block {
    let text: String = block
        .inline_children()
        .iter()
        .filter_map(plain_text)
        .collect::<Vec<_>>()
        .join("");
    let first_sentence = text.split(". ").next().unwrap_or("").trim();
    let mut sentence = first_sentence.trim_end_matches('.').to_string();
    if !sentence.is_empty() {
        sentence.push('.');
    }
    Block::Brief(vec![Inline::Text(sentence)])
}

fn plain_text(inline: &Inline) -> Option<String> {
    match inline {
        Inline::Text(s) => Some(s.clone()),
        Inline::Styled { text, .. } => Some(text.clone()),
        Inline::Link { text, .. } => Some(text.clone()),
        _ => None,
    }
}

// --- step 6: code block unindenting --------------------------------------

fn unindent_code_blocks(corpus: &mut Corpus) {
    let ids: Vec<SymbolId> = corpus.ids().collect();
    for id in ids {
        if let Some(info) = corpus.get_mut(id) {
            if let Some(doc) = info.header_mut().javadoc.as_mut() {
                for block in all_blocks_mut(doc) {
                    if block.is_code() {
                        for inline in block.inline_children_mut() {
                            if let Inline::Text(text) = inline {
                                *text = dedent(text);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn dedent(s: &str) -> String {
    let lines: Vec<&str> = s.split('\n').collect();
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                &l[min_indent.min(l.len())..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// --- step 8: auto function metadata synthesis ---------------------------

/// Which special member a constructor turns out to be, judged by
/// parameter shape against the enclosing record (§4.G step 8).
#[derive(Clone, Copy, PartialEq, Eq)]
enum SpecialMember {
    None,
    DefaultConstructor,
    CopyConstructor,
    MoveConstructor,
}

fn classify_special_member(
    class: FunctionClass,
    params: &[crate::model::Param],
    enclosing_name: Option<&str>,
) -> SpecialMember {
    if class != FunctionClass::Constructor {
        return SpecialMember::None;
    }
    match params {
        [] => SpecialMember::DefaultConstructor,
        [p] => {
            let names_enclosing = enclosing_name.is_some_and(|n| p.ty.name == n);
            if names_enclosing && p.ty.is_lvalue_reference && p.ty.is_const {
                SpecialMember::CopyConstructor
            } else if names_enclosing && p.ty.is_rvalue_reference {
                SpecialMember::MoveConstructor
            } else {
                SpecialMember::None
            }
        }
        _ => SpecialMember::None,
    }
}

/// A conventional name for a parameter the declaration left unnamed,
/// chosen by the function's role rather than its position alone (§4.G
/// step 8): `other` for a copy/move constructor's sole argument, the
/// stream name for `operator<<`/`operator>>`, `lhs`/`rhs` for other
/// binary operators, `value` otherwise.
fn conventional_param_name(
    index: usize,
    total: usize,
    operator: OperatorKind,
    special: SpecialMember,
) -> &'static str {
    if matches!(special, SpecialMember::CopyConstructor | SpecialMember::MoveConstructor) {
        return "other";
    }
    match operator {
        OperatorKind::LessLess if total == 2 => {
            if index == 0 {
                "os"
            } else {
                "value"
            }
        }
        OperatorKind::GreaterGreater if total == 2 => {
            if index == 0 {
                "is"
            } else {
                "value"
            }
        }
        _ if total == 2 => {
            if index == 0 {
                "lhs"
            } else {
                "rhs"
            }
        }
        _ => "value",
    }
}

fn synthesize_function_brief(
    class: FunctionClass,
    operator: OperatorKind,
    conversion_type_name: Option<&str>,
    special: SpecialMember,
    param_count: usize,
) -> Option<String> {
    match class {
        FunctionClass::Constructor => Some(
            match special {
                SpecialMember::DefaultConstructor => "Default constructor.",
                SpecialMember::CopyConstructor => "Copy constructor.",
                SpecialMember::MoveConstructor => "Move constructor.",
                SpecialMember::None => "Constructs the object.",
            }
            .to_string(),
        ),
        FunctionClass::Destructor => Some("Destroys the object.".to_string()),
        FunctionClass::Conversion => Some(format!(
            "Conversion to {}.",
            conversion_type_name.unwrap_or("the target type")
        )),
        FunctionClass::Operator => {
            let arity = if param_count == 0 { Arity::Unary } else { Arity::Binary };
            let mut name = operator.readable_name(arity).to_string();
            if let Some(first) = name.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            Some(format!("{name} operator."))
        }
        FunctionClass::Normal => None,
    }
}

/// A role-based description for a parameter still lacking one (§4.G
/// step 8): the copy/move-constructor parameter gets a description
/// naming what it's constructed from, everything else falls back to
/// naming the parameter itself.
fn synthesize_param_description(special: SpecialMember, name: &str) -> String {
    match special {
        SpecialMember::CopyConstructor => "The object to copy construct from.".to_string(),
        SpecialMember::MoveConstructor => "The object to move construct from.".to_string(),
        _ => format!("The {name} parameter."),
    }
}

fn synthesize_function_metadata(corpus: &mut Corpus) {
    let ids: Vec<SymbolId> = corpus.ids().collect();
    for id in ids {
        let snapshot = match corpus.get(id) {
            Some(crate::model::Info::Function(f)) => {
                let enclosing_name = f.header.parent.and_then(|p| corpus.get(p)).map(|i| i.name().to_string());
                Some((
                    f.params.clone(),
                    f.return_type.name.clone(),
                    f.class,
                    f.operator,
                    f.conversion_type.as_ref().map(|t| t.name.clone()),
                    enclosing_name,
                ))
            }
            _ => None,
        };
        let Some((mut params, return_type_name, class, operator, conversion_type_name, enclosing_name)) =
            snapshot
        else {
            continue;
        };

        let special = classify_special_member(class, &params, enclosing_name.as_deref());
        let total = params.len();
        let mut renamed = false;
        for (index, param) in params.iter_mut().enumerate() {
            if param.name.is_empty() {
                param.name = conventional_param_name(index, total, operator, special).to_string();
                renamed = true;
            }
        }
        if renamed {
            if let Some(crate::model::Info::Function(f)) = corpus.get_mut(id) {
                f.params = params.clone();
            }
        }

        if let Some(info) = corpus.get_mut(id) {
            if let Some(doc) = info.header_mut().javadoc.as_mut() {
                if doc.brief.is_none() {
                    if let Some(text) = synthesize_function_brief(
                        class,
                        operator,
                        conversion_type_name.as_deref(),
                        special,
                        total,
                    ) {
                        doc.brief = Some(Block::Brief(vec![Inline::Text(text)]));
                    }
                }
                for param in &params {
                    if !doc.params.iter().any(|p| p.name == param.name) {
                        doc.params.push(DocParam {
                            name: param.name.clone(),
                            description: vec![Block::Paragraph(vec![Inline::Text(
                                synthesize_param_description(special, &param.name),
                            )])],
                            synthesized: true,
                        });
                    }
                }
                if return_type_name != "void" && doc.returns.is_empty() {
                    doc.returns.push(Returns {
                        description: vec![Block::Paragraph(vec![Inline::Text(
                            "The return value.".to_string(),
                        )])],
                        synthesized: true,
                    });
                }
            }
        }
    }
}

// --- side-channel sync: lift block-level commands into doc's lists ------

fn sync_side_channels(corpus: &mut Corpus) {
    let ids: Vec<SymbolId> = corpus.ids().collect();
    for id in ids {
        if let Some(info) = corpus.get_mut(id) {
            if let Some(doc) = info.header_mut().javadoc.as_mut() {
                sync_doc_side_channels(doc);
            }
        }
    }
}

fn sync_doc_side_channels(doc: &mut Javadoc) {
    for block in doc.blocks.clone() {
        match block {
            Block::Param { name, content, .. } => {
                if !doc.params.iter().any(|p| p.name == name) {
                    doc.params.push(DocParam {
                        name,
                        description: vec![Block::Paragraph(content)],
                        synthesized: false,
                    });
                }
            }
            Block::TParam { name, content } => {
                if !doc.tparams.iter().any(|p| p.name == name) {
                    doc.tparams.push(TParam {
                        name,
                        description: vec![Block::Paragraph(content)],
                    });
                }
            }
            Block::Returns(content) => {
                if doc.returns.is_empty() {
                    doc.returns.push(Returns {
                        description: vec![Block::Paragraph(content)],
                        synthesized: false,
                    });
                }
            }
            Block::Throws { exception, content } => {
                if !doc.exceptions.iter().any(|t| t.exception_name == exception) {
                    doc.exceptions.push(Throws {
                        exception_name: exception,
                        description: vec![Block::Paragraph(content)],
                    });
                }
            }
            Block::See(content) => {
                let candidate = Block::Paragraph(content);
                if !doc.sees.contains(&candidate) {
                    doc.sees.push(candidate);
                }
            }
            Block::Precondition(content) => {
                let candidate = Block::Paragraph(content);
                if !doc.preconditions.contains(&candidate) {
                    doc.preconditions.push(candidate);
                }
            }
            Block::Postcondition(content) => {
                let candidate = Block::Paragraph(content);
                if !doc.postconditions.contains(&candidate) {
                    doc.postconditions.push(candidate);
                }
            }
            _ => {}
        }
    }
}

// --- step 9: overload-set brief synthesis --------------------------------

fn synthesize_overload_briefs(corpus: &mut Corpus) {
    let ids: Vec<SymbolId> = corpus
        .iter()
        .filter(|info| matches!(info, crate::model::Info::Overloads(_)))
        .map(crate::model::Info::id)
        .collect();

    for id in ids {
        let snapshot = match corpus.get(id) {
            Some(crate::model::Info::Overloads(o)) if o.header.javadoc.is_none() => {
                Some((o.members.ids(), overload_brief_text(o)))
            }
            _ => None,
        };
        let Some((member_ids, text)) = snapshot else {
            continue;
        };
        let aggregated = aggregate_overload_side_channels(corpus, &member_ids);
        if let Some(info) = corpus.get_mut(id) {
            info.header_mut().javadoc = Some(Javadoc {
                brief: Some(Block::Brief(vec![Inline::Text(text)])),
                returns: aggregated.returns,
                params: aggregated.params,
                tparams: aggregated.tparams,
                exceptions: aggregated.exceptions,
                sees: aggregated.sees,
                preconditions: aggregated.preconditions,
                postconditions: aggregated.postconditions,
                ..Default::default()
            });
        }
    }
}

/// Unions every side-channel documentation field across an overload
/// set's members, deduplicated by the same key used elsewhere for that
/// field (param/tparam name, exception type, or structural equality
/// for the block-shaped lists), so an overload set's synthesized
/// javadoc reflects the union of what each individual overload
/// documents (§4.G step 9).
fn aggregate_overload_side_channels(corpus: &Corpus, member_ids: &[SymbolId]) -> CopyImport {
    let mut aggregate = CopyImport {
        brief: None,
        blocks: Vec::new(),
        returns: Vec::new(),
        params: Vec::new(),
        tparams: Vec::new(),
        exceptions: Vec::new(),
        sees: Vec::new(),
        preconditions: Vec::new(),
        postconditions: Vec::new(),
    };
    for member_id in member_ids {
        let Some(doc) = corpus.get(*member_id).and_then(|info| info.javadoc()) else {
            continue;
        };
        for r in &doc.returns {
            if !aggregate.returns.contains(r) {
                aggregate.returns.push(r.clone());
            }
        }
        for p in &doc.params {
            if !aggregate.params.iter().any(|q| q.name == p.name) {
                aggregate.params.push(p.clone());
            }
        }
        for t in &doc.tparams {
            if !aggregate.tparams.iter().any(|q| q.name == t.name) {
                aggregate.tparams.push(t.clone());
            }
        }
        for e in &doc.exceptions {
            if !aggregate
                .exceptions
                .iter()
                .any(|q| q.exception_name == e.exception_name)
            {
                aggregate.exceptions.push(e.clone());
            }
        }
        for b in &doc.sees {
            if !aggregate.sees.contains(b) {
                aggregate.sees.push(b.clone());
            }
        }
        for b in &doc.preconditions {
            if !aggregate.preconditions.contains(b) {
                aggregate.preconditions.push(b.clone());
            }
        }
        for b in &doc.postconditions {
            if !aggregate.postconditions.contains(b) {
                aggregate.postconditions.push(b.clone());
            }
        }
    }
    aggregate
}

fn overload_brief_text(o: &OverloadsInfo) -> String {
    if o.operator != OperatorKind::None {
        format!("Overloaded {} operator.", o.operator.readable_name(Arity::Binary))
    } else {
        match o.class {
            FunctionClass::Constructor => "Constructs the object.".to_string(),
            FunctionClass::Destructor => "Destroys the object.".to_string(),
            FunctionClass::Conversion => "Converts to another type.".to_string(),
            FunctionClass::Normal | FunctionClass::Operator => {
                format!("Overloads of {}.", o.header.name)
            }
        }
    }
}

// --- shared block-tree walkers ------------------------------------------

fn all_blocks(doc: &Javadoc) -> Vec<&Block> {
    let mut out = Vec::new();
    for block in &doc.blocks {
        flatten_block(block, &mut out);
    }
    if let Some(b) = doc.brief.as_ref() {
        flatten_block(b, &mut out);
    }
    for p in &doc.params {
        for b in &p.description {
            flatten_block(b, &mut out);
        }
    }
    for p in &doc.tparams {
        for b in &p.description {
            flatten_block(b, &mut out);
        }
    }
    for r in &doc.returns {
        for b in &r.description {
            flatten_block(b, &mut out);
        }
    }
    for t in &doc.exceptions {
        for b in &t.description {
            flatten_block(b, &mut out);
        }
    }
    for b in doc.sees.iter().chain(&doc.preconditions).chain(&doc.postconditions) {
        flatten_block(b, &mut out);
    }
    out
}

fn flatten_block<'a>(block: &'a Block, out: &mut Vec<&'a Block>) {
    out.push(block);
    if let Block::UnorderedList(items) = block {
        for item in items {
            flatten_block(item, out);
        }
    }
}

fn all_blocks_mut(doc: &mut Javadoc) -> Vec<&mut Block> {
    let mut out = Vec::new();
    for block in doc.blocks.iter_mut() {
        flatten_block_mut(block, &mut out);
    }
    if let Some(b) = doc.brief.as_mut() {
        flatten_block_mut(b, &mut out);
    }
    for p in doc.params.iter_mut() {
        for b in p.description.iter_mut() {
            flatten_block_mut(b, &mut out);
        }
    }
    for p in doc.tparams.iter_mut() {
        for b in p.description.iter_mut() {
            flatten_block_mut(b, &mut out);
        }
    }
    for r in doc.returns.iter_mut() {
        for b in r.description.iter_mut() {
            flatten_block_mut(b, &mut out);
        }
    }
    for t in doc.exceptions.iter_mut() {
        for b in t.description.iter_mut() {
            flatten_block_mut(b, &mut out);
        }
    }
    for b in doc
        .sees
        .iter_mut()
        .chain(doc.preconditions.iter_mut())
        .chain(doc.postconditions.iter_mut())
    {
        flatten_block_mut(b, &mut out);
    }
    out
}

fn flatten_block_mut<'a>(block: &'a mut Block, out: &mut Vec<&'a mut Block>) {
    if let Block::UnorderedList(items) = block {
        for item in items.iter_mut() {
            flatten_block_mut(item, out);
        }
        return;
    }
    out.push(block);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InfoHeader, NamespaceInfo};

    fn namespace_with_doc(id: u8, name: &str, doc: Javadoc) -> crate::model::Info {
        let mut header = InfoHeader::new(SymbolId([id; 20]), name);
        header.javadoc = Some(doc);
        crate::model::Info::Namespace(NamespaceInfo {
            header,
            members: Vec::new(),
            usings: Vec::new(),
            is_inline: false,
            is_anonymous: false,
        })
    }

    #[test]
    fn auto_brief_takes_first_sentence() {
        let mut corpus = Corpus::new();
        let doc = Javadoc {
            blocks: vec![Block::Paragraph(vec![Inline::Text(
                "Does a thing. More detail here.".to_string(),
            )])],
            ..Default::default()
        };
        corpus.insert(namespace_with_doc(1, "ns", doc));
        synthesize_briefs(&mut corpus);
        let doc = corpus.get(SymbolId([1u8; 20])).unwrap().javadoc().unwrap();
        assert_eq!(
            doc.brief,
            Some(Block::Brief(vec![Inline::Text("Does a thing.".to_string())]))
        );
    }

    #[test]
    fn trimming_collapses_internal_whitespace_and_drops_empty_blocks() {
        let mut corpus = Corpus::new();
        let doc = Javadoc {
            blocks: vec![
                Block::Paragraph(vec![Inline::Text("a   b".to_string())]),
                Block::Paragraph(vec![Inline::Text("   ".to_string())]),
            ],
            ..Default::default()
        };
        corpus.insert(namespace_with_doc(1, "ns", doc));
        trim_and_prune_blocks(&mut corpus);
        let doc = corpus.get(SymbolId([1u8; 20])).unwrap().javadoc().unwrap();
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(
            doc.blocks[0],
            Block::Paragraph(vec![Inline::Text("a b".to_string())])
        );
    }

    #[test]
    fn code_blocks_are_unindented_not_collapsed() {
        let mut corpus = Corpus::new();
        let doc = Javadoc {
            blocks: vec![Block::Code(vec![Inline::Text(
                "    let x = 1;\n    let y = 2;".to_string(),
            )])],
            ..Default::default()
        };
        corpus.insert(namespace_with_doc(1, "ns", doc));
        unindent_code_blocks(&mut corpus);
        let doc = corpus.get(SymbolId([1u8; 20])).unwrap().javadoc().unwrap();
        assert_eq!(
            doc.blocks[0],
            Block::Code(vec![Inline::Text("let x = 1;\nlet y = 2;".to_string())])
        );
    }

    #[test]
    fn overload_set_without_javadoc_gets_a_synthesized_brief() {
        let mut corpus = Corpus::new();
        corpus.insert(crate::model::Info::Overloads(OverloadsInfo {
            header: InfoHeader::new(SymbolId([1u8; 20]), "operator+"),
            members: crate::model::OverloadMembers::Free(vec![SymbolId([2u8; 20])]),
            class: FunctionClass::Operator,
            operator: OperatorKind::Plus,
            is_static: false,
        }));
        synthesize_overload_briefs(&mut corpus);
        let doc = corpus.get(SymbolId([1u8; 20])).unwrap().javadoc().unwrap();
        assert_eq!(
            doc.brief,
            Some(Block::Brief(vec![Inline::Text(
                "Overloaded addition operator.".to_string()
            )]))
        );
    }
}
