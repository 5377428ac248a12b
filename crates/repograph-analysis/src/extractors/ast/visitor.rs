//! Single-pass AST walk collecting imports, declarations, exports, and calls.

use oxc_ast::ast::{
    Argument, ArrowFunctionExpression, AssignmentExpression, AssignmentTarget,
    BindingPatternKind, CallExpression, Class, Declaration, ExportDefaultDeclaration,
    ExportDefaultDeclarationKind, ExportNamedDeclaration, Expression, Function,
    IdentifierReference, ImportDeclaration, ImportDeclarationSpecifier, ImportExpression,
    MethodDefinition, ModuleDeclaration, ModuleExportName, NewExpression, ObjectExpression,
    ObjectProperty, ObjectPropertyKind, Program, PropertyDefinition, PropertyKey,
    VariableDeclarator,
};
use oxc_ast_visit::{Visit, walk};
use oxc_semantic::{ScopeFlags, Scoping, SymbolId};
use oxc_span::Span;
use rustc_hash::{FxHashMap, FxHashSet};

use repograph_graph::{
    BindingType, CallSite, FunctionKind, FunctionRecord, ImportBinding, ImportKind,
    ImportSpecifier,
};

use crate::extractors::FileExtraction;
use crate::extractors::line_index::LineIndex;

/// What a module-level symbol was bound to.
#[derive(Debug, Clone)]
struct BoundName {
    binding: usize,
    imported: String,
    binding_type: BindingType,
    /// `local.member()` resolves to the target's export `member`.
    member_calls: bool,
}

pub(super) struct FileVisitor<'s> {
    path: &'s str,
    scoping: &'s Scoping,
    lines: &'s LineIndex<'s>,

    imports: Vec<ImportBinding>,
    bound: FxHashMap<SymbolId, BoundName>,
    /// ES import locals by name, for `export { local }` of an import.
    imported_locals: FxHashMap<String, BoundName>,
    /// Start offsets of `require()` calls already recorded by a declarator.
    recorded_requires: FxHashSet<u32>,

    records: Vec<FunctionRecord>,
    by_span: FxHashMap<(u32, u32), usize>,
    top_level: FxHashMap<String, usize>,
    used_ids: FxHashSet<String>,
    anonymous: usize,
    module_record: Option<usize>,

    /// Enclosing function-like records, innermost last.
    scope_stack: Vec<usize>,
    class_stack: Vec<String>,

    calls: Vec<CallSite>,
    seen_calls: FxHashSet<(usize, String, Option<String>)>,
    deferred_exports: Vec<(String, String)>,
}

impl<'s> FileVisitor<'s> {
    pub(super) fn new(path: &'s str, scoping: &'s Scoping, lines: &'s LineIndex<'s>) -> Self {
        Self {
            path,
            scoping,
            lines,
            imports: Vec::new(),
            bound: FxHashMap::default(),
            imported_locals: FxHashMap::default(),
            recorded_requires: FxHashSet::default(),
            records: Vec::new(),
            by_span: FxHashMap::default(),
            top_level: FxHashMap::default(),
            used_ids: FxHashSet::default(),
            anonymous: 0,
            module_record: None,
            scope_stack: Vec::new(),
            class_stack: Vec::new(),
            calls: Vec::new(),
            seen_calls: FxHashSet::default(),
            deferred_exports: Vec::new(),
        }
    }

    /// Record static imports and re-exports before the main walk.
    ///
    /// Import bindings are hoisted, so they must be known before any call
    /// expression is visited.
    pub(super) fn collect_module_declarations(&mut self, program: &Program<'_>) {
        for stmt in &program.body {
            let Some(decl) = stmt.as_module_declaration() else {
                continue;
            };
            match decl {
                ModuleDeclaration::ImportDeclaration(import) => self.record_import(import),
                ModuleDeclaration::ExportNamedDeclaration(named) => {
                    if let Some(source) = &named.source {
                        let specifiers = named
                            .specifiers
                            .iter()
                            .map(|spec| {
                                ImportSpecifier::named(
                                    module_export_name(&spec.exported),
                                    module_export_name(&spec.local),
                                )
                            })
                            .collect();
                        self.imports.push(
                            ImportBinding::new(source.value.as_str(), ImportKind::Es)
                                .with_specifiers(specifiers)
                                .reexport(),
                        );
                    }
                }
                ModuleDeclaration::ExportAllDeclaration(all) => {
                    let specifiers = all
                        .exported
                        .as_ref()
                        .map(|name| vec![ImportSpecifier::namespace(module_export_name(name))])
                        .unwrap_or_default();
                    self.imports.push(
                        ImportBinding::new(all.source.value.as_str(), ImportKind::Es)
                            .with_specifiers(specifiers)
                            .reexport(),
                    );
                }
                _ => {}
            }
        }
    }

    pub(super) fn finish(mut self) -> FileExtraction {
        for (local, exported) in std::mem::take(&mut self.deferred_exports) {
            if let Some(&idx) = self.top_level.get(&local) {
                self.export(idx, &exported);
            } else if let Some(bound) = self.imported_locals.get(&local)
                && bound.binding_type != BindingType::Namespace
            {
                let source = self.imports[bound.binding].source.clone();
                let reexport = ImportBinding::new(source, ImportKind::Es)
                    .with_specifiers(vec![ImportSpecifier::named(exported, bound.imported.clone())])
                    .reexport();
                self.imports.push(reexport);
            }
        }
        FileExtraction {
            imports: self.imports,
            functions: self.records,
            calls: self.calls,
            preview: String::new(),
        }
    }

    fn record_import(&mut self, import: &ImportDeclaration<'_>) {
        let binding_idx = self.imports.len();
        let mut binding = ImportBinding::new(import.source.value.as_str(), ImportKind::Es);

        for spec in import.specifiers.iter().flatten() {
            let (specifier, symbol) = match spec {
                ImportDeclarationSpecifier::ImportSpecifier(named) => (
                    ImportSpecifier::named(
                        named.local.name.as_str(),
                        module_export_name(&named.imported),
                    ),
                    named.local.symbol_id.get(),
                ),
                ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => (
                    ImportSpecifier::default(default.local.name.as_str()),
                    default.local.symbol_id.get(),
                ),
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => (
                    ImportSpecifier::namespace(namespace.local.name.as_str()),
                    namespace.local.symbol_id.get(),
                ),
            };
            let bound = BoundName {
                binding: binding_idx,
                imported: specifier.imported_name.clone(),
                binding_type: specifier.binding_type,
                member_calls: specifier.binding_type == BindingType::Namespace,
            };
            self.imported_locals
                .insert(specifier.local_name.clone(), bound.clone());
            if let Some(symbol) = symbol {
                self.bound.insert(symbol, bound);
            }
            binding.specifiers.push(specifier);
        }

        self.imports.push(binding);
    }

    /// `const x = require('m')`, `const { a, b: c } = require('m')`,
    /// `const y = require('m').y`.
    fn record_require_declarator(&mut self, decl: &VariableDeclarator<'_>) {
        let Some(init) = &decl.init else {
            return;
        };
        let (call, member) = match init.get_inner_expression() {
            Expression::StaticMemberExpression(member) => (
                member.object.get_inner_expression(),
                Some(member.property.name.as_str()),
            ),
            other => (other, None),
        };
        let Some((call_span, source)) = self.require_call(call) else {
            return;
        };

        let binding_idx = self.imports.len();
        let mut binding = ImportBinding::new(source, ImportKind::Require);
        let mut bound = Vec::new();

        match (&decl.id.kind, member) {
            (BindingPatternKind::BindingIdentifier(ident), Some(member)) => {
                binding
                    .specifiers
                    .push(ImportSpecifier::named(ident.name.as_str(), member));
                bound.push((ident.symbol_id.get(), member.to_string(), BindingType::Named, false));
            }
            (BindingPatternKind::BindingIdentifier(ident), None) => {
                binding
                    .specifiers
                    .push(ImportSpecifier::default(ident.name.as_str()));
                bound.push((ident.symbol_id.get(), "default".to_string(), BindingType::Default, true));
            }
            (BindingPatternKind::ObjectPattern(pattern), None) => {
                for prop in &pattern.properties {
                    let Some(imported) = property_key_name(&prop.key) else {
                        continue;
                    };
                    if let BindingPatternKind::BindingIdentifier(local) = &prop.value.kind {
                        binding
                            .specifiers
                            .push(ImportSpecifier::named(local.name.as_str(), imported.as_str()));
                        bound.push((local.symbol_id.get(), imported, BindingType::Named, false));
                    }
                }
            }
            _ => {}
        }

        for (symbol, imported, binding_type, member_calls) in bound {
            if let Some(symbol) = symbol {
                self.bound.insert(
                    symbol,
                    BoundName {
                        binding: binding_idx,
                        imported,
                        binding_type,
                        member_calls,
                    },
                );
            }
        }

        self.imports.push(binding);
        self.recorded_requires.insert(call_span.start);
    }

    /// Match `require('literal')` where `require` is not a local binding.
    fn require_call<'e>(&self, expr: &'e Expression<'_>) -> Option<(Span, &'e str)> {
        match expr {
            Expression::CallExpression(call) => self.require_call_of(call),
            _ => None,
        }
    }

    fn require_call_of<'e>(&self, call: &'e CallExpression<'_>) -> Option<(Span, &'e str)> {
        let Expression::Identifier(callee) = call.callee.get_inner_expression() else {
            return None;
        };
        if callee.name != "require" || self.symbol_of(callee).is_some() || call.arguments.len() != 1 {
            return None;
        }
        match &call.arguments[0] {
            Argument::StringLiteral(lit) => Some((call.span, lit.value.as_str())),
            _ => None,
        }
    }

    fn symbol_of(&self, ident: &IdentifierReference<'_>) -> Option<SymbolId> {
        let reference = ident.reference_id.get()?;
        self.scoping.get_reference(reference).symbol_id()
    }

    fn lookup(&self, ident: &IdentifierReference<'_>) -> Option<BoundName> {
        self.symbol_of(ident)
            .and_then(|symbol| self.bound.get(&symbol))
            .cloned()
    }

    /// Register a function-like node once, keyed by its span.
    fn register(&mut self, span: Span, name: Option<&str>, kind: FunctionKind) -> usize {
        let key = (span.start, span.end);
        if let Some(&idx) = self.by_span.get(&key) {
            return idx;
        }

        let (display, kind) = match name {
            Some(name) => (name.to_string(), kind),
            None => {
                self.anonymous += 1;
                let kind = match kind {
                    FunctionKind::Function | FunctionKind::Arrow => FunctionKind::Anonymous,
                    other => other,
                };
                (format!("anonymous_{}", self.anonymous), kind)
            }
        };

        let (line, column) = self.lines.position(span.start);
        let mut local_id = display.clone();
        if self.used_ids.contains(&local_id) {
            local_id = format!("{display}@{line}");
        }
        if self.used_ids.contains(&local_id) {
            local_id = format!("{display}@{line}:{column}");
        }
        self.used_ids.insert(local_id.clone());

        let record = FunctionRecord::new(self.path, &local_id, display, kind)
            .with_span(self.lines.span(span.start, span.end));
        let idx = self.records.len();
        self.records.push(record);
        self.by_span.insert(key, idx);
        idx
    }

    /// Remember a module-level binding name for deferred `export { name }`.
    fn bind_top_level(&mut self, name: &str, idx: usize) {
        if self.scope_stack.is_empty() {
            self.top_level.entry(name.to_string()).or_insert(idx);
        }
    }

    fn export(&mut self, idx: usize, name: &str) {
        let record = &mut self.records[idx];
        if !record.is_exported {
            record.mark_exported(name);
        }
    }

    fn current_caller(&mut self) -> usize {
        if let Some(&idx) = self.scope_stack.last() {
            return idx;
        }
        match self.module_record {
            Some(idx) => idx,
            None => {
                let idx = self.records.len();
                self.records.push(FunctionRecord::module(self.path));
                self.module_record = Some(idx);
                idx
            }
        }
    }

    fn record_call(&mut self, callee: &Expression<'_>) {
        match callee.get_inner_expression() {
            Expression::Identifier(ident) => {
                if let Some(bound) = self.lookup(ident)
                    && bound.binding_type != BindingType::Namespace
                {
                    self.emit_call(ident.name.as_str(), bound.imported, None, bound.binding);
                }
            }
            Expression::StaticMemberExpression(member) => {
                if let Expression::Identifier(object) = member.object.get_inner_expression()
                    && let Some(bound) = self.lookup(object)
                    && bound.member_calls
                {
                    let name = member.property.name.to_string();
                    self.emit_call(object.name.as_str(), name.clone(), Some(name), bound.binding);
                }
            }
            _ => {}
        }
    }

    fn emit_call(&mut self, local: &str, imported: String, member: Option<String>, binding: usize) {
        let caller = self.current_caller();
        if !self
            .seen_calls
            .insert((caller, local.to_string(), member.clone()))
        {
            return;
        }
        let mut site = CallSite::new(self.records[caller].id.clone(), local);
        site.callee_imported_name = Some(imported);
        site.member_name = member;
        site.source_specifier = Some(self.imports[binding].source.clone());
        self.calls.push(site);
    }

    fn export_declaration(&mut self, declaration: &Declaration<'_>) {
        match declaration {
            Declaration::FunctionDeclaration(func) if func.body.is_some() => {
                if let Some(id) = &func.id {
                    let idx = self.register(func.span, Some(id.name.as_str()), FunctionKind::Function);
                    self.bind_top_level(id.name.as_str(), idx);
                    self.export(idx, id.name.as_str());
                }
            }
            Declaration::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    let idx = self.register(class.span, Some(id.name.as_str()), FunctionKind::Class);
                    self.bind_top_level(id.name.as_str(), idx);
                    self.export(idx, id.name.as_str());
                }
            }
            Declaration::VariableDeclaration(var) => {
                for decl in &var.declarations {
                    let BindingPatternKind::BindingIdentifier(ident) = &decl.id.kind else {
                        continue;
                    };
                    let Some((span, own, kind)) = decl.init.as_ref().and_then(function_like) else {
                        continue;
                    };
                    let idx = self.register(span, Some(own.unwrap_or(ident.name.as_str())), kind);
                    self.bind_top_level(ident.name.as_str(), idx);
                    self.export(idx, ident.name.as_str());
                }
            }
            _ => {}
        }
    }

    /// `module.exports = { a, b: function () {} }`
    fn export_object_members(&mut self, object: &ObjectExpression<'_>) {
        for prop in &object.properties {
            let ObjectPropertyKind::ObjectProperty(prop) = prop else {
                continue;
            };
            let Some(key) = property_key_name(&prop.key) else {
                continue;
            };
            let value = prop.value.get_inner_expression();
            if let Some((span, _, kind)) = function_like(value) {
                let idx = self.register(span, Some(key.as_str()), kind);
                self.export(idx, &key);
            } else if let Expression::Identifier(ident) = value {
                self.deferred_exports.push((ident.name.to_string(), key));
            }
        }
    }
}

impl<'a> Visit<'a> for FileVisitor<'_> {
    fn visit_function(&mut self, func: &Function<'a>, flags: ScopeFlags) {
        // Overload signatures and `declare function` have no body.
        if func.body.is_none() {
            walk::walk_function(self, func, flags);
            return;
        }

        let name = func.id.as_ref().map(|id| id.name.as_str());
        let idx = self.register(func.span, name, FunctionKind::Function);
        if func.is_declaration()
            && let Some(name) = name
        {
            self.bind_top_level(name, idx);
        }

        self.scope_stack.push(idx);
        walk::walk_function(self, func, flags);
        self.scope_stack.pop();
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        let idx = self.register(arrow.span, None, FunctionKind::Arrow);
        self.scope_stack.push(idx);
        walk::walk_arrow_function_expression(self, arrow);
        self.scope_stack.pop();
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        let name = class.id.as_ref().map(|id| id.name.as_str());
        let idx = self.register(class.span, name, FunctionKind::Class);
        if class.is_declaration()
            && let Some(name) = name
        {
            self.bind_top_level(name, idx);
        }

        self.class_stack.push(self.records[idx].display_name.clone());
        self.scope_stack.push(idx);
        walk::walk_class(self, class);
        self.scope_stack.pop();
        self.class_stack.pop();
    }

    fn visit_method_definition(&mut self, method: &MethodDefinition<'a>) {
        let class_name = self.class_stack.last().cloned().unwrap_or_default();
        let name = property_key_name(&method.key).map(|key| format!("{class_name}.{key}"));
        self.register(method.value.span, name.as_deref(), FunctionKind::Method);
        walk::walk_method_definition(self, method);
    }

    fn visit_property_definition(&mut self, prop: &PropertyDefinition<'a>) {
        if let Some(value) = &prop.value
            && let Some((span, _, kind)) = function_like(value.get_inner_expression())
            && let Some(key) = property_key_name(&prop.key)
        {
            let class_name = self.class_stack.last().cloned().unwrap_or_default();
            let name = format!("{class_name}.{key}");
            self.register(span, Some(name.as_str()), kind);
        }
        walk::walk_property_definition(self, prop);
    }

    fn visit_object_property(&mut self, prop: &ObjectProperty<'a>) {
        if let Some((span, own, kind)) = function_like(prop.value.get_inner_expression())
            && let Some(key) = property_key_name(&prop.key)
        {
            self.register(span, Some(own.unwrap_or(key.as_str())), kind);
        }
        walk::walk_object_property(self, prop);
    }

    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        if let BindingPatternKind::BindingIdentifier(ident) = &decl.id.kind
            && let Some((span, own, kind)) = decl.init.as_ref().and_then(function_like)
        {
            let idx = self.register(span, Some(own.unwrap_or(ident.name.as_str())), kind);
            self.bind_top_level(ident.name.as_str(), idx);
        }
        self.record_require_declarator(decl);
        walk::walk_variable_declarator(self, decl);
    }

    fn visit_assignment_expression(&mut self, assign: &AssignmentExpression<'a>) {
        let exported_as = commonjs_export_name(&assign.left);
        let right = assign.right.get_inner_expression();

        if let Some((span, own, kind)) = function_like(right) {
            let hint = match exported_as.as_deref() {
                Some("default") => None,
                _ => assignment_target_name(&assign.left),
            };
            let idx = self.register(span, own.or(hint), kind);
            if let Some(name) = &exported_as {
                self.export(idx, name);
            }
        } else if let Some(name) = exported_as {
            match right {
                Expression::Identifier(ident) => {
                    self.deferred_exports.push((ident.name.to_string(), name));
                }
                Expression::ObjectExpression(object) if name == "default" => {
                    self.export_object_members(object);
                }
                _ => {}
            }
        }

        walk::walk_assignment_expression(self, assign);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if decl.source.is_none() {
            if let Some(declaration) = &decl.declaration {
                self.export_declaration(declaration);
            }
            for spec in &decl.specifiers {
                self.deferred_exports
                    .push((module_export_name(&spec.local), module_export_name(&spec.exported)));
            }
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_default_declaration(&mut self, decl: &ExportDefaultDeclaration<'a>) {
        let exported = match &decl.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) if func.body.is_some() => {
                let name = func.id.as_ref().map(|id| id.name.as_str());
                let idx = self.register(func.span, name, FunctionKind::Function);
                if let Some(name) = name {
                    self.bind_top_level(name, idx);
                }
                Some(idx)
            }
            ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                let name = class.id.as_ref().map(|id| id.name.as_str());
                let idx = self.register(class.span, name, FunctionKind::Class);
                if let Some(name) = name {
                    self.bind_top_level(name, idx);
                }
                Some(idx)
            }
            ExportDefaultDeclarationKind::ArrowFunctionExpression(arrow) => {
                Some(self.register(arrow.span, None, FunctionKind::Arrow))
            }
            ExportDefaultDeclarationKind::FunctionExpression(func) => {
                let name = func.id.as_ref().map(|id| id.name.as_str());
                Some(self.register(func.span, name, FunctionKind::Function))
            }
            ExportDefaultDeclarationKind::ClassExpression(class) => {
                let name = class.id.as_ref().map(|id| id.name.as_str());
                Some(self.register(class.span, name, FunctionKind::Class))
            }
            ExportDefaultDeclarationKind::Identifier(ident) => {
                self.deferred_exports
                    .push((ident.name.to_string(), "default".to_string()));
                None
            }
            _ => None,
        };
        if let Some(idx) = exported {
            self.export(idx, "default");
        }
        walk::walk_export_default_declaration(self, decl);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        if let Expression::StringLiteral(lit) = &expr.source {
            self.imports
                .push(ImportBinding::new(lit.value.as_str(), ImportKind::Dynamic));
        }
        walk::walk_import_expression(self, expr);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Some((span, source)) = self.require_call_of(call)
            && self.recorded_requires.insert(span.start)
        {
            self.imports
                .push(ImportBinding::new(source, ImportKind::Require));
        }
        self.record_call(&call.callee);
        walk::walk_call_expression(self, call);
    }

    fn visit_new_expression(&mut self, expr: &NewExpression<'a>) {
        self.record_call(&expr.callee);
        walk::walk_new_expression(self, expr);
    }
}

/// Span, own identifier, and kind of a function, arrow, or class expression.
fn function_like<'e>(expr: &'e Expression<'_>) -> Option<(Span, Option<&'e str>, FunctionKind)> {
    match expr.get_inner_expression() {
        Expression::FunctionExpression(func) => Some((
            func.span,
            func.id.as_ref().map(|id| id.name.as_str()),
            FunctionKind::Function,
        )),
        Expression::ArrowFunctionExpression(arrow) => Some((arrow.span, None, FunctionKind::Arrow)),
        Expression::ClassExpression(class) => Some((
            class.span,
            class.id.as_ref().map(|id| id.name.as_str()),
            FunctionKind::Class,
        )),
        _ => None,
    }
}

fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::PrivateIdentifier(ident) => Some(format!("#{}", ident.name)),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

fn assignment_target_name<'e>(target: &'e AssignmentTarget<'_>) -> Option<&'e str> {
    match target {
        AssignmentTarget::AssignmentTargetIdentifier(ident) => Some(ident.name.as_str()),
        AssignmentTarget::StaticMemberExpression(member) => Some(member.property.name.as_str()),
        _ => None,
    }
}

/// Export name for `module.exports = ...`, `module.exports.x = ...`, `exports.x = ...`.
fn commonjs_export_name(target: &AssignmentTarget<'_>) -> Option<String> {
    let AssignmentTarget::StaticMemberExpression(member) = target else {
        return None;
    };
    let property = member.property.name.as_str();
    match member.object.get_inner_expression() {
        Expression::Identifier(object) if object.name == "module" && property == "exports" => {
            Some("default".to_string())
        }
        Expression::Identifier(object) if object.name == "exports" => Some(property.to_string()),
        Expression::StaticMemberExpression(inner)
            if inner.property.name == "exports"
                && matches!(
                    inner.object.get_inner_expression(),
                    Expression::Identifier(object) if object.name == "module"
                ) =>
        {
            Some(property.to_string())
        }
        _ => None,
    }
}
